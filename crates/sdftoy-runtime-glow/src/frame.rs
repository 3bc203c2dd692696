use sdftoy_core::registry::uniforms;

use crate::backend::ShaderGl;
use crate::program::LinkedProgram;

/// Per-frame values supplied by the host's render loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Framebuffer size in pixels.
    pub width: u32,
    pub height: u32,
    /// Seconds since process start, monotonic.
    pub time: f32,
    /// Previous frame duration in seconds.
    pub time_delta: f32,
    /// Monotonically increasing frame index.
    pub frame: u64,
}

/// Applies the Shadertoy-style frame uniforms to the bound program.
///
/// Each uniform is set only when the program's table actually has it; a live
/// shader that ignores `iFrame` simply gets no call for it. The caller must
/// have bound `program` already.
pub fn apply_frame_uniforms<G: ShaderGl>(
    gl: &G,
    program: &LinkedProgram<G>,
    inputs: &FrameInputs,
) {
    if let Some(loc) = program.uniform(uniforms::RESOLUTION) {
        gl.set_uniform_vec3(loc, inputs.width as f32, inputs.height as f32, 1.0);
    }
    if let Some(loc) = program.uniform(uniforms::GLOBAL_TIME) {
        gl.set_uniform_f32(loc, inputs.time);
    }
    if let Some(loc) = program.uniform(uniforms::TIME_DELTA) {
        gl.set_uniform_f32(loc, inputs.time_delta);
    }
    if let Some(loc) = program.uniform(uniforms::FRAME) {
        gl.set_uniform_i32(loc, inputs.frame as i32);
    }
}
