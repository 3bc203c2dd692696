//! [`ShaderGl`] implemented on a real [`glow::Context`].
//!
//! The host must keep the GL context current on the calling thread for the
//! whole lifetime of the viewer; the unsafety of the raw calls is contained
//! here under that contract.

use glow::HasContext;

use sdftoy_core::Stage;

use crate::backend::{AttributeInfo, ShaderGl};

fn stage_type(stage: Stage) -> u32 {
    match stage {
        Stage::Vertex => glow::VERTEX_SHADER,
        Stage::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl ShaderGl for glow::Context {
    type Shader = glow::NativeShader;
    type Program = glow::NativeProgram;
    type UniformLocation = glow::NativeUniformLocation;

    fn new_shader(&self, stage: Stage) -> Result<Self::Shader, String> {
        unsafe { self.create_shader(stage_type(stage)) }
    }

    fn upload_sources(&self, shader: Self::Shader, sources: &[&str]) {
        // glow exposes the single-string form of glShaderSource; join with
        // newlines so diagnostics line up with the concatenation order.
        let joined = sources.join("\n");
        unsafe { self.shader_source(shader, &joined) }
    }

    fn compile(&self, shader: Self::Shader) -> bool {
        unsafe {
            self.compile_shader(shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn compile_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn drop_shader(&self, shader: Self::Shader) {
        unsafe { self.delete_shader(shader) }
    }

    fn new_program(&self) -> Result<Self::Program, String> {
        unsafe { self.create_program() }
    }

    fn attach(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.attach_shader(program, shader) }
    }

    fn link(&self, program: Self::Program) -> bool {
        unsafe {
            self.link_program(program);
            self.get_program_link_status(program)
        }
    }

    fn link_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn drop_program(&self, program: Self::Program) {
        unsafe { self.delete_program(program) }
    }

    fn active_uniforms(&self, program: Self::Program) -> Vec<(String, Self::UniformLocation)> {
        let mut out = Vec::new();
        unsafe {
            let count = self.get_active_uniforms(program);
            for i in 0..count {
                let Some(u) = self.get_active_uniform(program, i) else {
                    continue;
                };
                // Array uniforms come back as "name[0]"; the frame interface
                // has none, so store the name as reported.
                if let Some(loc) = self.get_uniform_location(program, &u.name) {
                    out.push((u.name, loc));
                }
            }
        }
        out
    }

    fn active_attributes(&self, program: Self::Program) -> Vec<(String, AttributeInfo)> {
        let mut out = Vec::new();
        unsafe {
            let count = self.get_active_attributes(program);
            for i in 0..count {
                let Some(a) = self.get_active_attribute(program, i) else {
                    continue;
                };
                let Some(location) = self.get_attrib_location(program, &a.name) else {
                    continue;
                };
                out.push((
                    a.name,
                    AttributeInfo {
                        location,
                        size: a.size,
                        ty: a.atype,
                    },
                ));
            }
        }
        out
    }

    fn bind_program(&self, program: Option<Self::Program>) {
        unsafe { self.use_program(program) }
    }

    fn set_uniform_f32(&self, location: &Self::UniformLocation, v: f32) {
        unsafe { self.uniform_1_f32(Some(location), v) }
    }

    fn set_uniform_vec3(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { self.uniform_3_f32(Some(location), x, y, z) }
    }

    fn set_uniform_i32(&self, location: &Self::UniformLocation, v: i32) {
        unsafe { self.uniform_1_i32(Some(location), v) }
    }

    fn check_driver(&self) -> Result<(), String> {
        let code = unsafe { self.get_error() };
        if code == glow::NO_ERROR {
            Ok(())
        } else {
            Err(format!("glGetError reported 0x{code:x}"))
        }
    }
}
