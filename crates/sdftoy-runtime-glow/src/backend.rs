use std::fmt::Debug;

use sdftoy_core::Stage;

/// An active vertex attribute as reported by program introspection.
///
/// `ty` is the raw driver type enum (e.g. `GL_FLOAT_VEC2`); the viewer only
/// stores it for display, it never switches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    pub location: u32,
    /// Array size as reported by the driver (1 for non-arrays).
    pub size: i32,
    pub ty: u32,
}

impl AttributeInfo {
    /// Component count derived from the type tag (vec2 -> 2, scalar -> 1).
    pub fn components(&self) -> u32 {
        match self.ty {
            0x8B50 => 2, // GL_FLOAT_VEC2
            0x8B51 => 3, // GL_FLOAT_VEC3
            0x8B52 => 4, // GL_FLOAT_VEC4
            _ => 1,
        }
    }
}

/// The handful of driver operations the shader machine needs.
///
/// Deliberately narrow: just enough to compile, link, introspect and feed a
/// program. The production implementation is [`glow::Context`]; contract
/// tests implement it with a scripted recording fake. Method names avoid
/// colliding with `glow::HasContext` so both traits can sit in one scope.
pub trait ShaderGl {
    type Shader: Copy + Eq + Debug;
    type Program: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    fn new_shader(&self, stage: Stage) -> Result<Self::Shader, String>;

    /// Hands the ordered source strings of one unit to the driver compiler.
    ///
    /// Backends whose API takes a single string must join with `\n` so line
    /// numbers in diagnostics stay aligned with the concatenation order.
    fn upload_sources(&self, shader: Self::Shader, sources: &[&str]);

    /// Runs the driver compiler; returns the compile status.
    fn compile(&self, shader: Self::Shader) -> bool;
    fn compile_log(&self, shader: Self::Shader) -> String;
    fn drop_shader(&self, shader: Self::Shader);

    fn new_program(&self) -> Result<Self::Program, String>;
    fn attach(&self, program: Self::Program, shader: Self::Shader);

    /// Runs the driver linker; returns the link status.
    fn link(&self, program: Self::Program) -> bool;
    fn link_log(&self, program: Self::Program) -> String;
    fn drop_program(&self, program: Self::Program);

    /// Enumerates active uniforms resolved to real locations.
    ///
    /// Only names the driver kept after dead-code elimination appear; a
    /// declared-but-unused uniform is absent, not location 0.
    fn active_uniforms(&self, program: Self::Program)
        -> Vec<(String, Self::UniformLocation)>;
    fn active_attributes(&self, program: Self::Program) -> Vec<(String, AttributeInfo)>;

    fn bind_program(&self, program: Option<Self::Program>);
    fn set_uniform_f32(&self, location: &Self::UniformLocation, v: f32);
    fn set_uniform_vec3(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn set_uniform_i32(&self, location: &Self::UniformLocation, v: i32);

    /// Post-call error check. A pending driver error here means a state bug
    /// in the viewer itself, so callers treat it as fatal.
    fn check_driver(&self) -> Result<(), String>;
}
