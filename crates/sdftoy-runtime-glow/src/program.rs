use std::collections::HashMap;

use sdftoy_core::Stage;

use crate::backend::{AttributeInfo, ShaderGl};

/// One compiled per-stage unit: the driver handle plus the ordered logical
/// names whose sources were concatenated to produce it.
#[derive(Debug)]
pub struct CompiledUnit<G: ShaderGl> {
    stage: Stage,
    names: Vec<String>,
    shader: G::Shader,
}

impl<G: ShaderGl> CompiledUnit<G> {
    pub(crate) fn new(stage: Stage, names: Vec<String>, shader: G::Shader) -> Self {
        Self {
            stage,
            names,
            shader,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Concatenation order, as given to the compiler.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn shader(&self) -> G::Shader {
        self.shader
    }

    /// Deletes the driver handle. Consuming `self` makes a double release
    /// unrepresentable, so no released-flag or sentinel handle is needed.
    pub fn release(self, gl: &G) {
        gl.drop_shader(self.shader);
    }
}

/// A successfully linked program with its introspection tables.
///
/// Owns its two units exclusively; releasing the program releases them.
/// Constructed only by the linker on full success, so any reachable value is
/// fully valid: there is no half-linked state to observe.
#[derive(Debug)]
pub struct LinkedProgram<G: ShaderGl> {
    program: G::Program,
    vertex: CompiledUnit<G>,
    fragment: CompiledUnit<G>,
    uniforms: HashMap<String, G::UniformLocation>,
    attributes: HashMap<String, AttributeInfo>,
}

impl<G: ShaderGl> LinkedProgram<G> {
    pub(crate) fn new(
        program: G::Program,
        vertex: CompiledUnit<G>,
        fragment: CompiledUnit<G>,
        uniforms: HashMap<String, G::UniformLocation>,
        attributes: HashMap<String, AttributeInfo>,
    ) -> Self {
        Self {
            program,
            vertex,
            fragment,
            uniforms,
            attributes,
        }
    }

    pub fn handle(&self) -> G::Program {
        self.program
    }

    pub fn vertex(&self) -> &CompiledUnit<G> {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledUnit<G> {
        &self.fragment
    }

    /// True if the driver kept `name` as an active uniform. Names optimized
    /// out by the compiler are simply absent.
    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    pub fn uniform(&self, name: &str) -> Option<&G::UniformLocation> {
        self.uniforms.get(name)
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.keys().map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.get(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Deletes the program handle and both owned units.
    pub fn release(self, gl: &G) {
        gl.drop_program(self.program);
        self.vertex.release(gl);
        self.fragment.release(gl);
    }
}
