use std::collections::HashMap;

use sdftoy_core::ViewerError;

use crate::backend::ShaderGl;
use crate::program::{CompiledUnit, LinkedProgram};

/// A failed link. The program handle is already deleted, but ownership of
/// both units returns to the caller, who decides whether to retry with other
/// sources or release them.
#[derive(Debug)]
pub struct LinkFailure<G: ShaderGl> {
    pub vertex: CompiledUnit<G>,
    pub fragment: CompiledUnit<G>,
    pub error: ViewerError,
}

impl<G: ShaderGl> LinkFailure<G> {
    fn new(vertex: CompiledUnit<G>, fragment: CompiledUnit<G>, error: ViewerError) -> Self {
        Self {
            vertex,
            fragment,
            error,
        }
    }

    /// Gives up on both units and keeps only the error.
    pub fn discard(self, gl: &G) -> ViewerError {
        self.vertex.release(gl);
        self.fragment.release(gl);
        self.error
    }
}

/// Links one vertex and one fragment unit into an executable program and
/// introspects it.
///
/// On success the returned [`LinkedProgram`] owns both units and carries the
/// uniform and attribute tables, populated exactly once from the driver's
/// active sets. Unused variables the driver eliminated are absent from the
/// tables; looking them up yields `None`, never a default location.
pub fn link_program<G: ShaderGl>(
    gl: &G,
    vertex: CompiledUnit<G>,
    fragment: CompiledUnit<G>,
) -> Result<LinkedProgram<G>, LinkFailure<G>> {
    let program = match gl.new_program() {
        Ok(p) => p,
        Err(msg) => {
            return Err(LinkFailure::new(
                vertex,
                fragment,
                ViewerError::GlCreate(msg),
            ))
        }
    };

    gl.attach(program, vertex.shader());
    gl.attach(program, fragment.shader());

    if !gl.link(program) {
        let log = gl.link_log(program);
        gl.drop_program(program);
        return Err(LinkFailure::new(vertex, fragment, ViewerError::Link { log }));
    }

    let uniforms: HashMap<_, _> = gl.active_uniforms(program).into_iter().collect();
    let attributes: HashMap<_, _> = gl.active_attributes(program).into_iter().collect();

    if let Err(msg) = gl.check_driver() {
        gl.drop_program(program);
        return Err(LinkFailure::new(vertex, fragment, ViewerError::Driver(msg)));
    }

    Ok(LinkedProgram::new(
        program, vertex, fragment, uniforms, attributes,
    ))
}
