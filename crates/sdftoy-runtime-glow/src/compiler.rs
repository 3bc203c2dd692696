use sdftoy_core::{ShaderRegistry, Stage, ViewerError};

use crate::backend::ShaderGl;
use crate::program::CompiledUnit;

/// Compiles the named sources, in order, into one per-stage unit.
///
/// Every name is resolved through the registry before the first driver call;
/// a missing name fails fast with [`ViewerError::MissingSource`] and zero GPU
/// work. On a driver compile failure the shader handle is deleted and the
/// full compiler log comes back in [`ViewerError::Compile`] — no partial
/// unit ever escapes.
pub fn compile_unit<G: ShaderGl>(
    gl: &G,
    registry: &ShaderRegistry,
    stage: Stage,
    names: &[&str],
) -> Result<CompiledUnit<G>, ViewerError> {
    let mut sources = Vec::with_capacity(names.len());
    for name in names {
        let src = registry.get(name).ok_or_else(|| ViewerError::MissingSource {
            stage,
            name: name.to_string(),
        })?;
        sources.push(src);
    }

    let shader = gl.new_shader(stage).map_err(ViewerError::GlCreate)?;
    gl.upload_sources(shader, &sources);

    if !gl.compile(shader) {
        let log = gl.compile_log(shader);
        gl.drop_shader(shader);
        return Err(ViewerError::Compile {
            stage,
            names: names.iter().map(|n| n.to_string()).collect(),
            log,
        });
    }

    if let Err(msg) = gl.check_driver() {
        gl.drop_shader(shader);
        return Err(ViewerError::Driver(msg));
    }

    Ok(CompiledUnit::new(
        stage,
        names.iter().map(|n| n.to_string()).collect(),
        shader,
    ))
}
