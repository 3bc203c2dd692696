use std::path::PathBuf;

use sdftoy_core::registry::names;
use sdftoy_core::{FileWatch, Poll, ShaderRegistry, Stage, ViewerError};

use crate::backend::ShaderGl;
use crate::compiler::compile_unit;
use crate::linker::link_program;
use crate::program::LinkedProgram;

/// What a frame's rebuild pass did, for host logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebuild {
    /// Watched file untouched; no driver work this frame.
    Unchanged,
    /// New program built and swapped in; predecessor released.
    Swapped,
    /// Build failed; the previous good program stays on screen.
    FailedKeptPrevious,
    /// Build failed with nothing on screen; solid-red fallback installed.
    FailedFallback,
}

/// Compiles and links a whole program from named per-stage source lists.
///
/// All-or-nothing: any failure releases whatever was built so far and
/// returns the error, so no handles leak out of a failed attempt.
pub fn build_program<G: ShaderGl>(
    gl: &G,
    registry: &ShaderRegistry,
    vertex_names: &[&str],
    fragment_names: &[&str],
) -> Result<LinkedProgram<G>, ViewerError> {
    let vertex = compile_unit(gl, registry, Stage::Vertex, vertex_names)?;
    let fragment = match compile_unit(gl, registry, Stage::Fragment, fragment_names) {
        Ok(unit) => unit,
        Err(err) => {
            vertex.release(gl);
            return Err(err);
        }
    };
    link_program(gl, vertex, fragment).map_err(|fail| fail.discard(gl))
}

/// The per-viewer context: registry, watcher, and the active-program slot.
///
/// One instance per viewer; nothing here is global, so tests (and future
/// multi-view hosts) can run several independently with injected backends.
#[derive(Debug)]
pub struct ShaderViewer<G: ShaderGl> {
    registry: ShaderRegistry,
    watch: FileWatch,
    active: Option<LinkedProgram<G>>,
}

impl<G: ShaderGl> ShaderViewer<G> {
    pub fn new(watched: impl Into<PathBuf>) -> Self {
        Self {
            registry: ShaderRegistry::with_builtins(),
            watch: FileWatch::new(watched),
            active: None,
        }
    }

    /// Builds and installs the built-in UV-debug program so the active slot
    /// is non-empty before the first frame. Failure here means the driver
    /// cannot even build the built-ins and is fatal to the host.
    pub fn bootstrap(&mut self, gl: &G) -> Result<(), ViewerError> {
        let program = build_program(
            gl,
            &self.registry,
            &[names::PASSTHROUGH_VERT],
            &[names::UV_DEBUG_FRAG],
        )?;
        self.install(gl, program);
        log::info!("bootstrap program ready");
        Ok(())
    }

    /// Once-per-frame step: poll the watched file and rebuild if it changed.
    ///
    /// Shader-authoring failures (compile/link/missing-source) are recovered
    /// here: the diagnostic is logged, the previous good program is kept, and
    /// only if the slot is empty the solid-red fallback is installed. IO and
    /// driver errors propagate to the host's top-level handler.
    pub fn frame_prepare(&mut self, gl: &G) -> Result<Rebuild, ViewerError> {
        match self.watch.poll(&mut self.registry)? {
            Poll::Unchanged => Ok(Rebuild::Unchanged),
            Poll::Changed => self.rebuild_live(gl),
        }
    }

    fn rebuild_live(&mut self, gl: &G) -> Result<Rebuild, ViewerError> {
        match build_program(
            gl,
            &self.registry,
            &[names::PASSTHROUGH_VERT],
            &[names::INTERFACE_FRAG, names::LIVE_FRAG],
        ) {
            Ok(program) => {
                self.install(gl, program);
                log::info!("live shader rebuilt from {}", self.watch.path().display());
                Ok(Rebuild::Swapped)
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("live shader rejected, keeping last good program\n{err}");
                if self.active.is_some() {
                    Ok(Rebuild::FailedKeptPrevious)
                } else {
                    let fallback = build_program(
                        gl,
                        &self.registry,
                        &[names::PASSTHROUGH_VERT],
                        &[names::FALLBACK_FRAG],
                    )?;
                    self.install(gl, fallback);
                    Ok(Rebuild::FailedFallback)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Atomic swap: the new program goes into the slot first, the previous
    /// one is released after, so the render step never sees an empty or
    /// half-swapped slot.
    fn install(&mut self, gl: &G, program: LinkedProgram<G>) {
        if let Some(old) = self.active.replace(program) {
            old.release(gl);
        }
    }

    /// The program the render step should draw with this frame.
    pub fn active(&self) -> Option<&LinkedProgram<G>> {
        self.active.as_ref()
    }

    pub fn registry(&self) -> &ShaderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShaderRegistry {
        &mut self.registry
    }

    /// Releases the active program. Safe to call repeatedly; the slot is
    /// simply empty afterwards.
    pub fn release(&mut self, gl: &G) {
        if let Some(program) = self.active.take() {
            program.release(gl);
        }
    }
}
