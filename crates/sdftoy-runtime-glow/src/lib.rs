//! Shader machine runtime for the sdftoy viewer.
//!
//! This crate contains only program management: compiling named source
//! fragments into per-stage units, linking and introspecting programs,
//! swapping the active program on hot reload, and applying the per-frame
//! uniform contract. Windowing, file IO policy and the event loop live in
//! the host binary; the file watcher and registry live in `sdftoy-core`.
//!
//! All driver access goes through the narrow [`ShaderGl`] trait so the whole
//! machine can be exercised against a recording fake (see
//! `sdftoy-contract-tests`). The real backend is [`glow::Context`].
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

mod backend;
mod compiler;
mod frame;
mod fs_tri;
mod glow_backend;
mod linker;
mod program;
mod viewer;

pub use backend::{AttributeInfo, ShaderGl};
pub use compiler::compile_unit;
pub use frame::{apply_frame_uniforms, FrameInputs};
pub use fs_tri::FullscreenTriangle;
pub use linker::{link_program, LinkFailure};
pub use program::{CompiledUnit, LinkedProgram};
pub use viewer::{build_program, Rebuild, ShaderViewer};

pub use sdftoy_core::ViewerError;
