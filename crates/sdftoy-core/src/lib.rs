#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

//! GL-free policy layer of the sdftoy viewer.
//!
//! This crate holds everything that does not need a GPU: the error taxonomy,
//! viewer configuration, the named shader-source registry (with the built-in
//! source set), and the mtime-polling hot-reload watcher. All of it is
//! testable without a window or a driver; the GL-facing machinery lives in
//! `sdftoy-runtime-glow`.

pub mod config;
pub mod error;
pub mod registry;
pub mod watch;

pub use config::{ViewerConfig, WindowConfig};
pub use error::ViewerError;
pub use registry::{names, uniforms, ShaderRegistry};
pub use watch::{FileWatch, Poll};

/// GPU pipeline phase a compiled shader unit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}
