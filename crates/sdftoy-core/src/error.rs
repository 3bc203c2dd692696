use std::fmt;
use std::path::PathBuf;

use crate::Stage;

/// Viewer-level errors used across the sdftoy crates.
///
/// Recoverability is part of the contract: shader-authoring mistakes
/// (missing source, compile or link diagnostics) are recovered by the rebuild
/// orchestrator, which keeps the last good program on screen. Everything else
/// propagates to the single top-level handler in the host binary, which exits
/// non-zero.
#[derive(Debug)]
pub enum ViewerError {
    /// Bad or missing command-line input.
    Config(String),

    /// Watched file or config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config JSON did not parse.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A logical shader name was not present in the registry.
    ///
    /// Raised before any GPU call is made, so a dangling name never reaches
    /// the driver compiler.
    MissingSource { stage: Stage, name: String },

    /// Driver compile failure, with the full compiler log.
    Compile {
        stage: Stage,
        names: Vec<String>,
        log: String,
    },

    /// Driver link failure, with the full linker log.
    Link { log: String },

    /// Backend object creation failed (shader/program allocation).
    GlCreate(String),

    /// Unexpected GL error surfaced by a post-call check. Indicates a
    /// programming or context bug, not a user shader bug.
    Driver(String),
}

impl ViewerError {
    /// True for errors the orchestrator handles by substituting a fallback
    /// program and keeping the previous good one on screen.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ViewerError::MissingSource { .. } | ViewerError::Compile { .. } | ViewerError::Link { .. }
        )
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Config(msg) => write!(f, "config error: {msg}"),
            ViewerError::Io { path, source } => {
                write!(f, "io error at {}: {}", path.display(), source)
            }
            ViewerError::Json { path, source } => {
                write!(f, "json parse error at {}: {}", path.display(), source)
            }
            ViewerError::MissingSource { stage, name } => {
                write!(f, "{} shader source '{}' not in registry", stage.as_str(), name)
            }
            ViewerError::Compile { stage, names, log } => {
                write!(
                    f,
                    "{} shader compile error ({}):\n{}",
                    stage.as_str(),
                    names.join(" + "),
                    log
                )
            }
            ViewerError::Link { log } => write!(f, "program link error:\n{log}"),
            ViewerError::GlCreate(msg) => write!(f, "backend object creation failed: {msg}"),
            ViewerError::Driver(msg) => write!(f, "unexpected driver error: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Io { source, .. } => Some(source),
            ViewerError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
