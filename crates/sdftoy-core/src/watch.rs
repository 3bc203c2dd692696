use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::registry::names;
use crate::{ShaderRegistry, ViewerError};

/// Outcome of a per-frame poll of the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// The file changed; its full text is now installed in the registry
    /// under [`names::LIVE_FRAG`].
    Changed,
    /// Nothing to do this frame.
    Unchanged,
}

/// Mtime-polling watcher for the live fragment source.
///
/// One `stat` per frame; the file body is only read when the modification
/// timestamp moved. `last_seen` starts as "never observed" so the first poll
/// always reads and installs the file.
#[derive(Debug)]
pub struct FileWatch {
    path: PathBuf,
    last_seen: Option<SystemTime>,
}

impl FileWatch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_seen: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Polls the watched file and installs changed text into `registry`.
    ///
    /// `last_seen` is updated only after the whole file has been read, so a
    /// failed read leaves both the watch state and the previously installed
    /// source untouched and a later poll retries. An unreadable file is an
    /// [`ViewerError::Io`]; the viewer cannot run without its primary source.
    pub fn poll(&mut self, registry: &mut ShaderRegistry) -> Result<Poll, ViewerError> {
        let mtime = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|source| ViewerError::Io {
                path: self.path.clone(),
                source,
            })?;

        if self.last_seen == Some(mtime) {
            return Ok(Poll::Unchanged);
        }

        let text = fs::read_to_string(&self.path).map_err(|source| ViewerError::Io {
            path: self.path.clone(),
            source,
        })?;

        registry.set(names::LIVE_FRAG, text);
        self.last_seen = Some(mtime);
        log::debug!("installed {} as {}", self.path.display(), names::LIVE_FRAG);
        Ok(Poll::Changed)
    }
}
