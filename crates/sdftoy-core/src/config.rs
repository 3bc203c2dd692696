use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ViewerError;

/// Window/presentation preferences.
///
/// Loadable from a small JSON file so the viewer can be reconfigured without
/// rebuilding; every field has a default matching the classic 640x480 toy
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "sdftoy".to_string(),
            vsync: true,
        }
    }
}

impl WindowConfig {
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ViewerError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Full startup configuration: the watched fragment path plus window prefs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub frag_path: PathBuf,
    pub window: WindowConfig,
}

impl ViewerConfig {
    /// Parses `[--config <json>] [--title <t>] [--window <WxH>] <frag-path>`.
    ///
    /// `args` is the argument list *without* the program name. Flag overrides
    /// are applied on top of the JSON config regardless of ordering.
    pub fn from_args<I>(args: I) -> Result<Self, ViewerError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut frag_path: Option<PathBuf> = None;
        let mut config_path: Option<PathBuf> = None;
        let mut title: Option<String> = None;
        let mut size: Option<(u32, u32)> = None;

        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" => {
                    let v = it
                        .next()
                        .ok_or_else(|| ViewerError::Config("--config needs a path".into()))?;
                    config_path = Some(PathBuf::from(v));
                }
                "--title" => {
                    let v = it
                        .next()
                        .ok_or_else(|| ViewerError::Config("--title needs a value".into()))?;
                    title = Some(v);
                }
                "--window" => {
                    let v = it
                        .next()
                        .ok_or_else(|| ViewerError::Config("--window needs WxH".into()))?;
                    size = Some(parse_window_size(&v)?);
                }
                other if other.starts_with("--") => {
                    return Err(ViewerError::Config(format!("unknown flag '{other}'")));
                }
                _ => {
                    if frag_path.replace(PathBuf::from(&arg)).is_some() {
                        return Err(ViewerError::Config(format!(
                            "unexpected extra argument '{arg}'"
                        )));
                    }
                }
            }
        }

        let frag_path = frag_path.ok_or_else(|| {
            ViewerError::Config("usage: sdftoy [--config <json>] [--title <t>] [--window <WxH>] <fragment-shader>".into())
        })?;

        let mut window = match config_path {
            Some(p) => WindowConfig::from_json_path(p)?,
            None => WindowConfig::default(),
        };
        if let Some(t) = title {
            window.title = t;
        }
        if let Some((w, h)) = size {
            window.width = w;
            window.height = h;
        }

        Ok(Self { frag_path, window })
    }
}

fn parse_window_size(s: &str) -> Result<(u32, u32), ViewerError> {
    let bad = || ViewerError::Config(format!("bad --window '{s}', expected e.g. 1280x720"));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(bad)?;
    let w: u32 = w.parse().map_err(|_| bad())?;
    let h: u32 = h.parse().map_err(|_| bad())?;
    if w == 0 || h == 0 {
        return Err(bad());
    }
    Ok((w, h))
}
