use std::collections::HashMap;

/// Logical names of the built-in source set plus the hot-reloaded entry.
///
/// Names are path-like on purpose: the original asset layout keyed sources by
/// their relative path under the shader directory, and diagnostics read
/// better with a directory-ish prefix.
pub mod names {
    /// Fullscreen passthrough vertex shader.
    pub const PASSTHROUGH_VERT: &str = "vert/passthrough";
    /// Shadertoy-style uniform preamble compiled in front of the live fragment.
    pub const INTERFACE_FRAG: &str = "frag/interface";
    /// Self-contained UV-color debug fragment (bootstrap program).
    pub const UV_DEBUG_FRAG: &str = "frag/uv-debug";
    /// Self-contained solid-red fragment, guaranteed to compile.
    pub const FALLBACK_FRAG: &str = "frag/fallback";
    /// The watched file's text, installed by the hot-reload watcher.
    pub const LIVE_FRAG: &str = "frag/live";
}

/// Uniform names of the Shadertoy-style frame interface.
pub mod uniforms {
    pub const RESOLUTION: &str = "iResolution";
    pub const GLOBAL_TIME: &str = "iGlobalTime";
    pub const TIME_DELTA: &str = "iTimeDelta";
    pub const FRAME: &str = "iFrame";
}

pub const PASSTHROUGH_VERT_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec2 a_uv;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

/// Declares the frame uniforms and the fragment output; the live fragment
/// supplies `main()`. Compiled as the first string of the fragment unit so
/// user line numbers stay aligned with driver diagnostics.
pub const INTERFACE_FRAG_SRC: &str = r#"#version 330 core
in vec2 v_uv;
out vec4 fragColor;
uniform vec3 iResolution;
uniform float iGlobalTime;
uniform float iTimeDelta;
uniform int iFrame;
"#;

pub const UV_DEBUG_FRAG_SRC: &str = r#"#version 330 core
in vec2 v_uv;
out vec4 fragColor;
void main() {
    vec2 uv = clamp(v_uv, 0.0, 1.0);
    fragColor = vec4(uv, 0.25, 1.0);
}
"#;

pub const FALLBACK_FRAG_SRC: &str = r#"#version 330 core
out vec4 fragColor;
void main() {
    fragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Mapping from logical shader name to source text.
///
/// Built-in entries are installed once at construction and never touched
/// afterwards; the live entry is overwritten by the watcher on every change.
/// `set` replaces the whole text for a key, so readers sequenced after it on
/// the same frame never observe a partial write.
#[derive(Debug, Default)]
pub struct ShaderRegistry {
    sources: HashMap<String, String>,
}

impl ShaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in source set (§ names).
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.set(names::PASSTHROUGH_VERT, PASSTHROUGH_VERT_SRC);
        reg.set(names::INTERFACE_FRAG, INTERFACE_FRAG_SRC);
        reg.set(names::UV_DEBUG_FRAG, UV_DEBUG_FRAG_SRC);
        reg.set(names::FALLBACK_FRAG, FALLBACK_FRAG_SRC);
        reg
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Inserts or overwrites the text under `name`.
    pub fn set(&mut self, name: &str, text: impl Into<String>) {
        self.sources.insert(name.to_string(), text.into());
    }
}
