#![forbid(unsafe_code)]

//! Contract tests for the sdftoy shader machine.
//!
//! Everything here runs against [`fake_gl::FakeGl`], a scripted recording
//! implementation of the `ShaderGl` backend: no window, no driver. The fake
//! behaves like a miniature GLSL toolchain (compiles anything with a `main`,
//! keeps only referenced uniforms active) so the tests can assert the exact
//! call traffic the real driver would see.



#[cfg(test)]
mod scenarios;
