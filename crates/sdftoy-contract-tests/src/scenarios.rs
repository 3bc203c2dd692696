//! End-to-end hot-reload scenarios: watched file on disk, fake driver,
//! real orchestrator.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sdftoy_core::registry::names;
use sdftoy_runtime_glow::{Rebuild, ShaderViewer};

use crate::fake_gl::FakeGl;

const GREEN_FRAG: &str = "void main() { fragColor = vec4(0.0, 1.0, 0.0, 1.0); }\n";
const BROKEN_FRAG: &str = "this is not glsl\n";

fn temp_frag(name: &str, contents: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    p.push(format!("sdftoy_scenario_{name}_{ts}.frag"));
    fs::write(&p, contents).expect("write fixture");
    p
}

/// Rewrites the watched file and forces a strictly newer mtime so the next
/// poll sees the change regardless of timestamp granularity.
fn rewrite(path: &Path, contents: &str, secs_forward: u64) {
    fs::write(path, contents).expect("rewrite fixture");
    let f = File::options().write(true).open(path).expect("open");
    f.set_modified(SystemTime::now() + Duration::from_secs(secs_forward))
        .expect("set_modified");
}

#[test]
fn bootstrap_then_first_poll_swaps_in_the_live_program() {
    let path = temp_frag("first_swap", GREEN_FRAG);
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    viewer.bootstrap(&gl).expect("builtin debug program must build");
    let bootstrap_handle = viewer.active().unwrap().handle();

    assert_eq!(viewer.frame_prepare(&gl).unwrap(), Rebuild::Swapped);

    let program = viewer.active().expect("live program active");
    assert_ne!(program.handle(), bootstrap_handle);
    assert_eq!(
        program.fragment().names(),
        &[names::INTERFACE_FRAG, names::LIVE_FRAG]
    );
    // Round-trip: the registry holds the file's bytes verbatim.
    assert_eq!(viewer.registry().get(names::LIVE_FRAG), Some(GREEN_FRAG));
    // The bootstrap program was released only after the swap.
    assert!(!gl.program_alive(bootstrap_handle));

    viewer.release(&gl);
    let _ = fs::remove_file(path);
}

#[test]
fn unchanged_polls_do_no_driver_work() {
    let path = temp_frag("unchanged", GREEN_FRAG);
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    viewer.bootstrap(&gl).unwrap();
    viewer.frame_prepare(&gl).unwrap();
    gl.clear_calls();

    assert_eq!(viewer.frame_prepare(&gl).unwrap(), Rebuild::Unchanged);
    assert_eq!(viewer.frame_prepare(&gl).unwrap(), Rebuild::Unchanged);
    assert!(gl.calls().is_empty(), "unchanged frame must be driver-silent");

    viewer.release(&gl);
    let _ = fs::remove_file(path);
}

#[test]
fn broken_rewrite_keeps_the_last_good_program() {
    let path = temp_frag("keep_good", GREEN_FRAG);
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    viewer.bootstrap(&gl).unwrap();
    viewer.frame_prepare(&gl).unwrap();
    let good_handle = viewer.active().unwrap().handle();
    let good_text = viewer.registry().get(names::LIVE_FRAG).unwrap().to_string();

    rewrite(&path, BROKEN_FRAG, 5);
    assert_eq!(
        viewer.frame_prepare(&gl).unwrap(),
        Rebuild::FailedKeptPrevious
    );

    // The visible program is untouched; the registry already holds the new
    // (broken) text, ready for the author's next save.
    let program = viewer.active().expect("still a valid program");
    assert_eq!(program.handle(), good_handle);
    assert!(gl.program_alive(good_handle));
    assert_ne!(viewer.registry().get(names::LIVE_FRAG).unwrap(), good_text);

    // A later fixed save swaps normally.
    rewrite(&path, GREEN_FRAG, 10);
    assert_eq!(viewer.frame_prepare(&gl).unwrap(), Rebuild::Swapped);
    assert_ne!(viewer.active().unwrap().handle(), good_handle);

    viewer.release(&gl);
    let _ = fs::remove_file(path);
}

#[test]
fn broken_first_build_installs_the_fallback() {
    let path = temp_frag("fallback", BROKEN_FRAG);
    let gl = FakeGl::new();
    // No bootstrap: the slot is empty when the first build fails.
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    assert_eq!(viewer.frame_prepare(&gl).unwrap(), Rebuild::FailedFallback);

    let program = viewer.active().expect("fallback must be installed");
    assert_eq!(program.fragment().names(), &[names::FALLBACK_FRAG]);

    viewer.release(&gl);
    let _ = fs::remove_file(path);
}

#[test]
fn swap_is_atomic_per_program_generation() {
    let path = temp_frag("atomic", GREEN_FRAG);
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    viewer.frame_prepare(&gl).unwrap();
    let first = viewer.active().unwrap();
    let first_units = (first.vertex().shader(), first.fragment().shader());
    let first_handle = first.handle();

    rewrite(&path, "void main() { fragColor = vec4(v_uv, 0.0, 1.0); }\n", 5);
    viewer.frame_prepare(&gl).unwrap();

    let second = viewer.active().unwrap();
    // The observable program is entirely the new build: fresh program handle
    // and both unit handles replaced together.
    assert_ne!(second.handle(), first_handle);
    assert_ne!(second.vertex().shader(), first_units.0);
    assert_ne!(second.fragment().shader(), first_units.1);
    // The superseded generation is fully gone.
    assert!(!gl.program_alive(first_handle));
    assert!(!gl.shader_alive(first_units.0));
    assert!(!gl.shader_alive(first_units.1));

    viewer.release(&gl);
    let _ = fs::remove_file(path);
}

#[test]
fn release_leaves_no_live_driver_objects() {
    let path = temp_frag("release", GREEN_FRAG);
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> = ShaderViewer::new(&path);

    viewer.bootstrap(&gl).unwrap();
    viewer.frame_prepare(&gl).unwrap();
    rewrite(&path, GREEN_FRAG, 5);
    viewer.frame_prepare(&gl).unwrap();

    viewer.release(&gl);
    viewer.release(&gl); // second release is a no-op

    assert_eq!(gl.live_programs(), 0);
    assert_eq!(gl.live_shaders(), 0);

    let _ = fs::remove_file(path);
}

#[test]
fn unreadable_watched_file_propagates_as_fatal() {
    let gl = FakeGl::new();
    let mut viewer: ShaderViewer<FakeGl> =
        ShaderViewer::new("/nonexistent/sdftoy/live.frag");

    let err = viewer.frame_prepare(&gl).expect_err("missing file is fatal");
    assert!(!err.is_recoverable());
    assert!(gl.calls().is_empty());
}
