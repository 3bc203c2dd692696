//! sdftoy host binary: window + GL context + frame loop.
//!
//! Everything interesting happens in `sdftoy-core` (watching, registry,
//! config) and `sdftoy-runtime-glow` (compile/link/swap). This file is the
//! platform glue: create the window and context, then per frame poll the
//! watched file, maybe rebuild, draw the fullscreen triangle with the active
//! program, and present.

use std::num::NonZeroU32;
use std::time::Instant;

use glow::HasContext;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use sdftoy_core::{ViewerConfig, ViewerError};
use sdftoy_runtime_glow::{
    apply_frame_uniforms, FrameInputs, FullscreenTriangle, ShaderGl, ShaderViewer,
};

fn main() {
    env_logger::init();

    let config = match ViewerConfig::from_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("sdftoy: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("sdftoy: {e}");
        std::process::exit(1);
    }
}

fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new();

    let window_builder = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height));

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(0)
        .with_stencil_size(0);

    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

    let (window, gl_config) = display_builder
        .build(&event_loop, template, |configs| {
            configs
                .reduce(|a, b| if a.num_samples() > b.num_samples() { a } else { b })
                .unwrap()
        })
        .map_err(|e| ViewerError::GlCreate(format!("DisplayBuilder.build: {e}")))?;

    let window = window
        .ok_or_else(|| ViewerError::GlCreate("DisplayBuilder did not create a window".into()))?;
    let gl_display = gl_config.display();
    let raw_window_handle = window.raw_window_handle();

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_window_handle));

    let not_current_gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .map_err(|e| ViewerError::GlCreate(format!("create_context: {e}")))?
    };

    let (width, height) = {
        let s = window.inner_size();
        (s.width.max(1), s.height.max(1))
    };

    let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(width).unwrap(),
        NonZeroU32::new(height).unwrap(),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &attrs)
            .map_err(|e| ViewerError::GlCreate(format!("create_window_surface: {e}")))?
    };

    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .map_err(|e| ViewerError::GlCreate(format!("make_current: {e}")))?;

    if config.window.vsync {
        if let Err(e) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
        {
            log::warn!("vsync unavailable: {e}");
        }
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            gl_display.get_proc_address(std::ffi::CString::new(s).unwrap().as_c_str()) as *const _
        })
    };

    let fs_tri = unsafe { FullscreenTriangle::new(&gl)? };

    let mut viewer: ShaderViewer<glow::Context> = ShaderViewer::new(&config.frag_path);
    viewer.bootstrap(&gl)?;
    log::info!("watching {}", config.frag_path.display());

    let start = Instant::now();
    let mut last_frame = start;
    let mut frame_index: u64 = 0;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,

                WindowEvent::Resized(physical_size) => {
                    let w = physical_size.width.max(1);
                    let h = physical_size.height.max(1);
                    gl_surface.resize(
                        &gl_context,
                        NonZeroU32::new(w).unwrap(),
                        NonZeroU32::new(h).unwrap(),
                    );
                    window.request_redraw();
                }

                _ => {}
            },

            Event::MainEventsCleared => window.request_redraw(),

            Event::RedrawRequested(_) => {
                // The event loop closure cannot return an error, so fatal
                // conditions (unreadable file, driver bug) end the process
                // here after logging.
                if let Err(e) = viewer.frame_prepare(&gl) {
                    log::error!("fatal: {e}");
                    std::process::exit(1);
                }

                let (w, h) = {
                    let s = window.inner_size();
                    (s.width.max(1), s.height.max(1))
                };

                let now = Instant::now();
                let inputs = FrameInputs {
                    width: w,
                    height: h,
                    time: start.elapsed().as_secs_f32(),
                    time_delta: now.duration_since(last_frame).as_secs_f32(),
                    frame: frame_index,
                };
                last_frame = now;
                frame_index += 1;

                unsafe {
                    gl.viewport(0, 0, w as i32, h as i32);
                    gl.clear_color(0.0, 0.0, 0.0, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                if let Some(program) = viewer.active() {
                    gl.bind_program(Some(program.handle()));
                    apply_frame_uniforms(&gl, program, &inputs);
                    unsafe {
                        fs_tri.draw(&gl);
                    }
                    gl.bind_program(None);
                }

                if let Err(e) = gl_surface.swap_buffers(&gl_context) {
                    log::error!("swap_buffers: {e}");
                    std::process::exit(1);
                }
            }

            _ => {}
        }
    });
}
