use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::PBError;
use gl_wrapper::LoadError;

use triangles::config::{DemoConfig, LoaderError};
use triangles::pacing::FramePacer;
use triangles::shader_source::SourceError;
use triangles::DemoKind;

use crate::demo::Demo;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl App {
    pub fn new(config: &DemoConfig, kind: DemoKind) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                config.window.width,
                config.window.height,
            )))
            .with_title(config.title(kind));
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let requested_samples = config.window.samples;
        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // glutin reports a missing config as an error before calling the picker
                closest_sample_count(configs, requested_samples, |c| c.num_samples())
                    .expect("config iterator is never empty")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or(AppError::NoWindow)?;

        log::info!(
            "window {}x{}, GL config with {} samples",
            config.window.width,
            config.window.height,
            gl_config.num_samples()
        );

        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .map_err(AppError::Context)?;

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = not_current
            .make_current(&gl_window.surface)
            .map_err(AppError::Context)?;

        gl_wrapper::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
            Err(_) => std::ptr::null(),
        })?;

        if let Some(version) = gl_wrapper::version_string() {
            log::info!("OpenGL {version}");
        }

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
        })
    }

    pub fn run(self, demo: Demo, frame_interval: Duration) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
        } = self;

        let mut demo = Some(demo);
        let mut pacer = FramePacer::new(Instant::now(), frame_interval);

        event_loop.run(move |event, _window_target, control_flow| match event {
            Event::MainEventsCleared => {
                if let ControlFlow::ExitWithCode(_) = control_flow {
                    return;
                }

                match demo.as_ref().filter(|d| d.is_animated()) {
                    Some(_) => {
                        if pacer.poll(Instant::now()) {
                            gl_window.window.request_redraw();
                        }
                        control_flow.set_wait_until(pacer.next_frame());
                    }
                    None => control_flow.set_wait(),
                }
            }
            Event::RedrawRequested(_) => {
                if let Some(demo) = demo.as_mut() {
                    demo.render();

                    match gl_window.surface.swap_buffers(&gl_context) {
                        Ok(()) => {
                            if pacer.presented() {
                                demo.advance();
                            }
                        }
                        Err(e) => {
                            log::error!("could not present frame: {e}");
                            control_flow.set_exit_with_code(1);
                        }
                    }
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    if let (Some(width), Some(height)) =
                        (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                    {
                        gl_window.surface.resize(&gl_context, width, height);
                        if let Some(demo) = demo.as_mut() {
                            demo.resize(size.width, size.height);
                        }
                        gl_window.window.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    log::info!("escape pressed, closing");
                    control_flow.set_exit();
                }
                WindowEvent::CloseRequested => {
                    log::info!("window closed");
                    control_flow.set_exit();
                }
                _ => (),
            },
            Event::LoopDestroyed => {
                // GL objects go first, the context is still current here
                drop(demo.take());
                log::info!("released GPU resources");
            }
            _ => (),
        })
    }
}

/// Picks the item whose sample count is nearest to `requested`, preferring the first on ties.
pub fn closest_sample_count<T, I, F>(items: I, requested: u8, samples: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> u8,
{
    let mut best: Option<(u8, T)> = None;

    for item in items {
        let distance = samples(&item).abs_diff(requested);

        match &best {
            Some((best_distance, _)) if *best_distance <= distance => {}
            _ => best = Some((distance, item)),
        }
    }

    best.map(|(_, item)| item)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let (width, height) = NonZeroU32::new(width)
            .zip(NonZeroU32::new(height))
            .ok_or(AppError::ZeroSizedWindow)?;

        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            width,
            height,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs) }
            .map_err(AppError::Surface)?;

        Ok(Self { surface, window })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to open window: {0}")]
    Window(String),
    #[error("window system did not create a window")]
    NoWindow,
    #[error("window has zero size")]
    ZeroSizedWindow,
    #[error("failed to create an OpenGL 3.3 core context: {0}")]
    Context(glutin::error::Error),
    #[error("failed to create window surface: {0}")]
    Surface(glutin::error::Error),
    #[error(transparent)]
    Loader(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] LoaderError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("cannot build program from {vertex:?} and {fragment:?}: {source}")]
    Program {
        vertex: PathBuf,
        fragment: PathBuf,
        source: PBError,
    },
    #[error(transparent)]
    Geometry(#[from] GBError),
}
