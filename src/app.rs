//! Application event loop.
//!
//! Opens the window, sets up the GPU once and then redraws the hexagon on
//! every frame until the window is closed or ESC is pressed.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window and builds [`AppState`] (context + scene)
//! 2. every `RedrawRequested` clears, draws and presents, then asks for the next frame
//! 3. `Resized` reconfigures the surface to the new framebuffer size
//! 4. `CloseRequested` or ESC leaves the loop; resources drop with the state

use std::{
    fmt::Debug,
    iter,
    sync::{Arc, Once},
};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    context::Context,
    input::{Action, action_for_key},
    render::{Scene, SurfaceErrorAction, surface_error_action},
    settings::Settings,
    timing::FrameStats,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// GPU context plus everything drawn with it.
#[derive(Debug)]
pub struct AppState {
    pub ctx: Context,
    pub scene: Scene,
    is_surface_configured: bool,
    stats: FrameStats,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: Settings) -> anyhow::Result<Self> {
        let ctx = Context::new(window, &settings).await?;
        let scene = Scene::new(&ctx.device, ctx.format(), &settings);
        Ok(Self {
            ctx,
            scene,
            is_surface_configured: false,
            stats: FrameStats::default(),
        })
    }

    /// Matches the surface to the framebuffer size. A zero-sized window
    /// (minimised) leaves the surface untouched.
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
            self.is_surface_configured = true;
            log::debug!("surface resized to {}x{}", width, height);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // keep the loop running
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.scene.draw(&mut encoder, &view, self.ctx.clear_colour);
        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.stats.tick() {
            log::debug!("{:.1} fps", fps);
        }
        Ok(())
    }
}

pub(crate) enum AppEvent {
    #[allow(dead_code)]
    Initialized(anyhow::Result<AppState>),
}

impl Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok)"),
            Self::Initialized(Err(e)) => write!(f, "Initialized(Err({e}))"),
        }
    }
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    settings: Settings,
    state: Option<AppState>,
    // Set when start-up failed; `run` hands it back to the caller.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>, settings: Settings) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            settings,
            state: None,
            error: None,
        })
    }

    fn initialized(&mut self, event_loop: &ActiveEventLoop, state: anyhow::Result<AppState>) {
        match state {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to initialize the renderer: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let init_future = AppState::new(window, self.settings.clone());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let state = self.async_runtime.block_on(init_future);
            self.initialized(event_loop, state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = init_future.await;
                assert!(proxy.send_event(AppEvent::Initialized(state)).is_ok());
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            AppEvent::Initialized(state) => self.initialized(event_loop, state),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(Action::Close) = action_for_key(event.physical_key, event.state) {
                    log::info!("escape pressed, closing");
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => (),
                Err(e) => match surface_error_action(&e) {
                    SurfaceErrorAction::Reconfigure => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    SurfaceErrorAction::SkipFrame => log::warn!("Skipping frame: {}", e),
                    SurfaceErrorAction::Fatal => {
                        log::error!("Unable to render {}", e);
                        event_loop.exit();
                    }
                },
            },
            _ => {}
        }
    }
}

static LOGGING: Once = Once::new();

/// Installs the logger. Safe to call more than once; only the first call counts.
pub fn init_logging() {
    LOGGING.call_once(init_logger);
}

fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        if let Err(e) = env_logger::Builder::from_env(env).try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }
}

/// Opens the window and renders until it is closed.
///
/// Returns an error when the event loop, the window or the GPU could not be
/// set up. Shader problems are logged and do not end up here.
pub fn run(settings: Settings) -> anyhow::Result<()> {
    init_logging();
    log::info!("starting {:?} at {}x{}", settings.title, settings.width, settings.height);

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, settings)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    run(Settings::default()).map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}
