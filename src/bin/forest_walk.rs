//! Forest Walk - Third-Person Viewer
//!
//! Run with: `cargo run --bin forest_walk [config.json]`
//!
//! Controls:
//! - WASD / Arrow keys: Walk
//! - R: Bring the character back in front of the camera
//! - ESC: Exit
//!
//! Browser (wasm): build with `cargo build --bin forest_walk --target wasm32-unknown-unknown`,
//! then run `wasm-bindgen` and serve.

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use forest_walk_engine::animation::{AnimationSwitch, ClipPlayer, ProceduralClips};
use forest_walk_engine::render::{GpuContext, GpuContextConfig, SceneRenderer, view_projection};
use forest_walk_engine::{
    AppConfig, ConfigError, FrameDriver, FrameOutcome, InputTracker, KeyCode, KeyEvent,
    KeyEventHub, Scene,
};

/// GPU context finished asynchronously in the browser.
#[cfg(target_arch = "wasm32")]
struct GpuReady(Result<GpuContext, forest_walk_engine::render::RenderError>);

#[cfg(target_arch = "wasm32")]
type UserEvent = GpuReady;
#[cfg(not(target_arch = "wasm32"))]
type UserEvent = ();

struct ForestWalkApp {
    config: AppConfig,
    scene: Scene,
    hub: KeyEventHub,
    driver: FrameDriver,
    clips: ProceduralClips,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<SceneRenderer>,
    start: Instant,
    #[cfg(target_arch = "wasm32")]
    proxy: Option<winit::event_loop::EventLoopProxy<GpuReady>>,
}

impl ForestWalkApp {
    fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let scene = Scene::from_config(&config.scene)?;
        let hub = KeyEventHub::new();

        let mut clips = ProceduralClips::new(scene.walk_clip.clone());
        for (prop, clip) in scene.looping_clips() {
            info!(prop = ?prop.kind, clip, "looping clip");
            clips.play(clip);
        }

        let driver = FrameDriver::new(&config.controls, InputTracker::attach(&hub)).with_animation(
            AnimationSwitch::new(scene.walk_clip.clone(), scene.idle_clip.clone()),
        );

        Ok(Self {
            config,
            scene,
            hub,
            driver,
            clips,
            window: None,
            gpu: None,
            renderer: None,
            start: Instant::now(),
            #[cfg(target_arch = "wasm32")]
            proxy: None,
        })
    }

    fn window_attributes(&self) -> WindowAttributes {
        let window = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window.title.clone())
            .with_inner_size(PhysicalSize::new(window.width, window.height));

        #[cfg(target_arch = "wasm32")]
        let attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            attrs.with_append(true)
        };

        attrs
    }

    fn gpu_config(&self) -> GpuContextConfig {
        GpuContextConfig {
            vsync: self.config.window.vsync,
            ..Default::default()
        }
    }

    /// Build GPU resources and place the character. Frames before this are
    /// skipped by the driver.
    fn attach_gpu(&mut self, gpu: GpuContext) {
        let renderer = SceneRenderer::new(&gpu, &self.scene);
        self.driver.spawn(
            self.scene.character_spawn,
            self.config.camera.initial_state(),
            &mut self.clips,
        );
        info!(size = ?gpu.dimensions(), format = ?gpu.format(), "renderer ready");

        if let Some(window) = &self.window {
            window.request_redraw();
        }
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
    }

    fn handle_key(
        &mut self,
        event_loop: &ActiveEventLoop,
        key: KeyCode,
        pressed: bool,
        repeat: bool,
    ) {
        if pressed && !repeat {
            match key {
                KeyCode::Escape => {
                    event_loop.exit();
                    return;
                }
                KeyCode::R => {
                    if let Some(anchor) = self.driver.recenter_character() {
                        info!(position = ?anchor, "character recentered");
                    }
                }
                _ => {}
            }
        }

        self.hub.dispatch(if pressed {
            KeyEvent::down(key)
        } else {
            KeyEvent::up(key)
        });
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed = self.start.elapsed().as_secs_f64();
        if let FrameOutcome::Advanced(report) = self.driver.tick(elapsed, &mut self.clips) {
            self.clips.advance(report.delta_seconds);
        }

        let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_mut()) else {
            return;
        };
        let (Some(character), Some(camera)) = (self.driver.character(), self.driver.camera())
        else {
            return;
        };

        renderer.update_character(&gpu.queue, character, self.clips.bob_offset());
        let view_proj = view_projection(camera, &self.config.camera, gpu.aspect_ratio());

        match renderer.render(gpu, view_proj, camera.position) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(err) => warn!(%err, "dropped frame"),
        }
    }
}

impl ApplicationHandler<UserEvent> for ForestWalkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!(%err, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        #[cfg(not(target_arch = "wasm32"))]
        {
            match GpuContext::new(window, self.gpu_config()) {
                Ok(gpu) => self.attach_gpu(gpu),
                Err(err) => {
                    error!(%err, "GPU initialization failed");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            // Adapter and device requests are async in the browser. The
            // context is handed back through a user event.
            let Some(proxy) = self.proxy.clone() else {
                error!("no event loop proxy");
                return;
            };
            let config = self.gpu_config();
            spawn_local(async move {
                let result = GpuContext::new_async(window, config).await;
                if proxy.send_event(GpuReady(result)).is_err() {
                    warn!("event loop closed before the GPU was ready");
                }
            });
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: GpuReady) {
        match event.0 {
            Ok(gpu) => self.attach_gpu(gpu),
            Err(err) => {
                error!(%err, "GPU initialization failed");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(
                        event_loop,
                        KeyCode::from(code),
                        event.state == ElementState::Pressed,
                        event.repeat,
                    );
                }
            }
            // Key-up events are lost while unfocused
            WindowEvent::Focused(false) => self.driver.input().release_all(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = ForestWalkApp::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    init_tracing();
    info!("Forest Walk: WASD/arrows walk, R recenters, ESC exits");

    if let Err(err) = run() {
        error!(%err, "fatal");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    use winit::platform::web::EventLoopExtWebSys;

    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    info!("Forest Walk (wasm)");

    let event_loop = match EventLoop::<GpuReady>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!(%err, "failed to create event loop");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    match ForestWalkApp::new(AppConfig::default()) {
        Ok(mut app) => {
            app.proxy = Some(event_loop.create_proxy());
            event_loop.spawn_app(app);
        }
        Err(err) => error!(%err, "invalid scene configuration"),
    }
}
