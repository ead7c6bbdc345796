use crate::config::AppConfig;
use crate::input::map_key;
use anyhow::{Result, anyhow};
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::ThreadRng;
use reflex_core::{Frame, InputEvent, Layout, StampedEvent};
use reflex_game::{Fault, GameStateMachine, JsonFileStore, Presentation, Session, SessionOutcome};
use reflex_render::SkiaRenderer;
use reflex_timing::{FrameStats, HighPrecisionTimer, Timer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Transform};
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Icon, Window, WindowId},
};

const WINDOWED_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 720);
const ICON_SIZE: u32 = 32;

/// Window, pixel surface and renderer: the game's view of the screen.
struct WindowPresentation {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    renderer: SkiaRenderer,
    pending: Vec<StampedEvent>,
}

impl Presentation for WindowPresentation {
    type Error = anyhow::Error;

    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.renderer.render_frame(frame, self.pixels.frame_mut())?;
        self.pixels.render()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<StampedEvent> {
        std::mem::take(&mut self.pending)
    }

    fn viewport(&self) -> Layout {
        self.renderer.layout()
    }
}

pub struct App {
    config: AppConfig,
    session: Session<HighPrecisionTimer, ThreadRng, JsonFileStore>,
    /// Shares its origin with the session clock; stamps input on arrival.
    clock: HighPrecisionTimer,
    view: Option<WindowPresentation>,
    cursor: (f32, f32),
    frame_interval: Duration,
    next_frame: Instant,
    last_frame_ns: Option<u64>,
    fault: Option<Fault>,
    startup_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let clock = HighPrecisionTimer::new();
        let store = JsonFileStore::new(&config.data_file);
        info!(data = %store.path().display(), "player data location");
        let machine = GameStateMachine::new(config.game.clone(), clock.clone(), rand::rng(), store);
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1)));

        Ok(Self {
            config,
            session: Session::new(machine),
            clock,
            view: None,
            cursor: (0.0, 0.0),
            frame_interval,
            next_frame: Instant::now(),
            last_frame_ns: None,
            fault: None,
            startup_error: None,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        info!(
            platform = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            "starting; press ESC to exit"
        );

        event_loop.run_app(&mut self)?;
        self.log_frame_stats();

        if let Some(e) = self.startup_error.take() {
            return Err(e);
        }
        match self.fault.take() {
            Some(fault) => Err(anyhow!(fault).context("game stopped")),
            None => Ok(()),
        }
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attributes = Window::default_attributes()
            .with_title("Reflex")
            .with_window_icon(make_icon());

        if self.config.fullscreen {
            let monitor = event_loop
                .primary_monitor()
                .or_else(|| event_loop.available_monitors().next())
                .ok_or_else(|| anyhow!("no monitor available"))?;
            if let Some(mhz) = monitor.refresh_rate_millihertz() {
                debug!(refresh_hz = f64::from(mhz) / 1000.0, "monitor");
            }
            attributes = attributes
                .with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))))
                .with_resizable(false);
        } else {
            attributes = attributes.with_inner_size(WINDOWED_SIZE);
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();
        info!(
            width = size.width,
            height = size.height,
            scale = window.scale_factor(),
            "window created"
        );

        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;
        let renderer = SkiaRenderer::with_font_path(
            self.config.font_path.as_deref(),
            size.width,
            size.height,
        )?;

        window.request_redraw();
        self.view = Some(WindowPresentation {
            window,
            pixels,
            renderer,
            pending: Vec::new(),
        });
        self.next_frame = Instant::now();
        Ok(())
    }

    fn push_event(&mut self, event: InputEvent) {
        let stamped = StampedEvent::new(self.clock.now(), event);
        if let Some(view) = &mut self.view {
            view.pending.push(stamped);
        }
    }

    /// One scheduler iteration at the configured rate.
    fn iterate(&mut self, event_loop: &ActiveEventLoop) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        let now_ns = self.clock.now();
        if let Some(last) = self.last_frame_ns.replace(now_ns) {
            self.clock.record_frame(Duration::from_nanos(now_ns.saturating_sub(last)));
        }

        match self.session.iterate(view) {
            Ok(SessionOutcome::Running) => {}
            Ok(SessionOutcome::Quit) => {
                info!(iterations = self.session.iterations(), "session ended");
                event_loop.exit();
            }
            Err(fault) => {
                error!(error = %fault, "unrecoverable fault, shutting down");
                self.fault = Some(fault);
                event_loop.exit();
            }
        }
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(view) = &mut self.view else {
            return;
        };
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if let Err(e) = view.pixels.resize_surface(new_size.width, new_size.height) {
            warn!(error = %e, "failed to resize surface");
        }
        if let Err(e) = view.pixels.resize_buffer(new_size.width, new_size.height) {
            warn!(error = %e, "failed to resize buffer");
        }
        if let Err(e) = view.renderer.resize(new_size.width, new_size.height) {
            warn!(error = %e, "failed to resize canvas");
        }
        debug!(width = new_size.width, height = new_size.height, "resized");
    }

    fn log_frame_stats(&self) {
        let FrameStats {
            samples,
            average_frame_time_ns,
            jitter_ns,
            effective_fps,
            ..
        } = self.clock.frame_stats();
        info!(
            samples,
            avg_ms = average_frame_time_ns / 1e6,
            jitter_ms = jitter_ns / 1e6,
            fps = effective_fps,
            "frame pacing"
        );
        if let Some(view) = &self.view {
            let render = view.renderer.render_times();
            info!(
                avg_ms = render.average_frame_time_ns / 1e6,
                max_ms = render.max_frame_time_ns / 1e6,
                text_rasterized = view.renderer.text_cache_misses(),
                "render cost"
            );
        }
    }
}

/// Red dot on black, drawn instead of shipping an image file.
fn make_icon() -> Option<Icon> {
    let mut pm = Pixmap::new(ICON_SIZE, ICON_SIZE)?;
    pm.fill(Color::BLACK);
    let mut paint = Paint::default();
    paint.anti_alias = false;
    paint.set_color(Color::from_rgba8(255, 0, 0, 255));
    let r = ICON_SIZE as f32 / 2.0;
    let circle = PathBuilder::from_circle(r, r, r - 2.0)?;
    pm.fill_path(&circle, &paint, tiny_skia::FillRule::Winding, Transform::identity(), None);
    Icon::from_rgba(pm.take(), ICON_SIZE, ICON_SIZE).ok()
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                error!(error = %e, "failed to create window and surface");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.push_event(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed() && !event.repeat =>
            {
                let input = map_key(&event.logical_key, event.text.as_deref());
                self.push_event(input);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                self.push_event(InputEvent::PointerClick { x, y });
            }
            WindowEvent::Resized(size) => self.handle_resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.view.as_ref().map(|v| v.window.inner_size()) {
                    self.handle_resize(size);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            self.iterate(event_loop);
            self.next_frame += self.frame_interval;
            // fell behind: restart the cadence instead of bursting
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
