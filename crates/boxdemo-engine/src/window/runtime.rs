use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::Scene;
use crate::device::{Gpu, GpuInit};
use crate::gfx::WgpuDevice;
use crate::input::platform::winit::translate_window_event;
use crate::input::{ButtonMask, InputEvent, InputState, MouseButton, MouseButtonState};
use crate::shader::WgslCompiler;
use crate::time::{FrameClock, FrameStats, FrameStatsReport};

use super::WindowCapture;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Box Demo".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes `S` and drives it until the window closes.
    ///
    /// Returns the first fatal error: a failed initialization or a frame
    /// failure that skipping the frame cannot resolve.
    pub fn run<S>(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()>
    where
        S: Scene<WgpuDevice> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::<S>::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything tied to the open window.
///
/// Field order is drop order: the scene releases its resources before the
/// device, and the device before the window its surface draws into.
struct WindowEntry<S> {
    scene: S,
    device: WgpuDevice,
    window: Arc<Window>,

    input: InputState,
    clock: FrameClock,
    stats: FrameStats,
    minimized: bool,
}

impl<S> WindowEntry<S>
where
    S: Scene<WgpuDevice>,
{
    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if !self.device.resize(new_size) {
            self.minimized = true;
            return;
        }

        if self.minimized {
            // Time spent minimized is not frame time.
            self.clock.reset();
            self.minimized = false;
        }

        if let Some(aspect) = self.device.aspect_ratio() {
            self.scene.resize(aspect);
        }
        self.window.request_redraw();
    }

    /// Forwards a pointer event to the scene with the buttons held after it.
    fn dispatch_pointer(&mut self, ev: &InputEvent, buttons_changed: bool) {
        let buttons = self.input.button_mask();

        match *ev {
            InputEvent::PointerMoved(m) => self.scene.on_mouse_move(buttons, m.x, m.y),

            InputEvent::PointerButton(b) if buttons_changed && is_tracked(b.button) => {
                let mut capture = WindowCapture::new(&self.window);
                match b.state {
                    MouseButtonState::Pressed => {
                        self.scene.on_mouse_down(buttons, b.x, b.y, &mut capture)
                    }
                    MouseButtonState::Released => {
                        self.scene.on_mouse_up(buttons, b.x, b.y, &mut capture)
                    }
                }
            }

            // Held buttons were dropped; end the drag the release never reported.
            InputEvent::Focused(false) if buttons_changed => {
                let (x, y) = self.input.pointer_or_origin();
                let mut capture = WindowCapture::new(&self.window);
                self.scene.on_mouse_up(ButtonMask::NONE, x, y, &mut capture);
            }

            _ => {}
        }
    }

    /// Runs one update/draw cycle.
    fn frame(&mut self, base_title: &str) -> Result<()> {
        let ft = self.clock.tick();

        if let Some(report) = self.stats.record(ft.dt) {
            log::debug!("{:.0} fps, {:.3} ms/frame", report.fps, report.ms_per_frame);
            self.window.set_title(&stats_title(base_title, report));
        }

        self.scene.update(ft.dt);

        match self.scene.draw(&mut self.device) {
            Ok(()) => Ok(()),
            Err(e) if e.is_transient() => {
                log::warn!("skipping frame: {e}: {}", e.source);
                self.device.discard_frame();
                Ok(())
            }
            Err(e) => Err(e).context("frame failed"),
        }
    }
}

fn is_tracked(button: MouseButton) -> bool {
    matches!(button, MouseButton::Left | MouseButton::Right | MouseButton::Middle)
}

/// Window title carrying the latest frame statistics.
fn stats_title(base: &str, report: FrameStatsReport) -> String {
    format!(
        "{base}    fps: {:.0}   frame time: {:.3} (ms)",
        report.fps, report.ms_per_frame
    )
}

struct AppState<S> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    compiler: WgslCompiler,

    entry: Option<WindowEntry<S>>,

    /// First fatal error; returned from [`Runtime::run`].
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<S> AppState<S>
where
    S: Scene<WgpuDevice>,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            compiler: WgslCompiler::new(),
            entry: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        // Tear the scene down now, not after the loop returns.
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry<S>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone()))
            .context("GPU initialization failed")?;
        let mut device = WgpuDevice::new(gpu);

        let aspect = device.aspect_ratio().unwrap_or(1.0);
        let scene = S::init(&mut device, &self.compiler, aspect)
            .context("scene initialization failed")?;

        log::info!("scene initialized");

        Ok(WindowEntry {
            scene,
            device,
            window,
            input: InputState::default(),
            clock: FrameClock::new(),
            stats: FrameStats::new(),
            minimized: false,
        })
    }
}

impl<S> ApplicationHandler for AppState<S>
where
    S: Scene<WgpuDevice>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                entry.window.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the scene animates every frame.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&entry.input, &event) {
            let buttons_changed = entry.input.apply_event(&ev);
            entry.dispatch_pointer(&ev, buttons_changed);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => entry.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.resize(new_size);
            }

            WindowEvent::RedrawRequested => {
                if entry.minimized {
                    return;
                }
                if let Err(e) = entry.frame(&self.config.title) {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}
