//! Window, event loop and per-frame wiring.
//!
//! Each redraw runs one frame: advance the clock, feed the simulated tracker
//! into the controller, apply key commands, tick, upload colors if they
//! changed, render.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::Config;
use crate::controller::{Controller, Notice};
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::input::{Command, Input, SimulatedHand};
use crate::time::FrameClock;

const TITLE: &str = "pinchfield";
/// How long a notice stays in the title bar.
const NOTICE_LIFETIME: Duration = Duration::from_secs(2);

/// Open a window and run until it is closed.
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    controller: Controller,
    tracker: SimulatedHand,
    input: Input,
    clock: FrameClock,
    /// Latest notice and when it was raised.
    notice: Option<(Notice, Instant)>,
    last_title: String,
    /// Fatal error raised inside a callback, returned from [`run`].
    error: Option<AppError>,
}

impl App {
    fn new(config: Config) -> Self {
        let controller = Controller::new(&config);
        log::info!(
            "Generated {} particles in {} arms",
            controller.field().len(),
            controller.field().params().arm_count
        );

        Self {
            window: None,
            gpu_state: None,
            controller,
            tracker: SimulatedHand::new(config.tracking_rate_hz),
            input: Input::new(),
            clock: FrameClock::new(),
            notice: None,
            last_title: String::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.update();
        let now = Instant::now();

        self.tracker.observe(&self.input);
        if let Some(detection) = self.tracker.poll_at(now) {
            self.controller.on_detection(&detection);
        }

        let commands: Vec<Command> = self.input.commands().collect();
        for command in commands {
            match command {
                Command::Toggle => self.controller.toggle(),
                Command::Reset => self.controller.reset(),
                Command::Quit => event_loop.exit(),
            }
        }

        let output = self.controller.tick(self.clock.elapsed());

        if let Some(notice) = self.controller.drain_notices().pop() {
            self.notice = Some((notice, now));
        }

        let mut status = "Ready";
        if let Some(gpu_state) = &mut self.gpu_state {
            if output.colors_changed {
                gpu_state.upload_colors(self.controller.field().colors());
            }
            match gpu_state.render(&output) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    gpu_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    status = "Error";
                    event_loop.exit();
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    status = "Error";
                }
            }
        }

        self.update_title(status, now);
        self.input.end_frame();
    }

    fn update_title(&mut self, status: &str, now: Instant) {
        let Some(window) = &self.window else {
            return;
        };

        if let Some((_, raised)) = self.notice {
            if now.saturating_duration_since(raised) >= NOTICE_LIFETIME {
                self.notice = None;
            }
        }

        let mut title = format!("{} - {} | {:.0} FPS", TITLE, status, self.clock.fps());
        if let Some((notice, _)) = self.notice {
            title.push_str(&format!(" | {}", notice));
        }

        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, self.controller.field())) {
            Ok(gpu_state) => {
                log::info!("Rendering on {}", gpu_state.adapter_name());
                self.gpu_state = Some(gpu_state);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.input
                    .set_window_size(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
