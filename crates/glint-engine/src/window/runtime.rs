use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{dispatch_input, AppControl, FrameLoop, Game};
use crate::device::GpuInit;
use crate::input::platform::{client_size, translate_window_event};
use crate::input::PlatformInput;
use crate::render::{GraphicsDevice, WgpuDevice};

use super::config::WindowConfig;
use super::resize::ResizeTracker;

/// Entry point: runs one game in one window until it exits.
pub struct Runtime;

impl Runtime {
    /// Runs `game` to completion.
    ///
    /// `Game::initialize` edits `config` before the event loop and window exist.
    /// Returns the first error raised while creating the window or GPU context.
    pub fn run<G>(mut config: WindowConfig, mut game: G) -> Result<()>
    where
        G: Game + 'static,
    {
        game.initialize(&mut config);
        log::info!(
            "starting \"{}\" ({}x{}, vsync {})",
            config.title,
            config.width,
            config.height,
            config.vsync
        );

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, game);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: PlatformInput,
    frame_loop: FrameLoop,
    resize: ResizeTracker,

    window: Window,

    #[borrows(window)]
    #[covariant]
    device: WgpuDevice<'this>,
}

struct AppState<G>
where
    G: Game + 'static,
{
    config: WindowConfig,
    game: G,

    entry: Option<WindowEntry>,
    error: Option<anyhow::Error>,
}

impl<G> AppState<G>
where
    G: Game + 'static,
{
    fn new(config: WindowConfig, game: G) -> Self {
        Self {
            config,
            game,
            entry: None,
            error: None,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let config = &self.config;
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
            .with_resizable(config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let init = GpuInit::with_vsync(config.vsync);
        let clear = config.clear_color;
        let client = client_size(&window);

        WindowEntryTryBuilder {
            input: PlatformInput::new(client),
            frame_loop: FrameLoop::from_config(config),
            resize: ResizeTracker::new(config.resize_settle),
            window,
            device_builder: |w: &Window| {
                WgpuDevice::new(w, init, clear).context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }
}

impl<G> ApplicationHandler for AppState<G>
where
    G: Game + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let mut entry = match self.create_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        };

        let game = &mut self.game;
        entry.with_mut(|fields| fields.frame_loop.start(game, fields.device));
        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let closing = entry.with_mut(|fields| {
            if fields.resize.poll(Instant::now()) {
                let size = fields.window.inner_size();
                fields
                    .frame_loop
                    .end_resize(fields.device, size.width, size.height);
            }
            fields.frame_loop.is_close_requested()
        });

        if closing {
            event_loop.exit();
            return;
        }

        // Continuous redraw: one tick per RedrawRequested.
        event_loop.set_control_flow(ControlFlow::Wait);
        entry.with_window(|w| w.request_redraw());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (game, entry) = (&mut self.game, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let closing = entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input, &event) {
                fields.input.apply_event(&ev);
                if dispatch_input(game, &ev) == AppControl::Exit {
                    fields.frame_loop.request_close();
                }
            }

            match &event {
                WindowEvent::CloseRequested => fields.frame_loop.request_close(),

                WindowEvent::Resized(size) => {
                    // Minimized: keep the last surface until a real size arrives.
                    if size.width > 0 && size.height > 0 {
                        fields.input.set_client_size(client_size(fields.window));
                        if *size != fields.device.surface_size()
                            && fields.resize.on_resized(Instant::now())
                        {
                            fields.frame_loop.begin_resize();
                        }
                    }
                }

                WindowEvent::ScaleFactorChanged { .. } => {
                    // Resizes now and closes any open live-resize session, so the
                    // tracker does not end it a second time.
                    fields.resize.finish();
                    let size = fields.window.inner_size();
                    fields.input.set_client_size(client_size(fields.window));
                    fields
                        .frame_loop
                        .end_resize(fields.device, size.width, size.height);
                }

                WindowEvent::RedrawRequested => {
                    fields.frame_loop.iterate(game, &*fields.input, fields.device);
                }

                _ => {}
            }

            fields.frame_loop.is_close_requested()
        });

        if closing {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(mut entry) = self.entry.take() else {
            return;
        };

        let game = &mut self.game;
        entry.with_frame_loop_mut(|frame_loop| frame_loop.shutdown(game));

        let lost = entry.with_device(|device| device.is_lost());
        if lost && self.error.is_none() {
            self.error = Some(anyhow::anyhow!("graphics device lost"));
        }
    }
}
