use crate::draw::{Canvas, DrawList};
use crate::input::{platform, InputSource, Keyboard, Mouse};
use crate::render::GraphicsDevice;
use crate::time::{Clock, FrameSample, FrameTimer};
use crate::window::WindowConfig;

use super::ctx::UpdateCtx;
use super::game::{AppControl, Game};

/// Frame loop lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    NotStarted,
    Running,
    /// Live resize in progress: ticks update but do not render.
    ResizingPaused,
    /// Close requested; no further iterations run.
    Closing,
    Stopped,
}

/// Outcome of one `iterate` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tick {
    /// Nothing ran (not started, closing or stopped).
    Skipped,
    /// Input and update ran; no frame was presented.
    Updated,
    /// A frame was drawn and presented.
    Rendered,
}

/// Drives one game through time-sampled ticks.
///
/// Per iteration, in order:
/// 1. stop if a close was requested
/// 2. sample the clock
/// 3. sample mouse then keyboard, then run `Game::update`
/// 4. feed the frame timer
/// 5. unless a live resize is in progress, draw and present
///
/// Single-threaded; all state changes happen inside these calls.
pub struct FrameLoop {
    state: LoopState,
    close_requested: bool,

    clock: Clock,
    timer: FrameTimer,
    last_sample: FrameSample,

    mouse: Mouse,
    keyboard: Keyboard,

    draw_list: DrawList,
}

impl FrameLoop {
    pub fn new(mouse: Mouse) -> Self {
        Self {
            state: LoopState::NotStarted,
            close_requested: false,
            clock: Clock::new(),
            timer: FrameTimer::new(),
            last_sample: FrameSample::default(),
            mouse,
            keyboard: Keyboard::new(),
            draw_list: DrawList::new(),
        }
    }

    /// Loop whose mouse uses the configured double-click rate, or the host's.
    pub fn from_config(config: &WindowConfig) -> Self {
        let rate = config
            .double_click_rate
            .unwrap_or_else(platform::double_click_rate);
        log::debug!("double-click rate {rate:?}");
        Self::new(Mouse::new(rate))
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.state == LoopState::ResizingPaused
    }

    /// Last published frame rate.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.timer.fps()
    }

    /// Timing of the most recent tick.
    #[inline]
    pub fn last_sample(&self) -> FrameSample {
        self.last_sample
    }

    #[inline]
    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    #[inline]
    pub fn mouse_mut(&mut self) -> &mut Mouse {
        &mut self.mouse
    }

    #[inline]
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Loads content and starts the clock.
    pub fn start<G, D>(&mut self, game: &mut G, device: &mut D)
    where
        G: Game + ?Sized,
        D: GraphicsDevice + ?Sized,
    {
        if self.state != LoopState::NotStarted {
            log::warn!("frame loop already started ({:?})", self.state);
            return;
        }

        game.load_content(device.fonts_mut());
        self.clock.start();
        self.state = LoopState::Running;
        log::info!("frame loop started");
    }

    /// Runs one iteration against the real clock.
    pub fn iterate<G, S, D>(&mut self, game: &mut G, source: &S, device: &mut D) -> Tick
    where
        G: Game + ?Sized,
        S: InputSource,
        D: GraphicsDevice + ?Sized,
    {
        self.iterate_sampled(Clock::sample, game, source, device)
    }

    /// Gate plus one step, with the tick's timing taken from `sample`.
    fn iterate_sampled<F, G, S, D>(&mut self, sample: F, game: &mut G, source: &S, device: &mut D) -> Tick
    where
        F: FnOnce(&mut Clock) -> FrameSample,
        G: Game + ?Sized,
        S: InputSource,
        D: GraphicsDevice + ?Sized,
    {
        if self.close_requested
            || !matches!(self.state, LoopState::Running | LoopState::ResizingPaused)
        {
            return Tick::Skipped;
        }

        let sample = sample(&mut self.clock);
        self.step(sample, game, source, device)
    }

    fn step<G, S, D>(&mut self, sample: FrameSample, game: &mut G, source: &S, device: &mut D) -> Tick
    where
        G: Game + ?Sized,
        S: InputSource,
        D: GraphicsDevice + ?Sized,
    {
        self.last_sample = sample;

        self.mouse.update(source, sample.delta);
        self.keyboard.update(source);

        let resizing = self.is_resizing();
        let mut ctx = UpdateCtx {
            time: sample,
            fps: self.timer.fps(),
            mouse: &mut self.mouse,
            keyboard: &self.keyboard,
            client_size: source.client_size(),
            focused: source.is_focused(),
            resizing,
        };
        if game.update(&mut ctx) == AppControl::Exit {
            self.request_close();
        }

        if let Some(fps) = self.timer.tick(sample.delta) {
            log::debug!("fps {fps:.1}");
        }

        if resizing {
            return Tick::Updated;
        }

        if !device.begin_draw() {
            if device.is_lost() {
                log::error!("graphics device lost");
                self.request_close();
            }
            return Tick::Updated;
        }

        self.draw_list.reset(None);
        {
            let mut canvas = Canvas::new(&mut self.draw_list, device.viewport());
            game.draw_begin(&mut canvas);
            game.draw(&mut canvas, sample);
            game.draw_end(&mut canvas);
        }
        device.end_draw(&self.draw_list);

        Tick::Rendered
    }

    /// Pauses rendering for a live resize.
    pub fn begin_resize(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::ResizingPaused;
            log::debug!("resize begin");
        }
    }

    /// Resumes rendering and resizes the device to the final size.
    pub fn end_resize<D>(&mut self, device: &mut D, width: u32, height: u32)
    where
        D: GraphicsDevice + ?Sized,
    {
        if self.state == LoopState::Stopped {
            return;
        }
        if self.state == LoopState::ResizingPaused {
            self.state = LoopState::Running;
        }
        log::debug!("resize end: {width}x{height}");
        device.resize(width, height);
    }

    /// Requests a cooperative close, observed at the next iteration.
    pub fn request_close(&mut self) {
        if self.close_requested {
            return;
        }
        self.close_requested = true;
        if matches!(self.state, LoopState::Running | LoopState::ResizingPaused) {
            self.state = LoopState::Closing;
        }
        log::info!("close requested");
    }

    /// Unloads content, runs `exiting` and stops the clock. Runs once.
    ///
    /// `unload_content` is skipped when content was never loaded.
    pub fn shutdown<G: Game + ?Sized>(&mut self, game: &mut G) {
        if self.state == LoopState::Stopped {
            return;
        }

        if self.state != LoopState::NotStarted {
            game.unload_content();
        }
        game.exiting();
        self.clock.stop();
        self.close_requested = true;
        self.state = LoopState::Stopped;
        log::info!("frame loop stopped after {:?}", self.clock.elapsed());
    }
}
