use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::game::{Session, Transition};
use crate::input::{default_bindings, Action, ActionMap, InputState, Movement};
use crate::renderer::canvas::Canvas;
use crate::renderer::Presenter;
use crate::window::{apply_window_settings, WindowConfig};

/// Longest frame the loop will simulate. A stall beyond this (window drag,
/// debugger) is dropped rather than replayed.
const MAX_FRAME: f32 = 0.25;

// ── Clock ───────────────────────────────────────────────────────────────────

/// Fixed-step simulation clock plus the independent dialog tick timer.
///
/// ```text
/// frame elapsed ─┬─▶ step accumulator ── n × fixed_dt ──▶ Session::update
///                └─▶ tick accumulator ── m × interval ──▶ Session::on_tick
/// ```
#[derive(Debug)]
pub struct Clock {
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
    tick_accumulator: Duration,
    tick_interval: Duration,
}

/// How much work one frame owes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    pub steps: u32,
    pub ticks: u32,
}

impl Clock {
    pub fn new(fixed_dt: f32, tick_interval: Duration) -> Self {
        Self {
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
            tick_accumulator: Duration::ZERO,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Account for the time since the last frame.
    pub fn frame(&mut self, now: Instant) -> FrameBudget {
        let elapsed = match self.last_instant {
            Some(prev) => now.duration_since(prev).min(Duration::from_secs_f32(MAX_FRAME)),
            None => Duration::from_secs_f32(self.fixed_dt),
        };
        self.last_instant = Some(now);
        self.advance(elapsed)
    }

    /// Add `elapsed` to both accumulators and drain whole steps and ticks.
    pub fn advance(&mut self, elapsed: Duration) -> FrameBudget {
        self.accumulator += elapsed.as_secs_f32();
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }

        self.tick_accumulator += elapsed;
        let mut ticks = 0;
        while self.tick_accumulator >= self.tick_interval {
            self.tick_accumulator -= self.tick_interval;
            ticks += 1;
        }

        FrameBudget { steps, ticks }
    }
}

// ── Runner ──────────────────────────────────────────────────────────────────

/// Open the window and play `session` until the player quits or a map fails
/// to load.
pub fn run(session: Session) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let config = &session.config;
    let clock = Clock::new(config.fixed_dt(), config.tick_interval());
    let window_config = WindowConfig::new(config.width, config.height, config.window_mode);
    let canvas = Canvas::new(config.width, config.height);

    let mut app = App {
        session,
        bindings: default_bindings(),
        input: InputState::new(),
        presenter: None,
        window_config,
        canvas,
        clock,
    };
    event_loop.run_app(&mut app)
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    session: Session,
    bindings: ActionMap<Action>,
    input: InputState,
    presenter: Option<Presenter>,
    window_config: WindowConfig,
    canvas: Canvas,
    clock: Clock,
}

impl App {
    /// Run one frame's worth of game logic. Returns `false` when the loop
    /// should stop.
    fn step(&mut self) -> bool {
        for action in Action::TRIGGERS {
            if !self.bindings.is_pressed(action, &self.input) {
                continue;
            }
            if let Some(transition) = self.session.handle_action(action) {
                if !self.apply(transition) {
                    return false;
                }
            }
        }

        let budget = self.clock.frame(Instant::now());
        for _ in 0..budget.ticks {
            self.session.on_tick();
        }

        let movement = Movement::from_input(&self.bindings, &self.input);
        for _ in 0..budget.steps {
            if let Some(transition) = self.session.update(self.clock.fixed_dt(), movement) {
                if !self.apply(transition) {
                    return false;
                }
                break;
            }
        }
        true
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Quit => {
                log::info!("quit requested");
                false
            }
            Transition::Warp { map, spawn } => match self.session.enter_map(&map, spawn) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("cannot warp to {map}: {e}");
                    false
                }
            },
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(&self.session.config.title)
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.window_config.physical_width,
                    self.window_config.physical_height,
                )),
        ) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create window: {e}");
                event_loop.exit();
                return;
            }
        };
        apply_window_settings(&window, &self.window_config);

        match pollster::block_on(Presenter::new(window, self.window_config.clone())) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => {
                log::error!("cannot initialise the GPU: {e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(presenter) = self.presenter.as_ref() {
            presenter.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.presenter.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size);
                }
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            WindowEvent::RedrawRequested => {
                if !self.step() {
                    event_loop.exit();
                    return;
                }

                self.session.render(&mut self.canvas);
                let Some(presenter) = self.presenter.as_mut() else { return };
                match presenter.present(&self.canvas) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("surface lost, reconfiguring");
                        let size = presenter.window.inner_size();
                        presenter.resize(size);
                    }
                    Err(e) => log::warn!("render error: {e}"),
                }

                // End of frame cleanup
                self.input.clear_frame_state();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.input.press(code),
                ElementState::Released => self.input.release(code),
            },

            _ => {}
        }
    }
}
