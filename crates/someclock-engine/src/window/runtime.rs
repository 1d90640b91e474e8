use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, Host, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::{Scheduler, TimerId};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "SomeClock".to_string(),
            initial_size: LogicalSize::new(360.0, 440.0),
        }
    }
}

/// Runtime context passed to non-frame app callbacks.
///
/// Redraw and exit requests are recorded and applied after the callback
/// returns, so several requests in one callback collapse into one.
pub struct RuntimeCtx<'a> {
    scheduler: &'a mut Scheduler,
    now: Instant,
    redraw: bool,
    exit: bool,
}

impl<'a> RuntimeCtx<'a> {
    pub(crate) fn new(scheduler: &'a mut Scheduler, now: Instant) -> Self {
        Self { scheduler, now, redraw: false, exit: false }
    }

    /// Time at which the current callback was dispatched.
    #[inline]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Asks the runtime to shut down once the callback returns.
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

impl Host for RuntimeCtx<'_> {
    fn start_timer(&mut self, interval: Duration) -> TimerId {
        self.scheduler.start(interval, self.now)
    }

    fn stop_timer(&mut self, id: TimerId) -> bool {
        self.scheduler.stop(id)
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes or the app exits.
    ///
    /// Window or GPU setup failures end the loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, gpu_init, app);

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
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    scheduler: Scheduler,

    started: bool,
    exited: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            scheduler: Scheduler::new(),
            started: false,
            exited: false,
            error: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        log::info!("window '{}' created ({:?})", self.config.title, window.inner_size());

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn request_redraw(&self) {
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    /// Runs `f` with a fresh [`RuntimeCtx`], then applies what it requested.
    fn dispatch<F>(&mut self, event_loop: &ActiveEventLoop, f: F)
    where
        F: FnOnce(&mut A, &mut RuntimeCtx<'_>) -> AppControl,
    {
        let mut ctx = RuntimeCtx::new(&mut self.scheduler, Instant::now());
        let control = f(&mut self.app, &mut ctx);
        let (redraw, exit) = (ctx.redraw, ctx.exit);

        if exit || control == AppControl::Exit {
            self.shutdown(event_loop);
        } else if redraw {
            self.request_redraw();
        }
    }

    /// Calls `on_exit` once, drops leftover timers and the window, and stops the loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.exited {
            return;
        }
        self.exited = true;

        if self.started {
            let mut ctx = RuntimeCtx::new(&mut self.scheduler, Instant::now());
            self.app.on_exit(&mut ctx);
        }
        if !self.scheduler.is_empty() {
            log::debug!("dropping {} timer(s) still running at exit", self.scheduler.len());
            self.scheduler = Scheduler::new();
        }

        self.window = None;
        event_loop.exit();
        log::info!("runtime shut down");
    }

    fn resize_surface(&mut self) {
        if let Some(entry) = self.window.as_mut() {
            let size = entry.with_window(|w| w.inner_size());
            entry.with_gpu_mut(|gpu| gpu.resize(size));
            entry.with_window(|w| w.request_redraw());
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.exited || self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => self.window = Some(entry),
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.error = Some(e);
                self.exited = true;
                event_loop.exit();
                return;
            }
        }

        if !self.started {
            self.started = true;
            self.dispatch(event_loop, |app, ctx| {
                app.on_start(ctx);
                AppControl::Continue
            });
        }

        self.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exited {
            return;
        }

        for id in self.scheduler.poll(Instant::now()) {
            // An earlier callback in this batch may have stopped it or exited.
            if self.exited || !self.scheduler.is_active(id) {
                continue;
            }
            self.dispatch(event_loop, |app, ctx| app.on_timer(id, ctx));
        }

        if self.exited {
            return;
        }

        match self.scheduler.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exited {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::debug!("window {window_id:?} closing");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_surface();
            }

            WindowEvent::RedrawRequested => {
                // Split borrows so the ouroboros closure does not capture `self`.
                let (app, window) = (&mut self.app, &mut self.window);
                let Some(entry) = window.as_mut() else {
                    return;
                };

                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                    };
                    app.on_frame(&mut ctx)
                });

                if control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}
