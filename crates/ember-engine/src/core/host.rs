use crate::device::{self, EntryPointLoader, GlEntryPoints, GraphicsContext, LoadReport, SurfaceConfig};
use crate::platform::{platform_from_args, EntryPointLibrary, PlatformParams};
use crate::time::{FrameClock, FrameTime};
use crate::window::{self, LoopControl, LoopDelegate, OsWindow};

use super::app::Application;
use super::ctx::FrameCtx;
use super::error::LifecycleError;
use super::state::LifecycleState;

/// Swap interval requested once the context exists; 0 disables vsync.
const SWAP_INTERVAL: i32 = 0;

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub params: PlatformParams,
    pub surface: SurfaceConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: "ember".to_string(),
            width: 1280,
            height: 720,
            params: PlatformParams::default(),
            surface: SurfaceConfig::SAMPLE,
        }
    }
}

impl HostConfig {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// Builds a configuration from raw process arguments.
    ///
    /// Only a leading `--use-angle=<backend>` is recognized; see
    /// [`platform_from_args`].
    pub fn from_args<S: AsRef<str>>(
        name: impl Into<String>,
        args: &[S],
        major_version: u32,
        minor_version: u32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            params: platform_from_args(args).with_version(major_version, minor_version),
            ..Self::new(name, width, height)
        }
    }

    pub fn with_params(mut self, params: PlatformParams) -> Self {
        self.params = params;
        self
    }
}

/// Sample host: owns the window, the graphics context and the application,
/// and runs them through one lifecycle.
///
/// A host runs once. Platform resources are released on drop whether or not
/// `run()` was called or succeeded.
pub struct SampleHost<A: Application> {
    name: String,
    width: u32,
    height: u32,
    window: Box<dyn OsWindow>,
    window_live: bool,
    core: HostCore<A>,
}

impl<A: Application> SampleHost<A> {
    /// Creates a host with the platform's default window and the context
    /// matching the configured renderer. Nothing is initialized yet.
    pub fn new(config: HostConfig, app: A) -> Self {
        let graphics = device::create_context(&config.params);
        Self::with_platform(config, window::create_window(), graphics, app)
    }

    /// Creates a host around caller-supplied window and context.
    pub fn with_platform(
        config: HostConfig,
        window: Box<dyn OsWindow>,
        graphics: Box<dyn GraphicsContext>,
        app: A,
    ) -> Self {
        let HostConfig {
            name,
            width,
            height,
            params,
            surface,
        } = config;

        log::debug!(
            "host '{name}' {width}x{height}: renderer {} ({:?}), client API {}.{}",
            params.renderer,
            params.device_type,
            params.major_version,
            params.minor_version
        );

        Self {
            name,
            width,
            height,
            window,
            window_live: false,
            core: HostCore {
                app,
                graphics,
                loader: Box::new(GlEntryPoints::gles2()),
                entry_points: LoadReport::default(),
                library: EntryPointLibrary::resolve(),
                params,
                surface,
                clock: FrameClock::new(),
                running: false,
                state: LifecycleState::Uninitialized,
                context_live: false,
                app_live: false,
                error: None,
            },
        }
    }

    /// Replaces the entry-point loader run after context creation.
    pub fn with_loader(mut self, loader: Box<dyn EntryPointLoader>) -> Self {
        self.core.loader = loader;
        self
    }

    pub fn with_library(mut self, library: EntryPointLibrary) -> Self {
        self.core.library = library;
        self
    }

    /// Runs the whole lifecycle and blocks until the loop ends.
    ///
    /// Precondition: the host has not run before. A second call returns
    /// [`LifecycleError::AlreadyRun`].
    pub fn run(&mut self) -> Result<(), LifecycleError> {
        if self.core.state != LifecycleState::Uninitialized {
            log::error!("run() called on a host in state {}", self.core.state);
            return Err(LifecycleError::AlreadyRun);
        }

        if let Err(e) = self.window.initialize(&self.name, self.width, self.height) {
            log::error!("failed to create window: {e:#}");
            self.core.state = LifecycleState::Stopped;
            return Err(LifecycleError::WindowCreation(e));
        }
        self.window_live = true;
        self.core.state = LifecycleState::Preparing;

        let result = if self.window.has_own_loop() {
            log::debug!("window system owns the message loop");
            let code = self.window.run_own_loop(&mut self.core);
            match self.core.error.take() {
                Some(e) => Err(e),
                None if code != 0 => Err(LifecycleError::HostLoop(code)),
                None => Ok(()),
            }
        } else {
            self.core.prepare_to_run(&mut *self.window).map(|()| {
                while self.core.running {
                    self.core.run_iteration(&mut *self.window);
                }
            })
        };

        // Stages that never completed are left to the drop guard.
        if self.core.app_live {
            self.teardown();
        }
        self.core.state = LifecycleState::Stopped;

        if let Err(e) = &result {
            log::error!("{e}");
        }
        result
    }

    /// Asks the loop to stop after the current iteration's event drain.
    pub fn exit(&mut self) {
        self.core.exit();
    }

    pub fn is_running(&self) -> bool {
        self.core.running
    }

    pub fn state(&self) -> LifecycleState {
        self.core.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform_params(&self) -> &PlatformParams {
        &self.core.params
    }

    pub fn library(&self) -> &EntryPointLibrary {
        &self.core.library
    }

    /// Outcome of the entry-point load done during preparation.
    pub fn entry_points(&self) -> LoadReport {
        self.core.entry_points
    }

    pub fn app(&self) -> &A {
        &self.core.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.core.app
    }

    pub fn window(&self) -> &dyn OsWindow {
        &*self.window
    }

    pub fn graphics(&self) -> &dyn GraphicsContext {
        &*self.core.graphics
    }

    fn teardown(&mut self) {
        log::debug!("tearing down '{}'", self.name);
        if self.core.app_live {
            self.core.app_live = false;
            self.core.app.destroy();
        }
        self.core.clock.stop();
        self.release();
    }

    /// Releases the context and window if they were created. Runs at most once
    /// per resource.
    fn release(&mut self) {
        if self.core.context_live {
            self.core.context_live = false;
            self.core.graphics.destroy();
        }
        if self.window_live {
            self.window_live = false;
            self.window.destroy();
        }
    }
}

impl<A: Application> Drop for SampleHost<A> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Everything the frame loop touches except the window, so the window can
/// drive it as a [`LoopDelegate`].
struct HostCore<A: Application> {
    app: A,
    graphics: Box<dyn GraphicsContext>,
    loader: Box<dyn EntryPointLoader>,
    entry_points: LoadReport,
    library: EntryPointLibrary,
    params: PlatformParams,
    surface: SurfaceConfig,
    clock: FrameClock,
    running: bool,
    state: LifecycleState,
    context_live: bool,
    app_live: bool,
    /// Failure from `prepare` while a native loop is in control.
    error: Option<LifecycleError>,
}

impl<A: Application> HostCore<A> {
    fn prepare_to_run(&mut self, window: &mut dyn OsWindow) -> Result<(), LifecycleError> {
        window.set_visible(true);

        if let Err(e) = self
            .graphics
            .initialize(&*window, &self.library, &self.params, &self.surface)
        {
            self.state = LifecycleState::Stopped;
            return Err(LifecycleError::ContextCreation(e));
        }
        self.context_live = true;

        if let Err(e) = self.graphics.set_swap_interval(SWAP_INTERVAL) {
            self.state = LifecycleState::Stopped;
            return Err(LifecycleError::SwapInterval(e));
        }

        let graphics = &self.graphics;
        self.entry_points = self.loader.load(&|name: &str| graphics.proc_address(name));
        if self.entry_points.resolved == 0 && self.entry_points.missing > 0 {
            log::debug!("context exposes no GL entry points");
        }

        self.running = true;

        let initialized = {
            let mut ctx = FrameCtx::new(window, &mut *self.graphics, &mut self.running, FrameTime::default());
            self.app.initialize(&mut ctx)
        };
        if let Err(e) = initialized {
            self.running = false;
            self.state = LifecycleState::Stopped;
            return Err(LifecycleError::Initialize(e));
        }
        self.app_live = true;

        self.clock.start();
        self.state = LifecycleState::Running;
        log::info!("running");
        Ok(())
    }

    /// One frame: step, drain, draw, present, pump, commit.
    fn run_iteration(&mut self, window: &mut dyn OsWindow) {
        let frame = self.clock.sample();

        {
            let mut ctx = FrameCtx::new(window, &mut *self.graphics, &mut self.running, frame);
            self.app.step(&mut ctx, frame.dt, frame.total);
        }

        // Close events the application did not take in `step` end the run.
        while let Some(event) = window.pop_event() {
            if event.is_close() {
                self.exit();
            }
        }

        if !self.running {
            self.exit();
            return;
        }

        {
            let mut ctx = FrameCtx::new(window, &mut *self.graphics, &mut self.running, frame);
            self.app.draw(&mut ctx);
        }

        // `draw` may have stopped the loop too.
        if !self.running {
            self.exit();
            return;
        }

        if self.graphics.swap().is_fatal() {
            log::error!("present failed; stopping");
            self.exit();
            return;
        }

        window.message_loop();
        self.clock.commit(frame);
    }

    /// Clears the running flag; a running host becomes `Stopped`.
    fn exit(&mut self) {
        if self.running {
            log::debug!("exit requested");
        }
        self.running = false;
        if self.state == LifecycleState::Running {
            self.state = LifecycleState::Stopped;
        }
    }
}

impl<A: Application> LoopDelegate for HostCore<A> {
    fn prepare(&mut self, window: &mut dyn OsWindow) -> i32 {
        match self.prepare_to_run(window) {
            Ok(()) => 0,
            Err(e) => {
                let code = e.code();
                self.error = Some(e);
                code
            }
        }
    }

    fn iterate(&mut self, window: &mut dyn OsWindow) -> LoopControl {
        if self.running {
            self.run_iteration(window);
        }

        if self.running {
            LoopControl::Continue
        } else {
            LoopControl::Exit
        }
    }
}
