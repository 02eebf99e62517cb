//! Recording window, context, loader and application shared by the host tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::device::{
    ContextHandles, EntryPointLoader, GraphicsContext, LoadReport, PresentStatus, ProcAddress,
    SurfaceConfig,
};
use crate::platform::{EntryPointLibrary, PlatformParams};
use crate::window::{Event, LoopControl, LoopDelegate, OsWindow};

use super::app::Application;
use super::ctx::FrameCtx;
use super::host::{HostConfig, SampleHost};

/// Pumps after which the recording window closes itself, so a broken loop
/// fails a test instead of hanging it.
const RUNAWAY_PUMPS: u64 = 10_000;

const KNOWN_ENTRY_POINTS: [&str; 2] = ["glClear", "glViewport"];
const REQUESTED_ENTRY_POINTS: [&str; 3] = ["glClear", "glViewport", "glBogusEXT"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Call {
    WindowInit,
    SetVisible(bool),
    RunOwnLoop,
    Pump,
    WindowDestroy,
    ContextInit,
    SwapInterval(i32),
    LoadEntryPoints,
    Swap,
    ContextDestroy,
    Initialize,
    Step,
    Draw,
    Destroy,
}

pub type Log = Rc<RefCell<Vec<Call>>>;

#[derive(Default)]
struct Script {
    own_loop: bool,
    pumps: VecDeque<Vec<Event>>,
    window_fails: bool,
    context_fails: bool,
    swap_interval_fails: bool,
    fatal_swap_on: Option<u64>,
    own_loop_code: i32,
    resolved: usize,
}

/// Builds hosts over recording doubles that share one call log.
pub struct Harness {
    pub log: Log,
    script: Rc<RefCell<Script>>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            log: Rc::default(),
            script: Rc::default(),
        }
    }

    pub fn with_own_loop(self) -> Self {
        self.script.borrow_mut().own_loop = true;
        self
    }

    /// One batch per `message_loop` call.
    pub fn script_pumps(&self, batches: Vec<Vec<Event>>) {
        self.script.borrow_mut().pumps.extend(batches);
    }

    pub fn window_fails(&self) {
        self.script.borrow_mut().window_fails = true;
    }

    pub fn context_fails(&self) {
        self.script.borrow_mut().context_fails = true;
    }

    pub fn swap_interval_fails(&self) {
        self.script.borrow_mut().swap_interval_fails = true;
    }

    /// The n-th swap (1-based) reports a fatal present.
    pub fn fatal_swap_on(&self, n: u64) {
        self.script.borrow_mut().fatal_swap_on = Some(n);
    }

    /// Code the native loop returns once it has finished iterating.
    pub fn own_loop_returns(&self, code: i32) {
        self.script.borrow_mut().own_loop_code = code;
    }

    pub fn resolved_entry_points(&self) -> usize {
        self.script.borrow().resolved
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.log.borrow().iter().filter(|c| **c == call).count()
    }

    pub fn host<A: Application>(&self, app: A) -> SampleHost<A> {
        let window = RecordingWindow {
            log: self.log.clone(),
            script: self.script.clone(),
            events: VecDeque::new(),
            size: (0, 0),
            pumps: 0,
        };
        let graphics = RecordingContext {
            log: self.log.clone(),
            script: self.script.clone(),
            swaps: 0,
        };
        let loader = RecordingLoader {
            log: self.log.clone(),
            script: self.script.clone(),
        };

        SampleHost::with_platform(
            HostConfig::new("recording", 320, 240),
            Box::new(window),
            Box::new(graphics),
            app,
        )
        .with_loader(Box::new(loader))
        .with_library(EntryPointLibrary::none())
    }
}

struct RecordingWindow {
    log: Log,
    script: Rc<RefCell<Script>>,
    events: VecDeque<Event>,
    size: (u32, u32),
    pumps: u64,
}

impl OsWindow for RecordingWindow {
    fn initialize(&mut self, _name: &str, width: u32, height: u32) -> Result<()> {
        self.log.borrow_mut().push(Call::WindowInit);
        if self.script.borrow().window_fails {
            bail!("no display");
        }
        self.size = (width, height);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().push(Call::SetVisible(visible));
    }

    fn has_own_loop(&self) -> bool {
        self.script.borrow().own_loop
    }

    fn run_own_loop(&mut self, delegate: &mut dyn LoopDelegate) -> i32 {
        self.log.borrow_mut().push(Call::RunOwnLoop);
        let code = delegate.prepare(self);
        if code != 0 {
            return code;
        }
        while delegate.iterate(self) == LoopControl::Continue {}
        self.script.borrow().own_loop_code
    }

    fn message_loop(&mut self) {
        self.log.borrow_mut().push(Call::Pump);
        self.pumps += 1;
        if let Some(batch) = self.script.borrow_mut().pumps.pop_front() {
            self.events.extend(batch);
        }
        if self.pumps >= RUNAWAY_PUMPS {
            self.events.push_back(Event::Closed);
        }
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(Call::WindowDestroy);
        self.events.clear();
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

struct RecordingContext {
    log: Log,
    script: Rc<RefCell<Script>>,
    swaps: u64,
}

impl GraphicsContext for RecordingContext {
    fn initialize(
        &mut self,
        _window: &dyn OsWindow,
        _library: &EntryPointLibrary,
        _params: &PlatformParams,
        _config: &SurfaceConfig,
    ) -> Result<()> {
        self.log.borrow_mut().push(Call::ContextInit);
        if self.script.borrow().context_fails {
            bail!("no matching config");
        }
        Ok(())
    }

    fn set_swap_interval(&mut self, interval: i32) -> Result<()> {
        self.log.borrow_mut().push(Call::SwapInterval(interval));
        if self.script.borrow().swap_interval_fails {
            bail!("swap interval rejected");
        }
        Ok(())
    }

    fn swap(&mut self) -> PresentStatus {
        self.log.borrow_mut().push(Call::Swap);
        self.swaps += 1;
        if self.script.borrow().fatal_swap_on == Some(self.swaps) {
            PresentStatus::Fatal
        } else {
            PresentStatus::Presented
        }
    }

    fn handles(&self) -> ContextHandles {
        ContextHandles::default()
    }

    fn proc_address(&self, name: &str) -> Option<ProcAddress> {
        KNOWN_ENTRY_POINTS
            .contains(&name)
            .then(NonNull::<c_void>::dangling)
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(Call::ContextDestroy);
    }
}

struct RecordingLoader {
    log: Log,
    script: Rc<RefCell<Script>>,
}

impl EntryPointLoader for RecordingLoader {
    fn load(&mut self, resolve: &dyn Fn(&str) -> Option<ProcAddress>) -> LoadReport {
        self.log.borrow_mut().push(Call::LoadEntryPoints);
        let mut report = LoadReport::default();
        for name in REQUESTED_ENTRY_POINTS {
            match resolve(name) {
                Some(_) => report.resolved += 1,
                None => report.missing += 1,
            }
        }
        self.script.borrow_mut().resolved = report.resolved;
        report
    }
}

/// Application that records its hooks and can be told to misbehave.
pub struct RecordingApp {
    log: Log,
    pub fail_initialize: bool,
    pub consume_close: bool,
    pub exit_in_draw: bool,
    pub exit_after_steps: Option<usize>,
    pub closes_seen: usize,
    pub times: Vec<(f32, f64)>,
}

impl RecordingApp {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_initialize: false,
            consume_close: false,
            exit_in_draw: false,
            exit_after_steps: None,
            closes_seen: 0,
            times: Vec::new(),
        }
    }
}

impl Application for RecordingApp {
    fn initialize(&mut self, _ctx: &mut FrameCtx<'_>) -> Result<()> {
        self.log.borrow_mut().push(Call::Initialize);
        if self.fail_initialize {
            bail!("shader compile failed");
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut FrameCtx<'_>, dt: f32, total_time: f64) {
        self.log.borrow_mut().push(Call::Step);
        self.times.push((dt, total_time));

        if self.consume_close {
            while let Some(event) = ctx.pop_event() {
                if event.is_close() {
                    self.closes_seen += 1;
                }
            }
        }

        if self.exit_after_steps == Some(self.times.len()) {
            ctx.exit();
        }
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        self.log.borrow_mut().push(Call::Draw);
        if self.exit_in_draw {
            ctx.exit();
        }
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(Call::Destroy);
    }
}
