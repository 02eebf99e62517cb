use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::event::{Event, Key, KeyEvent, Modifiers, MouseButton, MouseButtonEvent, MouseWheelDelta};
use super::os_window::{LoopControl, LoopDelegate, NativeWindow, OsWindow};

/// Upper bound on pumps spent waiting for the first `resumed`.
const CREATE_PUMP_LIMIT: usize = 64;

/// Desktop window backed by `winit`.
///
/// By default the caller drives the loop and `message_loop` pumps pending OS
/// messages without blocking. `with_own_loop` hands control to
/// `EventLoop::run_app` instead and calls the delegate from `about_to_wait`.
pub struct WinitWindow {
    event_loop: Option<EventLoop<()>>,
    state: WinitState,
    own_loop: bool,
    pump_exited: bool,
    requested_size: (u32, u32),
}

impl WinitWindow {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            state: WinitState::default(),
            own_loop: false,
            pump_exited: false,
            requested_size: (0, 0),
        }
    }

    pub fn with_own_loop(mut self) -> Self {
        self.own_loop = true;
        self
    }

    /// The live winit window, once created.
    pub fn window(&self) -> Option<&Window> {
        self.state.window.as_deref()
    }
}

impl Default for WinitWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl OsWindow for WinitWindow {
    fn initialize(&mut self, name: &str, width: u32, height: u32) -> Result<()> {
        ensure!(width > 0 && height > 0, "window has zero size ({width}x{height})");

        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        self.requested_size = (width, height);
        self.state.pending = Some(
            Window::default_attributes()
                .with_title(name)
                .with_inner_size(LogicalSize::new(width as f64, height as f64))
                .with_visible(false),
        );

        // A native loop creates the window from its own `resumed`.
        if !self.own_loop {
            for _ in 0..CREATE_PUMP_LIMIT {
                if let PumpStatus::Exit(code) =
                    event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state)
                {
                    bail!("event loop exited with code {code} before the window was created");
                }
                if let Some(err) = self.state.create_error.take() {
                    return Err(err);
                }
                if self.state.window.is_some() {
                    break;
                }
            }
            ensure!(
                self.state.window.is_some(),
                "window not created after {CREATE_PUMP_LIMIT} event pumps"
            );
        }

        self.event_loop = Some(event_loop);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        match &self.state.window {
            Some(w) => w.set_visible(visible),
            None => {
                if let Some(attrs) = self.state.pending.take() {
                    self.state.pending = Some(attrs.with_visible(visible));
                }
            }
        }
    }

    fn has_own_loop(&self) -> bool {
        self.own_loop
    }

    fn run_own_loop(&mut self, delegate: &mut dyn LoopDelegate) -> i32 {
        let Some(event_loop) = self.event_loop.take() else {
            log::error!("run_own_loop called before initialize");
            return -1;
        };

        let mut hosted = HostedLoop {
            window: self,
            delegate,
            prepared: false,
            result: 0,
        };

        if let Err(e) = event_loop.run_app(&mut hosted) {
            log::error!("winit event loop terminated with error: {e}");
            if hosted.result == 0 {
                hosted.result = -1;
            }
        }

        hosted.result
    }

    fn message_loop(&mut self) {
        if self.pump_exited {
            return;
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state) {
            log::debug!("event loop exited with code {code}");
            self.pump_exited = true;
            self.state.events.push_back(Event::Closed);
        }
    }

    fn pop_event(&mut self) -> Option<Event> {
        self.state.events.pop_front()
    }

    fn push_event(&mut self, event: Event) {
        self.state.events.push_back(event);
    }

    fn destroy(&mut self) {
        if self.state.window.take().is_some() {
            log::debug!("window destroyed");
        }
        self.state.pending = None;
        self.state.events.clear();
        self.event_loop = None;
    }

    fn native_handle(&self) -> Option<NativeWindow> {
        self.state.window.clone().map(|w| w as NativeWindow)
    }

    fn size(&self) -> (u32, u32) {
        match &self.state.window {
            Some(w) => {
                let s = w.inner_size();
                (s.width, s.height)
            }
            None => self.requested_size,
        }
    }
}

#[derive(Default)]
struct WinitState {
    pending: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    events: VecDeque<Event>,
    modifiers: Modifiers,
    pointer: Option<(f32, f32)>,
    create_error: Option<anyhow::Error>,
}

impl ApplicationHandler for WinitState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(attrs) = self.pending.take() else {
            return;
        };

        match event_loop.create_window(attrs) {
            Ok(window) => {
                log::debug!("window created: {:?}", window.id());
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                self.create_error = Some(anyhow::Error::new(e).context("failed to create window"));
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_deref() else {
            return;
        };

        if let WindowEvent::ModifiersChanged(m) = &event {
            self.modifiers = map_modifiers(m.state());
            return;
        }

        let Some(ev) = translate_window_event(window, self.modifiers, self.pointer, &event) else {
            return;
        };

        match &ev {
            Event::MouseMoved { x, y } => self.pointer = Some((*x, *y)),
            Event::MouseLeft => self.pointer = None,
            _ => {}
        }

        self.events.push_back(ev);
    }
}

/// Adapter handed to `run_app` while the native loop owns control.
struct HostedLoop<'a> {
    window: &'a mut WinitWindow,
    delegate: &'a mut dyn LoopDelegate,
    prepared: bool,
    result: i32,
}

impl ApplicationHandler for HostedLoop<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        self.window.state.resumed(event_loop);

        if let Some(err) = self.window.state.create_error.take() {
            log::error!("{err:#}");
            self.result = -1;
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        self.window.state.window_event(event_loop, id, event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.state.window.is_none() {
            return;
        }

        if !self.prepared {
            self.prepared = true;
            self.result = self.delegate.prepare(&mut *self.window);
            if self.result != 0 {
                event_loop.exit();
                return;
            }
        }

        if self.delegate.iterate(&mut *self.window) == LoopControl::Exit {
            event_loop.exit();
        }
    }
}

/// Translates a winit `WindowEvent` into a harness `Event`.
///
/// Returns `None` for events the harness does not represent.
fn translate_window_event(
    window: &Window,
    modifiers: Modifiers,
    pointer: Option<(f32, f32)>,
    event: &WindowEvent,
) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Closed),

        WindowEvent::Moved(pos) => Some(Event::Moved { x: pos.x, y: pos.y }),

        WindowEvent::Resized(size) => Some(Event::Resized {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::Focused(true) => Some(Event::GainedFocus),
        WindowEvent::Focused(false) => Some(Event::LostFocus),

        WindowEvent::CursorEntered { .. } => Some(Event::MouseEntered),
        WindowEvent::CursorLeft { .. } => Some(Event::MouseLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(Event::MouseMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => {
            // winit 0.30 has no cursor query; use the tracked position.
            let (x, y) = pointer.unwrap_or((0.0, 0.0));
            let ev = MouseButtonEvent {
                button: map_mouse_button(*button),
                x,
                y,
                modifiers,
            };
            Some(match state {
                ElementState::Pressed => Event::MouseButtonPressed(ev),
                ElementState::Released => Event::MouseButtonReleased(ev),
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical_f32(window, *p);
                    MouseWheelDelta::Pixel { x, y }
                }
            };
            Some(Event::MouseWheelMoved { delta, modifiers })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let (key, code) = map_key(event.physical_key);
            let ev = KeyEvent {
                key,
                modifiers,
                code,
                repeat: event.repeat,
            };
            Some(match event.state {
                ElementState::Pressed => Event::KeyPressed(ev),
                ElementState::Released => Event::KeyReleased(ev),
            })
        }

        WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => {
            Some(Event::TextEntered(text.clone()))
        }

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    let PhysicalKey::Code(code) = pk else {
        // NativeKeyCode carries no portable numeric value.
        return (Key::Unknown(0), 0);
    };

    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        other => Key::Unknown(other as u32),
    };

    (key, code as u32)
}
