use std::fmt;

/// Keyboard key identifier.
///
/// Only keys the host and samples react to by identity get a variant. Text is
/// delivered through `Event::TextEntered`; every other key arrives as
/// `Key::Unknown(code)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Platform-dependent key not represented above.
    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Modifier keys held when an event was produced.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Stable platform code when available (e.g. scancode).
    pub code: u32,
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }
}

/// Button event with the pointer position in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Window and input events queued by an [`OsWindow`](super::OsWindow).
///
/// The host loop only reacts to `Closed`; everything else is for the
/// application to read during `step`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user or the OS asked for the window to close.
    Closed,
    Moved { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
    LostFocus,
    GainedFocus,
    TextEntered(String),
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    MouseButtonPressed(MouseButtonEvent),
    MouseButtonReleased(MouseButtonEvent),
    MouseMoved { x: f32, y: f32 },
    MouseWheelMoved { delta: MouseWheelDelta, modifiers: Modifiers },
    MouseEntered,
    MouseLeft,
}

impl Event {
    pub fn is_close(&self) -> bool {
        matches!(self, Event::Closed)
    }

    /// Returns the key if this is a key press (repeats included).
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            Event::KeyPressed(k) => Some(k.key),
            _ => None,
        }
    }
}
