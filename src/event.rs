//! Typed window events and their serial dispatch.
//!
//! SDL events are translated into [`AppEvent`]s, which are handed one at a time to an
//! [`EventHandler`]. The host adds one [`AppEvent::Redraw`] per loop iteration after draining the
//! queue, so a render tick never overlaps with event handling.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use crate::transform::Viewport;

/// The keys the demo distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    Left,
    Other(Keycode),
}

impl From<Keycode> for Key {
    fn from(keycode: Keycode) -> Self {
        match keycode {
            Keycode::Escape => Key::Escape,
            Keycode::Space => Key::Space,
            Keycode::Left => Key::Left,
            other => Key::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Resize(Viewport),
    Key(Key),
    Redraw,
    Quit,
}

impl AppEvent {
    /// Translates an SDL event, returning `None` for events the demo ignores.
    pub fn from_sdl(event: &Event) -> Option<Self> {
        match event {
            Event::Quit { .. } => Some(AppEvent::Quit),
            Event::Window {
                win_event: WindowEvent::Resized(width, height),
                ..
            } => Some(AppEvent::Resize(Viewport::new(
                (*width).max(0) as u32,
                (*height).max(0) as u32,
            ))),
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => Some(AppEvent::Key(Key::from(*keycode))),
            _ => None,
        }
    }
}

/// Whether the host loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Receives dispatched events.
pub trait EventHandler {
    /// Called with the new drawable size.
    fn resize(&mut self, viewport: Viewport);

    /// Called for every key press except escape, which always ends the loop.
    fn key(&mut self, _key: Key) {}

    /// Called once per idle tick to render a frame.
    fn redraw(&mut self);
}

/// Routes one event to the handler.
pub fn dispatch<H: EventHandler + ?Sized>(handler: &mut H, event: AppEvent) -> Control {
    match event {
        AppEvent::Quit | AppEvent::Key(Key::Escape) => return Control::Exit,
        AppEvent::Resize(viewport) => handler.resize(viewport),
        AppEvent::Key(key) => handler.key(key),
        AppEvent::Redraw => handler.redraw(),
    }
    Control::Continue
}
