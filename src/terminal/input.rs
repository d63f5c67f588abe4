//! Input actor: dedicated thread turning terminal events into [`InputEvent`]s.
//!
//! The thread polls crossterm with a short timeout so that it notices a
//! shutdown request promptly, converts each event and forwards it to the
//! frame loop over a channel.

use crate::event::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to the frame loop.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the input thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("dungeon-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })
            .expect("Failed to spawn input thread");

        Self { handle: Some(handle), shutdown }
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        tracing::debug!("input thread started");
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input) = convert_event(event) {
                            if sender.send(input).is_err() {
                                // Frame loop is gone.
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to read terminal event");
                        let _ = sender.send(InputEvent::Error(err.to_string()));
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "failed to poll terminal events");
                    let _ = sender.send(InputEvent::Error(err.to_string()));
                }
            }
        }
        tracing::debug!("input thread stopped");
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event; events the widget tree has no use for map to `None`.
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            // Only key presses, not releases or repeats.
            if key.kind != KeyEventKind::Press {
                return None;
            }
            let modifiers = convert_modifiers(key.modifiers);
            if modifiers.control && key.code == event::KeyCode::Char('c') {
                return Some(InputEvent::Quit);
            }
            let code = convert_key_code(key.code)?;
            Some(InputEvent::Key { code, modifiers })
        }
        Event::Mouse(mouse) => convert_mouse_event(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: i32::from(width),
            height: i32::from(height),
        }),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<InputEvent> {
    let x = i32::from(mouse.column);
    let y = i32::from(mouse.row);
    match mouse.kind {
        event::MouseEventKind::Down(button) => Some(InputEvent::MouseDown(MouseEvent::with_button(
            x,
            y,
            convert_mouse_button(button),
        ))),
        event::MouseEventKind::Up(button) => Some(InputEvent::MouseUp(MouseEvent::with_button(
            x,
            y,
            convert_mouse_button(button),
        ))),
        event::MouseEventKind::Moved => Some(InputEvent::MouseMove(MouseEvent { x, y, button: None })),
        event::MouseEventKind::Drag(button) => Some(InputEvent::MouseMove(MouseEvent::with_button(
            x,
            y,
            convert_mouse_button(button),
        ))),
        event::MouseEventKind::ScrollUp => Some(InputEvent::MouseScroll { x, y, delta: 1 }),
        event::MouseEventKind::ScrollDown => Some(InputEvent::MouseScroll { x, y, delta: -1 }),
        _ => None,
    }
}

const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}
