//! Terminal session: owns the real terminal for the lifetime of a screen.
//!
//! Starting a session switches the terminal to raw mode (optionally the
//! alternate screen and mouse capture) and spawns the [`InputActor`].
//! Dropping it restores everything.

use super::input::InputActor;
use super::output::{render_canvas, OutputBuffer};
use crate::config::FrameConfig;
use crate::error::UiError;
use crate::event::InputEvent;
use crate::render::Canvas;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Capacity of the input channel between the input thread and the frame loop.
const INPUT_QUEUE: usize = 64;

/// A live terminal session driving one frame loop.
pub struct TerminalSession {
    config: FrameConfig,
    input_rx: Receiver<InputEvent>,
    input_actor: Option<InputActor>,
    output: OutputBuffer,
    frame_start: Instant,
    frame_duration: Duration,
    frame_count: u64,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn start(config: &FrameConfig) -> Result<Self, UiError> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(INPUT_QUEUE);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout());

        tracing::info!(
            fps = config.target_fps,
            mouse = config.enable_mouse,
            alternate_screen = config.alternate_screen,
            "terminal session started"
        );

        Ok(Self {
            config: config.clone(),
            input_rx,
            input_actor: Some(input_actor),
            output: OutputBuffer::new(),
            frame_start: Instant::now(),
            frame_duration: config.frame_duration(),
            frame_count: 0,
        })
    }

    /// Current terminal size in cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried.
    pub fn size() -> Result<(i32, i32), UiError> {
        let (width, height) = terminal::size()?;
        Ok((i32::from(width), i32::from(height)))
    }

    /// A blank canvas matching the terminal size.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried.
    pub fn canvas() -> Result<Canvas, UiError> {
        let (width, height) = Self::size()?;
        Ok(Canvas::new(width, height))
    }

    /// Poll for the next input event (non-blocking).
    ///
    /// Returns `None` if no event is available.
    pub fn poll_input(&self) -> Option<InputEvent> {
        match self.input_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(InputEvent::Error("Input channel disconnected".to_string()))
            }
        }
    }

    /// Wait for the next input event (blocking with timeout).
    pub fn wait_input(&self, timeout: Duration) -> Option<InputEvent> {
        self.input_rx.recv_timeout(timeout).ok()
    }

    /// Drain all pending input events.
    pub fn drain_input(&self) -> Vec<InputEvent> {
        self.input_rx.try_iter().collect()
    }

    /// Write a finished frame to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.output.clear();
        render_canvas(canvas, &mut self.output);
        let mut stdout = io::stdout().lock();
        self.output.flush_to(&mut stdout)?;
        stdout.flush()
    }

    /// Begin a new frame.
    ///
    /// Call this at the start of your frame loop.
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// End a frame, sleeping if necessary to hold the target frame rate.
    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
    }

    /// Number of frames completed so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::info!(frames = self.frame_count, "terminal session closed");
    }
}

impl std::fmt::Debug for TerminalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("config", &self.config)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}
