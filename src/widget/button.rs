//! Pressable widget.

use super::behavior::{Behavior, EventCx, Response};
use super::builder::WidgetBuilder;
use crate::event::{ClickTracker, InputEvent};
use crate::layout::{Rect, Size};
use crate::render::{measure_text, Rgb, Sprite, Style, Surface};
use std::any::Any;

/// What a button shows.
#[derive(Debug, Clone)]
pub enum ButtonFace {
    /// Styled text.
    Text {
        /// The caption.
        text: String,
        /// Caption style.
        style: Style,
    },
    /// A sprite.
    Sprite(Sprite),
}

impl ButtonFace {
    fn size(&self) -> Size {
        match self {
            Self::Text { text, .. } => measure_text(text),
            Self::Sprite(sprite) => sprite.size(),
        }
    }
}

impl From<&str> for ButtonFace {
    fn from(text: &str) -> Self {
        Self::Text { text: text.to_string(), style: Style::default() }
    }
}

impl From<String> for ButtonFace {
    fn from(text: String) -> Self {
        Self::Text { text, style: Style::default() }
    }
}

impl From<Sprite> for ButtonFace {
    fn from(sprite: Sprite) -> Self {
        Self::Sprite(sprite)
    }
}

/// Press state and face of a [`Button`].
#[derive(Debug, Clone)]
pub struct ButtonState {
    face: ButtonFace,
    tracker: ClickTracker,
    active_background: Option<Rgb>,
}

impl ButtonState {
    /// A released button showing `face`.
    pub const fn new(face: ButtonFace) -> Self {
        Self { face, tracker: ClickTracker::new(), active_background: None }
    }

    /// Whether a press that started inside is being held.
    pub const fn is_pressed(&self) -> bool {
        self.tracker.is_pressed()
    }
}

impl Behavior for ButtonState {
    fn measure(&self) -> Option<Size> {
        Some(self.face.size())
    }

    fn paint(&self, surface: &mut dyn Surface, global: Rect, content: Rect) {
        if let (true, Some(active)) = (self.tracker.is_pressed(), self.active_background) {
            surface.fill(global, active);
        }
        match &self.face {
            ButtonFace::Text { text, style } => surface.print(content, text, *style),
            ButtonFace::Sprite(sprite) => surface.blit(sprite, content),
        }
    }

    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &InputEvent) -> Response {
        if self.tracker.track(event, cx.global_rect()) {
            Response::CLICKED
        } else {
            Response::IGNORED
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

super::widget_handle! {
    /// A widget that reports clicks.
    ///
    /// A click is a primary press inside the button followed by a primary
    /// release inside it. Each click runs the handlers registered with
    /// `on_click` and publishes a [`crate::event::UiEvent::Clicked`].
    Button
}

impl Button {
    /// Whether the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.0.with_behavior(ButtonState::is_pressed).unwrap_or(false)
    }

    /// Replace the face and drop this widget's cached geometry.
    pub fn set_face(&self, face: impl Into<ButtonFace>) {
        let face = face.into();
        self.0.with_behavior_mut(|state: &mut ButtonState| state.face = face);
        self.0.invalidate();
    }

    /// Background painted over the button while it is held down.
    pub fn set_active_background(&self, color: Option<Rgb>) {
        self.0
            .with_behavior_mut(|state: &mut ButtonState| state.active_background = color);
    }
}

impl WidgetBuilder {
    /// Create a [`Button`].
    pub fn button(self, face: impl Into<ButtonFace>) -> Button {
        Button(self.build(ButtonState::new(face.into())))
    }
}
