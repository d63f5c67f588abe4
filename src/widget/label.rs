//! Text widget.

use super::behavior::Behavior;
use super::builder::WidgetBuilder;
use crate::layout::{Rect, Size};
use crate::render::{measure_text, Style, Surface};
use std::any::Any;

/// Text content of a [`Label`].
#[derive(Debug, Clone, Default)]
pub struct LabelContent {
    text: String,
    style: Style,
}

impl LabelContent {
    /// Text with a style.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self { text: text.into(), style }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Behavior for LabelContent {
    fn measure(&self) -> Option<Size> {
        Some(measure_text(&self.text))
    }

    fn paint(&self, surface: &mut dyn Surface, _global: Rect, content: Rect) {
        surface.print(content, &self.text, self.style);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

super::widget_handle! {
    /// A widget showing a line or block of text.
    ///
    /// Auto width and height follow the measured text plus insets.
    Label
}

impl Label {
    /// Current text.
    pub fn text(&self) -> String {
        self.0
            .with_behavior(|content: &LabelContent| content.text.clone())
            .unwrap_or_default()
    }

    /// Replace the text and drop this widget's cached geometry.
    ///
    /// The owner keeps its size until it is updated.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.0.with_behavior_mut(|content: &mut LabelContent| content.text = text);
        self.0.invalidate();
    }

    /// Replace the text style.
    pub fn set_style(&self, style: Style) {
        self.0.with_behavior_mut(|content: &mut LabelContent| content.style = style);
    }
}

impl WidgetBuilder {
    /// Create a [`Label`] with the default style.
    pub fn label(self, text: impl Into<String>) -> Label {
        self.styled_label(text, Style::default())
    }

    /// Create a [`Label`] with a text style.
    pub fn styled_label(self, text: impl Into<String>, style: Style) -> Label {
        Label(self.build(LabelContent::new(text, style)))
    }
}
