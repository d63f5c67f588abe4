//! Single-line text entry.

use super::behavior::{Behavior, EventCx, Response};
use super::builder::WidgetBuilder;
use crate::event::{InputEvent, KeyCode, UiEvent};
use crate::layout::{Rect, Size};
use crate::render::{measure_text, Modifiers, Rgb, Style, Surface};
use std::any::Any;

/// Text, cursor and focus of an [`InputBox`].
#[derive(Debug, Clone)]
pub struct InputBoxState {
    content: String,
    /// Cursor position as a byte offset into `content`.
    cursor: usize,
    focused: bool,
    /// Shown in place of the text while empty and unfocused.
    description: String,
    /// Print every character as `*`.
    masked: bool,
    /// Typed characters failing the filter are dropped.
    filter: Option<fn(char) -> bool>,
    style: Style,
    inactive_border: Option<Rgb>,
    active_border: Option<Rgb>,
}

impl InputBoxState {
    /// An empty, unfocused box.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            focused: false,
            description: description.into(),
            masked: false,
            filter: None,
            style: Style::default(),
            inactive_border: None,
            active_border: None,
        }
    }

    /// Current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether keys are being routed here.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.content.len();
    }

    fn border_color(&self) -> Option<Rgb> {
        if self.focused {
            self.active_border
        } else {
            self.inactive_border
        }
    }

    fn accepts(&self, c: char) -> bool {
        !c.is_control() && self.filter.is_none_or(|filter| filter(c))
    }

    fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.previous_boundary();
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.previous_boundary();
        }
    }

    fn cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn previous_boundary(&self) -> usize {
        self.content[..self.cursor].char_indices().last().map_or(0, |(i, _)| i)
    }

    fn display_chars(&self) -> Vec<char> {
        if self.masked {
            self.content.chars().map(|_| '*').collect()
        } else {
            self.content.chars().collect()
        }
    }

    /// Apply a key while focused. Returns whether the key was used.
    fn edit(&mut self, cx: &EventCx<'_>, event: &InputEvent) -> bool {
        let InputEvent::Key { code, modifiers } = event else {
            return false;
        };
        match code {
            KeyCode::Char(c) if !modifiers.control && !modifiers.alt => {
                if self.accepts(*c) {
                    self.insert_char(*c);
                }
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Enter => {
                let widget = cx.widget();
                tracing::debug!(widget = %widget.name(), "input submitted");
                cx.publish(UiEvent::Submitted {
                    source: widget.id(),
                    name: widget.name().to_string(),
                    text: self.content.clone(),
                });
            }
            _ => return false,
        }
        true
    }
}

impl Behavior for InputBoxState {
    /// The description plus one column for the cursor; longer text scrolls.
    fn measure(&self) -> Option<Size> {
        let description = measure_text(&self.description);
        Some(Size::new(description.width.max(1) + 1, 1))
    }

    fn paint(&self, surface: &mut dyn Surface, _global: Rect, content: Rect) {
        let width = usize::try_from(content.width).unwrap_or(0);
        if width == 0 || content.height <= 0 {
            return;
        }
        if self.content.is_empty() && !self.focused {
            surface.print(content, &self.description, Style::fg(Rgb::GRAY));
            return;
        }

        let chars = self.display_chars();
        let cursor = self.content[..self.cursor].chars().count();
        // Keep the cursor cell inside the box.
        let scroll = if cursor >= width { cursor - width + 1 } else { 0 };
        let visible: String = chars.iter().skip(scroll).take(width).collect();
        if !visible.is_empty() {
            surface.print(content, &visible, self.style);
        }

        if self.focused {
            let column = i32::try_from(cursor - scroll).unwrap_or(0);
            let symbol = chars.get(cursor).copied().unwrap_or(' ');
            let cell = Rect::new(content.x + column, content.y, 1, 1);
            surface.print(cell, &symbol.to_string(), self.style.with_modifiers(Modifiers::REVERSED));
        }
    }

    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &InputEvent) -> Response {
        if let Some((x, y)) = event.primary_press() {
            let inside = cx.global_rect().contains(x, y);
            if inside != self.focused {
                self.focused = inside;
                tracing::trace!(widget = %cx.widget().name(), focused = inside, "input focus");
                if let Some(color) = self.border_color() {
                    cx.widget().set_border_color(Some(color));
                }
            }
            return Response::IGNORED;
        }
        if self.focused && self.edit(cx, event) {
            return Response::CONSUMED;
        }
        Response::IGNORED
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

super::widget_handle! {
    /// A one-line text field.
    ///
    /// A primary press inside focuses it and a press anywhere else drops
    /// focus. While focused it takes printable keys, Backspace, Delete and
    /// the arrow keys, and swallows them; Enter publishes a
    /// [`UiEvent::Submitted`] carrying the text.
    InputBox
}

impl InputBox {
    /// Current text.
    pub fn text(&self) -> String {
        self.0
            .with_behavior(|state: &InputBoxState| state.content.clone())
            .unwrap_or_default()
    }

    /// Replace the text and put the cursor at its end.
    pub fn set_text(&self, text: &str) {
        self.0.with_behavior_mut(|state: &mut InputBoxState| state.set_content(text));
    }

    /// Empty the box.
    pub fn clear(&self) {
        self.set_text("");
    }

    /// Whether keys are being routed here.
    pub fn is_focused(&self) -> bool {
        self.0.with_behavior(InputBoxState::is_focused).unwrap_or(false)
    }

    /// Give or take focus, as a press would.
    pub fn set_focused(&self, focused: bool) {
        let border = self.0.with_behavior_mut(|state: &mut InputBoxState| {
            state.focused = focused;
            state.border_color()
        });
        if let Some(color) = border.flatten() {
            self.0.set_border_color(Some(color));
        }
    }

    /// Print `*` instead of the typed characters.
    pub fn set_masked(&self, masked: bool) {
        self.0.with_behavior_mut(|state: &mut InputBoxState| state.masked = masked);
    }

    /// Only accept typed characters for which `filter` holds.
    pub fn set_filter(&self, filter: Option<fn(char) -> bool>) {
        self.0.with_behavior_mut(|state: &mut InputBoxState| state.filter = filter);
    }

    /// Border colours shown without and with focus.
    pub fn set_border_colors(&self, inactive: Option<Rgb>, active: Option<Rgb>) {
        self.0.with_behavior_mut(|state: &mut InputBoxState| {
            state.inactive_border = inactive;
            state.active_border = active;
        });
        let current = self.0.with_behavior(|state: &InputBoxState| state.border_color());
        if let Some(color) = current.flatten() {
            self.0.set_border_color(Some(color));
        }
    }

    /// Replace the text style.
    pub fn set_style(&self, style: Style) {
        self.0.with_behavior_mut(|state: &mut InputBoxState| state.style = style);
    }
}

impl WidgetBuilder {
    /// Create an empty [`InputBox`] showing `description` until typed into.
    pub fn input_box(self, description: impl Into<String>) -> InputBox {
        InputBox(self.build(InputBoxState::new(description)))
    }
}
