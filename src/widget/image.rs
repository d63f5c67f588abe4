//! Sprite widget.

use super::behavior::Behavior;
use super::builder::WidgetBuilder;
use crate::layout::{Rect, Size};
use crate::render::{Sprite, Surface};
use std::any::Any;

/// Sprite content of an [`Image`].
#[derive(Debug, Clone)]
pub struct ImageContent {
    sprite: Sprite,
}

impl ImageContent {
    /// Wrap a sprite.
    pub const fn new(sprite: Sprite) -> Self {
        Self { sprite }
    }

    /// The sprite.
    pub const fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

impl Behavior for ImageContent {
    fn measure(&self) -> Option<Size> {
        Some(self.sprite.size())
    }

    fn paint(&self, surface: &mut dyn Surface, _global: Rect, content: Rect) {
        surface.blit(&self.sprite, content);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

super::widget_handle! {
    /// A widget showing a pre-rendered sprite.
    Image
}

impl Image {
    /// Size of the current sprite.
    pub fn sprite_size(&self) -> Size {
        self.0
            .with_behavior(|content: &ImageContent| content.sprite.size())
            .unwrap_or(Size::ZERO)
    }

    /// Replace the sprite and drop this widget's cached geometry.
    pub fn set_sprite(&self, sprite: Sprite) {
        self.0.with_behavior_mut(|content: &mut ImageContent| content.sprite = sprite);
        self.0.invalidate();
    }
}

impl WidgetBuilder {
    /// Create an [`Image`].
    pub fn image(self, sprite: Sprite) -> Image {
        Image(self.build(ImageContent::new(sprite)))
    }
}
