//! Widgets: a retained tree of positionable, showable, event-reactive nodes.
//!
//! # Architecture
//!
//! ```text
//! Group (root, owns the surface)
//!  ├── WidgetsGroup "Menu"          draw order: top to bottom
//!  │    ├── Label "Menu-Title"      event order: bottom to top
//!  │    └── Button "Menu-Play"
//!  └── DropMenu "ItemMenu"          (hidden + disabled until opened)
//! ```
//!
//! Every node is a [`WidgetRef`]. Kind-specific logic sits behind the
//! [`Behavior`] trait; typed handles ([`Label`], [`Button`], ...) deref to
//! `WidgetRef` and add kind-specific operations. Widgets are created with
//! [`WidgetBuilder`].

/// Declares a typed handle that derefs to [`WidgetRef`].
macro_rules! widget_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(pub(crate) $crate::widget::WidgetRef);

        impl $name {
            /// The underlying widget.
            pub const fn widget(&self) -> &$crate::widget::WidgetRef {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::widget::WidgetRef;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<$crate::widget::WidgetRef> for $name {
            fn as_ref(&self) -> &$crate::widget::WidgetRef {
                &self.0
            }
        }

        impl From<$name> for $crate::widget::WidgetRef {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }
    };
}

pub(crate) use widget_handle;

mod alert;
mod behavior;
mod builder;
mod button;
mod drop_menu;
mod group;
mod image;
mod input_box;
mod label;
mod node;
mod root;

pub use alert::{Alert, AlertState};
pub use behavior::{Behavior, Container, EventCx, Response};
pub use builder::WidgetBuilder;
pub use button::{Button, ButtonFace, ButtonState};
pub use drop_menu::{DropMenu, DropMenuState};
pub use group::WidgetsGroup;
pub use image::{Image, ImageContent};
pub use input_box::{InputBox, InputBoxState};
pub use label::{Label, LabelContent};
pub use node::{BoxStyle, WeakWidget, WidgetId, WidgetKind, WidgetRef};
pub use root::Group;
