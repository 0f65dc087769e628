//! Debug previews of a generated world.
//!
//! Provides [`DebugImage`] plus renderers that draw a [`GeneratedWorld`]
//! as a side-on picture or as text for terminal output.
//!
//! [`GeneratedWorld`]: crate::GeneratedWorld

mod image;
mod renderers;

pub use self::image::{DebugImage, Rgba};
pub use renderers::{decoration_color, material_color, render_ascii, render_world};
