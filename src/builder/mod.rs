//! Value modifier builders.
//!
//! Each builder takes one declaration's raw value and compiles it into a
//! [`Modifier`](crate::Modifier) tree, or returns `None` when the value is
//! unusable (the declaration is then left untouched). Failures never cross
//! a declaration boundary.

mod background;
mod color;
mod shadow;

pub use background::background_image_modifier;
pub use color::color_modifier;
pub use shadow::shadow_modifier;
