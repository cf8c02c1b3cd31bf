/// Pure business rules with no storage access
pub mod color;

pub use color::{normalize_color, ColorToken};
