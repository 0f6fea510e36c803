//! Cross-page bulk row selection

mod bulk;

pub use bulk::*;
