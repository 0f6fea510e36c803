//! Table state owned by a single controller.

mod notice;
mod table;

pub use notice::*;
pub use table::*;
