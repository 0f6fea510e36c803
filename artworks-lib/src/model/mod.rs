//! Data model types

mod artwork;
mod cursor;
mod selection;

pub use artwork::*;
pub use cursor::*;
pub use selection::*;
