//! Web API operations

mod fetch;
mod page;
mod pages;
mod response;

pub use fetch::*;
pub use page::*;
pub use pages::*;
pub use response::parse_page;
