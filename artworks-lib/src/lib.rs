//! Artworks API client library
//!
//! An async client for the Art Institute of Chicago collection API, with a
//! table controller supporting manual and cross-page bulk row selection.

pub mod api;
pub mod controller;
pub mod error;
pub mod model;
pub mod select;

mod client;

pub use client::*;
