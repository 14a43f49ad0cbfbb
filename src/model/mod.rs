//! Data model: header order, display style, and message regions.

pub mod header;
pub mod region;
