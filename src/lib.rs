//! `headerorder` — show email header fields in a fixed, user-chosen order.
//!
//! This crate provides the header copiers a mail reader uses to fill its
//! message view: the legacy ignore/select copier, the reordering wrapper
//! around it, and the small mail store the CLI reads messages from.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod store;
