//! Email parsing: header block scanning and MBOX splitting.

pub mod header;
pub mod mbox;
