//! Random access to the messages of a mail file.

pub mod reader;
