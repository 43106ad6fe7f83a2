#![forbid(unsafe_code)]

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod document;
pub mod enrich;
pub mod import;
pub mod logging;
pub mod pipeline;
pub mod splitter;
pub mod title;
pub mod writer;
