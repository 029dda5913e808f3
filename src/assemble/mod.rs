//! Assemble Module
//!
//! Best-effort scraping of the upstream bodies into the served document.

mod assembler;
pub mod parse;

pub use assembler::{Assembler, SourceBodies};
pub use parse::ParseError;
