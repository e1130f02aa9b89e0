//! Reading pattern graphs from GSP files.
//!
//! A GSP file lists graphs as `t # <id>` headers, each followed by its
//! vertices `v <id> <label>` and edges `e <from> <to> <label>`.

pub use error::Err;
pub use graph::{label_table, GspGraph};
pub use parser::parse;

pub(crate) use parser::GspRule;

pub mod error;

mod graph;
mod parser;
