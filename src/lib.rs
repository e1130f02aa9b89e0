//! Canonical-form test for frequent subgraph mining.

pub mod code;
pub mod graph_state;
pub mod gsp;
pub mod labels;
pub mod session;
pub mod types;

pub(crate) mod tools;
