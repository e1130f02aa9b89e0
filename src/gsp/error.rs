use super::GspRule;
use crate::types::InputLabel;
use derive_more::Display;

pub type Result<T> = std::result::Result<T, pest::error::Error<GspRule>>;

/// Errors raised while reading a GSP file into pattern graphs.
#[derive(Debug, Display, PartialEq)]
pub enum Err {
    ParseError(pest::error::Error<GspRule>),
    #[display(fmt = "graph {} has no vertices", _0)]
    EmptyGraph(usize),
    #[display(fmt = "graph {} is not connected", _0)]
    Disconnected(usize),
    #[display(fmt = "graph {}: unknown vertex label {}", _0, _1)]
    UnknownVertexLabel(usize, InputLabel),
    #[display(fmt = "graph {}: unknown edge label {} ({}-{})", _0, _1, _2, _3)]
    UnknownEdgeLabel(usize, InputLabel, InputLabel, InputLabel),
}

impl std::error::Error for Err {}

impl From<pest::error::Error<GspRule>> for Err {
    fn from(e: pest::error::Error<GspRule>) -> Self {
        Err::ParseError(e)
    }
}
