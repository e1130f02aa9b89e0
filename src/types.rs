//! Various types related to pattern graphs.

/// The position of a node in a pattern graph.
pub type NodeId = usize;

/// The dense node label code.
pub type NodeLabel = u32;

/// The dense edge label code.
pub type EdgeLabel = u32;

/// The label as it appears in the input.
pub type InputLabel = u32;

/// The depth of a node below the root(s) of a canonical tree.
pub type Depth = u32;

/// One bit per spanning tree recursion level.
pub type Mark = u32;

/// The degree bound of a pattern node.
pub type Degree = u32;

/// Marks a missing node, e.g. the endpoints of the removed edge sentinel.
pub const NO_NODE: NodeId = NodeId::MAX;

/// Larger than every valid edge label.
pub const MAX_EDGE_LABEL: EdgeLabel = EdgeLabel::MAX;

/// The degree bound of the root.
pub const UNBOUNDED_DEGREE: Degree = Degree::MAX;
