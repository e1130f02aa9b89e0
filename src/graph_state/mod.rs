pub use adjacency::{EdgeSlot, Node};
pub use edit_log::{EditLog, RemovedEdge};
pub use state::GraphState;

pub(crate) mod adjacency;
pub(crate) mod edit_log;

mod cycles;
mod normalize;
mod spanning;
mod state;
