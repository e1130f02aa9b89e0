use super::adjacency::EdgeSlot;
use crate::types::{EdgeLabel, Mark, NodeId, NO_NODE};

/// Everything needed to put a removed edge back where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedEdge {
    /// The node whose half was named in the removal.
    pub from: NodeId,
    pub pos_from: usize,
    pub to: NodeId,
    pub pos_to: usize,
    pub label: EdgeLabel,
    pub cycle_mark: Mark,
    pub closing: bool,
}

impl RemovedEdge {
    fn sentinel() -> Self {
        Self {
            from: NO_NODE,
            pos_from: 0,
            to: NO_NODE,
            pos_to: 0,
            label: 0,
            cycle_mark: 0,
            closing: false,
        }
    }

    /// The half stored at `from`.
    pub(crate) fn from_half(&self) -> EdgeSlot {
        EdgeSlot {
            to: self.to,
            mirror: self.pos_to,
            label: self.label,
            cycle_mark: self.cycle_mark,
            closing: self.closing,
        }
    }

    /// The half stored at `to`.
    pub(crate) fn to_half(&self) -> EdgeSlot {
        EdgeSlot {
            to: self.from,
            mirror: self.pos_from,
            ..self.from_half()
        }
    }
}

/// Stack of removed edges.
///
/// The bottom entry is a sentinel whose endpoints are [`NO_NODE`], so the
/// top entry is always defined and compares above every real edge.
#[derive(Debug, Clone)]
pub struct EditLog {
    records: Vec<RemovedEdge>,
}

impl EditLog {
    pub fn new() -> Self {
        Self {
            records: vec![RemovedEdge::sentinel()],
        }
    }

    pub fn push(&mut self, record: RemovedEdge) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> RemovedEdge {
        assert!(self.records.len() > 1, "Invalid reinsert: no removed edge");
        self.records.pop().unwrap()
    }

    pub fn top(&self) -> &RemovedEdge {
        self.records.last().unwrap()
    }

    /// The number of removed edges.
    pub fn depth(&self) -> usize {
        self.records.len() - 1
    }

    /// The removed edges, oldest first.
    pub fn removed(&self) -> &[RemovedEdge] {
        &self.records[1..]
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new()
    }
}
