//! Canonical codes of pattern graphs.

use crate::types::{Depth, EdgeLabel, NodeLabel};
use derive_more::Display;
use std::fmt;

/// One node of a canonical tree in pre-order: its depth below the root(s)
/// and the label of the edge to its parent.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "({} {})", depth, label)]
pub struct TreeTuple {
    pub depth: Depth,
    pub label: EdgeLabel,
}

impl TreeTuple {
    pub fn new(depth: Depth, label: EdgeLabel) -> Self {
        Self { depth, label }
    }
}

/// A closing edge between 1-based node positions, `from > to`.
///
/// Ordered by `from`, then `to`, then `label`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "({} {} {})", from, to, label)]
pub struct CloseTuple {
    pub from: usize,
    pub to: usize,
    pub label: EdgeLabel,
}

impl CloseTuple {
    /// Orders the endpoints so that `from > to`.
    pub fn new(a: usize, b: usize, label: EdgeLabel) -> Self {
        Self {
            from: a.max(b),
            to: a.min(b),
            label,
        }
    }
}

/// The outcome of a canonicality test.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Normality {
    /// No encoding lower than the stored code exists.
    #[display(fmt = "canonical")]
    NotLower,
    /// A lower encoding exists that differs only in the last close tuple.
    #[display(fmt = "lower at last tuple")]
    LowerAtLastTuple,
    /// A lower encoding exists that differs before the last close tuple.
    #[display(fmt = "lower at prefix")]
    LowerAtPrefix,
}

impl Normality {
    pub fn is_canonical(self) -> bool {
        self == Normality::NotLower
    }
}

/// The encoding of a pattern graph: a canonical spanning tree plus the
/// closing edges that complete it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalCode {
    /// Number of nodes on the longest path of the tree.
    pub backbone_length: u32,
    /// Number of tree tuples before the second root subtree starts.
    pub start_second_path: usize,
    /// Bicentered with identical arms but differently labeled centers.
    pub nasty: bool,
    /// The label of the center node, when unicentered.
    pub center_label: NodeLabel,
    /// The label of the center edge, when bicentered.
    pub bicenter_label: EdgeLabel,
    pub tree_tuples: Vec<TreeTuple>,
    pub close_tuples: Vec<CloseTuple>,
}

impl CanonicalCode {
    pub fn is_bicentered(&self) -> bool {
        self.backbone_length % 2 == 0
    }

    pub fn tree_tuples(&self) -> &[TreeTuple] {
        &self.tree_tuples
    }

    pub fn close_tuples(&self) -> &[CloseTuple] {
        &self.close_tuples
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "backbone {}", self.backbone_length)?;
        if self.is_bicentered() {
            write!(f, " bicenter {}", self.bicenter_label)?;
            if self.nasty {
                write!(f, " nasty")?;
            }
        } else {
            write!(f, " center {}", self.center_label)?;
        }
        write!(f, " second {} |", self.start_second_path)?;
        for tuple in &self.tree_tuples {
            write!(f, " {}", tuple)?;
        }
        write!(f, " |")?;
        for tuple in &self.close_tuples {
            write!(f, " {}", tuple)?;
        }
        Ok(())
    }
}
