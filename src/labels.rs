//! Dense label codes.

use crate::types::{EdgeLabel, InputLabel, NodeLabel, MAX_EDGE_LABEL};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// An edge label code together with the node labels it connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKind {
    pub input: InputLabel,
    pub lower: NodeLabel,
    pub higher: NodeLabel,
}

/// Maps input labels to dense codes.
///
/// Node codes ascend with the input label. An edge code identifies an input
/// edge label together with the (unordered) pair of node codes it connects,
/// and edge codes ascend with `(input, lower, higher)`.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    node_inputs: Vec<InputLabel>,
    node_codes: HashMap<InputLabel, NodeLabel>,
    edge_kinds: Vec<EdgeKind>,
    edge_codes: HashMap<EdgeKind, EdgeLabel>,
}

impl LabelTable {
    /// `edges` yields `(edge label, endpoint label, endpoint label)` triples
    /// of input labels. Endpoint labels need not appear in `nodes`.
    pub fn new<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = InputLabel>,
        E: IntoIterator<Item = (InputLabel, InputLabel, InputLabel)>,
    {
        let edges: Vec<_> = edges.into_iter().collect();
        let node_inputs: Vec<InputLabel> = nodes
            .into_iter()
            .chain(edges.iter().flat_map(|&(_, a, b)| vec![a, b]))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let node_codes: HashMap<_, _> = node_inputs
            .iter()
            .enumerate()
            .map(|(code, &input)| (input, code as NodeLabel))
            .collect();
        let edge_kinds: Vec<EdgeKind> = edges
            .iter()
            .map(|&(input, a, b)| {
                let (a, b) = (node_codes[&a], node_codes[&b]);
                EdgeKind {
                    input,
                    lower: a.min(b),
                    higher: a.max(b),
                }
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        assert!(
            (edge_kinds.len() as u64) < MAX_EDGE_LABEL as u64,
            "Too many edge labels"
        );
        let edge_codes = edge_kinds
            .iter()
            .enumerate()
            .map(|(code, &kind)| (kind, code as EdgeLabel))
            .collect();
        Self {
            node_inputs,
            node_codes,
            edge_kinds,
            edge_codes,
        }
    }

    pub fn num_node_labels(&self) -> usize {
        self.node_inputs.len()
    }

    pub fn num_edge_labels(&self) -> usize {
        self.edge_kinds.len()
    }

    pub fn node_code(&self, input: InputLabel) -> Option<NodeLabel> {
        self.node_codes.get(&input).copied()
    }

    /// Looks up the code of an input edge label between two input node labels.
    pub fn edge_code(&self, input: InputLabel, a: InputLabel, b: InputLabel) -> Option<EdgeLabel> {
        let (a, b) = (self.node_code(a)?, self.node_code(b)?);
        self.edge_codes
            .get(&EdgeKind {
                input,
                lower: a.min(b),
                higher: a.max(b),
            })
            .copied()
    }

    pub fn input_node_label(&self, label: NodeLabel) -> InputLabel {
        self.node_inputs[label as usize]
    }

    pub fn input_edge_label(&self, label: EdgeLabel) -> InputLabel {
        self.edge_kinds[label as usize].input
    }

    /// The node labels joined by `label`, lower code first.
    pub fn endpoints(&self, label: EdgeLabel) -> (NodeLabel, NodeLabel) {
        let kind = &self.edge_kinds[label as usize];
        (kind.lower, kind.higher)
    }

    /// The label of the node reached over `label` from a node labeled `from`.
    pub fn opposite(&self, label: EdgeLabel, from: NodeLabel) -> NodeLabel {
        match self.endpoints(label) {
            (lower, higher) if lower == from => higher,
            (lower, higher) if higher == from => lower,
            _ => panic!("Invalid edge label {} for node label {}", label, from),
        }
    }
}

impl fmt::Display for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "node labels:")?;
        for (code, input) in self.node_inputs.iter().enumerate() {
            writeln!(f, "  {} -> {}", input, code)?;
        }
        writeln!(f, "edge labels:")?;
        for (code, kind) in self.edge_kinds.iter().enumerate() {
            writeln!(
                f,
                "  {} ({}-{}) -> {}",
                kind.input,
                self.input_node_label(kind.lower),
                self.input_node_label(kind.higher),
                code
            )?;
        }
        Ok(())
    }
}
