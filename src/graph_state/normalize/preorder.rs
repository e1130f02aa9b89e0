use super::{
    centers::{Center, Centers},
    layers::Layers,
};
use crate::{
    code::TreeTuple,
    types::{Depth, NodeId},
};

/// A node reached by the pre-order walk of an ordered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Visit {
    pub node: NodeId,
    /// Depth in the forest; forest roots have depth 0.
    pub depth: Depth,
    pub preorder: usize,
}

impl Visit {
    /// Whether this visit is one of the two centers of a bicentered tree,
    /// which have no tuple of their own.
    pub fn is_center(&self, bicentered: bool) -> bool {
        bicentered && self.depth == 0
    }

    /// The tuple describing this visit.
    pub fn tuple(&self, layers: &Layers, bicentered: bool) -> TreeTuple {
        let depth = if bicentered { self.depth - 1 } else { self.depth };
        TreeTuple::new(depth, layers.edge_label[self.node])
    }
}

/// The pre-order walk of an ordered tree together with the pre-order number
/// of every node. A unicentered root is numbered 0 and not visited.
#[derive(Debug)]
pub(crate) struct Preorder {
    pub visits: Vec<Visit>,
    pub numbers: Vec<usize>,
}

impl Preorder {
    /// Walks the tree in the order left by [`Layers::order`].
    pub fn walk(layers: &Layers, centers: &Centers) -> Self {
        Self::from_order(&layers.layers[0], &layers.children, centers)
    }

    /// Walks the tree in the order the nodes were grown: roots and children
    /// by ascending node id.
    pub fn grown(layers: &Layers, centers: &Centers) -> Self {
        let mut roots = layers.layers[0].clone();
        roots.sort_unstable();
        let children: Vec<Vec<NodeId>> = layers
            .children
            .iter()
            .map(|children| {
                let mut children = children.clone();
                children.sort_unstable();
                children
            })
            .collect();
        Self::from_order(&roots, &children, centers)
    }

    fn from_order(roots: &[NodeId], children: &[Vec<NodeId>], centers: &Centers) -> Self {
        let mut numbers = vec![0; children.len()];
        let mut next = 0;
        if let Center::Single(root) = centers.center {
            numbers[root] = 0;
            next = 1;
        }
        let mut visits = Vec::with_capacity(children.len());
        let mut stack: Vec<(NodeId, Depth)> = roots.iter().rev().map(|&node| (node, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            numbers[node] = next;
            visits.push(Visit {
                node,
                depth,
                preorder: next,
            });
            stack.extend(children[node].iter().rev().map(|&child| (child, depth + 1)));
            next += 1;
        }
        Self { visits, numbers }
    }

    /// The tree tuples of the walk and the number of tuples before the
    /// second forest root.
    pub fn tuples(&self, layers: &Layers, bicentered: bool) -> (Vec<TreeTuple>, usize) {
        let mut tuples = Vec::with_capacity(self.visits.len());
        let mut start_second_path = 0;
        let mut roots_seen = 0;
        for visit in &self.visits {
            if visit.depth == 0 {
                roots_seen += 1;
                if roots_seen == 2 {
                    start_second_path = tuples.len();
                }
            }
            if !visit.is_center(bicentered) {
                tuples.push(visit.tuple(layers, bicentered));
            }
        }
        (tuples, start_second_path)
    }

    /// Whether every node is numbered with its own id.
    pub fn follows_node_ids(&self) -> bool {
        self.numbers.iter().enumerate().all(|(node, &number)| node == number)
    }

    /// The node at each pre-order position.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = vec![0; self.numbers.len()];
        for (node, &number) in self.numbers.iter().enumerate() {
            nodes[number] = node;
        }
        nodes
    }
}
