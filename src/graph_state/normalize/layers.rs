use super::centers::{Center, Centers};
use crate::{
    graph_state::adjacency::Node,
    types::{EdgeLabel, NodeId, MAX_EDGE_LABEL},
};

/// Which backbone path, if any, a node lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathMark {
    Off,
    Lowest,
    Second,
}

/// A tree hung from its center as a forest of depth layers.
///
/// A bicentered tree yields a forest of the two centers. A unicentered tree
/// yields a forest of the root's children; the root itself belongs to no
/// layer.
#[derive(Debug)]
pub(crate) struct Layers {
    pub layers: Vec<Vec<NodeId>>,
    pub parent: Vec<Option<NodeId>>,
    pub children: Vec<Vec<NodeId>>,
    /// Label of the edge to the parent.
    pub edge_label: Vec<EdgeLabel>,
    /// Index of the forest root a node descends from.
    pub tree: Vec<usize>,
    pub path: Vec<PathMark>,
    /// The forest tree holding the lowest labeled path, once it is unique.
    pub lowest_tree: Option<usize>,
    /// Labels of the lowest and the second lowest path per depth.
    pub path_labels: [Vec<EdgeLabel>; 2],
    /// Rank of a node among its layer, equal ranks for equal subtrees.
    pub code: Vec<usize>,
    pub max_depth: usize,
}

impl Layers {
    /// Builds the depth layers and follows the two lowest labeled paths
    /// outward from the center.
    pub fn classify(nodes: &[Node], centers: &Centers) -> Self {
        let n = nodes.len();
        let max_depth = centers.max_depth();
        let mut layers = Self {
            layers: Vec::with_capacity(max_depth + 1),
            parent: vec![None; n],
            children: vec![vec![]; n],
            edge_label: vec![0; n],
            tree: vec![0; n],
            path: vec![PathMark::Off; n],
            lowest_tree: None,
            path_labels: [
                vec![MAX_EDGE_LABEL; max_depth + 1],
                vec![MAX_EDGE_LABEL; max_depth + 1],
            ],
            code: vec![0; n],
            max_depth,
        };
        let roots = match centers.center {
            Center::Pair(first, second) => {
                for (tree, &node) in [first, second].iter().enumerate() {
                    layers.tree[node] = tree;
                    layers.path[node] = PathMark::Lowest;
                }
                layers.path_labels[0][0] = 0;
                layers.path_labels[1][0] = 0;
                vec![first, second]
            }
            Center::Single(root) => layers.hang_from_root(nodes, &centers.dist, root),
        };
        layers.layers.push(roots);
        for depth in 0..max_depth {
            let next = layers.descend(nodes, &centers.dist, depth);
            layers.layers.push(next);
        }
        layers
    }

    fn hang_from_root(&mut self, nodes: &[Node], dist: &[u32], root: NodeId) -> Vec<NodeId> {
        let target = dist[root] - 1;
        let mut lowest = MAX_EDGE_LABEL;
        // `None` once the lowest label was seen twice.
        let mut second = Some(MAX_EDGE_LABEL);
        for slot in nodes[root].edges.iter().filter(|slot| dist[slot.to] == target) {
            if slot.label < lowest {
                second = Some(lowest);
                lowest = slot.label;
            } else if slot.label == lowest {
                second = None;
            } else if let Some(label) = second {
                if slot.label < label {
                    second = Some(slot.label);
                }
            }
        }
        let mut roots = Vec::with_capacity(nodes[root].degree());
        for (tree, slot) in nodes[root].edges.iter().enumerate() {
            roots.push(slot.to);
            self.tree[slot.to] = tree;
            self.edge_label[slot.to] = slot.label;
            if dist[slot.to] == target {
                if slot.label == lowest {
                    self.lowest_tree = Some(tree);
                    self.path[slot.to] = PathMark::Lowest;
                } else if second == Some(slot.label) {
                    self.path[slot.to] = PathMark::Second;
                }
            }
        }
        self.path_labels[0][0] = lowest;
        match second {
            Some(label) => self.path_labels[1][0] = label,
            None => {
                self.lowest_tree = None;
                self.path_labels[1][0] = lowest;
            }
        }
        roots
    }

    /// Collects the children of layer `depth` and extends both paths by one.
    fn descend(&mut self, nodes: &[Node], dist: &[u32], depth: usize) -> Vec<NodeId> {
        let mut next = vec![];
        let mut lowest = MAX_EDGE_LABEL;
        let mut second = MAX_EDGE_LABEL;
        let mut lowest_nodes = vec![];
        let mut second_nodes = vec![];
        let mut lowest_label_tree = 0;
        // Whether all lowest labeled children so far hang in one tree.
        let mut single_tree = false;
        for i in 0..self.layers[depth].len() {
            let node = self.layers[depth][i];
            for slot in nodes[node].edges.iter().filter(|slot| dist[slot.to] < dist[node]) {
                if dist[slot.to] == dist[node] - 1 {
                    match self.path[node] {
                        PathMark::Lowest => {
                            if slot.label < lowest {
                                lowest_nodes.clear();
                                lowest_nodes.push(slot.to);
                                lowest = slot.label;
                                lowest_label_tree = self.tree[node];
                                single_tree = true;
                            } else if slot.label == lowest {
                                lowest_nodes.push(slot.to);
                                single_tree &= self.tree[node] == lowest_label_tree;
                            }
                        }
                        PathMark::Second => {
                            if slot.label < second {
                                second_nodes.clear();
                                second_nodes.push(slot.to);
                                second = slot.label;
                            } else if slot.label == second {
                                second_nodes.push(slot.to);
                            }
                        }
                        PathMark::Off => {}
                    }
                }
                next.push(slot.to);
                self.tree[slot.to] = self.tree[node];
                self.parent[slot.to] = Some(node);
                self.edge_label[slot.to] = slot.label;
                self.children[node].push(slot.to);
            }
        }
        self.path_labels[0][depth + 1] = lowest;
        for &node in &lowest_nodes {
            self.path[node] = PathMark::Lowest;
        }
        match (self.lowest_tree, single_tree) {
            (None, true) => {
                // The lowest path now lives in one tree only; the best path
                // among the other trees becomes the second.
                self.lowest_tree = Some(lowest_label_tree);
                let candidates: Vec<NodeId> = next
                    .iter()
                    .copied()
                    .filter(|&node| self.continues_lowest(dist, node, lowest_label_tree))
                    .collect();
                let second = candidates
                    .iter()
                    .map(|&node| self.edge_label[node])
                    .min()
                    .unwrap_or(MAX_EDGE_LABEL);
                for node in candidates {
                    if self.edge_label[node] == second {
                        self.path[node] = PathMark::Second;
                    }
                }
                self.path_labels[1][depth + 1] = second;
            }
            (None, false) => self.path_labels[1][depth + 1] = lowest,
            (Some(_), _) => {
                self.path_labels[1][depth + 1] = second;
                for &node in &second_nodes {
                    self.path[node] = PathMark::Second;
                }
            }
        }
        next
    }

    /// A deepest child of a lowest path node outside `lowest_tree` that is
    /// not itself on the lowest path.
    fn continues_lowest(&self, dist: &[u32], node: NodeId, lowest_tree: usize) -> bool {
        match self.parent[node] {
            Some(parent) => {
                self.path[parent] == PathMark::Lowest
                    && self.path[node] != PathMark::Lowest
                    && dist[node] + 1 == dist[parent]
                    && self.tree[node] != lowest_tree
            }
            None => false,
        }
    }

    pub fn is_lowest_tree(&self, node: NodeId) -> bool {
        self.lowest_tree == Some(self.tree[node])
    }
}
