use crate::{graph_state::adjacency::Node, types::NodeId};

/// The center of a tree: one node, or the two ends of the middle edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Center {
    Single(NodeId),
    Pair(NodeId, NodeId),
}

#[derive(Debug)]
pub(crate) struct Centers {
    /// Distance from the leaves; leaves have 1.
    pub dist: Vec<u32>,
    pub center: Center,
}

impl Centers {
    /// Peels leaves layer by layer until one node or one edge remains.
    pub fn find(nodes: &[Node]) -> Self {
        let n = nodes.len();
        assert!(n >= 2, "Invalid tree: {} nodes", n);
        let mut dist = vec![0u32; n];
        if n == 2 {
            dist[0] = 1;
            dist[1] = 1;
            return Self {
                dist,
                center: Center::Pair(1, 0),
            };
        }
        let mut done = vec![0usize; n];
        let mut queue = Vec::with_capacity(n);
        let mut leaves = 0;
        for (id, node) in nodes.iter().enumerate() {
            if node.degree() == 1 {
                leaves += 1;
                dist[id] = 1;
                let adjacent = node.edges[0].to;
                done[adjacent] += 1;
                if nodes[adjacent].degree() - done[adjacent] == 1 {
                    dist[adjacent] = 2;
                    queue.push(adjacent);
                }
            }
        }
        let mut begin = 0;
        if queue.len() + leaves == n {
            if queue.len() == 2 {
                begin = 1;
            }
        } else {
            loop {
                let node = queue[begin];
                let mut more = false;
                for slot in &nodes[node].edges {
                    done[slot.to] += 1;
                    let open = nodes[slot.to].degree() - done[slot.to];
                    if open != 0 {
                        more = true;
                    }
                    if open == 1 {
                        dist[slot.to] = dist[node] + 1;
                        queue.push(slot.to);
                    }
                }
                begin += 1;
                if !more {
                    break;
                }
            }
        }
        let center = if begin > 0 && dist[queue[begin]] == dist[queue[begin - 1]] {
            Center::Pair(queue[begin], queue[begin - 1])
        } else {
            Center::Single(queue[begin])
        };
        Self { dist, center }
    }

    pub fn is_bicentered(&self) -> bool {
        matches!(self.center, Center::Pair(..))
    }

    /// Number of forest layers below the root(s).
    pub fn max_depth(&self) -> usize {
        match self.center {
            Center::Single(root) => self.dist[root] as usize - 1,
            Center::Pair(first, _) => self.dist[first] as usize,
        }
    }

    /// Number of nodes on a longest path.
    pub fn backbone_length(&self) -> u32 {
        match self.center {
            Center::Single(root) => 2 * self.dist[root] - 1,
            Center::Pair(first, _) => 2 * self.dist[first],
        }
    }
}
