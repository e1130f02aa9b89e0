use super::error::Err;
use crate::{
    code::CloseTuple,
    graph_state::GraphState,
    labels::LabelTable,
    types::{Degree, InputLabel, NodeId},
};
use log::trace;
use std::fmt;

/// A graph as read from a GSP file, with input labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GspGraph {
    pub id: usize,
    pub vertices: Vec<InputLabel>,
    /// `(from, to, label)` with vertex ids.
    pub edges: Vec<(usize, usize, InputLabel)>,
}

impl GspGraph {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges
            .iter()
            .any(|&(from, to, _)| (from, to) == (a, b) || (from, to) == (b, a))
    }

    /// `(edge label, endpoint label, endpoint label)` of every edge.
    pub fn edge_kinds(&self) -> impl Iterator<Item = (InputLabel, InputLabel, InputLabel)> + '_ {
        self.edges
            .iter()
            .map(move |&(from, to, label)| (label, self.vertices[from], self.vertices[to]))
    }

    /// Grows the graph into a fresh [`GraphState`].
    ///
    /// A depth-first search from vertex 0 numbers the nodes in discovery
    /// order and grows the tree it walks; the remaining edges close the
    /// graph in ascending tuple order.
    pub fn load<'a>(&self, labels: &'a LabelTable) -> Result<GraphState<'a>, Err> {
        if self.vertices.is_empty() {
            return Err(Err::EmptyGraph(self.id));
        }
        let mut adjacency: Vec<Vec<(usize, NodeId)>> = vec![vec![]; self.vertices.len()];
        let mut codes = Vec::with_capacity(self.edges.len());
        for (index, &(from, to, label)) in self.edges.iter().enumerate() {
            let (a, b) = (self.vertices[from], self.vertices[to]);
            let code = labels
                .edge_code(label, a, b)
                .ok_or(Err::UnknownEdgeLabel(self.id, label, a, b))?;
            adjacency[from].push((index, to));
            adjacency[to].push((index, from));
            codes.push(code);
        }
        let start = labels
            .node_code(self.vertices[0])
            .ok_or(Err::UnknownVertexLabel(self.id, self.vertices[0]))?;
        for &label in &self.vertices[1..] {
            labels
                .node_code(label)
                .ok_or(Err::UnknownVertexLabel(self.id, label))?;
        }

        let mut state = GraphState::new(labels);
        state.insert_start_node(start);
        let mut position: Vec<Option<NodeId>> = vec![None; self.vertices.len()];
        let mut tree_edge = vec![false; self.edges.len()];
        position[0] = Some(0);
        let mut stack = vec![(0, 0)];
        while let Some(&(vertex, next)) = stack.last() {
            let last = stack.len() - 1;
            match adjacency[vertex].get(next) {
                Some(&(index, to)) => {
                    stack[last].1 += 1;
                    if position[to].is_none() {
                        let from = position[vertex].unwrap_or_default();
                        let degree = adjacency[to].len() as Degree;
                        position[to] = Some(state.insert_node(from, codes[index], degree));
                        tree_edge[index] = true;
                        stack.push((to, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        if position.iter().any(Option::is_none) {
            return Err(Err::Disconnected(self.id));
        }

        let mut closes: Vec<CloseTuple> = self
            .edges
            .iter()
            .zip(&codes)
            .zip(&tree_edge)
            .filter(|&(_, &tree)| !tree)
            .map(|((&(from, to, _), &code), _)| {
                CloseTuple::new(
                    position[from].unwrap_or_default() + 1,
                    position[to].unwrap_or_default() + 1,
                    code,
                )
            })
            .collect();
        closes.sort();
        for tuple in &closes {
            state.insert_edge(tuple.from, tuple.to, tuple.label);
        }
        trace!("graph {} grown with {} closing edges", self.id, closes.len());
        Ok(state)
    }
}

/// A label table covering every label used by `graphs`.
pub fn label_table(graphs: &[GspGraph]) -> LabelTable {
    LabelTable::new(
        graphs.iter().flat_map(|graph| graph.vertices.iter().copied()),
        graphs.iter().flat_map(GspGraph::edge_kinds),
    )
}

impl fmt::Display for GspGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "t # {}", self.id)?;
        for (id, label) in self.vertices.iter().enumerate() {
            writeln!(f, "v {} {}", id, label)?;
        }
        for (from, to, label) in &self.edges {
            writeln!(f, "e {} {} {}", from, to, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gsp::parse;

    fn create_graphs() -> Vec<GspGraph> {
        parse(
            "t # 0\nv 0 6\nv 1 6\nv 2 8\ne 0 1 1\ne 1 2 2\ne 2 0 1\n\
             t # 1\nv 0 7\nv 1 6\ne 0 1 1\n",
        )
        .unwrap()
    }

    #[test]
    fn test_label_table() {
        let labels = label_table(&create_graphs());
        assert_eq!(labels.num_node_labels(), 3);
        // 1 (C-C), 1 (C-N), 1 (C-O), 2 (C-O)
        assert_eq!(labels.num_edge_labels(), 4);
    }

    #[test]
    fn test_load() {
        let graphs = create_graphs();
        let labels = label_table(&graphs);
        let state = graphs[0].load(&labels).unwrap();
        assert_eq!(state.num_nodes(), 3);
        assert_eq!(state.num_edges(), 3);
        assert_eq!(state.num_closing_edges(), 1);
        // DFS from 0 reaches 1 first, then 2 through 1.
        assert_eq!(
            state.to_string(),
            "v 0 6\nv 1 6\nv 2 8\ne 0 1 1\ne 0 2 1\ne 1 2 2\n"
        );
        assert!(state.nodes()[0].edges[1].closing);
    }

    #[test]
    fn test_load_errors() {
        let graphs = create_graphs();
        let labels = label_table(&graphs[1..]);
        assert_eq!(
            graphs[0].load(&labels).unwrap_err(),
            Err::UnknownEdgeLabel(0, 1, 6, 6)
        );
        let empty = GspGraph::new(4);
        assert_eq!(empty.load(&labels).unwrap_err(), Err::EmptyGraph(4));
        let split = parse("t # 5\nv 0 7\nv 1 6\nv 2 6\ne 0 1 1\n").unwrap();
        assert_eq!(split[0].load(&labels).unwrap_err(), Err::Disconnected(5));
        let unknown = parse("t # 6\nv 0 9\n").unwrap();
        assert_eq!(
            unknown[0].load(&labels).unwrap_err(),
            Err::UnknownVertexLabel(6, 9)
        );
    }

    #[test]
    fn test_display() {
        let graphs = create_graphs();
        assert_eq!(parse(&graphs[1].to_string()).unwrap()[0], graphs[1]);
    }
}
