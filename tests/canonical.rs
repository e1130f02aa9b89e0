use fragcanon::{
    code::{CanonicalCode, CloseTuple, Normality, TreeTuple},
    graph_state::GraphState,
    labels::LabelTable,
    session::Session,
};
use itertools::Itertools;

const SINGLE: u32 = 0;
const DOUBLE: u32 = 1;

/// Carbon only, with single and double bonds.
fn create_labels() -> LabelTable {
    LabelTable::new(vec![6], vec![(1, 6, 6), (2, 6, 6)])
}

/// Grows a leaf from `from` for every `(from, label)` of `tree`, then closes
/// the graph.
fn create_state<'a>(
    labels: &'a LabelTable,
    tree: &[(usize, u32)],
    closes: &[(usize, usize, u32)],
) -> GraphState<'a> {
    let mut state = GraphState::new(labels);
    state.insert_start_node(0);
    for &(from, label) in tree {
        state.insert_node(from, label, 4);
    }
    for &(from, to, label) in closes {
        state.insert_edge(from, to, label);
    }
    state
}

/// A code no spanning tree can fall below.
fn create_bottom(state: &mut GraphState) -> CanonicalCode {
    let mut bottom = state.canonical_code();
    bottom.backbone_length = 0;
    bottom
}

#[test]
fn test_propane() {
    let labels = create_labels();
    let mut state = create_state(&labels, &[(0, SINGLE), (1, SINGLE)], &[]);
    let code = state.canonical_code();
    assert_eq!(code.backbone_length, 3);
    assert!(!code.is_bicentered());
    assert_eq!(code.center_label, 0);
    assert_eq!(code.start_second_path, 1);
    assert_eq!(code.tree_tuples(), &[TreeTuple::new(0, SINGLE), TreeTuple::new(0, SINGLE)]);
    assert!(code.close_tuples().is_empty());
    assert_eq!(state.is_normal(&code), Normality::NotLower);
    assert_eq!(state.trees_visited(), 1);
    // Grown from an end, the center is not the start node.
    assert_eq!(state.check_growth().1, Normality::LowerAtPrefix);

    let mut state = create_state(&labels, &[(0, SINGLE), (0, SINGLE)], &[]);
    assert_eq!(state.check_growth(), (code, Normality::NotLower));
}

#[test]
fn test_triangle() {
    let labels = create_labels();
    let mut state = create_state(&labels, &[(0, SINGLE), (0, SINGLE)], &[(3, 2, SINGLE)]);
    let code = state.canonical_code();
    assert_eq!(code.close_tuples(), &[CloseTuple::new(3, 2, SINGLE)]);
    let before = state.nodes().to_vec();
    assert_eq!(state.is_normal(&code), Normality::NotLower);
    assert_eq!(state.nodes(), &before[..]);
    assert_eq!(state.is_normal(&code), Normality::NotLower);
    assert_eq!(state.nodes(), &before[..]);
    assert!(state.removed_edges().is_empty());
}

#[test]
fn test_lower_at_last_tuple() {
    let labels = create_labels();
    let mut state = create_state(&labels, &[(0, SINGLE), (0, SINGLE)], &[(3, 2, SINGLE)]);
    let mut code = state.canonical_code();
    code.close_tuples[0].label = DOUBLE;
    let before = state.nodes().to_vec();
    assert_eq!(state.is_normal(&code), Normality::LowerAtLastTuple);
    assert_eq!(state.nodes(), &before[..]);
    assert_eq!(state.num_edges(), 3);
}

#[test]
fn test_star_encodings() {
    let labels = LabelTable::new(vec![6], vec![(1, 6, 6), (2, 6, 6), (3, 6, 6)]);
    let mut accepted = vec![];
    for order in vec![0, 1, 1, 2].into_iter().permutations(4).unique() {
        let tree: Vec<_> = order.iter().map(|&label| (0, label)).collect();
        let mut state = create_state(&labels, &tree, &[]);
        let (code, result) = state.check_growth();
        let grown: Vec<_> = order.iter().map(|&label| TreeTuple::new(0, label)).collect();
        assert_eq!(code.tree_tuples(), &grown[..]);
        if result.is_canonical() {
            accepted.push(order);
        }
    }
    assert_eq!(accepted, vec![vec![0, 1, 1, 2]]);
}

#[test]
fn test_alternating_square() {
    let labels = create_labels();
    // Single bonds between the centers and in the closing edge.
    let mut state = create_state(
        &labels,
        &[(0, DOUBLE), (0, SINGLE), (2, DOUBLE)],
        &[(4, 2, SINGLE)],
    );
    let code = state.canonical_code();
    assert!(code.is_bicentered());
    assert_eq!(code.bicenter_label, SINGLE);
    assert_eq!(code.tree_tuples(), &[TreeTuple::new(0, DOUBLE), TreeTuple::new(0, DOUBLE)]);
    assert_eq!(code.close_tuples(), &[CloseTuple::new(4, 2, SINGLE)]);
    assert_eq!(state.is_normal(&code), Normality::NotLower);
    assert_eq!(state.trees_visited(), 4);

    // The same square grown around a double bond.
    let mut state = create_state(
        &labels,
        &[(0, SINGLE), (0, DOUBLE), (2, SINGLE)],
        &[(4, 2, DOUBLE)],
    );
    let code = state.canonical_code();
    assert_eq!(code.bicenter_label, DOUBLE);
    assert_eq!(state.is_normal(&code), Normality::LowerAtPrefix);
}

#[test]
fn test_enumerate_ring() {
    let labels = create_labels();
    let tree: Vec<_> = (0..5).map(|from| (from, SINGLE)).collect();
    let mut state = create_state(&labels, &tree, &[(6, 1, SINGLE)]);
    let bottom = create_bottom(&mut state);
    assert_eq!(state.is_normal(&bottom), Normality::NotLower);
    assert_eq!(state.trees_visited(), 6);
}

#[test]
fn test_enumerate_bicyclic() {
    let labels = create_labels();
    // A square with one diagonal has 8 spanning trees.
    let mut state = create_state(
        &labels,
        &[(0, SINGLE), (1, SINGLE), (2, SINGLE)],
        &[(3, 1, SINGLE), (4, 1, SINGLE)],
    );
    let before = state.nodes().to_vec();
    let bottom = create_bottom(&mut state);
    assert_eq!(state.is_normal(&bottom), Normality::NotLower);
    assert_eq!(state.trees_visited(), 8);
    assert_eq!(state.nodes(), &before[..]);
}

/// A root with arms A-a1, B-b1 over single bonds and D-d1 over a double
/// bond; d1 is closed to a1 or to b1.
fn create_tied_siblings(labels: &LabelTable, to: usize) -> GraphState {
    create_state(
        labels,
        &[
            (0, SINGLE),
            (1, SINGLE),
            (0, SINGLE),
            (3, SINGLE),
            (0, DOUBLE),
            (5, SINGLE),
        ],
        &[(7, to, SINGLE)],
    )
}

#[test]
fn test_tied_siblings() {
    let labels = create_labels();
    let mut first = create_tied_siblings(&labels, 3);
    let first_code = first.canonical_code();
    assert_eq!(first_code.start_second_path, 2);
    assert_eq!(first.is_normal(&first_code), Normality::NotLower);

    let mut second = create_tied_siblings(&labels, 5);
    let second_code = second.canonical_code();
    assert_eq!(first_code.tree_tuples, second_code.tree_tuples);
    assert_eq!(second.is_normal(&second_code), Normality::LowerAtLastTuple);

    let lowest = vec![first_code.close_tuples.clone(), second_code.close_tuples.clone()]
        .into_iter()
        .min();
    assert_eq!(lowest, Some(first_code.close_tuples));
}

#[test]
fn test_nasty_path() {
    let labels = LabelTable::new(vec![6, 7], vec![(1, 6, 7)]);
    let mut state = GraphState::new(&labels);
    state.insert_start_node(0);
    for from in 0..3 {
        state.insert_node(from, 0, 4);
    }
    assert_eq!(state.node_label(3), 1);
    let code = state.canonical_code();
    assert!(code.is_bicentered());
    assert!(code.nasty);
    assert_eq!(state.is_normal(&code), Normality::NotLower);
}

/// Every pre-order of the tree hung from `node`, over all child orders.
fn create_preorders(tree: &[Vec<usize>], node: usize, parent: Option<usize>) -> Vec<Vec<usize>> {
    let children: Vec<usize> = tree[node]
        .iter()
        .copied()
        .filter(|&child| Some(child) != parent)
        .collect();
    if children.is_empty() {
        return vec![vec![node]];
    }
    let mut preorders = vec![];
    for order in children.iter().copied().permutations(children.len()) {
        let mut partial = vec![vec![node]];
        for child in order {
            let subtrees = create_preorders(tree, child, Some(node));
            partial = partial
                .iter()
                .flat_map(|prefix| {
                    subtrees
                        .iter()
                        .map(move |subtree| [&prefix[..], &subtree[..]].concat())
                })
                .collect();
        }
        preorders.extend(partial);
    }
    preorders
}

fn is_spanning_tree(n: usize, edges: &[(usize, usize, u32)], chosen: &[usize]) -> bool {
    let mut component: Vec<usize> = (0..n).collect();
    for &index in chosen {
        let (a, b, _) = edges[index];
        let (keep, merge) = (component[a], component[b]);
        if keep == merge {
            return false;
        }
        for c in component.iter_mut().filter(|c| **c == merge) {
            *c = keep;
        }
    }
    true
}

/// Grows a carbon graph in every way a miner could: each spanning tree, from
/// each start node, with children in each order, followed by its closing
/// edges. Returns the codes of the accepted growths.
fn check_all_growths(n: usize, edges: &[(usize, usize, u32)]) -> Vec<CanonicalCode> {
    let labels = create_labels();
    let mut accepted = vec![];
    for chosen in (0..edges.len()).combinations(n - 1) {
        if !is_spanning_tree(n, edges, &chosen) {
            continue;
        }
        let mut tree = vec![vec![]; n];
        for &index in &chosen {
            let (a, b, _) = edges[index];
            tree[a].push(b);
            tree[b].push(a);
        }
        let label_of = |a: usize, b: usize| {
            chosen
                .iter()
                .map(|&index| edges[index])
                .find(|&(x, y, _)| (x, y) == (a, b) || (x, y) == (b, a))
                .map(|(_, _, label)| label)
        };
        for root in 0..n {
            for order in create_preorders(&tree, root, None) {
                let mut id = vec![0; n];
                for (position, &vertex) in order.iter().enumerate() {
                    id[vertex] = position;
                }
                let mut session = Session::new(&labels);
                session.start(0);
                for &vertex in &order[1..] {
                    let parent = tree[vertex]
                        .iter()
                        .copied()
                        .find(|&other| id[other] < id[vertex])
                        .unwrap();
                    session.grow(id[parent], label_of(parent, vertex).unwrap(), 4);
                }
                let mut closes: Vec<CloseTuple> = edges
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| !chosen.contains(index))
                    .map(|(_, &(a, b, label))| CloseTuple::new(id[a] + 1, id[b] + 1, label))
                    .collect();
                closes.sort();
                for tuple in closes {
                    session.close(tuple.from, tuple.to, tuple.label);
                }
                if session.check().is_canonical() {
                    accepted.push(session.accepted().cloned().unwrap());
                }
            }
        }
    }
    accepted
}

fn assert_one_code(accepted: &[CanonicalCode]) {
    assert!(!accepted.is_empty());
    assert!(accepted.iter().all(|code| *code == accepted[0]));
}

#[test]
fn test_all_growths_alternating_square() {
    let accepted = check_all_growths(
        4,
        &[(0, 1, DOUBLE), (1, 2, SINGLE), (2, 3, DOUBLE), (3, 0, SINGLE)],
    );
    assert_one_code(&accepted);
    assert_eq!(accepted[0].close_tuples(), &[CloseTuple::new(4, 2, SINGLE)]);
}

#[test]
fn test_all_growths_ring() {
    let edges: Vec<_> = (0..6).map(|a| (a, (a + 1) % 6, SINGLE)).collect();
    let accepted = check_all_growths(6, &edges);
    assert_one_code(&accepted);
    assert_eq!(accepted[0].close_tuples(), &[CloseTuple::new(6, 3, SINGLE)]);
}

#[test]
fn test_all_growths_triangle_with_pendant() {
    let accepted = check_all_growths(
        4,
        &[(0, 1, SINGLE), (1, 2, SINGLE), (2, 0, SINGLE), (2, 3, SINGLE)],
    );
    assert_one_code(&accepted);
    assert_eq!(accepted[0].backbone_length, 3);
    assert_eq!(accepted[0].close_tuples(), &[CloseTuple::new(3, 2, SINGLE)]);
}

#[test]
fn test_all_growths_bicyclic() {
    let accepted = check_all_growths(
        4,
        &[
            (0, 1, SINGLE),
            (1, 2, SINGLE),
            (2, 3, SINGLE),
            (3, 0, SINGLE),
            (0, 2, DOUBLE),
        ],
    );
    assert_one_code(&accepted);
    assert_eq!(
        accepted[0].close_tuples(),
        &[CloseTuple::new(4, 2, SINGLE), CloseTuple::new(4, 3, SINGLE)]
    );
}
