// Property tests for section traversal: whatever the shape of the section
// tree, every leaf path is run exactly once, in source order.

use mute::output::OutputBuffer;
use mute::{Location, NullSink, SectionKind, TestEnv};
use proptest::prelude::*;

const HERE: Location = Location::new("traversal_properties.rs", 1);
const NAMES: [&str; 4] = ["s0", "s1", "s2", "s3"];

#[derive(Debug, Clone)]
struct Node {
    children: Vec<Node>,
}

fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = Just(Node { children: Vec::new() });
    leaf.prop_recursive(6, 64, 4, |inner| {
        prop::collection::vec(inner, 1..=4).prop_map(|children| Node { children })
    })
}

fn leaf_paths(node: &Node, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if node.children.is_empty() {
        out.push(path.clone());
        return;
    }
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        leaf_paths(child, path, out);
        path.pop();
    }
}

/// Plays `node` as a test body: one section per child, recursively.
fn walk(env: &mut TestEnv<'_>, node: &Node, path: &mut Vec<usize>, visited: &mut Vec<Vec<usize>>) {
    if node.children.is_empty() {
        visited.push(path.clone());
        return;
    }
    for (i, child) in node.children.iter().enumerate() {
        env.section(SectionKind::Section, NAMES[i], HERE, |env| {
            path.push(i);
            walk(env, child, path, visited);
            path.pop();
            Ok(())
        });
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_leaf_is_visited_once_in_order(tree in arb_tree()) {
        let mut expected = Vec::new();
        leaf_paths(&tree, &mut Vec::new(), &mut expected);

        let mut sink = NullSink;
        let mut env = TestEnv::new(&mut sink);
        let mut visited = Vec::new();
        let mut runs = 0;
        while env.repeat() {
            runs += 1;
            prop_assert!(runs <= expected.len(), "more runs than leaves");
            walk(&mut env, &tree, &mut Vec::new(), &mut visited);
            prop_assert_eq!(env.depth(), 0);
        }

        prop_assert_eq!(runs, expected.len());
        prop_assert_eq!(visited, expected);
        prop_assert!(!env.traversal().is_tracking());
    }

    #[test]
    fn every_enter_has_a_leave(tree in arb_tree()) {
        let mut out = OutputBuffer::new();
        let mut env = TestEnv::new(&mut out);
        while env.repeat() {
            walk(&mut env, &tree, &mut Vec::new(), &mut Vec::new());
        }
        drop(env);

        let mut open = 0usize;
        for line in out.lines() {
            if line.contains(": enter: ") {
                open += 1;
            } else if line.contains(": leave: ") {
                prop_assert!(open > 0, "leave without enter: {}", line);
                open -= 1;
            }
        }
        prop_assert_eq!(open, 0);
    }
}

#[test]
fn body_without_sections_runs_once() {
    let mut sink = NullSink;
    let mut env = TestEnv::new(&mut sink);
    let mut runs = 0;
    while env.repeat() {
        runs += 1;
    }
    assert_eq!(runs, 1);
}

#[test]
fn traversal_is_restartable() {
    let tree = Node {
        children: vec![Node { children: Vec::new() }, Node { children: Vec::new() }],
    };
    let mut sink = NullSink;
    let mut env = TestEnv::new(&mut sink);
    for _ in 0..2 {
        let mut visited = Vec::new();
        while env.repeat() {
            walk(&mut env, &tree, &mut Vec::new(), &mut visited);
        }
        assert_eq!(visited, [vec![0], vec![1]]);
    }
}
