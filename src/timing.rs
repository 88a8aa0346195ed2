//! Hierarchical timing: nested named scopes, dumped as a tree at shutdown.
//! The tree is not thread-safe and is disabled outright once more than one
//! device is active, rather than paying to make it safe — timing is an
//! observability facility, never a semantic dependency of results, so
//! turning it off under concurrency is free.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static DISABLED: AtomicBool = AtomicBool::new(false);

/// Call once before a run starts: disables timing whenever more than one
/// device will be active.
pub fn set_disabled(disabled: bool) {
    DISABLED.store(disabled, Ordering::SeqCst);
}

fn is_disabled() -> bool {
    DISABLED.load(Ordering::SeqCst)
}

struct Node {
    name: &'static str,
    parent: usize,
    children: Vec<usize>,
    elapsed: Duration,
}

struct Tree {
    nodes: Vec<Node>,
    current: usize,
}

impl Tree {
    fn new() -> Tree {
        Tree { nodes: vec![Node { name: "root", parent: 0, children: Vec::new(), elapsed: Duration::ZERO }], current: 0 }
    }
}

static TREE: Mutex<Option<Tree>> = Mutex::new(None);

/// An open timing scope; closes (and records elapsed time) on drop.
pub struct Scope {
    active: bool,
    start: Instant,
    node: usize,
    parent: usize,
}

/// Open a named timing scope, nested under whichever scope is currently
/// open on this call path. A no-op when timing is disabled.
pub fn scope(name: &'static str) -> Scope {
    if is_disabled() {
        return Scope { active: false, start: Instant::now(), node: 0, parent: 0 };
    }
    let mut guard = TREE.lock().unwrap();
    let tree = guard.get_or_insert_with(Tree::new);
    let parent = tree.current;
    let existing = tree.nodes[parent].children.iter().copied().find(|&c| tree.nodes[c].name == name);
    let node = existing.unwrap_or_else(|| {
        let idx = tree.nodes.len();
        tree.nodes.push(Node { name, parent, children: Vec::new(), elapsed: Duration::ZERO });
        tree.nodes[parent].children.push(idx);
        idx
    });
    tree.current = node;
    Scope { active: true, start: Instant::now(), node, parent }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let elapsed = self.start.elapsed();
        if let Some(tree) = TREE.lock().unwrap().as_mut() {
            tree.nodes[self.node].elapsed += elapsed;
            tree.current = self.parent;
        }
    }
}

/// Print the accumulated tree to stderr, depth-first, with an "other" line
/// per node absorbing time not attributed to any child scope.
pub fn dump() {
    if is_disabled() {
        return;
    }
    let guard = TREE.lock().unwrap();
    let Some(tree) = guard.as_ref() else { return };
    if tree.nodes[0].children.is_empty() {
        return;
    }
    eprintln!("timing:");
    dump_children(tree, 0, 1);
}

fn dump_children(tree: &Tree, node: usize, depth: usize) {
    let mut accounted = Duration::ZERO;
    for &child in &tree.nodes[node].children {
        let elapsed = tree.nodes[child].elapsed;
        accounted += elapsed;
        eprintln!("{:indent$}{:<-24}{:>8.4} s", "", tree.nodes[child].name, elapsed.as_secs_f64(), indent = depth * 2);
        dump_children(tree, child, depth + 1);
    }
    let total = tree.nodes[node].elapsed;
    if !tree.nodes[node].children.is_empty() && total > accounted {
        eprintln!("{:indent$}{:<-24}{:>8.4} s", "", "other", (total - accounted).as_secs_f64(), indent = depth * 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_scope_records_nothing() {
        set_disabled(true);
        {
            let _s = scope("unit-test-disabled");
        }
        set_disabled(false);
    }

    #[test]
    fn nested_scopes_do_not_panic() {
        set_disabled(false);
        {
            let _outer = scope("unit-test-outer");
            {
                let _inner = scope("unit-test-inner");
            }
        }
        dump();
    }
}
