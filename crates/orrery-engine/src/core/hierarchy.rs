// core/hierarchy.rs
//
// Parent-child structure of the bodies, validated once at scene construction.
// Bodies live in an arena (Vec indexed by BodyId); this graph only stores the
// links and the update order derived from them.
//
// Usage:
//   let graph = BodyGraph::build(&names, &parents)?;
//   for id in graph.update_order() { /* parents always come before children */ }

use crate::api::types::BodyId;
use crate::error::SceneError;

/// Node in the hierarchy.
#[derive(Debug, Clone, Default)]
struct BodyNode {
    parent: Option<BodyId>,
    children: Vec<BodyId>,
    depth: usize,
}

/// Validated body forest with a topological update order.
#[derive(Debug, Clone, Default)]
pub struct BodyGraph {
    nodes: Vec<BodyNode>,
    /// Bodies with no parent, in declaration order.
    roots: Vec<BodyId>,
    /// Depth-first pre-order from each root; children keep declaration order.
    order: Vec<BodyId>,
}

/// Walk state for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl BodyGraph {
    /// Build the graph from parallel slices of names and parent links.
    ///
    /// Fails on a self-parent, an out-of-range parent index or any cycle.
    pub fn build(names: &[String], parents: &[Option<BodyId>]) -> Result<Self, SceneError> {
        debug_assert_eq!(names.len(), parents.len());
        let count = parents.len();

        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) if p.index() == i => {
                    return Err(SceneError::SelfParent(names[i].clone()));
                }
                Some(p) if p.index() >= count => {
                    return Err(SceneError::UnknownParent {
                        body: names[i].clone(),
                        parent: format!("#{}", p.0),
                    });
                }
                _ => {}
            }
        }

        check_cycles(names, parents)?;

        let mut nodes = vec![BodyNode::default(); count];
        let mut roots = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            let id = BodyId(i as u32);
            nodes[i].parent = *parent;
            match parent {
                Some(p) => nodes[p.index()].children.push(id),
                None => roots.push(id),
            }
        }

        let mut graph = Self {
            nodes,
            roots,
            order: Vec::with_capacity(count),
        };
        graph.rebuild_order();
        Ok(graph)
    }

    /// Pre-order traversal from every root, filling depths on the way.
    fn rebuild_order(&mut self) {
        self.order.clear();
        let mut stack: Vec<(BodyId, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            self.nodes[id.index()].depth = depth;
            self.order.push(id);
            // Reverse so the first declared child is popped first.
            for &child in self.nodes[id.index()].children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    /// Order in which bodies must be updated each frame.
    pub fn update_order(&self) -> &[BodyId] {
        &self.order
    }

    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn children(&self, id: BodyId) -> Option<&[BodyId]> {
        self.nodes.get(id.index()).map(|n| n.children.as_slice())
    }

    /// Number of parent links between `id` and its root (roots are 0).
    pub fn depth(&self, id: BodyId) -> Option<usize> {
        self.nodes.get(id.index()).map(|n| n.depth)
    }

    /// Whether `id`'s parent is itself a root.
    pub fn orbits_root(&self, id: BodyId) -> bool {
        self.parent(id)
            .map(|p| self.parent(p).is_none())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Follow every parent chain; a chain that revisits a body on the current
/// walk is a cycle.
fn check_cycles(names: &[String], parents: &[Option<BodyId>]) -> Result<(), SceneError> {
    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut walk: Vec<usize> = Vec::new();

    for start in 0..parents.len() {
        walk.clear();
        let mut cur = start;
        loop {
            match marks[cur] {
                Mark::Done => break,
                Mark::OnPath => {
                    let from = walk.iter().position(|&w| w == cur).unwrap_or(0);
                    let mut path: Vec<String> =
                        walk[from..].iter().map(|&w| names[w].clone()).collect();
                    path.push(names[cur].clone());
                    return Err(SceneError::Cycle { path });
                }
                Mark::Unvisited => {
                    marks[cur] = Mark::OnPath;
                    walk.push(cur);
                    match parents[cur] {
                        Some(p) => cur = p.index(),
                        None => break,
                    }
                }
            }
        }
        for &w in &walk {
            marks[w] = Mark::Done;
        }
    }
    Ok(())
}
