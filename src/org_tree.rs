//! Reporting tree built from the flat `(person, boss_id)` rows of the
//! subordinates endpoint.
//!
//! Nodes live in an arena owned by [`OrgTree`] and refer to their children by
//! [`NodeId`]. Construction walks down from the root with an explicit stack,
//! so deep reporting chains cannot exhaust the call stack.

use std::collections::{HashMap, HashSet};

use crate::models::{PersonId, PersonRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct OrgNode {
    pub person: PersonRow,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrgTree {
    nodes: Vec<OrgNode>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgTreeError {
    #[error("person {0} is not part of the org structure")]
    RootNotFound(PersonId),
    #[error("person {0} was reached twice, the org structure is cyclic")]
    Cyclic(PersonId),
}

/// Builds the tree rooted at `root_id`, which must be one of `rows`.
pub fn build_tree(mut rows: Vec<PersonRow>, root_id: PersonId) -> Result<OrgTree, OrgTreeError> {
    let position = rows
        .iter()
        .position(|row| row.id == root_id)
        .ok_or(OrgTreeError::RootNotFound(root_id))?;
    let root = rows.remove(position);

    build_tree_from_root(root, rows)
}

/// Builds the tree below `root` out of `rows`, which need not contain it.
///
/// Rows that can't be reached from the root through their `boss_id` are left
/// out. Reaching the same person twice is reported as a cycle rather than
/// looping forever.
pub fn build_tree_from_root(root: PersonRow, rows: Vec<PersonRow>) -> Result<OrgTree, OrgTreeError> {
    let mut reports: HashMap<PersonId, Vec<PersonRow>> = HashMap::new();
    for row in rows {
        if let Some(boss_id) = row.boss_id {
            reports.entry(boss_id).or_default().push(row);
        }
    }

    let mut visited = HashSet::from([root.id]);
    let mut nodes = vec![OrgNode {
        person: root,
        children: Vec::new(),
    }];
    let mut pending = vec![NodeId(0)];

    while let Some(parent) = pending.pop() {
        let boss_id = nodes[parent.0].person.id;
        let Some(direct_reports) = reports.remove(&boss_id) else {
            continue;
        };

        for person in direct_reports {
            if !visited.insert(person.id) {
                return Err(OrgTreeError::Cyclic(person.id));
            }
            let child = NodeId(nodes.len());
            nodes.push(OrgNode {
                person,
                children: Vec::new(),
            });
            nodes[parent.0].children.push(child);
            pending.push(child);
        }
    }

    Ok(OrgTree { nodes })
}

impl OrgTree {
    pub fn root(&self) -> &OrgNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &OrgNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &OrgNode> + '_ {
        self.nodes[id.0].children.iter().map(|child| self.node(*child))
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of people in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn find(&self, person_id: PersonId) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.person.id == person_id)
            .map(NodeId)
    }

    /// Pre-order traversal yielding each node with its distance from the root.
    /// Siblings come out in input order.
    pub fn walk(&self) -> Vec<(usize, &OrgNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(0, self.root_id())];

        while let Some((depth, id)) = stack.pop() {
            let node = self.node(id);
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|child| (depth + 1, *child)));
        }

        out
    }

    /// Length of the longest reporting chain below the root.
    pub fn depth(&self) -> usize {
        self.walk()
            .into_iter()
            .map(|(depth, _)| depth)
            .max()
            .unwrap_or_default()
    }
}
