use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{ChildState, NetworkRow, Node, NodeIx, RawElement, Tree, TreeData};
use crate::error::MalformedInputError;
use crate::types::Color;

/// Fields shared by both input formats.
struct Payload<'a> {
    label: &'a str,
    weight: &'a Option<Value>,
    fill: &'a Option<Color>,
    attributes: &'a Map<String, Value>,
}

impl Tree {
    /// Build a navigable tree from either input format.
    ///
    /// Nodes are stored in pre-order, every node starts expanded, and depth
    /// and parent links are filled in by the same top-down pass.
    pub fn build(data: &TreeData) -> Result<Tree, MalformedInputError> {
        let tree = match data {
            TreeData::Nested(root) => Self::from_nested(root),
            TreeData::Network(rows) => Self::from_network(rows)?,
        };
        log::debug!("[tree] built {} nodes", tree.len());
        Ok(tree)
    }

    pub fn from_nested(root: &RawElement) -> Tree {
        let mut tree = Tree { nodes: Vec::new() };
        let mut stack: Vec<(&RawElement, Option<NodeIx>, usize)> = vec![(root, None, 0)];

        while let Some((element, parent, depth)) = stack.pop() {
            let children = element.children.as_deref().unwrap_or_default();
            let ix = tree.push(
                Payload {
                    label: &element.name,
                    weight: &element.weight,
                    fill: &element.fill,
                    attributes: &element.attributes,
                },
                parent,
                depth,
            );
            for child in children.iter().rev() {
                stack.push((child, Some(ix), depth + 1));
            }
        }

        tree
    }

    pub fn from_network(rows: &[NetworkRow]) -> Result<Tree, MalformedInputError> {
        if rows.is_empty() {
            return Err(MalformedInputError::Empty);
        }

        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(rows.len());
        let mut root: Option<usize> = None;
        for (i, row) in rows.iter().enumerate() {
            if let Some(&seen) = by_name.get(row.name.as_str()) {
                return Err(MalformedInputError::MultipleParents {
                    label: row.name.clone(),
                    first: rows[seen].parent.clone().unwrap_or_default(),
                    second: row.parent.clone().unwrap_or_default(),
                });
            }
            by_name.insert(&row.name, i);

            if row.parent.is_none() {
                if let Some(first) = root {
                    return Err(MalformedInputError::MultipleRoots {
                        first: rows[first].name.clone(),
                        second: row.name.clone(),
                    });
                }
                root = Some(i);
            }
        }
        let root = root.ok_or(MalformedInputError::NoRoot)?;

        let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            let Some(parent) = row.parent.as_deref() else {
                continue;
            };
            if parent == row.name {
                return Err(MalformedInputError::Cycle {
                    label: row.name.clone(),
                });
            }
            let &parent_ix = by_name
                .get(parent)
                .ok_or_else(|| MalformedInputError::UnknownParent {
                    label: row.name.clone(),
                    parent: parent.to_string(),
                })?;
            children_of.entry(parent_ix).or_default().push(i);
        }

        let mut tree = Tree {
            nodes: Vec::with_capacity(rows.len()),
        };
        let mut visited = vec![false; rows.len()];
        let mut stack: Vec<(usize, Option<NodeIx>, usize)> = vec![(root, None, 0)];

        while let Some((row_ix, parent, depth)) = stack.pop() {
            if std::mem::replace(&mut visited[row_ix], true) {
                return Err(MalformedInputError::Cycle {
                    label: rows[row_ix].name.clone(),
                });
            }
            let row = &rows[row_ix];
            let ix = tree.push(
                Payload {
                    label: &row.name,
                    weight: &row.weight,
                    fill: &row.fill,
                    attributes: &row.attributes,
                },
                parent,
                depth,
            );
            if let Some(children) = children_of.get(&row_ix) {
                for &child in children.iter().rev() {
                    stack.push((child, Some(ix), depth + 1));
                }
            }
        }

        // Rows that every parent chain leads away from the root can only hang
        // off a cycle.
        if let Some(orphan) = visited.iter().position(|seen| !seen) {
            return Err(MalformedInputError::Cycle {
                label: rows[orphan].name.clone(),
            });
        }

        Ok(tree)
    }

    fn push(&mut self, payload: Payload<'_>, parent: Option<NodeIx>, depth: usize) -> NodeIx {
        let ix = NodeIx(self.nodes.len());
        self.nodes.push(Node {
            label: payload.label.to_string(),
            weight: payload.weight.clone(),
            fill: payload.fill.clone(),
            attributes: payload.attributes.clone(),
            identity: None,
            parent,
            children: ChildState::Leaf,
            depth,
            position: None,
            previous_position: None,
        });

        if let Some(parent) = parent {
            let siblings = &mut self.nodes[parent.0].children;
            match siblings {
                ChildState::Leaf => *siblings = ChildState::Expanded(vec![ix]),
                ChildState::Expanded(children) | ChildState::Collapsed(children) => {
                    children.push(ix)
                }
            }
        }

        ix
    }
}
