//! Parent/child adjacency over the flat node arena

use crate::error::{Error, Result};

/// Resolved node tree.
///
/// Built once after decoding, from the signed parent index stored on each
/// node. A parent that is negative or outside the arena makes the node a root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeHierarchy {
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

impl NodeHierarchy {
    /// Build the adjacency from raw parent indices, in arena order.
    ///
    /// # Errors
    /// Returns [`Error::HierarchyCycle`] when `check_cycles` is set and some
    /// parent chain loops.
    pub fn resolve(parent_indices: &[i32], check_cycles: bool) -> Result<Self> {
        let len = parent_indices.len();
        let parents: Vec<Option<usize>> = parent_indices
            .iter()
            .map(|&p| usize::try_from(p).ok().filter(|&p| p < len))
            .collect();

        let mut children = vec![Vec::new(); len];
        let mut roots = Vec::new();
        for (index, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(index),
                None => roots.push(index),
            }
        }

        let hierarchy = Self {
            parents,
            children,
            roots,
        };
        if check_cycles {
            hierarchy.check_cycles()?;
        }
        Ok(hierarchy)
    }

    fn check_cycles(&self) -> Result<()> {
        let mut state = vec![Visit::Unseen; self.parents.len()];
        let mut path = Vec::new();

        for start in 0..self.parents.len() {
            let mut current = Some(start);
            while let Some(node) = current {
                match state[node] {
                    Visit::Done => break,
                    Visit::OnPath => return Err(Error::HierarchyCycle { node }),
                    Visit::Unseen => {
                        state[node] = Visit::OnPath;
                        path.push(node);
                        current = self.parents[node];
                    }
                }
            }
            for node in path.drain(..) {
                state[node] = Visit::Done;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents.get(node).copied().flatten()
    }

    #[must_use]
    pub fn children(&self, node: usize) -> &[usize] {
        self.children.get(node).map_or(&[], Vec::as_slice)
    }

    /// Nodes without a parent, in arena order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Parent chain from `node` up to its root, not including `node`.
    ///
    /// Stops after visiting every node once, so it terminates even on an
    /// unchecked cyclic hierarchy.
    pub fn ancestors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.parent(node);
        let mut remaining = self.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let node = current?;
            current = self.parent(node);
            Some(node)
        })
    }

    /// Number of ancestors above `node`.
    #[must_use]
    pub fn depth(&self, node: usize) -> usize {
        self.ancestors(node).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_tree() {
        let hierarchy = NodeHierarchy::resolve(&[-1, 0, 0, 1], true).unwrap();
        assert_eq!(hierarchy.roots(), &[0]);
        assert_eq!(hierarchy.children(0), &[1, 2]);
        assert_eq!(hierarchy.children(1), &[3]);
        assert_eq!(hierarchy.parent(3), Some(1));
        assert_eq!(hierarchy.ancestors(3).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(hierarchy.depth(3), 2);
        assert_eq!(hierarchy.depth(0), 0);
    }

    #[test]
    fn test_out_of_range_parent_is_root() {
        let hierarchy = NodeHierarchy::resolve(&[5, -3, 0], true).unwrap();
        assert_eq!(hierarchy.roots(), &[0, 1]);
        assert_eq!(hierarchy.parent(0), None);
        assert_eq!(hierarchy.children(0), &[2]);
    }

    #[test]
    fn test_cycle_detected() {
        let result = NodeHierarchy::resolve(&[-1, 2, 3, 1], true);
        assert!(matches!(result, Err(Error::HierarchyCycle { .. })));
    }

    #[test]
    fn test_self_parent_is_cycle() {
        assert!(matches!(
            NodeHierarchy::resolve(&[0], true),
            Err(Error::HierarchyCycle { node: 0 })
        ));
    }

    #[test]
    fn test_unchecked_cycle_terminates() {
        let hierarchy = NodeHierarchy::resolve(&[1, 0], false).unwrap();
        assert!(hierarchy.roots().is_empty());
        assert_eq!(hierarchy.depth(0), 2);
    }

    #[test]
    fn test_missing_node_queries() {
        let hierarchy = NodeHierarchy::resolve(&[], true).unwrap();
        assert!(hierarchy.is_empty());
        assert_eq!(hierarchy.parent(4), None);
        assert!(hierarchy.children(4).is_empty());
    }
}
