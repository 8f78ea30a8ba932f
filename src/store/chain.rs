/// Append-only chain of capacity-bounded nodes, stored as an arena.
///
/// Nodes are only ever created at the tail, so the successor of node `i` is node `i + 1`.
/// Nodes are never removed or merged.
#[derive(Debug, Clone)]
pub(crate) struct Chain<N> {
    nodes: Vec<N>,
}

impl<N> Chain<N> {
    /// Create a chain holding a single head node.
    pub(crate) fn new(head: N) -> Self { Self { nodes: vec![head] } }

    #[inline]
    pub(crate) fn node(&self, id: usize) -> &N {
        debug_assert!(id < self.nodes.len(), "node id out of range");
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: usize) -> &mut N {
        debug_assert!(id < self.nodes.len(), "node id out of range");
        &mut self.nodes[id]
    }

    /// Successor of `id`, creating it with `create` if `id` is the tail.
    pub(crate) fn successor(&mut self, id: usize, create: impl FnOnce() -> N) -> usize {
        debug_assert!(id < self.nodes.len(), "node id out of range");
        if id + 1 == self.nodes.len() {
            log::debug!("[store] chain grows to {} nodes", self.nodes.len() + 1);
            self.nodes.push(create());
        }
        id + 1
    }

    /// Iterator over nodes in chain order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &N> + '_ { self.nodes.iter() }
}

#[cfg(test)]
mod tests {
    use super::Chain;

    #[test]
    fn successor_creates_only_at_tail() {
        let mut chain = Chain::new(0u32);
        assert_eq!(chain.successor(0, || 1), 1);
        assert_eq!(chain.iter().count(), 2);
        // already linked: create is not used
        assert_eq!(chain.successor(0, || 99), 1);
        assert_eq!(*chain.node(1), 1);
        assert_eq!(chain.successor(1, || 2), 2);
        *chain.node_mut(2) += 40;
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![0, 1, 42]);
    }
}
