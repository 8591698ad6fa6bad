//! Disjoint-set forest (union-find) over a fixed index space.
//!
//! Backs the blob extractor's label merging: provisional labels handed out
//! during the raster scan are unioned whenever two causally-connected regions
//! turn out to be the same blob, and `find` later canonicalizes every pixel.
//!
//! Path compression plus union by rank makes any interleaving of operations
//! effectively linear in the number of calls.

/// Index-based forest: `parent[x] == x` marks a root.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `capacity` singleton sets, each its own root with rank 0.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "disjoint set needs at least one element");
        Self {
            parent: (0..capacity as u32).collect(),
            rank: vec![0; capacity],
        }
    }

    /// Number of elements in the forest.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Always false: the forest is never empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Canonical representative of `x`'s set.
    ///
    /// Every node visited on the walk is repointed directly at the root, so
    /// repeated calls are idempotent and successively cheaper.
    ///
    /// # Panics
    /// Panics if `x` is out of range; that is a bookkeeping bug in the
    /// caller, not a recoverable condition.
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut node = x;
        while node != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`. No-op if already joined.
    ///
    /// The lower-rank root is attached under the higher-rank one; on a rank
    /// tie `y`'s root goes under `x`'s root and the surviving rank grows.
    /// The tie-break is deterministic, which keeps canonical labels stable
    /// across identical runs.
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }

        if self.rank[root_x as usize] < self.rank[root_y as usize] {
            self.parent[root_x as usize] = root_y;
            return;
        }

        self.parent[root_y as usize] = root_x;
        if self.rank[root_x as usize] == self.rank[root_y as usize] {
            self.rank[root_x as usize] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_roots() {
        let mut ds = DisjointSet::new(10);
        for i in 0..10 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn union_connects_exactly_the_united_pairs() {
        let mut ds = DisjointSet::new(10);
        ds.union(1, 2);
        ds.union(5, 8);

        assert_eq!(ds.find(1), ds.find(2));
        assert_eq!(ds.find(5), ds.find(8));
        assert_ne!(ds.find(1), ds.find(5));

        // Everything else stays singleton.
        for i in [0u32, 3, 4, 6, 7, 9] {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn connectivity_is_transitive() {
        let mut ds = DisjointSet::new(6);
        ds.union(0, 1);
        ds.union(2, 3);
        ds.union(1, 2);
        let root = ds.find(0);
        for i in 1..4 {
            assert_eq!(ds.find(i), root);
        }
        assert_ne!(ds.find(4), root);
    }

    #[test]
    fn find_is_idempotent_and_order_independent() {
        let unions = [(0u32, 1u32), (1, 2), (4, 5), (5, 6), (2, 4)];

        let mut forward = DisjointSet::new(8);
        let mut backward = DisjointSet::new(8);
        for &(a, b) in &unions {
            forward.union(a, b);
            backward.union(a, b);
        }

        // Query in opposite orders; the induced partitions must agree even
        // if the compressed parent pointers differ.
        let roots_fwd: Vec<u32> = (0..8).map(|i| forward.find(i)).collect();
        let mut roots_bwd = vec![0u32; 8];
        for i in (0..8u32).rev() {
            roots_bwd[i as usize] = backward.find(i);
        }
        for i in 0..8 {
            for j in 0..8 {
                assert_eq!(
                    roots_fwd[i] == roots_fwd[j],
                    roots_bwd[i] == roots_bwd[j],
                    "partition mismatch between elements {i} and {j}"
                );
            }
        }

        // Repeated finds never change the answer.
        for i in 0..8 {
            assert_eq!(forward.find(i), roots_fwd[i as usize]);
        }
    }

    #[test]
    fn rank_tie_keeps_first_argument_root() {
        let mut ds = DisjointSet::new(4);
        ds.union(2, 3);
        assert_eq!(ds.find(3), 2);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_rejected() {
        let _ = DisjointSet::new(0);
    }

    #[test]
    #[should_panic]
    fn out_of_range_find_panics() {
        let mut ds = DisjointSet::new(4);
        let _ = ds.find(4);
    }
}
