/// Disjoint-set over the elements `0..len()`.
///
/// Elements outside of that range are a caller bug; implementations may panic.
pub trait UnionFind {
    /// Total number of elements.
    fn len(&self) -> usize;

    /// Number of disjoint components.
    fn count(&self) -> usize;

    /// Returns the representative of the component containing `p`.
    fn find(&self, p: usize) -> usize;

    /// Merges the components containing `p` and `q`.
    fn union(&mut self, p: usize, q: usize);

    fn connected(&self, p: usize, q: usize) -> bool {
        self.find(p) == self.find(q)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Union by size without path compression.
///
/// Trees stay within `log2(len)` levels, which keeps `find` cheap enough
/// while letting every query borrow the structure immutably.
#[derive(Debug, Clone)]
pub struct WeightedQuickUnion {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl WeightedQuickUnion {
    /// Creates `len` singleton components.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }
}

impl UnionFind for WeightedQuickUnion {
    fn len(&self) -> usize {
        self.parent.len()
    }

    fn count(&self) -> usize {
        self.count
    }

    fn find(&self, mut p: usize) -> usize {
        while self.parent[p] != p {
            p = self.parent[p];
        }
        p
    }

    fn union(&mut self, p: usize, q: usize) {
        let p_root = self.find(p);
        let q_root = self.find(q);
        if p_root == q_root {
            return;
        }

        let (small, large) = if self.size[p_root] < self.size[q_root] {
            (p_root, q_root)
        } else {
            (q_root, p_root)
        };

        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.count -= 1;
    }
}

////////////////////////////////////////////////////////////////////////////////
