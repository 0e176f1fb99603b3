use std::fmt;

use crate::{
    error::{Error, Result},
    union_find::{UnionFind, WeightedQuickUnion},
};

////////////////////////////////////////////////////////////////////////////////

const SOURCE: usize = 0;

const MOVES: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// State of a single site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Blocked,
    Open,
    /// Open and connected to the top row through open sites.
    Full,
}

impl Site {
    pub fn is_open(self) -> bool {
        self != Site::Blocked
    }

    pub fn is_full(self) -> bool {
        self == Site::Full
    }
}

////////////////////////////////////////////////////////////////////////////////

/// An N-by-N grid of sites which are opened one at a time.
///
/// Sites are addressed by 1-based `(row, col)` pairs. Row 1 is the top.
///
/// Connectivity is kept in a disjoint-set of `N * N + 2` elements: element 0
/// is the virtual source above the top row, elements `1..=N * N` are the sites
/// in row-major order and the last element is the virtual sink below the
/// bottom row. A site is full iff it shares a component with the source.
///
/// The sink is only ever merged into the source's component, so a bottom row
/// site which is not connected to the top never looks full, even after the
/// grid percolates.
pub struct PercolationGrid<U = WeightedQuickUnion> {
    size: usize,
    open: Vec<bool>,
    open_sites: usize,
    // Indexed by disjoint-set element, only meaningful for roots.
    touches_bottom: Vec<bool>,
    connections: U,
}

impl PercolationGrid {
    /// Creates a `size`-by-`size` grid with all sites blocked.
    pub fn new(size: usize) -> Result<Self> {
        let len = element_count(size)?;
        Self::with_union_find(size, WeightedQuickUnion::new(len))
    }
}

impl<U: UnionFind> PercolationGrid<U> {
    /// Creates a grid backed by the given disjoint-set, which must consist of
    /// exactly `size * size + 2` singletons.
    pub fn with_union_find(size: usize, connections: U) -> Result<Self> {
        let len = element_count(size)?;
        if connections.len() != len {
            return Err(Error::invalid_argument(
                "connections",
                format!("expected {} elements, got {}", len, connections.len()),
            ));
        }
        if connections.count() != len {
            return Err(Error::invalid_argument(
                "connections",
                "expected every element to be a singleton",
            ));
        }

        Ok(Self {
            size,
            open: vec![false; size * size],
            open_sites: 0,
            touches_bottom: vec![false; len],
            connections,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites opened so far.
    pub fn open_sites(&self) -> usize {
        self.open_sites
    }

    /// Opens the site at `(row, col)`.
    ///
    /// Returns `Ok(false)` if the site was already open, in which case nothing
    /// changes.
    pub fn open(&mut self, row: usize, col: usize) -> Result<bool> {
        let (row, col) = self.validate(row, col)?;
        let cell = row * self.size + col;
        if self.open[cell] {
            return Ok(false);
        }

        self.open[cell] = true;
        self.open_sites += 1;

        let node = cell + 1;
        let mut touches_bottom = row == self.size - 1;

        if row == 0 {
            touches_bottom |= self.merge(node, SOURCE);
        }
        for neighbor in neighbors(self.size, row, col) {
            if self.open[neighbor] {
                touches_bottom |= self.merge(node, neighbor + 1);
            }
        }

        let root = self.connections.find(node);
        self.touches_bottom[root] = touches_bottom;

        if touches_bottom && self.connections.connected(node, SOURCE) {
            let sink = self.sink();
            self.connections.union(node, sink);
            let root = self.connections.find(node);
            self.touches_bottom[root] = true;
        }

        Ok(true)
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let (row, col) = self.validate(row, col)?;
        Ok(self.open[row * self.size + col])
    }

    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let (row, col) = self.validate(row, col)?;
        Ok(self.is_full_cell(row * self.size + col))
    }

    pub fn site(&self, row: usize, col: usize) -> Result<Site> {
        let (row, col) = self.validate(row, col)?;
        let cell = row * self.size + col;

        Ok(if self.is_full_cell(cell) {
            Site::Full
        } else if self.open[cell] {
            Site::Open
        } else {
            Site::Blocked
        })
    }

    /// Returns `true` if some full site lies in the bottom row.
    pub fn percolates(&self) -> bool {
        self.connections.connected(SOURCE, self.sink())
    }

    fn is_full_cell(&self, cell: usize) -> bool {
        self.open[cell] && self.connections.connected(cell + 1, SOURCE)
    }

    // Unions `node` with `other` and reports whether `other`'s component
    // reached the bottom row before the union.
    fn merge(&mut self, node: usize, other: usize) -> bool {
        let touches_bottom = self.touches_bottom[self.connections.find(other)];
        self.connections.union(node, other);
        touches_bottom
    }

    fn sink(&self) -> usize {
        self.size * self.size + 1
    }

    /// Converts 1-based coordinates into 0-based ones.
    fn validate(&self, row: usize, col: usize) -> Result<(usize, usize)> {
        let in_range = |i: usize| (1..=self.size).contains(&i);
        if !in_range(row) || !in_range(col) {
            return Err(Error::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok((row - 1, col - 1))
    }
}

impl<U: UnionFind> fmt::Display for PercolationGrid<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();

        write!(f, "{:width$}", "")?;
        for col in 1..=self.size {
            write!(f, "|{col:>width$}")?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{:>width$}", row + 1)?;
            for col in 0..self.size {
                let cell = row * self.size + col;
                let symbol = if self.is_full_cell(cell) {
                    'F'
                } else if self.open[cell] {
                    'O'
                } else {
                    '#'
                };
                write!(f, " {symbol:>width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn element_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::invalid_argument("size", format!("must be positive, got {size}")));
    }
    size.checked_mul(size)
        .and_then(|sites| sites.checked_add(2))
        .ok_or_else(|| Error::invalid_argument("size", format!("{size} is too large")))
}

/// 0-based indices of the in-bounds neighbors of `(row, col)`.
fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = usize> {
    MOVES.into_iter().filter_map(move |(dy, dx)| {
        let y = row.checked_add_signed(dy)?;
        let x = col.checked_add_signed(dx)?;
        (y < size && x < size).then_some(y * size + x)
    })
}

////////////////////////////////////////////////////////////////////////////////
