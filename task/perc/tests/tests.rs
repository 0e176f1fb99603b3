use perc::{Error, PercolationGrid, PercolationStats, Site, UnionFind, WeightedQuickUnion};

use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};
use std::{cell::Cell, rc::Rc};

////////////////////////////////////////////////////////////////////////////////

#[test]
fn open_column_percolates() {
    let n = 20;
    let mut grid = PercolationGrid::new(n).unwrap();
    for row in 1..n {
        grid.open(row, 7).unwrap();
        assert!(!grid.percolates());
    }
    grid.open(n, 7).unwrap();
    assert!(grid.percolates());
    assert_eq!(grid.open_sites(), n);
}

#[test]
fn full_implies_open() {
    let n = 9;
    let mut grid = PercolationGrid::new(n).unwrap();
    for (row, col) in [(1, 1), (5, 5), (9, 9), (9, 1), (2, 3), (3, 2)] {
        grid.open(row, col).unwrap();
        for r in 1..=n {
            for c in 1..=n {
                if grid.is_full(r, c).unwrap() {
                    assert!(grid.is_open(r, c).unwrap());
                }
            }
        }
    }
}

#[test]
fn winding_path() {
    let n = 5;
    let mut grid = PercolationGrid::new(n).unwrap();
    let path = (1..=n)
        .rev()
        .map(|col| (2, col))
        .chain([(3, 1)])
        .chain((1..=n).map(|col| (4, col)))
        .chain([(5, n)]);

    for (row, col) in path {
        grid.open(row, col).unwrap();
    }
    assert_eq!(grid.site(5, n).unwrap(), Site::Open);
    assert!(!grid.percolates());

    grid.open(1, n).unwrap();
    assert_eq!(grid.site(5, n).unwrap(), Site::Full);
    assert_eq!(grid.site(3, 1).unwrap(), Site::Full);
    assert_eq!(grid.site(3, 2).unwrap(), Site::Blocked);
    assert!(grid.percolates());
}

#[test]
fn custom_union_find() {
    struct Counting {
        inner: WeightedQuickUnion,
        unions: Rc<Cell<usize>>,
    }

    impl UnionFind for Counting {
        fn len(&self) -> usize {
            self.inner.len()
        }

        fn count(&self) -> usize {
            self.inner.count()
        }

        fn find(&self, p: usize) -> usize {
            self.inner.find(p)
        }

        fn union(&mut self, p: usize, q: usize) {
            self.unions.set(self.unions.get() + 1);
            self.inner.union(p, q)
        }
    }

    let unions = Rc::new(Cell::new(0));
    let connections = Counting {
        inner: WeightedQuickUnion::new(3 * 3 + 2),
        unions: unions.clone(),
    };
    let mut grid = PercolationGrid::with_union_find(3, connections).unwrap();
    for row in 1..=3 {
        grid.open(row, 2).unwrap();
    }
    assert!(grid.percolates());
    assert!(grid.is_full(3, 2).unwrap());
    assert!(unions.get() >= 3);
}

#[test]
fn estimator_errors() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = PercolationStats::run(0, 1, &mut rng).unwrap_err();
    assert_eq!(err.to_string(), "invalid argument `size`: must be positive, got 0");

    let grid = PercolationGrid::new(4).unwrap();
    assert_eq!(
        grid.is_open(5, 1).unwrap_err(),
        Error::OutOfRange {
            row: 5,
            col: 1,
            size: 4
        }
    );
    assert_eq!(
        grid.is_full(1, 0).unwrap_err().to_string(),
        "site (1, 0) is outside of the 4x4 grid"
    );
}

#[test]
fn threshold_estimate() {
    let stats = PercolationStats::run_seeded(50, 100, 2024).unwrap();
    assert_eq!(stats.trials().len(), 100);
    assert!(
        (0.55..=0.63).contains(&stats.mean()),
        "mean = {}",
        stats.mean()
    );
    assert!(stats.stddev() > 0.0);
    assert!(stats.confidence_lo() <= stats.mean());
    assert!(stats.mean() <= stats.confidence_hi());
}
