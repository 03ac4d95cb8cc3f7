// rules.rs - Conway's B3/S23 rule over a bounded (non-wrapping) grid

use crate::grid::Grid;

/// Moore neighborhood as (row, col) deltas.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1), (0, -1), (1, -1), (-1, 1),
    (1, 1), (-1, -1), (1, 0), (-1, 0),
];

/// Number of live cells around (`row`, `col`). Positions past the edge count as dead.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> usize {
    let (rows, cols) = (grid.rows(), grid.cols());
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < rows && c < cols).then_some((r, c))
        })
        .filter(|&(r, c)| grid.get(r, c))
        .count()
}

pub fn next_state(alive: bool, neighbors: usize) -> bool {
    match (alive, neighbors) {
        (_, n) if n < 2 || n > 3 => false,  // Under/overpopulation
        (false, 3)               => true,   // Birth
        (alive, _)               => alive,  // Unchanged
    }
}

/// Next generation of `grid`. Reads only `grid`, never the grid being built.
pub fn step(grid: &Grid) -> Grid {
    let dims = grid.dimensions();
    let mut cells = Vec::with_capacity(dims.area());
    for row in 0..dims.rows {
        for col in 0..dims.cols {
            cells.push(next_state(grid.get(row, col), live_neighbors(grid, row, col)));
        }
    }
    Grid::from_cells(dims, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dimensions;
    use proptest::prelude::*;

    fn grid(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
        Grid::with_live_cells(Dimensions::new(rows, cols).unwrap(), live).unwrap()
    }

    fn live(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid.live_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_next_state() {
        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
        assert!(!next_state(false, 2));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 4));
    }

    #[test]
    fn test_offsets_are_the_moore_neighborhood() {
        let mut offsets = NEIGHBOR_OFFSETS.to_vec();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 8);
        assert!(!offsets.contains(&(0, 0)));
        assert!(offsets.iter().all(|&(dr, dc)| dr.abs() <= 1 && dc.abs() <= 1));
    }

    #[test]
    fn test_isolated_cell_dies() {
        let g = grid(5, 5, &[(2, 2)]);
        assert_eq!(live_neighbors(&g, 2, 2), 0);
        assert_eq!(step(&g).live_count(), 0);
    }

    #[test]
    fn test_block_is_stable() {
        let g = grid(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        for &(r, c) in &[(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert_eq!(live_neighbors(&g, r, c), 3);
        }
        let next = step(&g);
        assert_eq!(next, g);
        assert_eq!(step(&next), g);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = step(&horizontal);
        assert_eq!(live(&vertical), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_corner_does_not_wrap() {
        // Live cells on the far edges would be neighbours of (0, 0) on a torus
        let g = grid(4, 4, &[(0, 0), (3, 3), (0, 3), (3, 0)]);
        assert_eq!(live_neighbors(&g, 0, 0), 0);
        assert_eq!(live_neighbors(&grid(4, 4, &[(0, 0)]), 0, 0), 0);
        assert_eq!(step(&g).live_count(), 0);
    }

    #[test]
    fn test_corner_counts_in_bounds_neighbors() {
        let g = grid(3, 3, &[(0, 1), (1, 0), (1, 1)]);
        assert_eq!(live_neighbors(&g, 0, 0), 3);
        // Birth at the corner, and the three parents form a block
        assert_eq!(live(&step(&g)), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_single_row_grid() {
        let g = grid(1, 5, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(live_neighbors(&g, 0, 2), 2);
        assert_eq!(live(&step(&g)), vec![(0, 2)]);
    }

    #[test]
    fn test_step_reads_only_previous_generation() {
        // An L-tromino grows into a block only if every birth sees the old grid
        let g = grid(4, 4, &[(1, 1), (1, 2), (2, 1)]);
        assert_eq!(live(&step(&g)), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(0u8..=1, rows * cols).prop_map(move |values| {
                let rows_vec = values.chunks(cols).map(<[u8]>::to_vec).collect();
                Grid::from_rows(rows_vec).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn proptest_step_preserves_dimensions(g in arb_grid()) {
            let next = step(&g);
            prop_assert_eq!(next.dimensions(), g.dimensions());
        }

        #[test]
        fn proptest_step_is_deterministic(g in arb_grid()) {
            prop_assert_eq!(step(&g), step(&g));
        }

        #[test]
        fn proptest_neighbor_count_bounded(g in arb_grid()) {
            for row in 0..g.rows() {
                for col in 0..g.cols() {
                    prop_assert!(live_neighbors(&g, row, col) <= 8);
                }
            }
        }
    }
}
