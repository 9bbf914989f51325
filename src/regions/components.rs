//! Connected components of a boolean cell grid.
//!
//! One routine serves both the pixel-density finder and the geometry
//! occupancy analyser: an optional dilation pre-pass bridges near-adjacent
//! cells, a breadth-first 4-connected fill collects each component with its
//! bounding cell range and accumulated weight, and an optional margin
//! post-pass grows the range (clamped to the grid).
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolGrid {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<bool>,
}

impl BoolGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    pub fn from_cells(cols: usize, rows: usize, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), cols * rows, "cell count must equal cols*rows");
        Self { cols, rows, cells }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.cols + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.cells[y * self.cols + x] = v;
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Square dilation with the given radius (Chebyshev neighbourhood).
    pub fn dilate(&self, radius: usize) -> BoolGrid {
        if radius == 0 {
            return self.clone();
        }
        let mut out = BoolGrid::new(self.cols, self.rows);
        for y in 0..self.rows {
            for x in 0..self.cols {
                if !self.get(x, y) {
                    continue;
                }
                let (x0, x1) = (x.saturating_sub(radius), (x + radius).min(self.cols - 1));
                let (y0, y1) = (y.saturating_sub(radius), (y + radius).min(self.rows - 1));
                for ny in y0..=y1 {
                    for nx in x0..=x1 {
                        out.set(nx, ny, true);
                    }
                }
            }
        }
        out
    }
}

/// Inclusive cell range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl CellBounds {
    fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Grow by `margin` cells on every side, clamped to `cols × rows`.
    pub fn expand(&self, margin: usize, cols: usize, rows: usize) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(margin),
            max_x: (self.max_x + margin).min(cols.saturating_sub(1)),
            min_y: self.min_y.saturating_sub(margin),
            max_y: (self.max_y + margin).min(rows.saturating_sub(1)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LabelOptions {
    /// Dilation radius applied before the fill (0 disables).
    pub dilate_radius: usize,
    /// Margin applied to each component's range after the fill.
    pub margin: usize,
}

#[derive(Clone, Debug)]
pub struct Component {
    /// Tight range of member cells.
    pub bounds: CellBounds,
    /// `bounds` after the margin post-pass.
    pub expanded: CellBounds,
    /// Sum of member weights (member count when unweighted).
    pub score: f64,
    pub cells: usize,
}

/// Label the 4-connected components of `grid`.
///
/// `weights`, when given, must have one entry per cell and is summed over the
/// members of each component. Components are emitted in scan order of their
/// first cell.
pub fn label_components(
    grid: &BoolGrid,
    weights: Option<&[f64]>,
    options: LabelOptions,
) -> Vec<Component> {
    if let Some(w) = weights {
        debug_assert_eq!(w.len(), grid.cells.len(), "one weight per cell");
    }
    let dilated;
    let grid = if options.dilate_radius > 0 {
        dilated = grid.dilate(options.dilate_radius);
        &dilated
    } else {
        grid
    };

    let (cols, rows) = (grid.cols, grid.rows);
    let mut visited = vec![false; cols * rows];
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    for sy in 0..rows {
        for sx in 0..cols {
            let seed = sy * cols + sx;
            if !grid.cells[seed] || visited[seed] {
                continue;
            }
            visited[seed] = true;
            queue.push_back((sx, sy));
            let mut bounds = CellBounds::at(sx, sy);
            let mut score = 0.0;
            let mut cells = 0usize;

            while let Some((x, y)) = queue.pop_front() {
                let idx = y * cols + x;
                score += weights.map_or(1.0, |w| w[idx]);
                cells += 1;
                bounds.include(x, y);

                let mut visit = |nx: usize, ny: usize| {
                    let n = ny * cols + nx;
                    if grid.cells[n] && !visited[n] {
                        visited[n] = true;
                        queue.push_back((nx, ny));
                    }
                };
                if x > 0 {
                    visit(x - 1, y);
                }
                if x + 1 < cols {
                    visit(x + 1, y);
                }
                if y > 0 {
                    visit(x, y - 1);
                }
                if y + 1 < rows {
                    visit(x, y + 1);
                }
            }

            components.push(Component {
                bounds,
                expanded: bounds.expand(options.margin, cols, rows),
                score,
                cells,
            });
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> BoolGrid {
        let cols = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        BoolGrid::from_cells(cols, rows.len(), cells)
    }

    #[test]
    fn four_connectivity_splits_diagonal_neighbours() {
        let grid = grid_from(&["#.....", ".#....", "....##", "....##"]);
        let comps = label_components(&grid, None, LabelOptions::default());
        assert_eq!(comps.len(), 3);
        let big = comps.iter().find(|c| c.cells == 4).expect("2x2 block");
        assert_eq!(big.bounds, CellBounds { min_x: 4, max_x: 5, min_y: 2, max_y: 3 });
        assert_eq!(big.score, 4.0);
    }

    #[test]
    fn weights_accumulate_and_members_stay_inside_bounds() {
        let grid = grid_from(&["##..", ".#..", "...#"]);
        let weights = [0.5, 0.25, 0.0, 0.0, 0.0, 0.125, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let comps = label_components(&grid, Some(&weights), LabelOptions::default());
        assert_eq!(comps.len(), 2);
        assert!((comps[0].score - 0.875).abs() < 1e-12);
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                if grid.get(x, y) {
                    assert!(comps.iter().any(|c| c.bounds.contains(x, y)));
                }
            }
        }
    }

    #[test]
    fn dilation_bridges_one_cell_gaps() {
        let grid = grid_from(&["#.#....", ".......", "......#"]);
        assert_eq!(grid.count(), 3);
        assert_eq!(grid.dilate(1).count(), 12);
        let plain = label_components(&grid, None, LabelOptions::default());
        assert_eq!(plain.len(), 3);
        let bridged = label_components(
            &grid,
            None,
            LabelOptions {
                dilate_radius: 1,
                margin: 0,
            },
        );
        assert_eq!(bridged.len(), 2);
        assert_eq!(bridged[0].bounds.width(), 4);
    }

    #[test]
    fn margin_is_clamped_to_grid() {
        let grid = grid_from(&["....", ".#..", "...."]);
        let comps = label_components(
            &grid,
            None,
            LabelOptions {
                dilate_radius: 0,
                margin: 5,
            },
        );
        assert_eq!(
            comps[0].expanded,
            CellBounds { min_x: 0, max_x: 3, min_y: 0, max_y: 2 }
        );
        assert_eq!(comps[0].bounds.width(), 1);
    }
}
