//! The two-phase breadth-first maze solver.

use std::collections::VecDeque;

use thiserror::Error;

use mazer_core::{Cell, Grid, GridError, Point};

use crate::Solution;

/// Error from [`Pathfinder::solve`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The finish cell was never reached during forward labeling.
    #[error("maze has no path from start to finish")]
    Unsolvable,
    /// The distance labels around `at` are inconsistent.
    ///
    /// Unreachable after a correct forward phase; reported instead of
    /// looping when the label graph is corrupted.
    #[error("no neighbor of {at} carries distance {expected}")]
    Reconstruction { at: Point, expected: u32 },
    /// A grid access violated its bounds contract.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Two-phase breadth-first maze solver.
///
/// Borrows the grid exclusively for the duration of one solve and mutates
/// it in place: forward labeling writes [`Cell::Visited`] distances,
/// backward reconstruction rewrites the chosen path to
/// [`Cell::PathHorizontal`] / [`Cell::PathVertical`], and the start and
/// finish markers are restored last.
pub struct Pathfinder<'g> {
    grid: &'g mut Grid,
    start: Point,
    finish: Point,
    steps: u32,
}

impl<'g> Pathfinder<'g> {
    /// Create a solver over `grid`.
    pub fn new(grid: &'g mut Grid) -> Self {
        let start = grid.start();
        let finish = grid.finish();
        Self {
            grid,
            start,
            finish,
            steps: 0,
        }
    }

    /// Find the shortest path from start to finish.
    ///
    /// On success the grid holds the path marks and the restored
    /// start/finish markers. On failure the grid is left partially
    /// labeled and must not be rendered as clean output.
    pub fn solve(mut self) -> Result<Solution, SolveError> {
        let dist = self.label_distances()?;
        self.mark_path(dist)?;
        Ok(Solution {
            steps: self.steps,
            method: "bfs",
        })
    }

    /// Phase 1: flood outward from the start, labeling each reached cell
    /// with its BFS distance. Returns the finish cell's distance.
    fn label_distances(&mut self) -> Result<u32, SolveError> {
        let mut queue = VecDeque::new();
        queue.push_back(self.start);

        while let Some(p) = queue.pop_front() {
            // The finish label is final as soon as it is written; the rest
            // of the queue cannot improve it.
            if p == self.finish {
                break;
            }
            let Some(dist) = self.grid.at(p).and_then(Cell::distance) else {
                continue;
            };
            for n in p.neighbors_4() {
                if self.grid.at(n).is_some_and(Cell::is_open) {
                    self.grid.set(n, Cell::Visited(dist + 1))?;
                    queue.push_back(n);
                }
            }
        }

        match self.grid.at(self.finish).and_then(Cell::distance) {
            Some(dist) => {
                log::debug!("finish {} labeled at distance {}", self.finish, dist);
                Ok(dist)
            }
            // Still exactly `Finish`: the flood never reached it.
            None => Err(SolveError::Unsolvable),
        }
    }

    /// Phase 2: walk backward from the finish along strictly decreasing
    /// labels, marking each step, then restore the endpoint markers.
    ///
    /// The start cell reads as distance 0, so the final hop lands on it
    /// like any other; its mark is overwritten by the restoration below.
    fn mark_path(&mut self, mut dist: u32) -> Result<(), SolveError> {
        let mut current = self.finish;

        while dist > 0 {
            let prev = current
                .neighbors_4()
                .into_iter()
                .find(|&n| self.grid.at(n).and_then(Cell::distance) == Some(dist - 1))
                .ok_or(SolveError::Reconstruction {
                    at: current,
                    expected: dist - 1,
                })?;
            let mark = if prev.x != current.x {
                Cell::PathHorizontal
            } else {
                Cell::PathVertical
            };
            self.grid.set(prev, mark)?;
            current = prev;
            dist -= 1;
            self.steps += 1;
        }

        self.grid.set(self.start, Cell::Start)?;
        self.grid.set(self.finish, Cell::Finish)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manhattan;
    use mazer_core::Alphabet;
    use std::collections::{HashSet, VecDeque};

    fn parse(rows: &[&str]) -> Grid {
        Grid::parse(rows, &Alphabet::default()).unwrap()
    }

    fn solve(rows: &[&str]) -> (Grid, Solution) {
        let mut grid = parse(rows);
        let solution = Pathfinder::new(&mut grid).solve().unwrap();
        (grid, solution)
    }

    /// Independent reference BFS over the raw rows.
    fn reference_steps(rows: &[&str]) -> Option<u32> {
        let cells: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let h = cells.len() as i32;
        let w = cells[0].len() as i32;
        let mut start = None;
        let mut finish = None;
        for (y, row) in cells.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                if ch == '0' && start.is_none() {
                    start = Some(p);
                }
                if ch == 'F' && finish.is_none() {
                    finish = Some(p);
                }
            }
        }
        let (start, finish) = (start?, finish?);
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0u32)]);
        while let Some((p, d)) = queue.pop_front() {
            if p == finish {
                return Some(d);
            }
            for n in p.neighbors_4() {
                if n.x < 0 || n.y < 0 || n.x >= w || n.y >= h {
                    continue;
                }
                let ch = cells[n.y as usize][n.x as usize];
                if (ch == ' ' || ch == 'F') && seen.insert(n) {
                    queue.push_back((n, d + 1));
                }
            }
        }
        None
    }

    fn marks(grid: &Grid) -> Vec<Point> {
        grid.iter()
            .filter(|&(_, c)| c.is_path_mark())
            .map(|(p, _)| p)
            .collect()
    }

    /// The marked cells plus both endpoints must form a unit-step chain of
    /// exactly `steps` edges from start to finish. The literal route is not
    /// asserted: any shortest path is valid.
    fn assert_valid_path(grid: &Grid, steps: u32) {
        let mut path: HashSet<Point> = marks(grid).into_iter().collect();
        path.insert(grid.start());
        path.insert(grid.finish());
        assert_eq!(path.len() as u32, steps + 1);

        let mut seen = HashSet::from([grid.start()]);
        let mut queue = VecDeque::from([(grid.start(), 0u32)]);
        let mut reached = None;
        while let Some((p, d)) = queue.pop_front() {
            if p == grid.finish() {
                reached = Some(d);
                break;
            }
            for n in p.neighbors_4() {
                if path.contains(&n) && seen.insert(n) {
                    queue.push_back((n, d + 1));
                }
            }
        }
        assert_eq!(reached, Some(steps));
    }

    fn assert_markers_restored(grid: &Grid) {
        assert_eq!(grid.get(grid.start()), Ok(Cell::Start));
        assert_eq!(grid.get(grid.finish()), Ok(Cell::Finish));
    }

    // -----------------------------------------------------------------------
    // Concrete scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn three_by_three_dogleg() {
        let rows = ["0 X", " X ", "  F"];
        let (grid, solution) = solve(&rows);
        assert_eq!(solution.steps, 4);
        assert_eq!(solution.method, "bfs");
        assert_valid_path(&grid, 4);
        assert_markers_restored(&grid);
    }

    #[test]
    fn adjacent_start_and_finish() {
        let (grid, solution) = solve(&["0F"]);
        assert_eq!(solution.steps, 1);
        // Adjacency leaves no intermediate cell to mark.
        assert!(marks(&grid).is_empty());
        assert_markers_restored(&grid);
    }

    #[test]
    fn walled_off_finish_is_unsolvable() {
        let mut grid = parse(&["0XF"]);
        let err = Pathfinder::new(&mut grid).solve().unwrap_err();
        assert_eq!(err, SolveError::Unsolvable);
        assert!(marks(&grid).is_empty());
    }

    #[test]
    fn unreachable_pocket_is_unsolvable_and_unmarked() {
        let rows = ["0  X ", "   X ", "   XF"];
        let mut grid = parse(&rows);
        assert_eq!(reference_steps(&rows), None);
        let err = Pathfinder::new(&mut grid).solve().unwrap_err();
        assert_eq!(err, SolveError::Unsolvable);
        assert!(marks(&grid).is_empty());
    }

    // -----------------------------------------------------------------------
    // Agreement with an independent reference
    // -----------------------------------------------------------------------

    #[test]
    fn agrees_with_reference_bfs() {
        let mazes: [&[&str]; 4] = [
            &["0 X", " X ", "  F"],
            &["0F"],
            &["0  ", "   ", "  F"],
            &[
                "0X     ",
                " X XXX ",
                " X   X ",
                " XXX X ",
                "     XF",
            ],
        ];
        for rows in mazes {
            let expected = reference_steps(rows).unwrap();
            let (grid, solution) = solve(rows);
            assert_eq!(solution.steps, expected, "maze {rows:?}");
            assert_valid_path(&grid, expected);
            assert_markers_restored(&grid);
            assert!(solution.steps as i32 >= manhattan(grid.start(), grid.finish()));
        }
    }

    #[test]
    fn open_room_has_many_shortest_paths_of_equal_length() {
        // Which route wins depends on neighbor order; only the length is
        // contractual.
        let (grid, solution) = solve(&["0  ", "   ", "  F"]);
        assert_eq!(
            solution.steps as i32,
            manhattan(grid.start(), grid.finish())
        );
        assert_valid_path(&grid, solution.steps);
    }

    // -----------------------------------------------------------------------
    // Labeling behavior
    // -----------------------------------------------------------------------

    #[test]
    fn stops_labeling_once_finish_is_dequeued() {
        let (grid, _) = solve(&["0F "]);
        // The cell behind the finish would only be labeled by expanding the
        // finish itself, which the early exit skips.
        assert_eq!(grid.get(Point::new(2, 0)), Ok(Cell::Free));
    }

    #[test]
    fn cells_off_the_path_keep_their_labels_or_stay_free() {
        let (grid, _) = solve(&["0 X  ", "  X  ", " FX  "]);
        // Reached but off the path: labeled.
        assert!(grid
            .iter()
            .any(|(_, c)| matches!(c, Cell::Visited(_))));
        // Sealed off behind the wall column: never reached.
        assert_eq!(grid.get(Point::new(4, 0)), Ok(Cell::Free));
        assert_eq!(grid.get(Point::new(4, 2)), Ok(Cell::Free));
    }

    #[test]
    fn path_marks_count_is_steps_minus_one() {
        // Every backward hop marks a cell, but the hop onto the start is
        // overwritten by marker restoration and the finish is never marked.
        let (grid, solution) = solve(&["0 X", " X ", "  F"]);
        assert_eq!(marks(&grid).len() as u32, solution.steps - 1);
    }

    // -----------------------------------------------------------------------
    // Defensive invariants
    // -----------------------------------------------------------------------

    #[test]
    fn corrupted_labels_fail_reconstruction() {
        let mut grid = parse(&["0F"]);
        // Forge a finish label no neighbor chain can explain.
        grid.set(grid.finish(), Cell::Visited(5)).unwrap();
        let err = Pathfinder::new(&mut grid).solve().unwrap_err();
        assert_eq!(
            err,
            SolveError::Reconstruction {
                at: Point::new(1, 0),
                expected: 4,
            }
        );
    }
}
