//! Shortest-path solving for text mazes.
//!
//! [`Pathfinder`] runs an unweighted breadth-first search over a
//! [`mazer_core::Grid`] in two phases:
//!
//! 1. **Forward labeling** — flood the grid outward from the start,
//!    writing each reached cell's BFS distance into the grid itself. The
//!    relabeling doubles as the visited set: a labeled cell no longer
//!    admits a step.
//! 2. **Backward reconstruction** — walk from the finish along strictly
//!    decreasing distance labels, rewriting the chosen cells to path
//!    marks, then restore the start and finish markers.
//!
//! The grid is mutated in place; the returned [`Solution`] carries the
//! step count.

mod bfs;
mod distance;
mod solution;

pub use bfs::{Pathfinder, SolveError};
pub use distance::manhattan;
pub use solution::Solution;
