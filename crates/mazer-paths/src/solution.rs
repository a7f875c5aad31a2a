//! The [`Solution`] returned from a successful solve.

/// Result of a successful maze solve.
///
/// The solved grid itself stays with the caller: [`Pathfinder`] borrows it
/// mutably and leaves the path marks in place.
///
/// [`Pathfinder`]: crate::Pathfinder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// Number of edges on the shortest path (0 when start equals finish).
    pub steps: u32,
    /// Fixed label of the algorithm that produced the result.
    pub method: &'static str,
}
