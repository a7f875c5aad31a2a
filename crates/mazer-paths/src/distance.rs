use mazer_core::Point;

/// Manhattan (L1) distance between two points.
///
/// A lower bound on the 4-directional shortest-path length between them.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
