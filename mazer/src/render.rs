//! Console rendering of a solved maze.

use mazer_core::{Alphabet, Cell, Grid};

/// Display character for a cell.
///
/// Anything that is neither a wall, a marker, nor a path mark renders as a
/// space — including distance labels left over from the forward phase.
fn rune(cell: Cell, alphabet: &Alphabet) -> char {
    match cell {
        Cell::Wall => alphabet.wall,
        Cell::Start => alphabet.start,
        Cell::Finish => alphabet.finish,
        Cell::PathHorizontal => '-',
        Cell::PathVertical => '|',
        Cell::Free | Cell::Visited(_) => ' ',
    }
}

/// Render the grid as newline-terminated rows.
pub fn render(grid: &Grid, alphabet: &Alphabet) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for (p, cell) in grid.iter() {
        out.push(rune(cell, alphabet));
        if p.x == grid.width() - 1 {
            out.push('\n');
        }
    }
    out
}
