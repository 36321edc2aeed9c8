//! Whitespace column alignment for humanized output.
//!
//! Input is a block of rows separated by `\n` whose cells are separated by a
//! single space. The first row is usually a header but is not treated
//! specially.

/// Aligns the cells of `text` into columns.
///
/// Every cell except the last one of its row is right-padded with spaces to
/// the width of the widest cell at the same index across all rows. Rows with
/// fewer cells are never padded for the columns they lack.
///
/// Widths are counted in `char`s.
///
/// Re-running over already aligned output is only byte-identical when the
/// row/cell structure survived the first pass, i.e. when no padding was
/// inserted. Padding spaces split into empty cells on a second pass.
#[must_use]
pub fn columnize(text: &str) -> String {
    let rows: Vec<Vec<&str>> = text.split('\n').map(|row| row.split(' ').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(index) {
                Some(max) => *max = (*max).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in &rows {
        let last = row.len().saturating_sub(1);
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                if index == last {
                    (*cell).to_owned()
                } else {
                    format!("{cell:<width$}", width = widths[index])
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines.join("\n")
}
