//! Plain-text grid output.

use gridcalc_core::{CellRef, Sheet};
use std::io::Write;

/// Which cell text the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Values,
    Formulas,
}

/// Write the whole sheet as an aligned table.
///
/// Column letters head the table and each row starts with its 0-based
/// number. Unoccupied cells are blank; trailing spaces are trimmed.
pub fn write_grid<W: Write>(w: &mut W, sheet: &Sheet, view: View) -> anyhow::Result<()> {
    let rows = sheet.rows();
    let cols = sheet.columns();

    let mut text: Vec<Vec<String>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut line = Vec::with_capacity(cols);
        for col in 0..cols {
            let cell_ref = CellRef::new(row, col);
            let shown = match sheet.cell(&cell_ref)? {
                None => String::new(),
                Some(cell) => match view {
                    View::Values => sheet.display_value(&cell_ref)?,
                    View::Formulas => cell.formula().replace(['\n', '\r'], " "),
                },
            };
            line.push(shown);
        }
        text.push(line);
    }

    let label_width = rows.saturating_sub(1).to_string().len();
    let widths: Vec<usize> = (0..cols)
        .map(|col| {
            text.iter()
                .map(|line| line[col].chars().count())
                .chain(std::iter::once(CellRef::col_to_letters(col).len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let header: Vec<String> = (0..cols).map(CellRef::col_to_letters).collect();
    write_line(w, "", label_width, &header, &widths)?;
    for (row, line) in text.iter().enumerate() {
        write_line(w, &row.to_string(), label_width, line, &widths)?;
    }
    Ok(())
}

fn write_line<W: Write>(
    w: &mut W,
    label: &str,
    label_width: usize,
    cells: &[String],
    widths: &[usize],
) -> std::io::Result<()> {
    let mut line = format!("{label:>label_width$}");
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str("  ");
        line.push_str(&format!("{cell:<width$}"));
    }
    writeln!(w, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sheet: &Sheet, view: View) -> String {
        let mut out = Vec::new();
        write_grid(&mut out, sheet, view).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_values_grid() {
        let mut sheet = Sheet::new(2, 3).unwrap();
        sheet.set_formula(&CellRef::new(0, 0), "5").unwrap();
        sheet.set_formula(&CellRef::new(0, 2), "A0*20").unwrap();
        sheet.set_formula(&CellRef::new(1, 1), "1/5").unwrap();
        sheet.evaluate_sheet().unwrap();

        let expected = "   A    B    C\n0  5.0       100.0\n1       0.2\n";
        assert_eq!(render(&sheet, View::Values), expected);
    }

    #[test]
    fn test_formulas_grid() {
        let mut sheet = Sheet::new(2, 2).unwrap();
        sheet.set_formula(&CellRef::new(1, 0), "B1 + 2").unwrap();
        sheet.set_formula(&CellRef::new(1, 1), "3").unwrap();

        let expected = "   A       B\n0\n1  B1 + 2  3\n";
        assert_eq!(render(&sheet, View::Formulas), expected);
    }

    #[test]
    fn test_row_labels_are_right_aligned() {
        let sheet = Sheet::new(11, 2).unwrap();
        let out = render(&sheet, View::Values);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "    A  B");
        assert_eq!(lines[1], " 0");
        assert_eq!(lines[11], "10");
    }
}
