// Plain-text grid of a submitted forecast, printed after each submission

use crate::model::Snapshot;
use crate::units::TemperatureDisplay;

const MIN_CELL_WIDTH: usize = 12;

/// Render the snapshot as rows of boxed cells, `columns` cells per row,
/// in the same order and wrapping as the PDF grid
pub fn render_grid(snapshot: &Snapshot, columns: usize, display: TemperatureDisplay) -> String {
    let columns = columns.max(1);
    let cells: Vec<[String; 4]> = snapshot
        .iter()
        .map(|day| {
            let [name, temp, precip] = day.lines(display);
            [name, temp, precip, format!("Icon: {}", day.icon.label())]
        })
        .collect();

    let width = cells
        .iter()
        .flat_map(|cell| cell.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);

    let mut out = String::new();
    for row in cells.chunks(columns) {
        let border = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(row.len()));
        out.push_str(&border);
        out.push('\n');
        for line in 0..4 {
            out.push('|');
            for cell in row {
                out.push_str(&format!(" {:<width$} |", cell[line], width = width));
            }
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
    }
    out
}
