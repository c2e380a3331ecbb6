use tracing::debug;

use crate::domain::SIMPLIFIED_COLUMNS;
use crate::loader::{Dataset, Record};
use crate::view::ColumnMode;

/// Free cells added to the widest value of a column.
pub const COLUMN_WIDTH_MARGIN: usize = 1;

/// Header and cell text of the rows currently on display.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableProjection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<usize>,
}

impl TableProjection {
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

/// Column names shown for `mode`. In full mode these are the keys of the
/// first displayed record. An empty display set has no columns in either mode.
pub fn active_columns<'a>(
    dataset: &'a Dataset,
    rows: &[usize],
    mode: ColumnMode,
) -> Vec<&'a str> {
    let Some(&first) = rows.first() else {
        return Vec::new();
    };
    match mode {
        ColumnMode::Simplified => SIMPLIFIED_COLUMNS.to_vec(),
        ColumnMode::Full => dataset.records()[first].keys().collect(),
    }
}

/// Cell text of `column`. Empty or missing values show the 1-based position
/// of the record within the displayed rows.
pub fn display_value(record: &Record, column: &str, position: usize) -> String {
    match record.get(column) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => (position + 1).to_string(),
    }
}

pub fn project(
    dataset: &Dataset,
    rows: &[usize],
    mode: ColumnMode,
    max_column_width: usize,
) -> TableProjection {
    let columns = active_columns(dataset, rows, mode);

    let cells: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(position, &idx)| {
            let record = &dataset.records()[idx];
            columns
                .iter()
                .map(|column| display_value(record, column, position))
                .collect()
        })
        .collect();

    let widths = columns
        .iter()
        .enumerate()
        .map(|(cidx, name)| {
            let widest = cells
                .iter()
                .filter_map(|row| row.get(cidx))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            calculate_column_width(name, widest, max_column_width)
        })
        .collect();

    debug!(
        "Projected {} rows x {} columns ({:?})",
        cells.len(),
        columns.len(),
        mode
    );

    TableProjection {
        headers: columns.into_iter().map(str::to_string).collect(),
        rows: cells,
        widths,
    }
}

fn calculate_column_width(name: &str, widest_cell: usize, max_column_width: usize) -> usize {
    let width = std::cmp::max(name.chars().count(), widest_cell) + COLUMN_WIDTH_MARGIN;
    std::cmp::min(width, max_column_width)
}
