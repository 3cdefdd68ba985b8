//! View models for the terminal front end.
//!
//! Each view is built from fetched data and renders itself through
//! `Display`; none of them perform requests.

pub mod admin;
pub mod attendance_form;
pub mod dashboard;

use std::fmt;

pub use admin::{EquipmentRoster, EventForm, EventPanel, UserPanel};
pub use attendance_form::AttendanceForm;
pub use dashboard::{Cell, CellState, Dashboard};

/// Left-aligned plain-text table, columns sized to their widest entry.
pub(crate) fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: &[Vec<String>],
) -> fmt::Result {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    write_row(f, headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(f, &rule, &widths)?;
    for row in rows {
        write_row(f, row, &widths)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
