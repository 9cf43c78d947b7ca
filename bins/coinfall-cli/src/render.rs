//! Text rendering of layouts and validation reports.

use std::fmt::Write;

use coinfall_core::types::{PayoutLayout, SpinPlan};
use coinfall_layout::validator::ValidationReport;

const EMPTY_CELL: &str = ".";

/// One spin as a rows × columns board. Occupied cells show the color tag and value.
pub fn board(spin: &SpinPlan, rows: usize, columns: usize) -> String {
    let mut cells = vec![String::from(EMPTY_CELL); rows * columns];
    for combo in &spin.combinations {
        for cell in &combo.cells {
            if let Some(slot) = cells.get_mut(cell.index) {
                *slot = format!("{}{}", combo.color.tag(), cell.value);
            }
        }
    }
    let width = cells.iter().map(String::len).max().unwrap_or(1);

    let mut out = String::new();
    for row in cells.chunks(columns.max(1)) {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

/// Full layout: header, one board per spin with its combinations, then warnings.
pub fn layout(layout: &PayoutLayout, seed: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "seed {seed}  wager {}  target {}  spins {}",
        layout.wager,
        layout.target_total,
        layout.spins.len()
    );
    for (i, spin) in layout.spins.iter().enumerate() {
        let _ = writeln!(out, "\nspin {i}: {}", spin.spin_value);
        out.push_str(&board(spin, layout.grid.rows, layout.grid.columns));
        for combo in &spin.combinations {
            let _ = writeln!(
                out,
                "  {:<5} {:>7} over {} cells",
                combo.color.to_string(),
                combo.total_value,
                combo.cells.len()
            );
        }
    }
    if !layout.warnings.is_empty() {
        out.push_str("\nwarnings:\n");
        for w in &layout.warnings {
            let _ = writeln!(out, "  {w}");
        }
    }
    out
}

/// Validation summary; lists only failing checks.
pub fn report(report: &ValidationReport) -> String {
    let failures: Vec<String> = report.failures().map(|c| format!("  {c}\n")).collect();
    if failures.is_empty() {
        format!("validation: {} checks passed\n", report.checks.len())
    } else {
        format!(
            "validation: {} of {} checks FAILED\n{}",
            failures.len(),
            report.checks.len(),
            failures.concat()
        )
    }
}
