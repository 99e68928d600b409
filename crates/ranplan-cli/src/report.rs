//! Allocation report output.
//!
//! One line per pylon with the installed antenna, served users and
//! remaining/total bandwidth, plus an explicit INCOMPLETE banner when the
//! run left users unserved. Lines are ordered by position so the report is
//! stable run to run.

use anyhow::{Context, Result};
use ranplan_core::AllocationOutcome;
use std::fs;
use std::path::Path;

/// Create the output directory if needed and remove stale report files.
pub fn reset_output_files(dir: &Path, filenames: &[&str]) -> Result<()> {
    if !dir.is_dir() {
        tracing::info!(dir = %dir.display(), "creating output directory");
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }
    for name in filenames {
        let path = dir.join(name);
        if path.is_file() {
            tracing::info!(file = %path.display(), "removing existing output file");
            fs::remove_file(&path)
                .with_context(|| format!("cannot remove {}", path.display()))?;
        }
    }
    Ok(())
}

/// Render the allocation outcome as the report's text body.
pub fn render_allocation(outcome: &AllocationOutcome) -> String {
    let mut lines = vec![
        "Placed antennas: position: model, served users, remaining/total bandwidth".to_string(),
    ];

    let mut entries: Vec<_> = outcome.reports().iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    for (position, report) in entries {
        lines.push(format!(
            "{}: {}, {} users, {:.1} Hz / {:.1} Hz",
            position,
            report.antenna,
            report.served_users,
            report.leftover_bandwidth_hz,
            report.total_bandwidth_hz
        ));
    }

    if let AllocationOutcome::Incomplete { unserved, .. } = outcome {
        lines.push(format!("INCOMPLETE: {} users left unserved", unserved));
    }

    lines.join("\n") + "\n"
}

/// Write the allocation report to `path`.
pub fn write_allocation(path: &Path, outcome: &AllocationOutcome) -> Result<()> {
    fs::write(path, render_allocation(outcome))
        .with_context(|| format!("cannot write allocation report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranplan_core::{AllocationOutcome, Point, PylonReport};
    use std::collections::HashMap;

    fn report(name: &str, served: usize, leftover: f64) -> PylonReport {
        PylonReport {
            antenna: name.to_string(),
            served_users: served,
            leftover_bandwidth_hz: leftover,
            total_bandwidth_hz: 10.0e6,
        }
    }

    #[test]
    fn test_render_complete() {
        let mut reports = HashMap::new();
        reports.insert(Point::new(10.0, 0.0), report("macro-700", 3, 9.0e6));
        let text = render_allocation(&AllocationOutcome::Complete(reports));
        assert!(text.contains("(10, 0): macro-700, 3 users, 9000000.0 Hz / 10000000.0 Hz"));
        assert!(!text.contains("INCOMPLETE"));
    }

    #[test]
    fn test_render_incomplete_banner() {
        let mut reports = HashMap::new();
        reports.insert(Point::new(0.0, 0.0), report("macro-700", 5, 0.5e6));
        let text = render_allocation(&AllocationOutcome::Incomplete { reports, unserved: 7 });
        assert!(text.ends_with("INCOMPLETE: 7 users left unserved\n"));
    }

    #[test]
    fn test_render_orders_by_position() {
        let mut reports = HashMap::new();
        reports.insert(Point::new(200.0, 0.0), report("macro-700", 1, 1.0e6));
        reports.insert(Point::new(100.0, 0.0), report("macro-700", 2, 2.0e6));
        let text = render_allocation(&AllocationOutcome::Complete(reports));
        let first = text.find("(100, 0)").unwrap();
        let second = text.find("(200, 0)").unwrap();
        assert!(first < second, "report lines must be position-ordered");
    }
}
