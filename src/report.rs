//! Plain-text audit report, the printable counterpart of the dashboard.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::analytics::stability::STABILITY_WEIGHTS;
use crate::state::AppState;

/// Open alerts listed in a report.
const REPORT_ALERTS: usize = 10;
/// Procurement lines listed in a report.
const REPORT_PROCUREMENT: usize = 5;

/// Render the report for the current state.
pub fn render_report(state: &AppState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_sections(&mut out, state);
    out
}

fn write_sections(out: &mut String, state: &AppState) -> std::fmt::Result {
    let region = state
        .city
        .map(|c| c.to_string())
        .unwrap_or_else(|| "No region selected".to_string());

    writeln!(out, "MUNICIPAL STABILITY REPORT")?;
    writeln!(out, "Region:    {region}")?;
    writeln!(
        out,
        "Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out)?;

    writeln!(out, "== Service requests ==")?;
    match &state.summary {
        Some(summary) => {
            writeln!(out, "Total records:     {}", summary.total)?;
            writeln!(out, "Pending:           {}", summary.pending)?;
            writeln!(out, "Resolution rate:   {:.0}%", summary.resolution_rate())?;
            writeln!(out, "Stability index:   {:.0}", summary.stability_val)?;
            writeln!(out, "Integrity index:   {:.0}", summary.integrity_val)?;
            writeln!(out, "Serious records:   {}", summary.serious)?;
        }
        None => writeln!(out, "No live data available.")?,
    }
    writeln!(out)?;

    writeln!(out, "== Spending analysis ==")?;
    writeln!(out, "Periods analysed:  {}", state.spending.len())?;
    writeln!(out, "Incident-weighted spending: {:.2}", state.spending_score())?;
    let anomalies = state.spending_anomalies();
    if anomalies.is_empty() {
        writeln!(
            out,
            "No anomalies beyond {:.1} standard deviations.",
            state.anomaly_threshold
        )?;
    } else {
        writeln!(
            out,
            "Anomalies beyond {:.1} standard deviations:",
            state.anomaly_threshold
        )?;
        for flag in &anomalies {
            let date = state
                .spending
                .get(flag.index)
                .map(|p| p.date.as_str())
                .unwrap_or("?");
            writeln!(out, "  - #{} {date}: {:.2}", flag.index, flag.value)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "== Procurement anomalies ==")?;
    if state.procurement.is_empty() {
        writeln!(out, "No anomalies in the current procurement batch.")?;
    }
    for anomaly in state.procurement.iter().take(REPORT_PROCUREMENT) {
        writeln!(out, "  #{:<4} {:<24} {:.2}", anomaly.id, anomaly.item, anomaly.score)?;
    }
    writeln!(out)?;

    writeln!(out, "== Simulation ==")?;
    let sim = &state.simulation;
    writeln!(out, "Infrastructure:     {:.0}", sim.infrastructure)?;
    writeln!(out, "Governance:         {:.0}", sim.governance)?;
    writeln!(out, "Transparency:       {:.0}", sim.transparency)?;
    writeln!(out, "Emergency response: {:.0}", sim.emergency_response)?;
    writeln!(
        out,
        "Composite stability: {:.1} ({})",
        state.stability(),
        state.stability_band()
    )?;
    if let Some(last) = state.forecast().last() {
        writeln!(
            out,
            "{} outlook: {:.1} (baseline {:.1}, range {:.1}-{:.1})",
            last.year, last.simulated, last.baseline, last.lower, last.upper
        )?;
    }
    writeln!(out)?;

    if state.summary.is_some() {
        writeln!(out, "== Open alerts ==")?;
        let open = state.open_alerts(REPORT_ALERTS);
        for alert in &open {
            writeln!(out, "[{}] {} ({})", alert.level, alert.message, alert.agency)?;
        }
        if open.is_empty() {
            writeln!(out, "None.")?;
        }
        writeln!(out)?;
    }

    if state.include_methodology {
        writeln!(out, "== Methodology ==")?;
        writeln!(out, "Composite stability is a fixed-weight sum clamped to 0-100:")?;
        for (name, weight) in STABILITY_WEIGHTS {
            writeln!(out, "  {weight:.2} x {name}")?;
        }
        writeln!(
            out,
            "Anomalies are values further than the threshold times the population standard deviation from the mean."
        )?;
    }
    Ok(())
}

/// Render and write the report to `path`.
pub fn write_report(path: &Path, state: &AppState) -> Result<()> {
    std::fs::write(path, render_report(state))
        .with_context(|| format!("writing report to {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CitySource, CivicRecord, RecordStatus};

    fn open_record(id: &str, category: &str) -> CivicRecord {
        record(id, category, RecordStatus::Open)
    }

    fn record(id: &str, category: &str, status: RecordStatus) -> CivicRecord {
        CivicRecord {
            id: id.to_string(),
            category: category.to_string(),
            location: "10 BROADWAY".to_string(),
            site: Some("10 BROADWAY".to_string()),
            status,
            latitude: None,
            longitude: None,
            postcode: None,
            agency: "NYPD".to_string(),
            description: String::new(),
            created: None,
        }
    }

    #[test]
    fn test_report_without_city() {
        let state = AppState::default();
        let report = render_report(&state);
        assert!(report.contains("No region selected"));
        assert!(report.contains("No live data available."));
        assert!(report.contains("Composite stability: 50.0 (Fragile)"));
        assert!(report.contains("0.35 x Infrastructure"));
        assert!(!report.contains("== Open alerts =="));
    }

    #[test]
    fn test_report_with_records() {
        let mut state = AppState::default();
        state.include_methodology = false;
        state.set_records(
            CitySource::NewYork,
            vec![open_record("1", "Noise"), open_record("2", "Blocked Driveway")],
        );
        let report = render_report(&state);
        assert!(report.contains("Region:    New York, United States"));
        assert!(report.contains("Total records:     2"));
        assert!(report.contains("[high] Noise at 10 BROADWAY (NYPD)"));
        assert!(report.contains("[medium] Blocked Driveway at 10 BROADWAY"));
        assert!(!report.contains("== Methodology =="));
    }

    #[test]
    fn test_report_lists_open_records_beyond_first_fifty() {
        let mut state = AppState::default();
        let mut records: Vec<CivicRecord> = (0..50)
            .map(|i| record(&i.to_string(), "Noise", RecordStatus::Other("Closed".into())))
            .collect();
        records.extend((0..10).map(|i| open_record(&format!("open-{i}"), "Blocked Driveway")));
        state.set_records(CitySource::NewYork, records);

        let report = render_report(&state);
        let section = report
            .split("== Open alerts ==")
            .nth(1)
            .unwrap()
            .split("\n\n")
            .next()
            .unwrap();
        assert!(!section.contains("None."));
        assert_eq!(section.matches("[medium] Blocked Driveway at 10 BROADWAY").count(), 10);
    }

    #[test]
    fn test_report_lists_procurement_anomalies() {
        let mut state = AppState::default();
        let report = render_report(&state);
        assert!(report.contains("== Procurement anomalies =="));
        assert!(report.contains("Server hardware"));
        assert!(report.contains("5.20"));

        state.procurement.clear();
        let report = render_report(&state);
        assert!(report.contains("No anomalies in the current procurement batch."));
    }

    #[test]
    fn test_report_lists_anomalies() {
        let mut state = AppState::default();
        state.anomaly_threshold = 1.0;
        let report = render_report(&state);
        // 180000 on 2026-01-15 sits ~1.7 sd above the sample mean.
        assert!(report.contains("#3 2026-01-15: 180000.00"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, &AppState::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("MUNICIPAL STABILITY REPORT"));
    }
}
