//! Built-in series shown before any spending data has been loaded.

use super::model::{ProcurementAnomaly, SpendingPoint};

const SPENDING: [(&str, f64, f64); 7] = [
    ("2025-12-01", 120000.0, 5.0),
    ("2025-12-15", 150000.0, 3.0),
    ("2026-01-01", 110000.0, 8.0),
    ("2026-01-15", 180000.0, 6.0),
    ("2026-02-01", 140000.0, 4.0),
    ("2026-02-15", 130000.0, 7.0),
    ("2026-03-01", 160000.0, 2.0),
];

const STABILITY_TREND: [(&str, f64); 7] = [
    ("2025-12-01", 65.0),
    ("2025-12-15", 68.0),
    ("2026-01-01", 70.0),
    ("2026-01-15", 72.0),
    ("2026-02-01", 71.0),
    ("2026-02-15", 72.0),
    ("2026-03-01", 72.0),
];

const COMPLAINT_TREND: [(&str, f64); 7] = [
    ("2025-12-01", 200.0),
    ("2025-12-15", 180.0),
    ("2026-01-01", 220.0),
    ("2026-01-15", 210.0),
    ("2026-02-01", 190.0),
    ("2026-02-15", 205.0),
    ("2026-03-01", 195.0),
];

const PROCUREMENT_ANOMALIES: [(u32, &str, f64); 3] = [
    (1, "Office chairs", 3.5),
    (2, "Server hardware", 5.2),
    (3, "Catering services", 2.1),
];

/// Fortnightly infrastructure spending with incident counts.
pub fn spending_series() -> Vec<SpendingPoint> {
    SPENDING
        .iter()
        .map(|&(date, spending, incidents)| SpendingPoint {
            date: date.to_string(),
            spending,
            incidents,
        })
        .collect()
}

/// Historic stability index readings, oldest first.
pub fn stability_trend() -> Vec<(String, f64)> {
    STABILITY_TREND
        .iter()
        .map(|&(date, value)| (date.to_string(), value))
        .collect()
}

/// Complaint volume per fortnight, oldest first.
pub fn complaint_trend() -> Vec<(String, f64)> {
    COMPLAINT_TREND
        .iter()
        .map(|&(date, complaints)| (date.to_string(), complaints))
        .collect()
}

/// Procurement lines of the current batch flagged for review.
pub fn procurement_anomalies() -> Vec<ProcurementAnomaly> {
    PROCUREMENT_ANOMALIES
        .iter()
        .map(|&(id, item, score)| ProcurementAnomaly {
            id,
            item: item.to_string(),
            score,
        })
        .collect()
}
