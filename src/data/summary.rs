use std::collections::BTreeMap;

use crate::analytics::{clamp, SCORE_MAX, SCORE_MIN};

use super::adapter::RecordAdapter;
use super::model::{Alert, AlertLevel, CategoryCount, CitySource, CivicRecord, MapRisk, RecordStatus};

/// Most geolocated records sent to the risk map.
const MAX_MAP_RISKS: usize = 400;
/// Most alerts kept for the alerts table.
const MAX_ALERTS: usize = 50;
const MAX_CATEGORIES: usize = 8;
const MAX_HOTSPOTS: usize = 9;

// ---------------------------------------------------------------------------
// CitySummary – headline numbers derived from one feed
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for a city, derived from canonical records.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySummary {
    pub source: CitySource,
    pub total: usize,
    pub pending: usize,
    pub serious: usize,
    /// Resolution-based stability, 0–100.
    pub stability_val: f64,
    /// Share of non-serious records, floored per city, 0–100.
    pub integrity_val: f64,
    pub map_risks: Vec<MapRisk>,
    /// Record counts per short category, largest first.
    pub categories: Vec<CategoryCount>,
    /// Record counts per postcode (NYC) or worksite type (Auckland), largest first.
    pub hotspots: Vec<CategoryCount>,
    pub alerts: Vec<Alert>,
}

impl CitySummary {
    pub fn from_records(adapter: &dyn RecordAdapter, records: &[CivicRecord]) -> Self {
        let source = adapter.source();
        let total = records.len();
        let pending = records.iter().filter(|r| adapter.is_pending(r)).count();
        let serious = records.iter().filter(|r| adapter.is_serious(r)).count();

        let (stability_val, integrity_val) = headline_scores(source, total, pending, serious);

        let map_risks = records
            .iter()
            .filter_map(|r| {
                let (lat, lng) = r.coordinates()?;
                Some(MapRisk {
                    id: r.id.clone(),
                    lat,
                    lng,
                    location: r.location.clone(),
                    category: r.category.clone(),
                    score: adapter.map_score(r),
                })
            })
            .take(MAX_MAP_RISKS)
            .collect();

        let categories = top_counts(
            records.iter().map(|r| short_category(source, &r.category)),
            MAX_CATEGORIES,
            Ties::FirstSeen,
        );

        let hotspots = match source {
            CitySource::NewYork => top_counts(
                records
                    .iter()
                    .filter_map(|r| r.postcode.as_ref().map(|zip| format!("Zip {zip}"))),
                MAX_HOTSPOTS,
                Ties::ByLabel,
            ),
            CitySource::Auckland => top_counts(
                records.iter().map(|r| truncate(&r.category, 10)),
                MAX_HOTSPOTS,
                Ties::FirstSeen,
            ),
        };

        let alerts = records
            .iter()
            .take(MAX_ALERTS)
            .map(|r| alert_for(adapter, r))
            .collect();

        CitySummary {
            source,
            total,
            pending,
            serious,
            stability_val,
            integrity_val,
            map_risks,
            categories,
            hotspots,
            alerts,
        }
    }

    /// Percentage of records already resolved, 0 when there are none.
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        ((self.total - self.pending) as f64 / self.total as f64 * 100.0).round()
    }
}

/// Alert raised from one record.
pub fn alert_for(adapter: &dyn RecordAdapter, record: &CivicRecord) -> Alert {
    let level = if adapter.is_high_priority(record) {
        AlertLevel::High
    } else if adapter.is_pending(record) {
        AlertLevel::Medium
    } else {
        AlertLevel::Low
    };
    Alert {
        id: record.id.clone(),
        level,
        message: adapter.alert_message(record),
        description: record.description.clone(),
        agency: record.agency.clone(),
        status: record.status.clone(),
        created: record.created.clone(),
    }
}

/// Alerts for the first `n` records of the whole feed whose status is
/// exactly `Open`.
pub fn open_alerts(adapter: &dyn RecordAdapter, records: &[CivicRecord], n: usize) -> Vec<Alert> {
    records
        .iter()
        .filter(|r| r.status == RecordStatus::Open)
        .take(n)
        .map(|r| alert_for(adapter, r))
        .collect()
}

/// Stability and integrity for a feed. Auckland roadworks run long, so their
/// resolution share gets a +20 offset and a higher integrity floor.
fn headline_scores(source: CitySource, total: usize, pending: usize, serious: usize) -> (f64, f64) {
    let (offset, empty_stability, integrity_floor) = match source {
        CitySource::NewYork => (0.0, 100.0, 30.0),
        CitySource::Auckland => (20.0, 80.0, 40.0),
    };
    if total == 0 {
        return (empty_stability, SCORE_MAX);
    }
    let n = total as f64;
    let resolved = (total - pending) as f64 / n * 100.0;
    let stability = clamp((resolved + offset).round(), SCORE_MIN, SCORE_MAX);
    let integrity = (100.0 - serious as f64 / n * 100.0).max(integrity_floor).round();
    (stability, integrity)
}

/// Label used for the category breakdown chart.
fn short_category(source: CitySource, category: &str) -> String {
    match source {
        // "Noise - Residential" → "Noise", "Street Light Condition" → "Street"
        CitySource::NewYork => category
            .split(' ')
            .next()
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect(),
        CitySource::Auckland => truncate(category, 12),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// How [`top_counts`] orders labels with equal counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ties {
    FirstSeen,
    /// Ascending label, so postcodes tie in postcode order.
    ByLabel,
}

/// Count labels and keep the `limit` largest.
fn top_counts(labels: impl Iterator<Item = String>, limit: usize, ties: Ties) -> Vec<CategoryCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        let count = counts.entry(label.clone()).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }
    let mut ranked: Vec<CategoryCount> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            CategoryCount { name, count }
        })
        .collect();
    match ties {
        // stable sort keeps first-seen order among equal counts
        Ties::FirstSeen => ranked.sort_by(|a, b| b.count.cmp(&a.count)),
        Ties::ByLabel => {
            ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)))
        }
    }
    ranked.truncate(limit);
    ranked
}
