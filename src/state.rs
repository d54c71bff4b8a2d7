use std::sync::mpsc::{Receiver, TryRecvError};

use crate::analytics::aggregate::weighted_score;
use crate::analytics::anomaly::{detect_anomalies, AnomalyFlag};
use crate::analytics::forecast::{project, ForecastPoint};
use crate::analytics::stability::{compute_stability, stability_band, SimulationInputs, StabilityBand};
use crate::config::Settings;
use crate::data::adapter::adapter_for;
use crate::data::fetch::{spawn_fetch, FetchOutcome};
use crate::data::model::{Alert, CitySource, CivicRecord, ProcurementAnomaly, SpendingPoint};
use crate::data::sample;
use crate::data::summary::{self, CitySummary};

/// First year of the simulation outlook.
pub const FORECAST_START_YEAR: i32 = 2026;
/// Years projected after the start year.
pub const FORECAST_HORIZON: u32 = 10;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// City picked in the top bar (None until the user picks one).
    pub city: Option<CitySource>,

    /// Records of the current city, as adapted from the feed or a file.
    pub records: Vec<CivicRecord>,

    /// Headline numbers derived from `records`.
    pub summary: Option<CitySummary>,

    /// Series analysed by the aggregator and the anomaly detector.
    pub spending: Vec<SpendingPoint>,

    /// Procurement lines flagged for review.
    pub procurement: Vec<ProcurementAnomaly>,

    /// Anomaly sensitivity in standard deviations.
    pub anomaly_threshold: f64,

    /// Simulation slider positions.
    pub simulation: SimulationInputs,

    /// Whether exported reports carry the methodology section.
    pub include_methodology: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a fetch is in flight.
    pub loading: bool,

    pending_fetch: Option<Receiver<FetchOutcome>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            anomaly_threshold: settings.anomaly_threshold,
            simulation: settings.simulation,
            settings,
            city: None,
            records: Vec::new(),
            summary: None,
            spending: sample::spending_series(),
            procurement: sample::procurement_anomalies(),
            include_methodology: true,
            status_message: None,
            loading: false,
            pending_fetch: None,
        }
    }

    /// Switch city and start fetching its feed in the background.
    pub fn select_city(&mut self, source: CitySource) {
        if self.city == Some(source) && (self.loading || self.summary.is_some()) {
            return;
        }
        self.city = Some(source);
        self.records.clear();
        self.summary = None;
        self.status_message = None;
        self.loading = true;
        // Replacing the receiver drops any fetch still running for the old city.
        self.pending_fetch = Some(spawn_fetch(source, self.settings.clone()));
    }

    /// Pick up a finished fetch, if any. Returns true when state changed.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(rx) = &self.pending_fetch else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                self.pending_fetch = None;
                self.loading = false;
                return true;
            }
        };
        self.pending_fetch = None;
        self.apply_fetch(outcome);
        true
    }

    fn apply_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(source, records) if Some(source) == self.city => {
                self.set_records(source, records);
            }
            FetchOutcome::Failed(source, message) if Some(source) == self.city => {
                self.loading = false;
                self.status_message = Some(format!(
                    "No data available for {}: {message}",
                    source.city()
                ));
            }
            // Stale result for a city the user already left.
            _ => {}
        }
    }

    /// Ingest records for a city and rebuild the summary.
    pub fn set_records(&mut self, source: CitySource, records: Vec<CivicRecord>) {
        let adapter = adapter_for(source);
        let summary = CitySummary::from_records(adapter.as_ref(), &records);
        log::info!(
            "{}: {} records, {} pending, stability {}",
            source.city(),
            summary.total,
            summary.pending,
            summary.stability_val
        );
        self.city = Some(source);
        self.records = records;
        self.summary = Some(summary);
        self.status_message = None;
        self.loading = false;
        self.pending_fetch = None;
    }

    /// Alerts for the first `n` open records of the current feed.
    pub fn open_alerts(&self, n: usize) -> Vec<Alert> {
        match self.city {
            Some(source) => summary::open_alerts(adapter_for(source).as_ref(), &self.records, n),
            None => Vec::new(),
        }
    }

    /// Replace the spending series analysed by the core.
    pub fn set_spending(&mut self, series: Vec<SpendingPoint>) {
        self.spending = series;
        self.status_message = None;
    }

    pub fn spending_values(&self) -> Vec<f64> {
        self.spending.iter().map(|p| p.spending).collect()
    }

    /// Spending weighted by incident counts.
    pub fn spending_score(&self) -> f64 {
        let incidents: Vec<f64> = self.spending.iter().map(|p| p.incidents).collect();
        weighted_score(&self.spending_values(), Some(&incidents))
    }

    pub fn spending_anomalies(&self) -> Vec<AnomalyFlag> {
        detect_anomalies(&self.spending_values(), Some(self.anomaly_threshold))
    }

    /// Composite score of the current simulation sliders.
    pub fn stability(&self) -> f64 {
        compute_stability(&self.simulation)
    }

    pub fn stability_band(&self) -> StabilityBand {
        stability_band(self.stability())
    }

    pub fn forecast(&self) -> Vec<ForecastPoint> {
        project(self.stability(), FORECAST_START_YEAR, FORECAST_HORIZON)
    }

    /// Reset the simulation sliders to their configured starting values.
    pub fn reset_simulation(&mut self) {
        self.simulation = self.settings.simulation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::approx_eq;
    use crate::data::model::RecordStatus;
    use std::sync::mpsc;

    fn record(id: &str, status: RecordStatus) -> CivicRecord {
        CivicRecord {
            id: id.to_string(),
            category: "Noise".to_string(),
            location: "Broadway".to_string(),
            site: None,
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
    fn test_defaults_use_sample_series() {
        let state = AppState::default();
        assert_eq!(state.spending.len(), 7);
        assert!(approx_eq(state.stability(), 50.0));
        assert_eq!(state.stability_band(), StabilityBand::Fragile);
        assert_eq!(state.forecast().len(), 11);
    }

    #[test]
    fn test_spending_score_weights_by_incidents() {
        let state = AppState::default();
        let expected = (120000.0 * 5.0
            + 150000.0 * 3.0
            + 110000.0 * 8.0
            + 180000.0 * 6.0
            + 140000.0 * 4.0
            + 130000.0 * 7.0
            + 160000.0 * 2.0)
            / 35.0;
        assert!(approx_eq(state.spending_score(), expected));
    }

    #[test]
    fn test_threshold_drives_anomalies() {
        let mut state = AppState::default();
        state.set_spending(
            [10.0, 10.0, 10.0, 10.0, 100.0]
                .iter()
                .map(|&v| SpendingPoint {
                    date: String::new(),
                    spending: v,
                    incidents: 1.0,
                })
                .collect(),
        );
        assert!(state.spending_anomalies().is_empty());
        state.anomaly_threshold = 1.5;
        assert_eq!(state.spending_anomalies().len(), 1);
    }

    #[test]
    fn test_set_records_builds_summary() {
        let mut state = AppState::default();
        state.loading = true;
        state.set_records(
            CitySource::NewYork,
            vec![record("1", RecordStatus::Open), record("2", RecordStatus::Completed)],
        );
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.pending, 1);
        assert!(!state.loading);
        assert_eq!(state.city, Some(CitySource::NewYork));
    }

    #[test]
    fn test_open_alerts_cover_records_past_the_alert_table() {
        let mut state = AppState::default();
        assert!(state.open_alerts(10).is_empty());

        let mut records: Vec<CivicRecord> = (0..50)
            .map(|i| record(&i.to_string(), RecordStatus::Other("Closed".into())))
            .collect();
        records.extend((50..62).map(|i| record(&i.to_string(), RecordStatus::Open)));
        state.set_records(CitySource::NewYork, records);

        let open = state.open_alerts(10);
        assert_eq!(open.len(), 10);
        assert_eq!(open[0].id, "50");
        assert_eq!(open[9].id, "59");
    }

    #[test]
    fn test_failed_fetch_sets_status() {
        let mut state = AppState::default();
        state.city = Some(CitySource::Auckland);
        state.loading = true;
        let (tx, rx) = mpsc::channel();
        state.pending_fetch = Some(rx);
        assert!(!state.poll_fetch());

        tx.send(FetchOutcome::Failed(CitySource::Auckland, "timed out".into()))
            .unwrap();
        assert!(state.poll_fetch());
        assert!(!state.loading);
        assert!(state.status_message.as_deref().unwrap().contains("No data available"));
        assert!(state.summary.is_none());
    }

    #[test]
    fn test_stale_fetch_is_ignored() {
        let mut state = AppState::default();
        state.city = Some(CitySource::Auckland);
        let (tx, rx) = mpsc::channel();
        state.pending_fetch = Some(rx);
        tx.send(FetchOutcome::Loaded(
            CitySource::NewYork,
            vec![record("1", RecordStatus::Open)],
        ))
        .unwrap();
        assert!(state.poll_fetch());
        assert!(state.summary.is_none());
        assert!(state.records.is_empty());
    }

    #[test]
    fn test_reset_simulation() {
        let mut state = AppState::default();
        state.simulation.infrastructure = 95.0;
        state.reset_simulation();
        assert_eq!(state.simulation, SimulationInputs::default());
    }
}
