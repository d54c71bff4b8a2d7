//! HTTP retrieval of the municipal feeds.
//!
//! Requests run on a worker thread; the UI polls a channel so a slow or
//! failing endpoint never blocks a frame.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value as JsonValue;

use super::adapter::adapter_for;
use super::error::{DataError, Result};
use super::model::{CitySource, CivicRecord};
use crate::config::Settings;

/// Result of a background fetch, as delivered to the UI.
#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(CitySource, Vec<CivicRecord>),
    Failed(CitySource, String),
}

/// Full query URL for a feed, limits and ordering included.
pub fn endpoint_url(source: CitySource, settings: &Settings) -> Result<Url> {
    let parsed = match source {
        CitySource::NewYork => Url::parse_with_params(
            &settings.nyc_endpoint,
            &[
                ("$limit", settings.nyc_limit.to_string()),
                ("$order", "created_date DESC".to_string()),
            ],
        ),
        CitySource::Auckland => Url::parse_with_params(
            &settings.auckland_endpoint,
            &[
                ("where", "1=1".to_string()),
                ("outFields", "*".to_string()),
                ("outSR", "4326".to_string()),
                ("f", "json".to_string()),
                ("resultRecordCount", settings.auckland_limit.to_string()),
            ],
        ),
    };
    parsed.map_err(|e| DataError::InvalidUrl(e.to_string()))
}

/// GET a JSON payload.
pub fn fetch_payload(url: Url, timeout: Duration) -> Result<JsonValue> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("civic-pulse/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

/// Fetch a feed and adapt it to canonical records.
pub fn fetch_city(source: CitySource, settings: &Settings) -> Result<Vec<CivicRecord>> {
    let url = endpoint_url(source, settings)?;
    log::info!("Fetching {} data from {url}", source.city());
    let payload = fetch_payload(url, Duration::from_secs(settings.request_timeout_secs))?;
    let records = adapter_for(source).parse(&payload)?;
    log::info!("Fetched {} {} records", records.len(), source.city());
    Ok(records)
}

/// Run [`fetch_city`] on a worker thread.
pub fn spawn_fetch(source: CitySource, settings: Settings) -> Receiver<FetchOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = match fetch_city(source, &settings) {
            Ok(records) => FetchOutcome::Loaded(source, records),
            Err(e) => {
                log::error!("{} data fetch failed: {e}", source.city());
                FetchOutcome::Failed(source, e.to_string())
            }
        };
        // The receiver is gone if the user switched city meanwhile.
        let _ = tx.send(outcome);
    });
    rx
}
