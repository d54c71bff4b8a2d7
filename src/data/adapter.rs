use serde_json::{Map, Value as JsonValue};

use super::error::{DataError, Result};
use super::model::{CitySource, CivicRecord, RecordStatus};

// ---------------------------------------------------------------------------
// Adapter interface
// ---------------------------------------------------------------------------

/// Maps one third-party payload shape onto [`CivicRecord`]s and owns the
/// feed-specific classification rules.
///
/// Everything downstream of an adapter works on canonical records only.
pub trait RecordAdapter: Send + Sync {
    fn source(&self) -> CitySource;

    /// Parse a raw feed payload.
    fn parse(&self, payload: &JsonValue) -> Result<Vec<CivicRecord>>;

    /// Whether the record still awaits resolution.
    fn is_pending(&self, record: &CivicRecord) -> bool;

    /// Whether the record counts against the integrity score.
    fn is_serious(&self, record: &CivicRecord) -> bool;

    /// Whether an alert raised from the record is high priority.
    fn is_high_priority(&self, record: &CivicRecord) -> bool;

    /// One-line headline for an alert raised from the record.
    fn alert_message(&self, record: &CivicRecord) -> String;

    /// Weight of the record on the risk map: 100 while it still needs
    /// attention, 40 otherwise.
    fn map_score(&self, record: &CivicRecord) -> f64 {
        if self.is_pending(record) {
            100.0
        } else {
            40.0
        }
    }
}

/// Adapter for the given feed.
pub fn adapter_for(source: CitySource) -> Box<dyn RecordAdapter> {
    match source {
        CitySource::NewYork => Box::new(SocrataAdapter),
        CitySource::Auckland => Box::new(ArcGisAdapter),
    }
}

/// Guess the feed from a payload's shape: a top-level array is Socrata,
/// an object carrying `features` is ArcGIS.
pub fn detect_source(payload: &JsonValue) -> Option<CitySource> {
    match payload {
        JsonValue::Array(_) => Some(CitySource::NewYork),
        JsonValue::Object(obj) if obj.contains_key("features") => Some(CitySource::Auckland),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Socrata (NYC 311)
// ---------------------------------------------------------------------------

/// Complaint types that weigh on the integrity score.
const NYC_SERIOUS: [&str; 4] = ["Street Condition", "Illegal Parking", "Noise", "Water System"];
/// Complaint types raised as high-priority alerts.
const NYC_HIGH_PRIORITY: [&str; 3] = ["Street Condition", "Illegal Parking", "Noise"];

/// Flat JSON rows from `data.cityofnewyork.us/resource/erm2-nwe9.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocrataAdapter;

impl RecordAdapter for SocrataAdapter {
    fn source(&self) -> CitySource {
        CitySource::NewYork
    }

    fn parse(&self, payload: &JsonValue) -> Result<Vec<CivicRecord>> {
        let rows = payload.as_array().ok_or_else(|| {
            DataError::UnexpectedShape("Socrata payload is not a JSON array".to_string())
        })?;

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let Some(obj) = row.as_object() else {
                log::warn!("Skipping Socrata row {i}: not a JSON object");
                continue;
            };
            let address = text(obj, "incident_address");
            records.push(CivicRecord {
                id: text(obj, "unique_key").unwrap_or_else(|| i.to_string()),
                category: text(obj, "complaint_type").unwrap_or_else(|| "Other".to_string()),
                location: address
                    .clone()
                    .or_else(|| text(obj, "street_name"))
                    .unwrap_or_else(|| "NYC".to_string()),
                site: address,
                status: RecordStatus::parse(&text(obj, "status").unwrap_or_default()),
                latitude: number(obj, "latitude"),
                longitude: number(obj, "longitude"),
                postcode: text(obj, "incident_zip"),
                agency: text(obj, "agency_name")
                    .or_else(|| text(obj, "agency"))
                    .unwrap_or_else(|| self.source().default_agency().to_string()),
                description: text(obj, "descriptor")
                    .unwrap_or_else(|| "No additional details available.".to_string()),
                created: text(obj, "created_date"),
            });
        }
        Ok(records)
    }

    fn is_pending(&self, record: &CivicRecord) -> bool {
        matches!(record.status, RecordStatus::Open | RecordStatus::InProgress)
    }

    fn is_serious(&self, record: &CivicRecord) -> bool {
        NYC_SERIOUS.contains(&record.category.as_str())
    }

    fn is_high_priority(&self, record: &CivicRecord) -> bool {
        NYC_HIGH_PRIORITY.contains(&record.category.as_str())
    }

    fn alert_message(&self, record: &CivicRecord) -> String {
        format!("{} at {}", record.category, record.site.as_deref().unwrap_or("NYC"))
    }

    // Only requests nobody has picked up yet score high.
    fn map_score(&self, record: &CivicRecord) -> f64 {
        if record.status == RecordStatus::Open {
            100.0
        } else {
            40.0
        }
    }
}

// ---------------------------------------------------------------------------
// ArcGIS FeatureServer (Auckland roadworks)
// ---------------------------------------------------------------------------

const AUCKLAND_SERIOUS: &str = "Excavation";

/// `{ "features": [{ "attributes": {..}, "geometry": { "x", "y" } }] }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcGisAdapter;

impl RecordAdapter for ArcGisAdapter {
    fn source(&self) -> CitySource {
        CitySource::Auckland
    }

    fn parse(&self, payload: &JsonValue) -> Result<Vec<CivicRecord>> {
        let obj = payload.as_object().ok_or_else(|| {
            DataError::UnexpectedShape("ArcGIS payload is not a JSON object".to_string())
        })?;
        let Some(features) = obj.get("features").and_then(|f| f.as_array()) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            let Some(attrs) = feature.get("attributes").and_then(|a| a.as_object()) else {
                log::warn!("Skipping ArcGIS feature {i}: no attributes");
                continue;
            };
            let geometry = feature.get("geometry").and_then(|g| g.as_object());
            let worksite = text(attrs, "WorksiteName");

            records.push(CivicRecord {
                id: text(attrs, "OBJECTID").unwrap_or_else(|| i.to_string()),
                category: text(attrs, "WorksiteType")
                    .unwrap_or_else(|| "Infrastructure".to_string()),
                location: worksite
                    .clone()
                    .or_else(|| text(attrs, "ProjectName"))
                    .unwrap_or_else(|| "Auckland Roadwork".to_string()),
                site: worksite,
                status: RecordStatus::parse(&text(attrs, "Status").unwrap_or_default()),
                latitude: geometry.and_then(|g| number(g, "y")),
                longitude: geometry.and_then(|g| number(g, "x")),
                postcode: None,
                agency: self.source().default_agency().to_string(),
                description: text(attrs, "ProjectDescription")
                    .or_else(|| text(attrs, "LocationDescription"))
                    .unwrap_or_else(|| "Regional infrastructure project.".to_string()),
                created: attrs
                    .get("StartDate")
                    .and_then(|v| v.as_i64())
                    .and_then(epoch_millis_to_iso),
            });
        }
        Ok(records)
    }

    fn is_pending(&self, record: &CivicRecord) -> bool {
        record.status != RecordStatus::Completed
    }

    fn is_serious(&self, record: &CivicRecord) -> bool {
        record.category == AUCKLAND_SERIOUS
    }

    fn is_high_priority(&self, record: &CivicRecord) -> bool {
        self.is_serious(record)
    }

    fn alert_message(&self, record: &CivicRecord) -> String {
        format!(
            "{}: {}",
            record.category,
            record.site.as_deref().unwrap_or("Infrastructure project")
        )
    }
}

// -- Field helpers --

/// Non-empty string or number field rendered as text.
fn text(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match obj.get(key)? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric field that may arrive as a JSON number or a numeric string.
fn number(obj: &Map<String, JsonValue>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn epoch_millis_to_iso(millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_socrata_fields_and_fallbacks() {
        let payload = json!([
            {
                "unique_key": "59001",
                "complaint_type": "Noise",
                "incident_address": "10 BROADWAY",
                "status": "Open",
                "latitude": "40.7050",
                "longitude": "-74.0130",
                "incident_zip": "10004",
                "agency": "NYPD",
                "created_date": "2026-03-01T10:15:00.000"
            },
            {
                "unique_key": "59002",
                "street_name": "WATER ST",
                "status": "Closed"
            }
        ]);
        let records = SocrataAdapter.parse(&payload).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.category, "Noise");
        assert_eq!(first.location, "10 BROADWAY");
        assert_eq!(first.coordinates(), Some((40.705, -74.013)));
        assert_eq!(first.postcode.as_deref(), Some("10004"));
        assert_eq!(first.agency, "NYPD");
        assert!(SocrataAdapter.is_pending(first));
        assert!(SocrataAdapter.is_serious(first));
        assert!(SocrataAdapter.is_high_priority(first));

        let second = &records[1];
        assert_eq!(second.category, "Other");
        assert_eq!(second.location, "WATER ST");
        assert_eq!(second.agency, "NYC Municipal");
        assert_eq!(second.coordinates(), None);
        assert!(!SocrataAdapter.is_pending(second));
    }

    #[test]
    fn test_socrata_alert_message_and_map_score() {
        let payload = json!([
            { "unique_key": "1", "complaint_type": "Noise", "incident_address": "10 BROADWAY",
              "status": "Open" },
            { "unique_key": "2", "complaint_type": "Noise", "street_name": "WATER ST",
              "status": "In Progress" }
        ]);
        let records = SocrataAdapter.parse(&payload).unwrap();
        assert_eq!(SocrataAdapter.alert_message(&records[0]), "Noise at 10 BROADWAY");
        // The street name is good enough for the map but not for the alert.
        assert_eq!(records[1].location, "WATER ST");
        assert_eq!(SocrataAdapter.alert_message(&records[1]), "Noise at NYC");

        assert_eq!(SocrataAdapter.map_score(&records[0]), 100.0);
        assert!(SocrataAdapter.is_pending(&records[1]));
        assert_eq!(SocrataAdapter.map_score(&records[1]), 40.0);
    }

    #[test]
    fn test_socrata_water_system_is_serious_but_not_high_priority() {
        let payload = json!([{ "unique_key": "1", "complaint_type": "Water System" }]);
        let records = SocrataAdapter.parse(&payload).unwrap();
        assert!(SocrataAdapter.is_serious(&records[0]));
        assert!(!SocrataAdapter.is_high_priority(&records[0]));
    }

    #[test]
    fn test_socrata_rejects_non_array() {
        let err = SocrataAdapter.parse(&json!({ "error": true })).unwrap_err();
        assert!(matches!(err, DataError::UnexpectedShape(_)));
    }

    #[test]
    fn test_arcgis_fields_and_fallbacks() {
        let payload = json!({
            "features": [
                {
                    "attributes": {
                        "OBJECTID": 17,
                        "WorksiteType": "Excavation",
                        "ProjectName": "Queen St upgrade",
                        "Status": "In Progress",
                        "LocationDescription": "Queen St between Wellesley and Victoria",
                        "StartDate": 1767225600000i64
                    },
                    "geometry": { "x": 174.7645, "y": -36.8485 }
                },
                {
                    "attributes": { "OBJECTID": 18, "Status": "Completed" },
                    "geometry": null
                }
            ]
        });
        let records = ArcGisAdapter.parse(&payload).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "17");
        assert_eq!(first.location, "Queen St upgrade");
        assert_eq!(first.coordinates(), Some((-36.8485, 174.7645)));
        assert_eq!(first.description, "Queen St between Wellesley and Victoria");
        assert_eq!(first.created.as_deref(), Some("2026-01-01T00:00:00.000Z"));
        assert_eq!(first.agency, "Auckland Transport");
        assert!(ArcGisAdapter.is_pending(first));
        assert!(ArcGisAdapter.is_high_priority(first));

        let second = &records[1];
        assert_eq!(second.category, "Infrastructure");
        assert_eq!(second.location, "Auckland Roadwork");
        assert!(!ArcGisAdapter.is_pending(second));
    }

    #[test]
    fn test_arcgis_alert_message_and_map_score() {
        let payload = json!({
            "features": [
                { "attributes": { "OBJECTID": 1, "WorksiteType": "Excavation",
                                  "WorksiteName": "Queen St", "Status": "In Progress" } },
                { "attributes": { "OBJECTID": 2, "WorksiteType": "Footpath",
                                  "ProjectName": "Ponsonby Rd", "Status": "Completed" } }
            ]
        });
        let records = ArcGisAdapter.parse(&payload).unwrap();
        assert_eq!(ArcGisAdapter.alert_message(&records[0]), "Excavation: Queen St");
        assert_eq!(
            ArcGisAdapter.alert_message(&records[1]),
            "Footpath: Infrastructure project"
        );
        assert_eq!(ArcGisAdapter.map_score(&records[0]), 100.0);
        assert_eq!(ArcGisAdapter.map_score(&records[1]), 40.0);
    }

    #[test]
    fn test_arcgis_missing_features_is_empty() {
        assert!(ArcGisAdapter.parse(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_detect_source() {
        assert_eq!(detect_source(&json!([])), Some(CitySource::NewYork));
        assert_eq!(detect_source(&json!({ "features": [] })), Some(CitySource::Auckland));
        assert_eq!(detect_source(&json!({ "rows": [] })), None);
        assert_eq!(adapter_for(CitySource::Auckland).source(), CitySource::Auckland);
    }
}
