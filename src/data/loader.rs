use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::adapter::{adapter_for, detect_source};
use super::error::DataError;
use super::model::{CitySource, CivicRecord, SpendingPoint};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// What a local file turned out to contain.
#[derive(Debug, Clone)]
pub enum LoadedData {
    /// A saved feed payload, adapted to canonical records.
    Records(CitySource, Vec<CivicRecord>),
    /// A spending / incident series for the analytics view.
    Spending(Vec<SpendingPoint>),
}

/// Load municipal data from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – a saved Socrata array or ArcGIS `{ "features": [...] }` response
/// * `.csv`  – columns `date`, `spending`, `incidents`
pub fn load_file(path: &Path) -> Result<LoadedData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path).map(LoadedData::Spending),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<LoadedData> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let source = detect_source(&root)
        .context("Expected a Socrata array or an ArcGIS object with 'features'")?;
    let records = adapter_for(source)
        .parse(&root)
        .with_context(|| format!("adapting {} payload", source.city()))?;

    Ok(LoadedData::Records(source, records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row `date,spending,incidents`, one period per row.
fn load_csv(path: &Path) -> Result<Vec<SpendingPoint>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut series = Vec::new();
    for (row_no, result) in reader.deserialize::<SpendingPoint>().enumerate() {
        let point = result.with_context(|| format!("CSV row {row_no}"))?;
        series.push(point);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_socrata_json() {
        let file = write_temp(
            ".json",
            r#"[{"unique_key":"1","complaint_type":"Noise","status":"Open"}]"#,
        );
        match load_file(file.path()).unwrap() {
            LoadedData::Records(source, records) => {
                assert_eq!(source, CitySource::NewYork);
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].category, "Noise");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_load_arcgis_json() {
        let file = write_temp(
            ".JSON",
            r#"{"features":[{"attributes":{"OBJECTID":3,"Status":"Completed"},"geometry":{"x":174.7,"y":-36.8}}]}"#,
        );
        let LoadedData::Records(source, records) = load_file(file.path()).unwrap() else {
            panic!("expected records");
        };
        assert_eq!(source, CitySource::Auckland);
        assert_eq!(records[0].id, "3");
    }

    #[test]
    fn test_load_spending_csv() {
        let file = write_temp(
            ".csv",
            "date,spending,incidents\n2026-01-01,110000,8\n2026-01-15,180000.5,6\n",
        );
        let LoadedData::Spending(series) = load_file(file.path()).unwrap() else {
            panic!("expected spending");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].spending, 180000.5);
        assert_eq!(series[0].incidents, 8.0);
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        let file = write_temp(".json", r#"{"rows":[]}"#);
        assert!(load_file(file.path()).is_err());

        let file = write_temp(".parquet", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".parquet"));

        let file = write_temp(".csv", "date,spending,incidents\n2026-01-01,lots,2\n");
        assert!(load_file(file.path()).is_err());
    }
}
