use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CitySource – which municipal feed a record came from
// ---------------------------------------------------------------------------

/// The municipal feeds the dashboard knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CitySource {
    /// NYC 311 service requests (Socrata).
    NewYork,
    /// Auckland Transport roadworks (ArcGIS FeatureServer).
    Auckland,
}

impl CitySource {
    pub const ALL: [CitySource; 2] = [CitySource::NewYork, CitySource::Auckland];

    pub fn city(&self) -> &'static str {
        match self {
            CitySource::NewYork => "New York",
            CitySource::Auckland => "Auckland",
        }
    }

    pub fn country(&self) -> &'static str {
        match self {
            CitySource::NewYork => "United States",
            CitySource::Auckland => "New Zealand",
        }
    }

    /// Agency name used when a record carries none.
    pub fn default_agency(&self) -> &'static str {
        match self {
            CitySource::NewYork => "NYC Municipal",
            CitySource::Auckland => "Auckland Transport",
        }
    }
}

impl fmt::Display for CitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city(), self.country())
    }
}

// ---------------------------------------------------------------------------
// RecordStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum RecordStatus {
    Open,
    InProgress,
    Completed,
    /// Any other status string the feed reports, kept verbatim.
    Other(String),
}

impl RecordStatus {
    /// Map a feed status string onto the canonical variants.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Open" => RecordStatus::Open,
            "In Progress" => RecordStatus::InProgress,
            "Completed" => RecordStatus::Completed,
            other => RecordStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Open => write!(f, "Open"),
            RecordStatus::InProgress => write!(f, "In Progress"),
            RecordStatus::Completed => write!(f, "Completed"),
            RecordStatus::Other(s) if s.is_empty() => write!(f, "Active"),
            RecordStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CivicRecord – one row of either feed, after adaptation
// ---------------------------------------------------------------------------

/// Canonical record produced by every [`RecordAdapter`](super::adapter::RecordAdapter).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CivicRecord {
    pub id: String,
    /// Complaint type (NYC) or worksite type (Auckland).
    pub category: String,
    /// Human-readable place: street address, worksite name, …
    pub location: String,
    /// Street address (NYC) or worksite name (Auckland) exactly as the feed
    /// gave it, without fallbacks.
    pub site: Option<String>,
    pub status: RecordStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Postal code, when the feed has one.
    pub postcode: Option<String>,
    pub agency: String,
    pub description: String,
    /// Creation timestamp as reported, ISO-8601 text.
    pub created: Option<String>,
}

impl CivicRecord {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

// ---------------------------------------------------------------------------
// Derived presentation types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Low => write!(f, "low"),
            AlertLevel::Medium => write!(f, "medium"),
            AlertLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub level: AlertLevel,
    pub message: String,
    pub description: String,
    pub agency: String,
    pub status: RecordStatus,
    pub created: Option<String>,
}

/// A geolocated record weighted for the risk map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRisk {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub location: String,
    pub category: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// A procurement line flagged for review, scored 0–10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcurementAnomaly {
    pub id: u32,
    pub item: String,
    pub score: f64,
}

/// One period of the spending / incident series analysed by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPoint {
    pub date: String,
    pub spending: f64,
    pub incidents: f64,
}
