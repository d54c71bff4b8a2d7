use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

const COMPLAINT_TYPES: [&str; 8] = [
    "Noise - Residential",
    "Illegal Parking",
    "Street Condition",
    "Blocked Driveway",
    "Water System",
    "HEAT/HOT WATER",
    "Street Light Condition",
    "Sanitation Condition",
];
const NYC_STATUSES: [&str; 4] = ["Open", "In Progress", "Closed", "Closed"];
const ZIPS: [&str; 6] = ["10001", "10027", "10458", "11201", "11368", "10314"];
const STREETS: [&str; 5] = ["BROADWAY", "5 AVENUE", "FLATBUSH AVENUE", "GRAND CONCOURSE", "QUEENS BOULEVARD"];

const WORKSITE_TYPES: [&str; 4] = ["Excavation", "Footpath", "Road Resurfacing", "Minor"];
const AKL_STATUSES: [&str; 3] = ["Completed", "In Progress", "Planned"];
const AKL_STREETS: [&str; 4] = ["Queen Street", "Dominion Road", "Great North Road", "Karangahape Road"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Socrata-shaped NYC 311 rows, newest first.
fn nyc_rows(rng: &mut SimpleRng, n: usize) -> Value {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            let created = start - Duration::minutes(37 * i as i64);
            let mut row = json!({
                "unique_key": (60_000_000 + i).to_string(),
                "created_date": created.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
                "complaint_type": rng.pick(&COMPLAINT_TYPES),
                "descriptor": "Reported via 311",
                "status": rng.pick(&NYC_STATUSES),
                "incident_zip": rng.pick(&ZIPS),
                "incident_address": format!("{} {}", 1 + rng.next_u64() % 900, rng.pick(&STREETS)),
                "agency": "NYPD",
            });
            // About one row in ten has no coordinates, as in the live feed.
            if rng.next_f64() > 0.1 {
                row["latitude"] = json!(format!("{:.6}", rng.uniform(40.55, 40.90)));
                row["longitude"] = json!(format!("{:.6}", rng.uniform(-74.20, -73.72)));
            }
            row
        })
        .collect();
    Value::Array(rows)
}

/// ArcGIS FeatureServer-shaped Auckland roadworks response.
fn auckland_features(rng: &mut SimpleRng, n: usize) -> Value {
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let features: Vec<Value> = (0..n)
        .map(|i| {
            let worksite = rng.pick(&WORKSITE_TYPES);
            let street = rng.pick(&AKL_STREETS);
            json!({
                "attributes": {
                    "OBJECTID": i + 1,
                    "WorksiteType": worksite,
                    "WorksiteName": format!("{street} {worksite}"),
                    "Status": rng.pick(&AKL_STATUSES),
                    "LocationDescription": format!("{street}, Auckland"),
                    "StartDate": (start + Duration::days(i as i64)).timestamp_millis(),
                },
                "geometry": {
                    "x": rng.uniform(174.70, 174.82),
                    "y": rng.uniform(-36.92, -36.84),
                }
            })
        })
        .collect();
    json!({ "features": features })
}

fn write_spending_csv(rng: &mut SimpleRng, path: &str, periods: usize) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "spending", "incidents"])?;
    let first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    for i in 0..periods {
        let date = first + Duration::days(14 * i as i64);
        let mut spending = 140_000.0 + rng.uniform(-25_000.0, 25_000.0);
        // One deliberate overspend for the detector to find.
        if i == periods / 2 {
            spending += 120_000.0;
        }
        let incidents = 2 + rng.next_u64() % 7;
        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            format!("{spending:.0}"),
            incidents.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let nyc = nyc_rows(&mut rng, 800);
    std::fs::write("sample_311.json", serde_json::to_string_pretty(&nyc)?)?;
    println!("Wrote 800 service requests to sample_311.json");

    let akl = auckland_features(&mut rng, 200);
    std::fs::write("sample_roadworks.json", serde_json::to_string_pretty(&akl)?)?;
    println!("Wrote 200 roadworks to sample_roadworks.json");

    write_spending_csv(&mut rng, "sample_spending.csv", 20)?;
    println!("Wrote 20 spending periods to sample_spending.csv");
    Ok(())
}
