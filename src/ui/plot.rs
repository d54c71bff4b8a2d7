use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::analytics::forecast::ForecastPoint;
use crate::color::{generate_palette, ANOMALY_COLOR};
use crate::data::model::{CategoryCount, MapRisk};
use crate::data::sample;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spending series with anomalies
// ---------------------------------------------------------------------------

/// Spending per period, anomalous periods marked.
pub fn spending_plot(ui: &mut Ui, state: &AppState) {
    let values = state.spending_values();
    let anomalies = state.spending_anomalies();

    let line_points: PlotPoints = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();
    let anomaly_points: PlotPoints = anomalies
        .iter()
        .map(|flag| [flag.index as f64, flag.value])
        .collect();

    Plot::new("spending_plot")
        .legend(Legend::default())
        .height(220.0)
        .x_axis_label("Period")
        .y_axis_label("Spending")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(line_points)
                    .name("Spending")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(anomaly_points)
                    .name("Anomaly")
                    .color(ANOMALY_COLOR)
                    .radius(5.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Simulation outlook
// ---------------------------------------------------------------------------

/// Baseline vs simulated stability with the uncertainty band.
pub fn forecast_plot(ui: &mut Ui, state: &AppState) {
    let forecast = state.forecast();
    let series = |f: fn(&ForecastPoint) -> f64| -> Vec<[f64; 2]> {
        forecast.iter().map(|p| [p.year as f64, f(p)]).collect()
    };

    Plot::new("forecast_plot")
        .legend(Legend::default())
        .height(220.0)
        .x_axis_label("Year")
        .y_axis_label("Stability")
        .include_y(0.0)
        .include_y(100.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(series(|p| p.baseline)).name("Baseline").color(Color32::GRAY));
            plot_ui.line(
                Line::new(series(|p| p.simulated))
                    .name("Simulated")
                    .color(Color32::from_rgb(0x3b, 0x82, 0xf6))
                    .width(2.0),
            );
            plot_ui.line(Line::new(series(|p| p.upper)).name("Upper").color(Color32::DARK_GRAY));
            plot_ui.line(Line::new(series(|p| p.lower)).name("Lower").color(Color32::DARK_GRAY));
        });
}

/// Historic stability readings.
pub fn trend_plot(ui: &mut Ui) {
    let points: PlotPoints = sample::stability_trend()
        .iter()
        .enumerate()
        .map(|(i, (_, v))| [i as f64, *v])
        .collect();

    Plot::new("trend_plot")
        .height(160.0)
        .include_y(0.0)
        .include_y(100.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Stability index").width(1.5));
        });
}

/// Complaint volume per fortnight.
pub fn complaint_plot(ui: &mut Ui) {
    let points: PlotPoints = sample::complaint_trend()
        .iter()
        .enumerate()
        .map(|(i, (_, v))| [i as f64, *v])
        .collect();

    Plot::new("complaint_plot")
        .height(160.0)
        .include_y(0.0)
        .x_axis_label("Period")
        .y_axis_label("Complaints")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Complaints")
                    .color(Color32::from_rgb(0x3b, 0x82, 0xf6))
                    .width(1.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Category / hotspot breakdowns
// ---------------------------------------------------------------------------

/// Bar chart of labelled counts, one distinct colour per bar.
pub fn count_chart(ui: &mut Ui, id: &str, counts: &[CategoryCount]) {
    if counts.is_empty() {
        ui.label("No city data loaded.");
        return;
    }

    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (cat, color))| {
            Bar::new(i as f64, cat.count as f64)
                .name(&cat.name)
                .fill(color)
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(220.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Records").width(0.7));
        });
}

// ---------------------------------------------------------------------------
// Risk map
// ---------------------------------------------------------------------------

/// Geolocated records, pending ones highlighted.
pub fn risk_map(ui: &mut Ui, risks: &[MapRisk]) {
    if risks.is_empty() {
        ui.label("No geolocated records.");
        return;
    }
    let (pending, resolved): (Vec<&MapRisk>, Vec<&MapRisk>) =
        risks.iter().partition(|r| r.score >= 100.0);
    let to_points = |rs: &[&MapRisk]| -> Vec<[f64; 2]> { rs.iter().map(|r| [r.lng, r.lat]).collect() };

    Plot::new("risk_map")
        .legend(Legend::default())
        .height(260.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(to_points(resolved.as_slice()))
                    .name("Resolved")
                    .color(Color32::from_rgb(0x14, 0xb8, 0xa6))
                    .radius(2.0),
            );
            plot_ui.points(
                Points::new(to_points(pending.as_slice()))
                    .name("Pending")
                    .color(ANOMALY_COLOR)
                    .radius(3.0),
            );
        });
}
