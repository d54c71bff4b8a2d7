use eframe::egui::{ProgressBar, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analytics::anomaly::z_scores;
use crate::color::{alert_color, ANOMALY_COLOR};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Score cards
// ---------------------------------------------------------------------------

fn score_card(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).small());
            ui.label(RichText::new(value).size(24.0).strong());
        });
    });
}

/// Headline numbers for the selected city and the spending series.
pub fn score_cards(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        match &state.summary {
            Some(summary) => {
                score_card(ui, "Stability index", format!("{:.0}", summary.stability_val));
                score_card(ui, "Integrity index", format!("{:.0}", summary.integrity_val));
                score_card(ui, "Resolution rate", format!("{:.0}%", summary.resolution_rate()));
                score_card(ui, "Pending", summary.pending.to_string());
            }
            None if state.loading => {
                ui.spinner();
            }
            None => {
                ui.label("Select a city to load live municipal data.");
            }
        }
        score_card(ui, "Weighted spending", format!("{:.0}", state.spending_score()));
    });
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Alerts raised from the current city's records.
pub fn alerts_table(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        return;
    };
    if summary.alerts.is_empty() {
        ui.label("No active alerts.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("alerts_table")
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::remainder().clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for title in ["Level", "Alert", "Agency", "Status"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for alert in &summary.alerts {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(
                            RichText::new(alert.level.to_string())
                                .color(alert_color(alert.level)),
                        );
                    });
                    row.col(|ui| {
                        let hover = match &alert.created {
                            Some(created) => format!("{}\nReported {created}", alert.description),
                            None => alert.description.clone(),
                        };
                        ui.label(alert.message.as_str()).on_hover_text(hover);
                    });
                    row.col(|ui| {
                        ui.label(alert.agency.as_str());
                    });
                    row.col(|ui| {
                        ui.label(alert.status.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Anomalies
// ---------------------------------------------------------------------------

/// Periods flagged by the detector, with their z-scores.
pub fn anomaly_list(ui: &mut Ui, state: &AppState) {
    let anomalies = state.spending_anomalies();
    if anomalies.is_empty() {
        ui.label(format!(
            "No periods beyond {:.1} σ.",
            state.anomaly_threshold
        ));
        return;
    }
    let z = z_scores(&state.spending_values());
    for flag in anomalies {
        let date = state
            .spending
            .get(flag.index)
            .map(|p| p.date.as_str())
            .unwrap_or("?");
        ui.label(format!(
            "{date}: {:.0} ({:+.2} σ)",
            flag.value, z[flag.index]
        ));
    }
}

/// Procurement lines flagged for review, scores drawn as bars out of 10.
pub fn procurement_table(ui: &mut Ui, state: &AppState) {
    if state.procurement.is_empty() {
        ui.label("No anomalies detected in the current procurement batch.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("procurement_table")
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::remainder())
        .column(Column::exact(160.0))
        .header(20.0, |mut header| {
            for title in ["Entity ID", "Asset class", "Anomaly score"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for anomaly in &state.procurement {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.monospace(anomaly.id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(anomaly.item.as_str());
                    });
                    row.col(|ui| {
                        ui.add(
                            ProgressBar::new((anomaly.score / 10.0).clamp(0.0, 1.0) as f32)
                                .fill(ANOMALY_COLOR)
                                .text(format!("{:.2}", anomaly.score)),
                        );
                    });
                });
            }
        });
}
