use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::analytics::stability::StabilityBand;
use crate::data::model::AlertLevel;

/// Marks anomalous spending periods and procurement scores.
pub const ANOMALY_COLOR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Semantic colours
// ---------------------------------------------------------------------------

pub fn alert_color(level: AlertLevel) -> Color32 {
    match level {
        AlertLevel::High => Color32::from_rgb(0xef, 0x44, 0x44),
        AlertLevel::Medium => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        AlertLevel::Low => Color32::from_rgb(0x10, 0xb9, 0x81),
    }
}

pub fn band_color(band: StabilityBand) -> Color32 {
    match band {
        StabilityBand::Critical => Color32::from_rgb(0xef, 0x44, 0x44),
        StabilityBand::Fragile => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        StabilityBand::Stable => Color32::from_rgb(0x3b, 0x82, 0xf6),
        StabilityBand::Resilient => Color32::from_rgb(0x10, 0xb9, 0x81),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(8);
        assert_eq!(colors.len(), 8);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
