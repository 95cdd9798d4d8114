use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Dark slate used for the trend line.
pub const PRIMARY: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
/// Claimed amounts.
pub const CLAIMED: Color32 = Color32::from_rgb(0xd9, 0x77, 0x06);
/// Paid amounts, and "no injury".
pub const PAID: Color32 = Color32::from_rgb(0x05, 0x96, 0x69);
/// "Injury involved".
pub const DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.65, 0.45))
        })
        .collect()
}

/// Single-hue blue ramp: `t = 0` is pale, `t = 1` is deep.
pub fn blues(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    hsl_to_color32(Hsl::new(212.0, 0.75, 0.82 - 0.5 * t))
}

/// Colour for an injury flag label.
pub fn injury_color(label: &str) -> Color32 {
    match label {
        "No" => PAID,
        "Yes" => DANGER,
        _ => Color32::GRAY,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct labels of a categorical column to distinct colours, so an
/// insurer keeps its colour when filters change.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();
        CategoryColors { mapping }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}
