use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
// Color mapping: hover label → Color32
// ---------------------------------------------------------------------------

/// Assigns one colour per chart series, keyed by hover label.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map; hues follow the order of `labels`.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, color)| (label.to_string(), color))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a series.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn colours_are_stable_per_label_order() {
        let a = ColorMap::new(["x", "y", "z"]);
        let b = ColorMap::new(["x", "y", "z"]);
        for label in ["x", "y", "z"] {
            assert_eq!(a.color_for(label), b.color_for(label));
        }
        assert_ne!(a.color_for("x"), a.color_for("y"));
        assert_eq!(a.color_for("unknown"), Color32::LIGHT_BLUE);
    }
}
