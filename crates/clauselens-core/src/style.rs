//! Highlight colors per clause label
//!
//! The mapping is configuration, not derived state: labels are matched
//! case-insensitively and anything not listed falls back to yellow.

/// RGB triple in the PDF 0..1 color space
pub type Rgb = [f32; 3];

/// Fallback color for labels without a configured entry (yellow)
pub const DEFAULT_COLOR: Rgb = [1.0, 1.0, 0.0];

const LABEL_COLORS: &[(&str, Rgb)] = &[
    ("termination", [1.0, 1.0, 0.0]),
    ("confidentiality", [1.0, 0.8, 0.5]),
    ("dispute_resolution", [0.8, 1.0, 1.0]),
    ("jurisdiction", [0.9, 0.9, 1.0]),
];

/// Look up the highlight color for a label.
pub fn color_for(label: &str) -> Rgb {
    let label = label.to_lowercase();
    LABEL_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_labels_use_configured_colors() {
        assert_eq!(color_for("termination"), [1.0, 1.0, 0.0]);
        assert_eq!(color_for("confidentiality"), [1.0, 0.8, 0.5]);
        assert_eq!(color_for("dispute_resolution"), [0.8, 1.0, 1.0]);
        assert_eq!(color_for("jurisdiction"), [0.9, 0.9, 1.0]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(color_for("TERMINATION"), [1.0, 1.0, 0.0]);
        assert_eq!(color_for("Jurisdiction"), [0.9, 0.9, 1.0]);
    }

    #[test]
    fn test_unknown_label_falls_back_to_yellow() {
        assert_eq!(color_for("indemnification"), DEFAULT_COLOR);
        assert_eq!(color_for("other"), [1.0, 1.0, 0.0]);
        assert_eq!(color_for(""), [1.0, 1.0, 0.0]);
    }
}
