//! Color assignments for categories and dispositions

use egui::Color32;
use dv_core::{Category, Disposition};

/// Fill color of a category layer
pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::AbuseOfAuthority => Color32::from_rgb(0x6c, 0x8a, 0xe4),
        Category::Force => Color32::from_rgb(0xe8, 0x70, 0x59),
        Category::Discourtesy => Color32::from_rgb(0xf2, 0xb4, 0x3d),
        Category::OffensiveLanguage => Color32::from_rgb(0x9b, 0x7b, 0xd7),
        Category::Unknown => Color32::from_gray(140),
    }
}

/// Bar color for a disposition. The three main outcomes have fixed colors;
/// the rest take palette entries by rank.
pub fn disposition_color(label: &str, rank: usize) -> Color32 {
    match label {
        Disposition::SUBSTANTIATED => Color32::from_rgb(0x2e, 0x8b, 0x57),
        "Exonerated" => Color32::from_rgb(0x8a, 0x2b, 0xe2),
        "Unsubstantiated" => Color32::from_rgb(0xff, 0x8c, 0x00),
        _ => categorical_color(rank),
    }
}

/// Get a categorical color from a palette
fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(31, 119, 180),   // Blue
        Color32::from_rgb(214, 39, 40),    // Red
        Color32::from_rgb(140, 86, 75),    // Brown
        Color32::from_rgb(227, 119, 194),  // Pink
        Color32::from_rgb(127, 127, 127),  // Gray
        Color32::from_rgb(188, 189, 34),   // Olive
        Color32::from_rgb(23, 190, 207),   // Cyan
        Color32::from_rgb(148, 103, 189),  // Purple
    ];
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_disposition_colors() {
        assert_eq!(disposition_color("Substantiated", 5), Color32::from_rgb(46, 139, 87));
        assert_eq!(disposition_color("Exonerated", 0), disposition_color("Exonerated", 9));
        assert_ne!(disposition_color("Unfounded", 0), disposition_color("Unfounded", 1));
    }

    #[test]
    fn test_category_colors_are_distinct() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_ne!(category_color(*a), category_color(*b));
            }
        }
    }
}
