//! To maintain a theme of colors, I will add colors here as constants so
//! the UI does not look bad at any point.
//!
//! - TABULA_GREEN: Main Color
//! - TABULA_AMBER: Errors

use colored::Color;

pub(crate) const TABULA_GREEN: Color = Color::TrueColor {
    r: 46,
    g: 196,
    b: 140,
};

pub(crate) const TABULA_AMBER: Color = Color::TrueColor {
    r: 255,
    g: 176,
    b: 59,
};
