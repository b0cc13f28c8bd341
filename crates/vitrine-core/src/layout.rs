//! Content-adaptive sizing so any row count fits the fixed canvas.
//!
//! Brazilian plan pricing is quoted over the ten ANS age bands, so a price
//! table tops out at ten rows. The breakpoint table is sized so that the
//! densest supported scene (ten rows plus header, badges, call-to-action and
//! footer) stays inside the canvas for both aspect variants; that bound is
//! empirical, pinned by tests, not derived analytically.

use serde::{Deserialize, Serialize};

/// Canvas proportions of the two supported creative formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectVariant {
    /// Tall 9:16 story format.
    Story,
    /// Near-square 4:5 feed format.
    Feed,
}

impl AspectVariant {
    /// Layout-unit canvas the composer and SVG emitter work in.
    pub fn canvas_size(self) -> (f64, f64) {
        match self {
            AspectVariant::Story => (540.0, 960.0),
            AspectVariant::Feed => (540.0, 675.0),
        }
    }

    /// True pixel dimensions of an export capture.
    pub fn export_size(self) -> (u32, u32) {
        match self {
            AspectVariant::Story => (1080, 1920),
            AspectVariant::Feed => (1080, 1350),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub font_size: f64,
    pub row_padding: f64,
    pub header_font_size: f64,
    pub header_padding: f64,
}

const fn cell(
    font_size: f64,
    row_padding: f64,
    header_font_size: f64,
    header_padding: f64,
) -> LayoutMetrics {
    LayoutMetrics {
        font_size,
        row_padding,
        header_font_size,
        header_padding,
    }
}

// Cells are ordered densest-content first: more than 8 rows, more than 6,
// up to 6. Sizes within a column are monotone non-increasing as row count
// grows; tests pin that contract.
const STORY_CELLS: [LayoutMetrics; 3] = [
    cell(18.0, 6.0, 26.0, 14.0),
    cell(21.0, 8.0, 30.0, 18.0),
    cell(24.0, 10.0, 34.0, 22.0),
];

const FEED_CELLS: [LayoutMetrics; 3] = [
    cell(15.0, 4.0, 22.0, 10.0),
    cell(17.0, 6.0, 25.0, 13.0),
    cell(20.0, 8.0, 28.0, 16.0),
];

/// Looks up the size/padding tuple for a given content volume.
///
/// Discrete breakpoints, no interpolation. Counts above the highest
/// breakpoint reuse the smallest cell, so oversized content degrades
/// gracefully instead of failing.
pub fn compute_metrics(item_count: usize, aspect: AspectVariant) -> LayoutMetrics {
    let cells = match aspect {
        AspectVariant::Story => &STORY_CELLS,
        AspectVariant::Feed => &FEED_CELLS,
    };
    if item_count > 8 {
        cells[0]
    } else if item_count > 6 {
        cells[1]
    } else {
        cells[2]
    }
}
