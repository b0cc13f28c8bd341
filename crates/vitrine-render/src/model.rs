//! Typed scene description consumed by the SVG emitter.
//!
//! Blocks carry their own vertical geometry (assigned by the composer) so
//! the emitter never re-flows content. Everything serializes, which gives
//! the CLI an inspectable intermediate between selections and pixels.

use serde::{Deserialize, Serialize};
use vitrine_core::{AspectVariant, ResolvedFacility, TemplateVariant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub template: TemplateVariant,
    pub aspect: AspectVariant,
    pub width: f64,
    pub height: f64,
    /// Canvas fill: the operator's primary brand color.
    pub background: String,
    /// Contrast-guarded accent used for price and emphasis text.
    pub accent: String,
    pub blocks: Vec<VisualBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VisualBlock {
    Header(HeaderBlock),
    Headline(HeadlineBlock),
    PriceTable(PriceTableBlock),
    PriceCallout(PriceCalloutBlock),
    InfoBadges(InfoBadgesBlock),
    FacilityBadges(FacilityBadgesBlock),
    FacilityGrid(FacilityGridBlock),
    CallToAction(CallToActionBlock),
    Footer(FooterBlock),
}

impl VisualBlock {
    pub fn y(&self) -> f64 {
        match self {
            VisualBlock::Header(b) => b.y,
            VisualBlock::Headline(b) => b.y,
            VisualBlock::PriceTable(b) => b.y,
            VisualBlock::PriceCallout(b) => b.y,
            VisualBlock::InfoBadges(b) => b.y,
            VisualBlock::FacilityBadges(b) => b.y,
            VisualBlock::FacilityGrid(b) => b.y,
            VisualBlock::CallToAction(b) => b.y,
            VisualBlock::Footer(b) => b.y,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            VisualBlock::Header(b) => b.height,
            VisualBlock::Headline(b) => b.height,
            VisualBlock::PriceTable(b) => b.height,
            VisualBlock::PriceCallout(b) => b.height,
            VisualBlock::InfoBadges(b) => b.height,
            VisualBlock::FacilityBadges(b) => b.height,
            VisualBlock::FacilityGrid(b) => b.height,
            VisualBlock::CallToAction(b) => b.height,
            VisualBlock::Footer(b) => b.height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub y: f64,
    pub height: f64,
    pub operator_name: String,
    pub font_size: f64,
    /// Band fill: the operator's secondary brand color.
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineBlock {
    pub y: f64,
    pub height: f64,
    pub headline: String,
    pub subtext: Option<String>,
    pub badge: Option<String>,
    pub font_size: f64,
    pub badge_fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    pub age_band: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTableBlock {
    pub y: f64,
    pub height: f64,
    pub rows: Vec<PriceRow>,
    pub font_size: f64,
    pub row_padding: f64,
    /// Contrast-guarded fill for the amount column.
    pub amount_fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalloutBlock {
    pub y: f64,
    pub height: f64,
    pub age_band: String,
    pub amount: String,
    pub font_size: f64,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoBadgesBlock {
    pub y: f64,
    pub height: f64,
    pub badges: Vec<String>,
    pub font_size: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityBadgesBlock {
    pub y: f64,
    pub height: f64,
    pub facilities: Vec<ResolvedFacility>,
    pub font_size: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityGridBlock {
    pub y: f64,
    pub height: f64,
    pub facilities: Vec<ResolvedFacility>,
    pub labs: Vec<ResolvedFacility>,
    /// Side length of one grid cell.
    pub cell: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToActionBlock {
    pub y: f64,
    pub height: f64,
    pub text: String,
    pub font_size: f64,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBlock {
    pub y: f64,
    pub height: f64,
    pub broker_name: Option<String>,
    pub broker_phone: Option<String>,
    pub font_size: f64,
}
