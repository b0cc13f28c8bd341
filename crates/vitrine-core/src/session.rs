//! Per-session editing state: the selections aggregate, the refinement
//! history, and request fencing for the async collaborators.

use serde::{Deserialize, Serialize};

use crate::history::{GeneratedImage, RefinementHistory};
use crate::layout::AspectVariant;
use crate::services::{AngleCopy, PriceQuote};

/// Which block composition a scene uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateVariant {
    /// Full price table with the headline below it.
    Table,
    /// Single large price callout for the first tier.
    PriceHighlight,
    /// Hospital/lab logo grid, no headline by design.
    FacilityGrid,
}

impl TemplateVariant {
    pub fn id(self) -> &'static str {
        match self {
            TemplateVariant::Table => "table",
            TemplateVariant::PriceHighlight => "price-highlight",
            TemplateVariant::FacilityGrid => "facility-grid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    /// Shared ward ("enfermaria").
    Ward,
    /// Private room ("apartamento").
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Regional,
    National,
}

/// One row of the price table. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    /// Age-band label, e.g. `"29-33"`.
    pub age_band: String,
    /// Formatted currency value, e.g. `"R$ 412,90"`.
    pub amount: String,
}

/// Plan metadata returned by the pricing lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDetails {
    pub name: Option<String>,
    pub coparticipation: Option<bool>,
    pub accommodation: Option<Accommodation>,
    pub coverage: Option<Coverage>,
    /// When set, replaces catalog-resolved facilities entirely.
    pub facility_override: Option<Vec<String>>,
}

/// Free-text overrides for angle copy; `None` falls back to the catalog
/// angle (or whatever the copy generator last produced).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyOverrides {
    pub headline: Option<String>,
    pub subtext: Option<String>,
    pub badge: Option<String>,
    pub cta: Option<String>,
}

/// Aggregate of every user choice in the editor.
///
/// One mutable instance per session, replaced wholesale on each edit; the
/// only write discipline is last-write-wins. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSelections {
    pub operator: String,
    pub region: Option<String>,
    pub angle: String,
    pub template: TemplateVariant,
    pub aspect: AspectVariant,
    pub price_tiers: Vec<PriceTier>,
    pub show_coparticipation: bool,
    pub show_accommodation: bool,
    pub show_coverage: bool,
    pub plan: PlanDetails,
    pub overrides: CopyOverrides,
    pub broker_name: Option<String>,
    pub broker_phone: Option<String>,
}

impl Default for SceneSelections {
    fn default() -> Self {
        Self {
            operator: "amil".to_string(),
            region: None,
            angle: "economia".to_string(),
            template: TemplateVariant::Table,
            aspect: AspectVariant::Feed,
            price_tiers: Vec::new(),
            show_coparticipation: false,
            show_accommodation: false,
            show_coverage: false,
            plan: PlanDetails::default(),
            overrides: CopyOverrides::default(),
            broker_name: None,
            broker_phone: None,
        }
    }
}

/// Monotonic request fencing for one async resource.
///
/// Every outgoing request takes a fresh generation from [`RequestGen::begin`];
/// a response only applies when [`RequestGen::settle`] confirms it is still
/// the newest. A slower earlier response arriving after a newer one settles
/// as stale and is dropped, so it can no longer overwrite fresh state.
#[derive(Debug, Default)]
pub struct RequestGen {
    issued: u64,
    in_flight: Option<u64>,
}

impl RequestGen {
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight = Some(self.issued);
        self.issued
    }

    /// The UI busy-flag: true while the newest request has not settled.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether `generation` is still the newest request. Clears the
    /// busy flag only when it is.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation == self.issued {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

/// Session state mutated only from the single UI thread.
///
/// Different resources fence independently, so a price lookup and a copy
/// generation may be in flight at the same time.
#[derive(Debug, Default)]
pub struct SessionState {
    pub selections: SceneSelections,
    pub history: RefinementHistory,
    pricing: RequestGen,
    copy: RequestGen,
    refinement: RequestGen,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_pricing(&mut self) -> u64 {
        self.pricing.begin()
    }

    pub fn begin_copy(&mut self) -> u64 {
        self.copy.begin()
    }

    pub fn begin_refinement(&mut self) -> u64 {
        self.refinement.begin()
    }

    pub fn pricing_busy(&self) -> bool {
        self.pricing.is_busy()
    }

    pub fn copy_busy(&self) -> bool {
        self.copy.is_busy()
    }

    pub fn refinement_busy(&self) -> bool {
        self.refinement.is_busy()
    }

    /// Applies a pricing response. Returns false (and leaves state alone)
    /// when a newer request superseded `generation`.
    pub fn apply_price_quote(&mut self, generation: u64, quote: PriceQuote) -> bool {
        if !self.pricing.settle(generation) {
            tracing::debug!(generation, "dropping stale price quote");
            return false;
        }
        self.selections.price_tiers = quote.tiers;
        self.selections.plan = quote.plan;
        true
    }

    /// Applies AI-generated angle copy as overrides.
    pub fn apply_copy(&mut self, generation: u64, copy: AngleCopy) -> bool {
        if !self.copy.settle(generation) {
            tracing::debug!(generation, "dropping stale angle copy");
            return false;
        }
        self.selections.overrides.headline = Some(copy.headline);
        self.selections.overrides.badge = Some(copy.badge);
        true
    }

    /// Appends a refined raster to the history.
    pub fn apply_refinement(&mut self, generation: u64, image: GeneratedImage) -> bool {
        if !self.refinement.settle(generation) {
            tracing::debug!(generation, "dropping stale refinement result");
            return false;
        }
        self.history.append(image);
        true
    }
}
