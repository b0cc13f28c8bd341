#![forbid(unsafe_code)]

//! Catalog model + resolvers for the vitrine creative engine (headless).
//!
//! Design goals:
//! - configuration is injected, read-only data — no ambient globals
//! - content resolution degrades gracefully, it never fails
//! - deterministic outputs (insertion-order dictionaries, fixed breakpoint
//!   tables) so scenes are reproducible and snapshot-testable
//! - runtime-agnostic async seams for the external collaborators

pub mod assets;
pub mod catalog;
pub mod color;
pub mod error;
pub mod history;
pub mod layout;
pub mod network;
pub mod services;
pub mod session;

pub use assets::{AssetDictionary, AssetEntry, ResolvedFacility, normalize_name};
pub use catalog::{Catalog, MessageAngle, Operator, Region};
pub use color::ensure_readable;
pub use error::{Error, Result};
pub use history::{GeneratedImage, RefinementHistory};
pub use layout::{AspectVariant, LayoutMetrics, compute_metrics};
pub use network::{ResolvedNetwork, resolve_network};
pub use session::{
    Accommodation, CopyOverrides, Coverage, PlanDetails, PriceTier, RequestGen, SceneSelections,
    SessionState, TemplateVariant,
};

/// Everything the composer needs, resolved from one set of selections.
///
/// Recomputed (not mutated) whenever the operator or region changes.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub operator: Operator,
    pub region: Option<Region>,
    pub angle: MessageAngle,
    pub network: ResolvedNetwork,
    pub facilities: Vec<ResolvedFacility>,
    pub labs: Vec<ResolvedFacility>,
    pub metrics: LayoutMetrics,
}

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            catalog: catalog::builtin(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn operator(&self, id: &str) -> Result<&Operator> {
        self.catalog
            .operator(id)
            .ok_or_else(|| Error::UnknownOperator { id: id.to_string() })
    }

    pub fn region(&self, id: &str) -> Result<&Region> {
        self.catalog
            .region(id)
            .ok_or_else(|| Error::UnknownRegion { id: id.to_string() })
    }

    pub fn angle(&self, id: &str) -> Result<&MessageAngle> {
        self.catalog
            .angle(id)
            .ok_or_else(|| Error::UnknownAngle { id: id.to_string() })
    }

    /// Resolves the facility/lab lists for the current selections.
    ///
    /// A facility override from the pricing lookup replaces the catalog
    /// resolution entirely; labs still come from the region.
    pub fn resolve_network(&self, selections: &SceneSelections) -> Result<ResolvedNetwork> {
        let operator = self.operator(&selections.operator)?;
        let region = match selections.region.as_deref() {
            Some(id) => Some(self.region(id)?),
            None => None,
        };

        let mut network = network::resolve_network(operator, region);
        if let Some(override_list) = selections.plan.facility_override.as_ref() {
            if !override_list.is_empty() {
                network.facilities = override_list.clone();
            }
        }
        Ok(network)
    }

    /// Resolves selections into the composer's input: network lists matched
    /// against the asset dictionary (deduplicated), layout metrics for the
    /// price-row count, and the catalog objects backing the scene.
    pub fn scene_context(&self, selections: &SceneSelections) -> Result<SceneContext> {
        let operator = self.operator(&selections.operator)?.clone();
        let region = match selections.region.as_deref() {
            Some(id) => Some(self.region(id)?.clone()),
            None => None,
        };
        let angle = self.angle(&selections.angle)?.clone();

        let network = self.resolve_network(selections)?;
        let facilities = self.catalog.assets.resolve_facilities(&network.facilities);
        let labs = self.catalog.assets.resolve_facilities(&network.labs);
        let metrics = compute_metrics(selections.price_tiers.len(), selections.aspect);

        Ok(SceneContext {
            operator,
            region,
            angle,
            network,
            facilities,
            labs,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests;
