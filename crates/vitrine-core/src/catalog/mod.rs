//! Read-only configuration: operators, regions, message angles and the
//! asset dictionary. Injected into the engine, never ambient.

mod builtin;

pub use builtin::builtin;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::assets::AssetDictionary;
use crate::error::{Error, Result};

/// A health-plan provider with its own brand colors and hospital/lab network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    #[serde(default)]
    pub default_facilities: Vec<String>,
    /// Region id → facility list. Insertion order preserved for stable
    /// serialization; lookups are by key.
    #[serde(default)]
    pub regional_facilities: IndexMap<String, Vec<String>>,
}

/// A geographic grouping of neighborhoods with a default facility network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub labs: Vec<String>,
}

/// A persuasive messaging template representing a sales approach.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAngle {
    pub id: String,
    pub headline: String,
    pub subtext: String,
    pub badge: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub operators: Vec<Operator>,
    pub regions: Vec<Region>,
    pub angles: Vec<MessageAngle>,
    pub assets: AssetDictionary,
}

impl Catalog {
    /// Loads a catalog from JSON and validates the parts with non-local
    /// contracts: asset keys must be pre-normalized, regional facility maps
    /// must reference known regions.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let bad_keys = self.assets.denormalized_keys();
        if !bad_keys.is_empty() {
            return Err(Error::InvalidCatalog {
                message: format!("asset keys are not normalized: {}", bad_keys.join(", ")),
            });
        }
        for op in &self.operators {
            for region_id in op.regional_facilities.keys() {
                if !self.regions.iter().any(|r| &r.id == region_id) {
                    return Err(Error::InvalidCatalog {
                        message: format!(
                            "operator {} maps facilities for unknown region {}",
                            op.id, region_id
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn operator(&self, id: &str) -> Option<&Operator> {
        self.operators.iter().find(|o| o.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn angle(&self, id: &str) -> Option<&MessageAngle> {
        self.angles.iter().find(|a| a.id == id)
    }
}
