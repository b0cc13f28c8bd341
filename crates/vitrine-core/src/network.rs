//! Operator + region → displayable facility and lab lists.

use serde::{Deserialize, Serialize};

use crate::catalog::{Operator, Region};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNetwork {
    pub facilities: Vec<String>,
    pub labs: Vec<String>,
}

/// Resolves which facilities and labs to display.
///
/// Fallback chain, most specific first:
/// 1. the operator's facility list for the selected region, when present and
///    non-empty;
/// 2. the region's generic facility list;
/// 3. the operator's generic default list (no region selected).
///
/// Labs are always the region's lab list, or empty without a region. Absent
/// data degrades to the next fallback, never to an error.
pub fn resolve_network(operator: &Operator, region: Option<&Region>) -> ResolvedNetwork {
    let Some(region) = region else {
        return ResolvedNetwork {
            facilities: operator.default_facilities.clone(),
            labs: Vec::new(),
        };
    };

    let facilities = match operator.regional_facilities.get(&region.id) {
        Some(list) if !list.is_empty() => list.clone(),
        Some(_) => {
            tracing::debug!(
                operator = %operator.id,
                region = %region.id,
                "empty regional facility entry, using the region's generic list"
            );
            region.facilities.clone()
        }
        None => {
            tracing::debug!(
                operator = %operator.id,
                region = %region.id,
                "no regional facility entry, using the region's generic list"
            );
            region.facilities.clone()
        }
    };

    ResolvedNetwork {
        facilities,
        labs: region.labs.clone(),
    }
}
