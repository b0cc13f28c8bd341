//! Free-text facility names → visual asset resolution.
//!
//! Facility lists come from catalogs, pricing lookups and user input, so the
//! same hospital shows up as `Copa D'Or`, `COPA D’OR` or `copa d´or`. The
//! matcher folds those spellings onto one key, resolves them against the
//! asset dictionary and guarantees the same logo never renders twice in one
//! scene.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical key for a facility name: lowercase, NFD-decomposed with
/// combining marks stripped, curly/backtick quote variants folded to a
/// straight quote, surrounding whitespace trimmed.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        let ch = match ch {
            '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{00B4}' | '\u{02BC}' | '`' => '\'',
            other => other,
        };
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out.trim().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    /// Stable id of the logo resource.
    pub id: String,
    /// Image source for the logo. Only `data:` URIs are embeddable by the
    /// raster pipeline; other schemes degrade to text badges at render time.
    #[serde(default)]
    pub href: Option<String>,
}

/// Insertion-ordered dictionary of pre-normalized facility keys.
///
/// Iteration order is part of the contract: substring resolution scans
/// entries in insertion order and the first match wins. When several keys
/// could match the same input (e.g. `copa star` and `d'or` against
/// `Copa Star D'Or Unit`), whichever was inserted first decides. That
/// ambiguity is inherited from the upstream asset data and is deliberately
/// kept deterministic rather than resolved by precedence rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetDictionary {
    entries: IndexMap<String, AssetEntry>,
}

impl AssetDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a logo under `name`. The key is normalized on insertion so
    /// dictionaries built in code and dictionaries loaded from JSON behave
    /// identically.
    pub fn insert(&mut self, name: &str, entry: AssetEntry) {
        self.entries.insert(normalize_name(name), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns keys that are not in normalized form (catalog validation).
    pub(crate) fn denormalized_keys(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter(|k| normalize_name(k) != **k)
            .cloned()
            .collect()
    }

    /// Resolves a free-text facility name to an asset entry.
    ///
    /// Exact key match first; otherwise the first entry (in insertion order)
    /// whose key is a substring of the input or vice versa. `None` means the
    /// caller renders the facility as a plain-text badge.
    pub fn resolve(&self, name: &str) -> Option<&AssetEntry> {
        let key = normalize_name(name);
        if let Some(entry) = self.entries.get(&key) {
            return Some(entry);
        }
        self.entries
            .iter()
            .find(|(k, _)| key.contains(k.as_str()) || k.contains(key.as_str()))
            .map(|(_, entry)| entry)
    }

    /// Drops names whose dedupe key was already seen, preserving first-seen
    /// order. The dedupe key is the resolved asset id, or the normalized name
    /// when nothing matched, so two unmapped names stay distinct while two
    /// aliases of one network-wide logo collapse.
    pub fn dedupe_by_asset<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let key = match self.resolve(name) {
                Some(entry) => entry.id.clone(),
                None => normalize_name(name),
            };
            if seen.insert(key) {
                out.push(name.to_string());
            }
        }
        out
    }

    /// Dedupes and resolves in one pass, producing what the composer needs.
    pub fn resolve_facilities<S: AsRef<str>>(&self, names: &[S]) -> Vec<ResolvedFacility> {
        self.dedupe_by_asset(names)
            .into_iter()
            .map(|name| {
                let key = normalize_name(&name);
                let (asset_id, href) = match self.resolve(&name) {
                    Some(entry) => (Some(entry.id.clone()), entry.href.clone()),
                    None => {
                        tracing::debug!(facility = %name, "no asset match, rendering text badge");
                        (None, None)
                    }
                };
                ResolvedFacility {
                    name,
                    key,
                    asset_id,
                    href,
                }
            })
            .collect()
    }
}

impl FromIterator<(String, AssetEntry)> for AssetDictionary {
    fn from_iter<T: IntoIterator<Item = (String, AssetEntry)>>(iter: T) -> Self {
        let mut dict = Self::new();
        for (name, entry) in iter {
            dict.insert(&name, entry);
        }
        dict
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFacility {
    /// The name as it appeared in the source list.
    pub name: String,
    /// Normalized comparison key.
    pub key: String,
    /// Matched logo id; `None` renders as a plain-text badge.
    pub asset_id: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}
