use futures::executor::block_on;
use futures::future::BoxFuture;

use crate::assets::{AssetDictionary, AssetEntry, normalize_name};
use crate::services::{AssetHit, AssetSearch, ServiceResult};

fn entry(id: &str) -> AssetEntry {
    AssetEntry {
        id: id.to_string(),
        href: None,
    }
}

fn dor_dict() -> AssetDictionary {
    let mut dict = AssetDictionary::new();
    dict.insert("Copa Star", entry("copa-star"));
    dict.insert("D'Or", entry("rede-dor"));
    dict.insert("Samaritano", entry("samaritano"));
    dict
}

#[test]
fn normalize_folds_case_diacritics_and_quote_variants() {
    assert_eq!(normalize_name("Copa D'Or"), normalize_name("COPA D\u{2019}OR"));
    assert_eq!(normalize_name("Copa D'Or"), normalize_name(" copa d\u{00B4}or "));
    assert_eq!(normalize_name("Pró-Cardíaco"), "pro-cardiaco");
    assert_eq!(normalize_name("Sérgio Franco"), "sergio franco");
}

#[test]
fn resolve_is_idempotent_over_normalized_variants() {
    let dict = dor_dict();
    let canonical = dict.resolve("d'or").unwrap().id.clone();
    for variant in ["D'Or", "D\u{2019}OR", " d`or "] {
        assert_eq!(dict.resolve(variant).unwrap().id, canonical);
    }
}

#[test]
fn resolve_falls_back_to_substring_scan() {
    let dict = dor_dict();
    // "Barra D'Or" has no exact key; the dictionary key "d'or" is a
    // substring of the normalized input.
    assert_eq!(dict.resolve("Barra D'Or").unwrap().id, "rede-dor");
    // And the reverse direction: input contained in a key.
    assert_eq!(dict.resolve("Samarit").unwrap().id, "samaritano");
}

#[test]
fn resolve_returns_none_without_any_match() {
    let dict = dor_dict();
    assert!(dict.resolve("Hospital Pasteur").is_none());
}

#[test]
fn substring_resolution_is_insertion_order_dependent() {
    // Both keys match the input; the earliest inserted entry wins. This pins
    // the documented ambiguity rather than any precedence heuristic.
    let mut dict = AssetDictionary::new();
    dict.insert("Copa Star", entry("copa-star"));
    dict.insert("D'Or", entry("rede-dor"));
    assert_eq!(dict.resolve("Copa Star D'Or Unit").unwrap().id, "copa-star");

    let mut flipped = AssetDictionary::new();
    flipped.insert("D'Or", entry("rede-dor"));
    flipped.insert("Copa Star", entry("copa-star"));
    assert_eq!(
        flipped.resolve("Copa Star D'Or Unit").unwrap().id,
        "rede-dor"
    );
}

#[test]
fn dedupe_collapses_aliases_of_one_logo() {
    let dict = dor_dict();
    let out = dict.dedupe_by_asset(&["Barra D'Or", "Oeste D'Or"]);
    assert_eq!(out, vec!["Barra D'Or".to_string()]);
}

#[test]
fn dedupe_preserves_first_seen_order() {
    let dict = dor_dict();
    let out = dict.dedupe_by_asset(&[
        "Samaritano Botafogo",
        "Copa D'Or",
        "Hospital Pasteur",
        "Quinta D'Or",
        "Samaritano",
    ]);
    assert_eq!(
        out,
        vec![
            "Samaritano Botafogo".to_string(),
            "Copa D'Or".to_string(),
            "Hospital Pasteur".to_string(),
        ]
    );
}

#[test]
fn unmapped_names_stay_distinct() {
    let dict = dor_dict();
    let out = dict.dedupe_by_asset(&["Hospital Pasteur", "Hospital Icaraí"]);
    assert_eq!(out.len(), 2);
}

struct CannedSearch;

impl AssetSearch for CannedSearch {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, ServiceResult<Vec<AssetHit>>> {
        Box::pin(async move {
            Ok(vec![AssetHit {
                id: "hospital-pasteur".to_string(),
                name: query.to_string(),
                thumb_url: "https://assets.example.com/thumb/pasteur.png"
                    .parse()
                    .expect("canned URL"),
                full_url: "https://assets.example.com/full/pasteur.png"
                    .parse()
                    .expect("canned URL"),
            }])
        })
    }
}

#[test]
fn search_hits_extend_the_dictionary() {
    let mut dict = dor_dict();
    assert!(dict.resolve("Hospital Pasteur").is_none());

    let hits = block_on(CannedSearch.search("Hospital Pasteur")).unwrap();
    let hit = &hits[0];
    dict.insert(
        &hit.name,
        AssetEntry {
            id: hit.id.clone(),
            href: Some(hit.full_url.to_string()),
        },
    );

    assert_eq!(dict.resolve("hospital pasteur").unwrap().id, "hospital-pasteur");
}

#[test]
fn resolve_facilities_marks_unmatched_as_text_badges() {
    let dict = dor_dict();
    let resolved = dict.resolve_facilities(&["Copa D'Or", "Hospital Pasteur"]);
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].asset_id.as_deref(), Some("rede-dor"));
    assert_eq!(resolved[0].key, "copa d'or");
    assert!(resolved[1].asset_id.is_none());
}
