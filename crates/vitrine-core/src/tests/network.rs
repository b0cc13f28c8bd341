use indexmap::IndexMap;

use crate::catalog::{Operator, Region};
use crate::network::resolve_network;

fn operator(regional: IndexMap<String, Vec<String>>) -> Operator {
    Operator {
        id: "op".to_string(),
        name: "Operadora".to_string(),
        primary_color: "#00387a".to_string(),
        secondary_color: "#0072ce".to_string(),
        accent_color: "#ffb600".to_string(),
        default_facilities: vec!["Default A".to_string(), "Default B".to_string()],
        regional_facilities: regional,
    }
}

fn region() -> Region {
    Region {
        id: "zona-sul".to_string(),
        name: "Zona Sul".to_string(),
        neighborhoods: vec!["Copacabana".to_string()],
        facilities: vec!["Regional A".to_string(), "Regional B".to_string()],
        labs: vec!["Lab A".to_string()],
    }
}

#[test]
fn regional_entry_wins_when_present_and_non_empty() {
    let op = operator(IndexMap::from([(
        "zona-sul".to_string(),
        vec!["Operator Regional".to_string()],
    )]));
    let net = resolve_network(&op, Some(&region()));
    assert_eq!(net.facilities, vec!["Operator Regional".to_string()]);
    assert_eq!(net.labs, vec!["Lab A".to_string()]);
}

#[test]
fn empty_regional_entry_falls_back_to_region_generic_list() {
    // An empty entry must not produce an empty scene, and must not leak the
    // operator's unrelated default list either.
    let op = operator(IndexMap::from([("zona-sul".to_string(), Vec::new())]));
    let net = resolve_network(&op, Some(&region()));
    assert_eq!(
        net.facilities,
        vec!["Regional A".to_string(), "Regional B".to_string()]
    );
}

#[test]
fn missing_regional_entry_falls_back_to_region_generic_list() {
    let op = operator(IndexMap::new());
    let net = resolve_network(&op, Some(&region()));
    assert_eq!(
        net.facilities,
        vec!["Regional A".to_string(), "Regional B".to_string()]
    );
}

#[test]
fn no_region_uses_operator_defaults_and_no_labs() {
    let op = operator(IndexMap::new());
    let net = resolve_network(&op, None);
    assert_eq!(
        net.facilities,
        vec!["Default A".to_string(), "Default B".to_string()]
    );
    assert!(net.labs.is_empty());
}
