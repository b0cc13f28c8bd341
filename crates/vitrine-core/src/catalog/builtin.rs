//! Built-in Rio de Janeiro market catalog.
//!
//! Kept in code rather than a bundled JSON file so the default engine never
//! needs a fallible parse step. Deployments with their own data load a
//! catalog via [`Catalog::from_json_str`].

use indexmap::IndexMap;

use super::{Catalog, MessageAngle, Operator, Region};
use crate::assets::{AssetDictionary, AssetEntry};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn asset(id: &str) -> AssetEntry {
    AssetEntry {
        id: id.to_string(),
        href: None,
    }
}

pub fn builtin() -> Catalog {
    let mut assets = AssetDictionary::new();
    // Insertion order matters: substring resolution scans in this order and
    // the first match wins. `copa star` sits above the network-wide `d'or`
    // key so the Copa Star brand keeps its own logo.
    assets.insert("Copa Star", asset("copa-star"));
    assets.insert("D'Or", asset("rede-dor"));
    assets.insert("Samaritano", asset("samaritano"));
    assets.insert("São Lucas", asset("sao-lucas"));
    assets.insert("Pró-Cardíaco", asset("pro-cardiaco"));
    assets.insert("Perinatal", asset("perinatal"));
    assets.insert("Américas", asset("americas"));
    assets.insert("Lavoisier", asset("lavoisier"));
    assets.insert("Sérgio Franco", asset("sergio-franco"));
    assets.insert("Labs a+", asset("labs-a-mais"));
    assets.insert("Richet", asset("richet"));

    let operators = vec![
        Operator {
            id: "amil".to_string(),
            name: "Amil".to_string(),
            primary_color: "#00387a".to_string(),
            secondary_color: "#0072ce".to_string(),
            accent_color: "#ffb600".to_string(),
            default_facilities: strings(&[
                "Hospital Samaritano",
                "São Lucas Copacabana",
                "Pró-Cardíaco",
                "Norte D'Or",
            ]),
            regional_facilities: IndexMap::from([
                (
                    "zona-sul".to_string(),
                    strings(&[
                        "Copa D'Or",
                        "Quinta D'Or",
                        "Copa Star",
                        "Samaritano Botafogo",
                        "São Lucas Copacabana",
                    ]),
                ),
                (
                    "barra".to_string(),
                    strings(&["Barra D'Or", "Américas Medical City", "Perinatal Barra"]),
                ),
            ]),
        },
        Operator {
            id: "sulamerica".to_string(),
            name: "SulAmérica".to_string(),
            primary_color: "#ff5000".to_string(),
            secondary_color: "#002364".to_string(),
            accent_color: "#ffffff".to_string(),
            default_facilities: strings(&[
                "Copa Star",
                "Pró-Cardíaco",
                "Perinatal Laranjeiras",
            ]),
            regional_facilities: IndexMap::new(),
        },
        Operator {
            id: "bradesco".to_string(),
            name: "Bradesco Saúde".to_string(),
            primary_color: "#cc092f".to_string(),
            secondary_color: "#7f1734".to_string(),
            accent_color: "#e5e5e5".to_string(),
            default_facilities: strings(&["Copa D'Or", "Samaritano", "Américas Medical City"]),
            regional_facilities: IndexMap::from([(
                "barra".to_string(),
                strings(&["Barra D'Or", "Perinatal Barra"]),
            )]),
        },
        Operator {
            id: "unimed".to_string(),
            name: "Unimed-Rio".to_string(),
            primary_color: "#00995d".to_string(),
            secondary_color: "#411564".to_string(),
            accent_color: "#b1d34b".to_string(),
            default_facilities: strings(&["Hospital Unimed-Rio", "São Lucas Copacabana"]),
            regional_facilities: IndexMap::new(),
        },
    ];

    let regions = vec![
        Region {
            id: "zona-sul".to_string(),
            name: "Zona Sul".to_string(),
            neighborhoods: strings(&[
                "Copacabana",
                "Ipanema",
                "Leblon",
                "Botafogo",
                "Flamengo",
                "Laranjeiras",
            ]),
            facilities: strings(&["Copa D'Or", "Samaritano Botafogo", "São Lucas Copacabana"]),
            labs: strings(&["Lavoisier", "Sérgio Franco"]),
        },
        Region {
            id: "barra".to_string(),
            name: "Barra da Tijuca".to_string(),
            neighborhoods: strings(&["Barra da Tijuca", "Recreio", "Jacarepaguá"]),
            facilities: strings(&["Barra D'Or", "Américas Medical City", "Perinatal Barra"]),
            labs: strings(&["Labs a+", "Sérgio Franco"]),
        },
        Region {
            id: "centro".to_string(),
            name: "Centro".to_string(),
            neighborhoods: strings(&["Centro", "Lapa", "Santa Teresa"]),
            facilities: strings(&["Hospital Pasteur", "Pró-Cardíaco"]),
            labs: strings(&["Richet", "Lavoisier"]),
        },
        Region {
            id: "niteroi".to_string(),
            name: "Niterói".to_string(),
            neighborhoods: strings(&["Icaraí", "Santa Rosa", "Ingá"]),
            facilities: strings(&["Niterói D'Or", "Hospital Icaraí"]),
            labs: strings(&["Sérgio Franco"]),
        },
    ];

    let angles = vec![
        MessageAngle {
            id: "economia".to_string(),
            headline: "Plano de saúde que cabe no seu bolso".to_string(),
            subtext: "Economize até 40% na mensalidade".to_string(),
            badge: "Melhor preço".to_string(),
        },
        MessageAngle {
            id: "rede".to_string(),
            headline: "Rede credenciada completa na sua região".to_string(),
            subtext: "Hospitais e laboratórios de referência".to_string(),
            badge: "Rede top".to_string(),
        },
        MessageAngle {
            id: "familia".to_string(),
            headline: "Proteção completa para a sua família".to_string(),
            subtext: "Cobertura nacional com acomodação em apartamento".to_string(),
            badge: "Família protegida".to_string(),
        },
        MessageAngle {
            id: "urgencia".to_string(),
            headline: "Contrate hoje, use amanhã".to_string(),
            subtext: "Carências reduzidas por tempo limitado".to_string(),
            badge: "Últimas vagas".to_string(),
        },
    ];

    Catalog {
        operators,
        regions,
        angles,
        assets,
    }
}
