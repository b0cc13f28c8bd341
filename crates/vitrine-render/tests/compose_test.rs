use vitrine_core::{
    Accommodation, Engine, PlanDetails, PriceTier, SceneSelections, TemplateVariant,
    compute_metrics,
};
use vitrine_render::compose_scene;
use vitrine_render::model::VisualBlock;

fn tiers(count: usize) -> Vec<PriceTier> {
    // The ten ANS age bands, truncated to `count`.
    let bands = [
        "0-18", "19-23", "24-28", "29-33", "34-38", "39-43", "44-48", "49-53", "54-58", "59+",
    ];
    bands
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, band)| PriceTier {
            age_band: band.to_string(),
            amount: format!("R$ {},90", 300 + i * 45),
        })
        .collect()
}

fn amil_zona_sul_table() -> SceneSelections {
    SceneSelections {
        operator: "amil".to_string(),
        region: Some("zona-sul".to_string()),
        angle: "economia".to_string(),
        template: TemplateVariant::Table,
        price_tiers: tiers(10),
        ..SceneSelections::default()
    }
}

#[test]
fn table_scene_for_ten_tiers_uses_the_densest_breakpoint() {
    let engine = Engine::new();
    let selections = amil_zona_sul_table();
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let table = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::PriceTable(t) => Some(t),
            _ => None,
        })
        .expect("price table present");
    assert_eq!(table.rows.len(), 10);
    assert_eq!(
        table.font_size,
        compute_metrics(10, selections.aspect).font_size
    );
}

#[test]
fn table_variant_places_the_headline_after_the_table() {
    let engine = Engine::new();
    let selections = amil_zona_sul_table();
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let table_idx = scene
        .blocks
        .iter()
        .position(|b| matches!(b, VisualBlock::PriceTable(_)))
        .unwrap();
    let headline_idx = scene
        .blocks
        .iter()
        .position(|b| matches!(b, VisualBlock::Headline(_)))
        .unwrap();
    assert!(headline_idx > table_idx);
    assert!(scene.blocks[headline_idx].y() >= scene.blocks[table_idx].y());
}

#[test]
fn facility_badges_are_deduplicated_and_capped_at_three() {
    let engine = Engine::new();
    let selections = amil_zona_sul_table();
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let badges = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::FacilityBadges(f) => Some(f),
            _ => None,
        })
        .expect("facility badges present");
    assert!(badges.facilities.len() <= 3);
    // Copa D'Or and Quinta D'Or share the network logo, so only one
    // representative of that asset survives.
    let dor_count = badges
        .facilities
        .iter()
        .filter(|f| f.asset_id.as_deref() == Some("rede-dor"))
        .count();
    assert_eq!(dor_count, 1);
}

#[test]
fn every_block_fits_the_fixed_canvas() {
    let engine = Engine::new();
    for template in [
        TemplateVariant::Table,
        TemplateVariant::PriceHighlight,
        TemplateVariant::FacilityGrid,
    ] {
        for aspect in [
            vitrine_core::AspectVariant::Story,
            vitrine_core::AspectVariant::Feed,
        ] {
            let selections = SceneSelections {
                template,
                aspect,
                broker_name: Some("Corretora Horizonte".to_string()),
                broker_phone: Some("(21) 99999-0000".to_string()),
                ..amil_zona_sul_table()
            };
            let ctx = engine.scene_context(&selections).unwrap();
            let scene = compose_scene(&selections, &ctx);
            for block in &scene.blocks {
                assert!(
                    block.y() + block.height() <= scene.height + 0.5,
                    "{template:?}/{aspect:?} block ends at {}",
                    block.y() + block.height()
                );
            }
        }
    }
}

#[test]
fn price_highlight_uses_the_first_tier_only() {
    let engine = Engine::new();
    let selections = SceneSelections {
        template: TemplateVariant::PriceHighlight,
        ..amil_zona_sul_table()
    };
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let callout = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::PriceCallout(c) => Some(c),
            _ => None,
        })
        .expect("callout present");
    assert_eq!(callout.age_band, "0-18");
    assert_eq!(callout.amount, "R$ 300,90");
    assert!(
        !scene
            .blocks
            .iter()
            .any(|b| matches!(b, VisualBlock::PriceTable(_)))
    );
}

#[test]
fn facility_grid_omits_the_headline_by_design() {
    let engine = Engine::new();
    let selections = SceneSelections {
        template: TemplateVariant::FacilityGrid,
        ..amil_zona_sul_table()
    };
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    assert!(
        !scene
            .blocks
            .iter()
            .any(|b| matches!(b, VisualBlock::Headline(_)))
    );
    let grid = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::FacilityGrid(g) => Some(g),
            _ => None,
        })
        .expect("grid present");
    assert!(grid.facilities.len() <= 4);
    assert!(grid.labs.len() <= 4);
    assert!(!grid.labs.is_empty());
}

#[test]
fn empty_backing_data_drops_optional_blocks() {
    let engine = Engine::new();
    let selections = SceneSelections {
        operator: "amil".to_string(),
        region: None,
        angle: "economia".to_string(),
        template: TemplateVariant::Table,
        price_tiers: Vec::new(),
        ..SceneSelections::default()
    };
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    assert!(
        !scene
            .blocks
            .iter()
            .any(|b| matches!(b, VisualBlock::PriceTable(_)))
    );
    assert!(
        !scene
            .blocks
            .iter()
            .any(|b| matches!(b, VisualBlock::InfoBadges(_)))
    );
    assert!(
        !scene
            .blocks
            .iter()
            .any(|b| matches!(b, VisualBlock::Footer(_)))
    );
}

#[test]
fn info_badges_follow_flags_and_plan_metadata() {
    let engine = Engine::new();
    let selections = SceneSelections {
        show_coparticipation: true,
        show_accommodation: true,
        show_coverage: true,
        plan: PlanDetails {
            coparticipation: Some(false),
            accommodation: Some(Accommodation::Private),
            // Coverage flag is on but the plan has no coverage metadata, so
            // no badge is produced for it.
            coverage: None,
            ..PlanDetails::default()
        },
        ..amil_zona_sul_table()
    };
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let badges = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::InfoBadges(i) => Some(i),
            _ => None,
        })
        .expect("info badges present");
    assert_eq!(
        badges.badges,
        vec!["Sem coparticipação".to_string(), "Apartamento".to_string()]
    );
}

#[test]
fn overrides_replace_angle_copy() {
    let engine = Engine::new();
    let mut selections = amil_zona_sul_table();
    selections.overrides.headline = Some("Black Friday da saúde".to_string());
    selections.overrides.cta = Some("Chama no WhatsApp".to_string());
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);

    let headline = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::Headline(h) => Some(h),
            _ => None,
        })
        .unwrap();
    assert_eq!(headline.headline, "Black Friday da saúde");

    let cta = scene
        .blocks
        .iter()
        .find_map(|b| match b {
            VisualBlock::CallToAction(c) => Some(c),
            _ => None,
        })
        .unwrap();
    assert_eq!(cta.text, "Chama no WhatsApp");
}

#[test]
fn accent_color_is_contrast_guarded() {
    // Unimed's lime accent is already readable; a synthetic dark accent
    // must be lifted before it is used for price text.
    let engine = Engine::new();
    let mut catalog = engine.catalog().clone();
    catalog.operators[0].accent_color = "#101010".to_string();
    let engine = Engine::with_catalog(catalog);

    let selections = amil_zona_sul_table();
    let ctx = engine.scene_context(&selections).unwrap();
    let scene = compose_scene(&selections, &ctx);
    assert_ne!(scene.accent, "#101010");
}
