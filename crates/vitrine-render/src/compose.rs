//! Assembles the visual-block list for a scene.
//!
//! Pure: selections + resolved context in, typed scene out. Each template
//! variant is a fixed ordered list of optional blocks; a block is included
//! only when its backing data is non-empty. Vertical geometry comes from
//! the layout metrics, so the densest supported content still fits the
//! fixed canvas.

use vitrine_core::{SceneContext, SceneSelections, TemplateVariant, ensure_readable};

use crate::model::{
    CallToActionBlock, FacilityBadgesBlock, FacilityGridBlock, FooterBlock, HeaderBlock,
    HeadlineBlock, InfoBadgesBlock, PriceCalloutBlock, PriceRow, PriceTableBlock, Scene,
    VisualBlock,
};

/// Compact facility badges shown under the price content.
pub const FACILITY_BADGE_LIMIT: usize = 3;
/// Per-row cap of the facility/lab logo grid.
pub const FACILITY_GRID_LIMIT: usize = 4;

const CANVAS_MARGIN: f64 = 18.0;
const DEFAULT_CTA: &str = "Peça sua cotação sem compromisso";

struct BlockStack {
    y: f64,
    gap: f64,
    blocks: Vec<VisualBlock>,
}

impl BlockStack {
    fn new(gap: f64) -> Self {
        Self {
            y: 0.0,
            gap,
            blocks: Vec::new(),
        }
    }

    fn push(&mut self, block: VisualBlock) {
        self.y = block.y() + block.height() + self.gap;
        self.blocks.push(block);
    }
}

pub fn compose_scene(selections: &SceneSelections, ctx: &SceneContext) -> Scene {
    let (width, height) = selections.aspect.canvas_size();
    let m = ctx.metrics;
    let accent = ensure_readable(&ctx.operator.accent_color);

    let mut stack = BlockStack::new(m.row_padding * 1.5);

    stack.push(VisualBlock::Header(HeaderBlock {
        y: 0.0,
        height: m.header_font_size + 2.0 * m.header_padding,
        operator_name: ctx.operator.name.clone(),
        font_size: m.header_font_size,
        fill: ctx.operator.secondary_color.clone(),
    }));

    match selections.template {
        TemplateVariant::Table => {
            push_price_table(&mut stack, selections, &m, &accent);
            push_headline(&mut stack, selections, ctx, &m, &accent);
            push_info_badges(&mut stack, selections, &m);
            push_facility_badges(&mut stack, ctx, &m);
            push_cta(&mut stack, selections, &m, &accent);
        }
        TemplateVariant::PriceHighlight => {
            push_headline(&mut stack, selections, ctx, &m, &accent);
            push_info_badges(&mut stack, selections, &m);
            push_price_callout(&mut stack, selections, &m, &accent);
            push_facility_badges(&mut stack, ctx, &m);
            push_cta(&mut stack, selections, &m, &accent);
        }
        TemplateVariant::FacilityGrid => {
            // Headline/badge omitted by design: the network is the message.
            push_facility_grid(&mut stack, ctx, width, &m);
            push_cta(&mut stack, selections, &m, &accent);
        }
    }

    if selections.broker_name.is_some() || selections.broker_phone.is_some() {
        let footer_height = m.font_size * 0.9 + 2.0 * m.row_padding;
        stack.blocks.push(VisualBlock::Footer(FooterBlock {
            y: height - footer_height,
            height: footer_height,
            broker_name: selections.broker_name.clone(),
            broker_phone: selections.broker_phone.clone(),
            font_size: m.font_size * 0.75,
        }));
    }

    Scene {
        template: selections.template,
        aspect: selections.aspect,
        width,
        height,
        background: ctx.operator.primary_color.clone(),
        accent,
        blocks: stack.blocks,
    }
}

fn push_price_table(
    stack: &mut BlockStack,
    selections: &SceneSelections,
    m: &vitrine_core::LayoutMetrics,
    accent: &str,
) {
    if selections.price_tiers.is_empty() {
        return;
    }
    let rows: Vec<PriceRow> = selections
        .price_tiers
        .iter()
        .map(|t| PriceRow {
            age_band: t.age_band.clone(),
            amount: t.amount.clone(),
        })
        .collect();
    let height = rows.len() as f64 * (m.font_size + 2.0 * m.row_padding);
    stack.push(VisualBlock::PriceTable(PriceTableBlock {
        y: stack.y,
        height,
        rows,
        font_size: m.font_size,
        row_padding: m.row_padding,
        amount_fill: accent.to_string(),
    }));
}

fn push_price_callout(
    stack: &mut BlockStack,
    selections: &SceneSelections,
    m: &vitrine_core::LayoutMetrics,
    accent: &str,
) {
    let Some(first) = selections.price_tiers.first() else {
        return;
    };
    stack.push(VisualBlock::PriceCallout(PriceCalloutBlock {
        y: stack.y,
        height: m.header_font_size * 2.4,
        age_band: first.age_band.clone(),
        amount: first.amount.clone(),
        font_size: m.header_font_size * 1.6,
        fill: accent.to_string(),
    }));
}

fn push_headline(
    stack: &mut BlockStack,
    selections: &SceneSelections,
    ctx: &SceneContext,
    m: &vitrine_core::LayoutMetrics,
    accent: &str,
) {
    let headline = selections
        .overrides
        .headline
        .clone()
        .unwrap_or_else(|| ctx.angle.headline.clone());
    let subtext = selections
        .overrides
        .subtext
        .clone()
        .or_else(|| Some(ctx.angle.subtext.clone()))
        .filter(|s| !s.is_empty());
    let badge = selections
        .overrides
        .badge
        .clone()
        .or_else(|| Some(ctx.angle.badge.clone()))
        .filter(|s| !s.is_empty());

    let mut height = m.font_size * 1.5;
    if subtext.is_some() {
        height += m.font_size * 1.2;
    }
    if badge.is_some() {
        height += m.font_size * 1.6;
    }

    stack.push(VisualBlock::Headline(HeadlineBlock {
        y: stack.y,
        height,
        headline,
        subtext,
        badge,
        font_size: m.font_size * 1.25,
        badge_fill: accent.to_string(),
    }));
}

fn push_info_badges(
    stack: &mut BlockStack,
    selections: &SceneSelections,
    m: &vitrine_core::LayoutMetrics,
) {
    let badges = info_badges(selections);
    if badges.is_empty() {
        return;
    }
    stack.push(VisualBlock::InfoBadges(InfoBadgesBlock {
        y: stack.y,
        height: m.font_size * 1.1 + 2.0 * m.row_padding,
        badges,
        font_size: m.font_size * 0.85,
    }));
}

/// Info badges come from the selected feature flags, worded from the plan
/// metadata; a flag with no backing metadata contributes nothing.
fn info_badges(selections: &SceneSelections) -> Vec<String> {
    use vitrine_core::{Accommodation, Coverage};

    let mut badges = Vec::new();
    if selections.show_coparticipation {
        match selections.plan.coparticipation {
            Some(true) => badges.push("Com coparticipação".to_string()),
            Some(false) => badges.push("Sem coparticipação".to_string()),
            None => {}
        }
    }
    if selections.show_accommodation {
        match selections.plan.accommodation {
            Some(Accommodation::Private) => badges.push("Apartamento".to_string()),
            Some(Accommodation::Ward) => badges.push("Enfermaria".to_string()),
            None => {}
        }
    }
    if selections.show_coverage {
        match selections.plan.coverage {
            Some(Coverage::National) => badges.push("Cobertura nacional".to_string()),
            Some(Coverage::Regional) => badges.push("Cobertura regional".to_string()),
            None => {}
        }
    }
    badges
}

fn push_facility_badges(
    stack: &mut BlockStack,
    ctx: &SceneContext,
    m: &vitrine_core::LayoutMetrics,
) {
    if ctx.facilities.is_empty() {
        return;
    }
    let facilities: Vec<_> = ctx
        .facilities
        .iter()
        .take(FACILITY_BADGE_LIMIT)
        .cloned()
        .collect();
    stack.push(VisualBlock::FacilityBadges(FacilityBadgesBlock {
        y: stack.y,
        height: m.font_size * 1.3 + 2.0 * m.row_padding,
        facilities,
        font_size: m.font_size * 0.8,
    }));
}

fn push_facility_grid(
    stack: &mut BlockStack,
    ctx: &SceneContext,
    width: f64,
    m: &vitrine_core::LayoutMetrics,
) {
    if ctx.facilities.is_empty() && ctx.labs.is_empty() {
        return;
    }
    let facilities: Vec<_> = ctx
        .facilities
        .iter()
        .take(FACILITY_GRID_LIMIT)
        .cloned()
        .collect();
    let labs: Vec<_> = ctx.labs.iter().take(FACILITY_GRID_LIMIT).cloned().collect();

    let gap = m.row_padding * 2.0;
    let cell = (width - 2.0 * CANVAS_MARGIN - 3.0 * gap) / 4.0;
    let mut rows = 0.0;
    if !facilities.is_empty() {
        rows += 1.0;
    }
    if !labs.is_empty() {
        rows += 1.0;
    }

    stack.push(VisualBlock::FacilityGrid(FacilityGridBlock {
        y: stack.y,
        height: rows * (cell + gap),
        facilities,
        labs,
        cell,
    }));
}

fn push_cta(
    stack: &mut BlockStack,
    selections: &SceneSelections,
    m: &vitrine_core::LayoutMetrics,
    accent: &str,
) {
    let text = selections
        .overrides
        .cta
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_CTA.to_string());
    stack.push(VisualBlock::CallToAction(CallToActionBlock {
        y: stack.y,
        height: m.font_size * 1.5 + 2.0 * m.row_padding,
        text,
        font_size: m.font_size,
        fill: accent.to_string(),
    }));
}
