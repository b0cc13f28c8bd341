//! Scene → SVG markup.
//!
//! The emitter draws exactly what the composer laid out; it never re-flows
//! blocks. Logos are only drawn from `data:` URIs so the raster pipeline can
//! decode every embedded image without touching the network; any other href
//! degrades to a text badge.

use base64::Engine as _;
use std::fmt::Write as _;

use vitrine_core::ResolvedFacility;

use crate::model::{
    CallToActionBlock, FacilityBadgesBlock, FacilityGridBlock, FooterBlock, HeaderBlock,
    HeadlineBlock, InfoBadgesBlock, PriceCalloutBlock, PriceTableBlock, Scene, VisualBlock,
};
use crate::text::{TextMeasurer, TextStyle, ellipsize};
use crate::{Error, Result};

const CANVAS_MARGIN: f64 = 18.0;
const CHIP_LABEL_MAX_CHARS: usize = 24;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Optional id for the root `<svg>` element.
    pub scene_id: Option<String>,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            scene_id: None,
            font_family: "Inter, 'Segoe UI', Arial, sans-serif".to_string(),
        }
    }
}

/// Wraps raw PNG bytes into an embeddable `data:` URI.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

fn embeddable_href(facility: &ResolvedFacility) -> Option<&str> {
    facility
        .href
        .as_deref()
        .filter(|href| href.starts_with("data:image/"))
}

pub fn render_scene_svg(
    scene: &Scene,
    measurer: &dyn TextMeasurer,
    options: &SvgRenderOptions,
) -> Result<String> {
    if scene.width <= 0.0 || scene.height <= 0.0 {
        return Err(Error::InvalidScene {
            message: format!("canvas {}x{}", scene.width, scene.height),
        });
    }
    for block in &scene.blocks {
        if block.y() + block.height() > scene.height + 0.5 {
            return Err(Error::SceneOverflow {
                message: format!(
                    "block ends at {} on a {} canvas",
                    fmt(block.y() + block.height()),
                    fmt(scene.height)
                ),
            });
        }
    }

    let mut out = String::new();
    let id_attr = match options.scene_id.as_deref() {
        Some(id) => format!(r#" id="{}""#, escape_xml(id)),
        None => String::new(),
    };
    let _ = write!(
        &mut out,
        r#"<svg{id} xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {w} {h}" width="100%" style="max-width: {w}px;">"#,
        id = id_attr,
        w = fmt(scene.width),
        h = fmt(scene.height),
    );

    let _ = write!(
        &mut out,
        "<style>\
text {{ font-family: {font}; }}\
.headline {{ fill: #ffffff; font-weight: 700; text-anchor: middle; }}\
.subtext {{ fill: #ffffffcc; text-anchor: middle; }}\
.header-title {{ fill: #ffffff; font-weight: 700; text-anchor: middle; }}\
.price-age {{ fill: #ffffff; }}\
.price-amount {{ font-weight: 700; text-anchor: end; }}\
.chip-label {{ fill: #ffffff; text-anchor: middle; }}\
.badge-label {{ fill: #1f2430; font-weight: 700; text-anchor: middle; }}\
.cta-label {{ fill: #1f2430; font-weight: 700; text-anchor: middle; }}\
.footer-label {{ fill: #ffffffb3; text-anchor: middle; }}\
</style>",
        font = options.font_family,
    );

    let _ = write!(
        &mut out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#,
        w = fmt(scene.width),
        h = fmt(scene.height),
        bg = escape_xml(&scene.background),
    );

    for block in &scene.blocks {
        match block {
            VisualBlock::Header(b) => render_header(&mut out, scene, b),
            VisualBlock::Headline(b) => render_headline(&mut out, scene, b, measurer),
            VisualBlock::PriceTable(b) => render_price_table(&mut out, scene, b),
            VisualBlock::PriceCallout(b) => render_price_callout(&mut out, scene, b),
            VisualBlock::InfoBadges(b) => render_info_badges(&mut out, scene, b, measurer),
            VisualBlock::FacilityBadges(b) => render_facility_badges(&mut out, scene, b, measurer),
            VisualBlock::FacilityGrid(b) => render_facility_grid(&mut out, scene, b),
            VisualBlock::CallToAction(b) => render_cta(&mut out, scene, b, measurer),
            VisualBlock::Footer(b) => render_footer(&mut out, scene, b),
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn render_header(out: &mut String, scene: &Scene, b: &HeaderBlock) {
    let _ = write!(
        out,
        r#"<rect x="0" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
        y = fmt(b.y),
        w = fmt(scene.width),
        h = fmt(b.height),
        fill = escape_xml(&b.fill),
    );
    let _ = write!(
        out,
        r#"<text class="header-title" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
        x = fmt(scene.width / 2.0),
        y = fmt(b.y + b.height / 2.0 + b.font_size * 0.35),
        fs = fmt(b.font_size),
        text = escape_xml(&b.operator_name),
    );
}

fn render_headline(out: &mut String, scene: &Scene, b: &HeadlineBlock, measurer: &dyn TextMeasurer) {
    let cx = scene.width / 2.0;
    let mut y = b.y + b.font_size * 1.1;
    let _ = write!(
        out,
        r#"<text class="headline" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
        x = fmt(cx),
        y = fmt(y),
        fs = fmt(b.font_size),
        text = escape_xml(&b.headline),
    );
    if let Some(subtext) = b.subtext.as_deref() {
        y += b.font_size * 1.1;
        let _ = write!(
            out,
            r#"<text class="subtext" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
            x = fmt(cx),
            y = fmt(y),
            fs = fmt(b.font_size * 0.75),
            text = escape_xml(subtext),
        );
    }
    if let Some(badge) = b.badge.as_deref() {
        let style = TextStyle {
            font_size: b.font_size * 0.8,
            ..TextStyle::default()
        };
        let chip_w = measurer.measure(badge, &style).width + b.font_size;
        let chip_h = b.font_size * 1.3;
        y += b.font_size * 0.5;
        let _ = write!(
            out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}"/>"#,
            x = fmt(cx - chip_w / 2.0),
            y = fmt(y),
            w = fmt(chip_w),
            h = fmt(chip_h),
            rx = fmt(chip_h / 2.0),
            fill = escape_xml(&b.badge_fill),
        );
        let _ = write!(
            out,
            r#"<text class="badge-label" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
            x = fmt(cx),
            y = fmt(y + chip_h / 2.0 + style.font_size * 0.35),
            fs = fmt(style.font_size),
            text = escape_xml(badge),
        );
    }
}

fn render_price_table(out: &mut String, scene: &Scene, b: &PriceTableBlock) {
    let x = CANVAS_MARGIN;
    let w = scene.width - 2.0 * CANVAS_MARGIN;
    let row_h = b.font_size + 2.0 * b.row_padding;
    for (i, row) in b.rows.iter().enumerate() {
        let row_y = b.y + i as f64 * row_h;
        if i % 2 == 0 {
            let _ = write!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="#ffffff" fill-opacity="0.08"/>"#,
                x = fmt(x),
                y = fmt(row_y),
                w = fmt(w),
                h = fmt(row_h),
            );
        }
        let text_y = row_y + b.row_padding + b.font_size * 0.85;
        let _ = write!(
            out,
            r#"<text class="price-age" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
            x = fmt(x + b.row_padding),
            y = fmt(text_y),
            fs = fmt(b.font_size),
            text = escape_xml(&row.age_band),
        );
        let _ = write!(
            out,
            r#"<text class="price-amount" x="{x}" y="{y}" font-size="{fs}" fill="{fill}">{text}</text>"#,
            x = fmt(x + w - b.row_padding),
            y = fmt(text_y),
            fs = fmt(b.font_size),
            fill = escape_xml(&b.amount_fill),
            text = escape_xml(&row.amount),
        );
    }
}

fn render_price_callout(out: &mut String, scene: &Scene, b: &PriceCalloutBlock) {
    let cx = scene.width / 2.0;
    let _ = write!(
        out,
        r#"<text class="subtext" x="{x}" y="{y}" font-size="{fs}">a partir de ({band})</text>"#,
        x = fmt(cx),
        y = fmt(b.y + b.height * 0.3),
        fs = fmt(b.font_size * 0.35),
        band = escape_xml(&b.age_band),
    );
    let _ = write!(
        out,
        r#"<text class="headline" x="{x}" y="{y}" font-size="{fs}" fill="{fill}">{text}</text>"#,
        x = fmt(cx),
        y = fmt(b.y + b.height * 0.85),
        fs = fmt(b.font_size),
        fill = escape_xml(&b.fill),
        text = escape_xml(&b.amount),
    );
}

fn render_info_badges(
    out: &mut String,
    scene: &Scene,
    b: &InfoBadgesBlock,
    measurer: &dyn TextMeasurer,
) {
    render_chip_row(
        out,
        scene,
        b.y,
        b.height,
        b.font_size,
        measurer,
        b.badges.iter().map(|s| (s.as_str(), None)),
    );
}

fn render_facility_badges(
    out: &mut String,
    scene: &Scene,
    b: &FacilityBadgesBlock,
    measurer: &dyn TextMeasurer,
) {
    render_chip_row(
        out,
        scene,
        b.y,
        b.height,
        b.font_size,
        measurer,
        b.facilities
            .iter()
            .map(|f| (f.name.as_str(), embeddable_href(f))),
    );
}

/// Centered row of rounded chips, each with an optional leading logo.
fn render_chip_row<'a>(
    out: &mut String,
    scene: &Scene,
    y: f64,
    height: f64,
    font_size: f64,
    measurer: &dyn TextMeasurer,
    items: impl Iterator<Item = (&'a str, Option<&'a str>)>,
) {
    let style = TextStyle {
        font_size,
        ..TextStyle::default()
    };
    let gap = font_size * 0.6;
    let pad = font_size * 0.6;
    let logo = font_size * 1.4;

    let items: Vec<(String, Option<&str>, f64)> = items
        .map(|(label, href)| {
            let label = ellipsize(label, CHIP_LABEL_MAX_CHARS);
            let mut w = measurer.measure(&label, &style).width + 2.0 * pad;
            if href.is_some() {
                w += logo + pad * 0.5;
            }
            (label, href, w)
        })
        .collect();

    let total: f64 = items.iter().map(|(_, _, w)| w).sum::<f64>()
        + gap * items.len().saturating_sub(1) as f64;
    let mut x = (scene.width - total) / 2.0;

    for (label, href, w) in &items {
        let _ = write!(
            out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="#ffffff" fill-opacity="0.14"/>"#,
            x = fmt(x),
            y = fmt(y),
            w = fmt(*w),
            h = fmt(height),
            rx = fmt(height / 2.0),
        );
        let mut text_x = x + w / 2.0;
        if let Some(href) = href {
            let _ = write!(
                out,
                r#"<image x="{x}" y="{y}" width="{s}" height="{s}" href="{href}"/>"#,
                x = fmt(x + pad * 0.75),
                y = fmt(y + (height - logo) / 2.0),
                s = fmt(logo),
                href = escape_xml(href),
            );
            text_x += (logo + pad * 0.5) / 2.0;
        }
        let _ = write!(
            out,
            r#"<text class="chip-label" x="{x}" y="{ty}" font-size="{fs}">{text}</text>"#,
            x = fmt(text_x),
            ty = fmt(y + height / 2.0 + font_size * 0.35),
            fs = fmt(font_size),
            text = escape_xml(label),
        );
        x += w + gap;
    }
}

fn render_facility_grid(out: &mut String, scene: &Scene, b: &FacilityGridBlock) {
    let gap = (scene.width - 2.0 * CANVAS_MARGIN - 4.0 * b.cell) / 3.0;
    let mut row_y = b.y;
    for group in [&b.facilities, &b.labs] {
        if group.is_empty() {
            continue;
        }
        let count = group.len() as f64;
        let row_w = count * b.cell + (count - 1.0) * gap;
        let mut x = (scene.width - row_w) / 2.0;
        for facility in group.iter() {
            let _ = write!(
                out,
                r#"<rect x="{x}" y="{y}" width="{s}" height="{s}" rx="{rx}" fill="#ffffff" fill-opacity="0.12"/>"#,
                x = fmt(x),
                y = fmt(row_y),
                s = fmt(b.cell),
                rx = fmt(b.cell * 0.12),
            );
            if let Some(href) = embeddable_href(facility) {
                let inset = b.cell * 0.15;
                let _ = write!(
                    out,
                    r#"<image x="{x}" y="{y}" width="{s}" height="{s}" href="{href}"/>"#,
                    x = fmt(x + inset),
                    y = fmt(row_y + inset),
                    s = fmt(b.cell - 2.0 * inset),
                    href = escape_xml(href),
                );
            } else {
                let label = ellipsize(&facility.name, 12);
                let _ = write!(
                    out,
                    r#"<text class="chip-label" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
                    x = fmt(x + b.cell / 2.0),
                    y = fmt(row_y + b.cell / 2.0),
                    fs = fmt(b.cell * 0.14),
                    text = escape_xml(&label),
                );
            }
            x += b.cell + gap;
        }
        row_y += b.cell + gap;
    }
}

fn render_cta(out: &mut String, scene: &Scene, b: &CallToActionBlock, measurer: &dyn TextMeasurer) {
    let style = TextStyle {
        font_size: b.font_size,
        ..TextStyle::default()
    };
    let w = (measurer.measure(&b.text, &style).width + 2.0 * b.font_size)
        .min(scene.width - 2.0 * CANVAS_MARGIN);
    let cx = scene.width / 2.0;
    let _ = write!(
        out,
        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}"/>"#,
        x = fmt(cx - w / 2.0),
        y = fmt(b.y),
        w = fmt(w),
        h = fmt(b.height),
        rx = fmt(b.height / 2.0),
        fill = escape_xml(&b.fill),
    );
    let _ = write!(
        out,
        r#"<text class="cta-label" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
        x = fmt(cx),
        y = fmt(b.y + b.height / 2.0 + b.font_size * 0.35),
        fs = fmt(b.font_size),
        text = escape_xml(&b.text),
    );
}

fn render_footer(out: &mut String, scene: &Scene, b: &FooterBlock) {
    let text = match (b.broker_name.as_deref(), b.broker_phone.as_deref()) {
        (Some(name), Some(phone)) => format!("{name} · {phone}"),
        (Some(name), None) => name.to_string(),
        (None, Some(phone)) => phone.to_string(),
        (None, None) => return,
    };
    let _ = write!(
        out,
        r#"<text class="footer-label" x="{x}" y="{y}" font-size="{fs}">{text}</text>"#,
        x = fmt(scene.width / 2.0),
        y = fmt(b.y + b.height / 2.0 + b.font_size * 0.35),
        fs = fmt(b.font_size),
        text = escape_xml(&text),
    );
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 100.0).round() / 100.0;
    if r == -0.0 {
        r = 0.0;
    }
    let mut s = format!("{r:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
