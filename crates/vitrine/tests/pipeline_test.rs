//! End-to-end pipeline: selections → scene → raster → refinement history.

use futures::executor::block_on;
use futures::future::BoxFuture;

use vitrine::render::CreativeRenderer;
use vitrine::services::{
    ImageRefiner, RefineRequest, ServiceError, ServiceResult, UploadReceipt, UploadRequest,
    UploadStore,
};
use vitrine::{PriceTier, SceneSelections, SessionState, TemplateVariant};

fn selections() -> SceneSelections {
    SceneSelections {
        operator: "amil".to_string(),
        region: Some("zona-sul".to_string()),
        angle: "economia".to_string(),
        template: TemplateVariant::Table,
        price_tiers: vec![PriceTier {
            age_band: "29-33".to_string(),
            amount: "R$ 412,90".to_string(),
        }],
        ..SceneSelections::default()
    }
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert_eq!(&bytes[12..16], b"IHDR");
    let w = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let h = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (w, h)
}

/// Refiner that prepends a marker byte, standing in for the AI round-trip.
struct MarkerRefiner;

impl ImageRefiner for MarkerRefiner {
    fn refine(&self, request: RefineRequest) -> BoxFuture<'_, ServiceResult<Vec<u8>>> {
        Box::pin(async move {
            let mut out = vec![0xAB];
            out.extend_from_slice(&request.bytes);
            Ok(out)
        })
    }
}

struct DownRefiner;

impl ImageRefiner for DownRefiner {
    fn refine(&self, _request: RefineRequest) -> BoxFuture<'_, ServiceResult<Vec<u8>>> {
        Box::pin(async {
            Err(ServiceError::Unavailable {
                service: "image refinement",
                message: "timeout".to_string(),
            })
        })
    }
}

#[test]
fn export_capture_hits_the_true_target_dimensions() {
    let renderer = CreativeRenderer::new();
    let image = renderer.capture_export_sync(&selections()).unwrap();
    assert_eq!(png_dimensions(&image.bytes), (1080, 1350));

    let mut story = selections();
    story.aspect = vitrine::AspectVariant::Story;
    let image = renderer.capture_export_sync(&story).unwrap();
    assert_eq!(png_dimensions(&image.bytes), (1080, 1920));
}

#[test]
fn preview_capture_uses_the_fixed_display_scale() {
    let renderer = CreativeRenderer::new();
    let image = renderer.capture_preview_sync(&selections()).unwrap();
    // Feed canvas is 540x675 layout units at a 0.5 preview scale.
    assert_eq!(png_dimensions(&image.bytes), (270, 338));
}

#[test]
fn refinement_round_trip_appends_and_undoes() {
    let renderer = CreativeRenderer::new();
    let mut session = SessionState::new();
    session.selections = selections();

    let root = renderer.capture_export_sync(&session.selections).unwrap();
    let root_id = session.history.append(root).id.clone();

    let refiner = MarkerRefiner;
    let generation = session.begin_refinement();
    let current = session.history.current().unwrap();
    let refined = block_on(refiner.refine(RefineRequest {
        bytes: current.bytes.clone(),
        operator: session.selections.operator.clone(),
        plan: session.selections.plan.name.clone(),
        template: session.selections.template,
        aspect: session.selections.aspect,
        instruction: Some("deixa o fundo mais vibrante".to_string()),
        prior: None,
    }))
    .unwrap();

    assert!(session.apply_refinement(
        generation,
        vitrine::GeneratedImage::new(refined, Some("deixa o fundo mais vibrante".to_string())),
    ));
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.history.current().unwrap().bytes[0], 0xAB);

    let restored = session.history.undo().unwrap();
    assert_eq!(restored.id, root_id);
}

#[test]
fn failed_refinement_leaves_history_untouched() {
    let renderer = CreativeRenderer::new();
    let mut session = SessionState::new();
    session.selections = selections();

    let root = renderer.capture_export_sync(&session.selections).unwrap();
    session.history.append(root);

    let refiner = DownRefiner;
    let _generation = session.begin_refinement();
    let result = block_on(refiner.refine(RefineRequest {
        bytes: session.history.current().unwrap().bytes.clone(),
        operator: session.selections.operator.clone(),
        plan: None,
        template: session.selections.template,
        aspect: session.selections.aspect,
        instruction: None,
        prior: None,
    }));

    assert!(result.is_err());
    // The error is surfaced to the user; nothing was appended and the next
    // attempt simply takes a new generation.
    assert_eq!(session.history.len(), 1);
}

#[test]
fn unknown_operator_aborts_before_any_capture() {
    let renderer = CreativeRenderer::new();
    let mut bad = selections();
    bad.operator = "inexistente".to_string();
    assert!(renderer.capture_export_sync(&bad).is_err());
}

/// Upload stub that derives a deterministic public URL from the request.
struct StubStore;

impl UploadStore for StubStore {
    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, ServiceResult<UploadReceipt>> {
        Box::pin(async move {
            let url = format!(
                "https://storage.example.com/{}/{}/{}.png",
                request.broker_id, request.operator_id, request.template_id
            );
            Ok(UploadReceipt {
                url: url.parse().expect("stub URL is well-formed"),
            })
        })
    }
}

#[test]
fn export_uploads_to_a_durable_url() {
    let renderer = CreativeRenderer::new();
    let selections = selections();
    let image = renderer.capture_export_sync(&selections).unwrap();

    let store = StubStore;
    let receipt = block_on(store.upload(UploadRequest {
        bytes: image.bytes,
        broker_id: "corretora-horizonte".to_string(),
        operator_id: selections.operator.clone(),
        template_id: selections.template.id().to_string(),
    }))
    .unwrap();

    assert_eq!(receipt.url.scheme(), "https");
    assert!(receipt.url.path().ends_with("/amil/table.png"));
}

#[test]
fn jpeg_export_is_encodable() {
    let renderer = CreativeRenderer::new();
    let bytes = renderer
        .capture_export_jpeg_sync(
            &selections(),
            &vitrine::render::raster::RasterOptions::default(),
        )
        .unwrap();
    assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
}
