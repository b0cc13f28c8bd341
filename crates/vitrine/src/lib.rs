#![forbid(unsafe_code)]

//! `vitrine` is a headless creative-generation engine: it turns broker
//! selections (operator, region, angle, template, prices) into social-media
//! banner rasters.
//!
//! # Features
//!
//! - `render`: enable scene composition + SVG emission (`vitrine::render`)
//! - `raster`: enable PNG/JPG capture via pure-Rust SVG rasterization

pub use vitrine_core::*;

#[cfg(feature = "render")]
pub mod render {
    use std::sync::Arc;

    pub use vitrine_render::compose_scene;
    pub use vitrine_render::model::{Scene, VisualBlock};
    pub use vitrine_render::svg::{SvgRenderOptions, png_data_uri, render_scene_svg};
    pub use vitrine_render::text::{DeterministicTextMeasurer, TextMeasurer};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum CreativeError {
        #[error(transparent)]
        Resolve(#[from] vitrine_core::Error),
        #[error(transparent)]
        Render(#[from] vitrine_render::Error),
    }

    pub type Result<T> = std::result::Result<T, CreativeError>;

    /// Synchronous compose helper (executor-free).
    pub fn compose_scene_sync(
        engine: &vitrine_core::Engine,
        selections: &vitrine_core::SceneSelections,
    ) -> Result<Scene> {
        let ctx = engine.scene_context(selections)?;
        Ok(compose_scene(selections, &ctx))
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        engine: &vitrine_core::Engine,
        selections: &vitrine_core::SceneSelections,
        measurer: &dyn TextMeasurer,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let scene = compose_scene_sync(engine, selections)?;
        Ok(render_scene_svg(&scene, measurer, svg_options)?)
    }

    pub async fn render_svg(
        engine: &vitrine_core::Engine,
        selections: &vitrine_core::SceneSelections,
        measurer: &dyn TextMeasurer,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(engine, selections, measurer, svg_options)
    }

    /// Convenience wrapper that bundles an [`vitrine_core::Engine`] with the
    /// measurer and SVG options UI integrations would otherwise thread
    /// through every call. Stays runtime-agnostic: all work is CPU-bound.
    #[derive(Clone)]
    pub struct CreativeRenderer {
        pub engine: vitrine_core::Engine,
        pub svg: SvgRenderOptions,
        pub measurer: Arc<dyn TextMeasurer + Send + Sync>,
    }

    impl Default for CreativeRenderer {
        fn default() -> Self {
            Self {
                engine: vitrine_core::Engine::new(),
                svg: SvgRenderOptions::default(),
                measurer: Arc::new(DeterministicTextMeasurer::default()),
            }
        }
    }

    impl CreativeRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_catalog(mut self, catalog: vitrine_core::Catalog) -> Self {
            self.engine = vitrine_core::Engine::with_catalog(catalog);
            self
        }

        pub fn compose_sync(
            &self,
            selections: &vitrine_core::SceneSelections,
        ) -> Result<Scene> {
            compose_scene_sync(&self.engine, selections)
        }

        pub fn render_svg_sync(
            &self,
            selections: &vitrine_core::SceneSelections,
        ) -> Result<String> {
            render_svg_sync(&self.engine, selections, self.measurer.as_ref(), &self.svg)
        }

        pub fn render_svg_sync_with_scene_id(
            &self,
            selections: &vitrine_core::SceneSelections,
            scene_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.scene_id = Some(scene_id.to_string());
            render_svg_sync(&self.engine, selections, self.measurer.as_ref(), &svg)
        }

        /// Captures the scene at the fixed preview scale. The returned node
        /// is not yet part of any history; appending is the caller's call,
        /// so a capture failure can never leave the chain half-mutated.
        #[cfg(feature = "raster")]
        pub fn capture_preview_sync(
            &self,
            selections: &vitrine_core::SceneSelections,
        ) -> raster::Result<vitrine_core::GeneratedImage> {
            let svg = self.render_svg_sync(selections)?;
            let png = raster::capture_preview(&svg)?;
            Ok(vitrine_core::GeneratedImage::new(png, None))
        }

        /// Captures the scene at its true target pixel dimensions.
        #[cfg(feature = "raster")]
        pub fn capture_export_sync(
            &self,
            selections: &vitrine_core::SceneSelections,
        ) -> raster::Result<vitrine_core::GeneratedImage> {
            let svg = self.render_svg_sync(selections)?;
            let png = raster::capture_export(&svg, selections.aspect)?;
            Ok(vitrine_core::GeneratedImage::new(png, None))
        }

        #[cfg(feature = "raster")]
        pub fn capture_export_jpeg_sync(
            &self,
            selections: &vitrine_core::SceneSelections,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg_sync(selections)?;
            let scale = raster::export_scale(selections.aspect);
            raster::svg_to_jpeg(
                &svg,
                &raster::RasterOptions {
                    scale,
                    ..options.clone()
                },
            )
        }
    }
}
