#![forbid(unsafe_code)]

//! Template composer + SVG emitter for vitrine scenes.
//!
//! The composer is a pure function from resolved selections to a typed
//! scene description ([`model::Scene`]); the SVG emitter turns that scene
//! into markup the raster pipeline can capture. Neither touches the
//! network or the filesystem.

pub mod compose;
pub mod model;
pub mod svg;
pub mod text;

pub use compose::compose_scene;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scene does not fit its canvas: {message}")]
    SceneOverflow { message: String },

    #[error("invalid scene: {message}")]
    InvalidScene { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
