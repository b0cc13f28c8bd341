//! Interfaces of the external collaborators the engine calls.
//!
//! Request/response only; nothing here assumes collaborator internals. The
//! traits are executor-free (`BoxFuture`), so integrations pick their own
//! runtime. All failures are transient and user-visible: the current scene
//! and the refinement history stay unmodified when a call errors.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::MessageAngle;
use crate::layout::AspectVariant;
use crate::session::{PlanDetails, PriceTier, TemplateVariant};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} is unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },

    #[error("{service} rejected the request: {message}")]
    Rejected {
        service: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub tiers: Vec<PriceTier>,
    pub plan: PlanDetails,
}

#[derive(Debug, Clone)]
pub struct CopyRequest {
    pub angle: MessageAngle,
    pub operator: String,
    pub plan: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleCopy {
    pub headline: String,
    pub badge: String,
}

#[derive(Debug, Clone)]
pub struct RefineRequest {
    /// Current raster to refine.
    pub bytes: Vec<u8>,
    pub operator: String,
    pub plan: Option<String>,
    pub template: TemplateVariant,
    pub aspect: AspectVariant,
    pub instruction: Option<String>,
    /// Optional predecessor raster for model context.
    pub prior: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct AssetHit {
    pub id: String,
    pub name: String,
    pub thumb_url: Url,
    pub full_url: Url,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub broker_id: String,
    pub operator_id: String,
    pub template_id: String,
}

#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Durable public URL of the uploaded raster.
    pub url: Url,
}

pub trait PricingService {
    fn quote<'a>(
        &'a self,
        operator_id: &'a str,
        plan_category: &'a str,
    ) -> BoxFuture<'a, ServiceResult<PriceQuote>>;
}

pub trait CopyGenerator {
    fn generate(&self, request: CopyRequest) -> BoxFuture<'_, ServiceResult<AngleCopy>>;
}

pub trait ImageRefiner {
    fn refine(&self, request: RefineRequest) -> BoxFuture<'_, ServiceResult<Vec<u8>>>;
}

pub trait AssetSearch {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, ServiceResult<Vec<AssetHit>>>;
}

pub trait UploadStore {
    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, ServiceResult<UploadReceipt>>;
}
