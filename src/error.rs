use thiserror::Error;

use crate::model::AssetId;

/// Reasons a placement or gesture was dropped. Callers treat every variant as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("no asset selected")]
    NoAssetSelected,
    #[error("reticle is not on a surface")]
    ReticleHidden,
    #[error("asset {0} is not loaded yet")]
    AssetNotReady(AssetId),
    #[error("asset {0} is already placed")]
    DuplicatePlacement(AssetId),
    #[error("no active selection")]
    NoActiveSelection,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no browser window")]
    NoWindow,
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("image {url} failed to decode")]
    Image { url: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("local storage unavailable")]
    StorageUnavailable,
    #[error("local storage write failed")]
    StorageWrite,
}
