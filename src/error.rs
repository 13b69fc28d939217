use thiserror::Error;

/// Errors raised while feeding or querying the catalog.
///
/// Rendered states (hidden list, no results, not found page) are not errors;
/// these are only the failures a caller has to report.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Data source '{table}' unavailable: {reason}")]
    SourceUnavailable { table: String, reason: String },

    #[error("Catalog not initialized. Call init_catalog(config_json) first.")]
    NotInitialized,

    #[error("No {0} found")]
    NotFound(String),

    #[error("Malformed URI sequence in '{0}'")]
    MalformedUri(String),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
