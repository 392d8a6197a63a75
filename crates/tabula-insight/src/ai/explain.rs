use super::ExplanationProvider;
use crate::error::{InsightError, Result};
use crate::types::DatasetMeta;
use serde::Serialize;
use tracing::{info, warn};

/// Text shown whenever no provider is configured or the provider fails.
pub const FALLBACK_EXPLANATION: &str =
    "AI explanations are disabled in this build (no API connection). The statistics above are still valid.";

/// What an explanation is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationRequest {
    pub target: String,
    pub feature: String,
    /// Short statistics context, see [`statistics_summary`].
    pub statistics: String,
}

impl ExplanationRequest {
    pub fn new(target: impl Into<String>, feature: impl Into<String>, statistics: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            feature: feature.into(),
            statistics: statistics.into(),
        }
    }

    /// Build a request whose statistics come from a dataset profile.
    pub fn from_meta(meta: &DatasetMeta, target: &str, feature: &str) -> Self {
        Self::new(target, feature, statistics_summary(meta, target, feature))
    }
}

/// One-line description of a target/feature pair.
///
/// Format: `Target is T (type), Feature is F (type). Mean of feature: M.`
/// with the mean to two decimals, or `N/A` when the feature has none.
/// Columns missing from the profile are typed `unknown`.
pub fn statistics_summary(meta: &DatasetMeta, target: &str, feature: &str) -> String {
    let type_of = |column: &str| {
        meta.column_stats(column)
            .map(|s| s.column_type.as_str())
            .unwrap_or("unknown")
    };
    let feature_mean = meta
        .column_stats(feature)
        .and_then(|s| s.mean)
        .map(|m| format!("{:.2}", m))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Target is {} ({}), Feature is {} ({}). Mean of feature: {}.",
        target,
        type_of(target),
        feature,
        type_of(feature),
        feature_mean
    )
}

/// Ask `provider` for an explanation.
///
/// Transport failures surface as [`InsightError::HttpRequest`], anything
/// else the provider reports (including blank text) as
/// [`InsightError::AiClientError`].
pub fn request_explanation(provider: &dyn ExplanationProvider, request: &ExplanationRequest) -> Result<String> {
    let text = provider.explain(request).map_err(provider_error)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(InsightError::AiClientError(format!(
            "{} returned an empty explanation",
            provider.name()
        )));
    }
    Ok(text.to_string())
}

fn provider_error(err: anyhow::Error) -> InsightError {
    #[cfg(feature = "ai")]
    let err = match err.downcast::<reqwest::Error>() {
        Ok(http) => return InsightError::HttpRequest(http),
        Err(other) => other,
    };
    InsightError::AiClientError(format!("{:#}", err))
}

/// Ask `provider` for an explanation, falling back to
/// [`FALLBACK_EXPLANATION`] when there is no provider, it errors or it
/// returns blank text.
pub fn explain_or_fallback(provider: Option<&dyn ExplanationProvider>, request: &ExplanationRequest) -> String {
    let Some(provider) = provider else {
        info!("No explanation provider configured, using fallback text");
        return FALLBACK_EXPLANATION.to_string();
    };

    match request_explanation(provider, request) {
        Ok(text) => text,
        Err(e) => {
            warn!("{} explanation failed [{}]: {}", provider.name(), e.error_code(), e);
            FALLBACK_EXPLANATION.to_string()
        }
    }
}
