//! Explanation provider trait.
//!
//! An [`ExplanationProvider`] turns a short statistics summary of a
//! target/feature pair into a plain-language explanation. Providers are
//! optional collaborators: callers go through
//! [`explain_or_fallback`](super::explain_or_fallback), which never fails.

use super::ExplanationRequest;
use anyhow::Result;

/// A text-generation backend that can explain a feature/target relationship.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one provider can be shared
/// between requests.
pub trait ExplanationProvider: Send + Sync {
    /// Produce an explanation for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or its response
    /// carries no text.
    fn explain(&self, request: &ExplanationRequest) -> Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Model used by this provider, if it exposes one.
    fn model(&self) -> Option<&str> {
        None
    }
}
