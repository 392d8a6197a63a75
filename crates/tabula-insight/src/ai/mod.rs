//! Plain-language explanations of a target/feature relationship.
//!
//! # Feature Flag
//!
//! The [`ExplanationProvider`] trait and the fallback logic are always
//! available. The Gemini client needs the `ai` feature (enabled by default):
//!
//! ```toml
//! tabula-insight = { version = "0.1", default-features = false }
//! ```
//!
//! Explanations never influence profiling or model analysis; a missing or
//! failing provider only swaps the text for [`FALLBACK_EXPLANATION`].

mod explain;
mod provider;

pub use explain::{
    ExplanationRequest, FALLBACK_EXPLANATION, explain_or_fallback, request_explanation,
    statistics_summary,
};
pub use provider::ExplanationProvider;

#[cfg(feature = "ai")]
mod gemini;

#[cfg(feature = "ai")]
pub use gemini::{API_KEY_ENV, GeminiConfig, GeminiConfigBuilder, GeminiProvider};
