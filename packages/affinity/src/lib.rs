//! Affinity Verdict Extraction Library
//!
//! Recovers a two-field verdict (integer score, short commentary) from the
//! free-text reply of a generative model, tolerating the formatting noise
//! such replies carry: markdown code fences, unquoted keys, stray quoting
//! and escape sequences. When the reply is beyond recovery, a deterministic
//! fallback generator supplies a plausible substitute so callers always get
//! a usable verdict.
//!
//! # Usage
//!
//! ```rust
//! use affinity::{extract, fallback};
//!
//! let verdict = match extract(r#"{"similarity": 78, "evaluation": "音调和谐"}"#) {
//!     Ok(verdict) => verdict,
//!     // Unparsable content: substitute, never surface a parse error.
//!     Err(_) => fallback::generate(),
//! };
//! assert_eq!(verdict.score, 78);
//! assert_eq!(verdict.commentary, "音调和谐");
//! ```
//!
//! # Modules
//!
//! - [`extract`](mod@extract) - scan-based field extraction
//! - [`fallback`] - substitute verdict generation
//! - [`error`] - typed extraction errors
//! - [`result`] - the [`AffinityResult`] value type

pub mod error;
pub mod extract;
pub mod fallback;
pub mod result;

// Re-export core types at crate root
pub use error::ExtractError;
pub use extract::extract;
pub use fallback::{FallbackGenerator, FALLBACK_PHRASES};
pub use result::AffinityResult;
