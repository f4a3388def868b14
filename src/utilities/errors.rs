//! Error taxonomy for the generation engine.
//!
//! Transport failures from the backend adapter propagate unmodified and
//! are never retried here; conformance failures (parse or validation)
//! are recovered inside the engine's repair and retry loops and only
//! reach the caller once the whole budget is exhausted.

use thiserror::Error;

use crate::llms::base_backend::BackendError;
use crate::schema::validate::Violation;

/// Terminal error of a `generate` call.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Adapter-level failure (connectivity, authentication, malformed
    /// backend envelope). Surfaced immediately; retry policy for these
    /// belongs to the adapter, not the engine.
    #[error(transparent)]
    Transport(#[from] BackendError),

    /// Every repair round-trip on every attempt produced a
    /// non-conforming reply. Carries the violation list of the last
    /// rejection; a parse failure is represented as a single violation
    /// with an empty path.
    #[error("output failed schema validation after {attempts} backend round-trips")]
    Exhausted {
        /// Total backend round-trips issued before giving up.
        attempts: u32,
        /// The last rejection's violations, verbatim.
        violations: Vec<Violation>,
    },
}
