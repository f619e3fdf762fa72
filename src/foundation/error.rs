/// Convenience result type used across Reelforge.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every fatal condition aborts the whole render request; nothing here is
/// recovered from silently. Transient conditions (retryable fetches, unknown
/// animation names, absent optional tracks) are handled locally and never
/// surface as a `ReelError`.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Malformed or missing required input field. Raised before any network
    /// activity takes place.
    #[error("parse error in field '{field}': {reason}")]
    Parse {
        /// Logical document field that failed to decode.
        field: String,
        /// Human-readable decode failure description.
        reason: String,
    },

    /// A remote asset stayed unreachable after the retry budget.
    #[error("failed to resolve '{url}' after {attempts} attempt(s): {reason}")]
    Resolution {
        /// The URL that could not be fetched.
        url: String,
        /// Number of fetch attempts performed.
        attempts: u32,
        /// Last underlying fetch failure.
        reason: String,
    },

    /// A temporal invariant was violated while assembling the timeline.
    #[error("schedule error in {track} track: {detail}")]
    Schedule {
        /// Track the offending spans belong to.
        track: String,
        /// Description of the violated invariant, including the spans.
        detail: String,
    },

    /// Surfaced opaquely from the encoding collaborator.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Parse`] value.
    pub fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`ReelError::Resolution`] value.
    pub fn resolution(url: impl Into<String>, attempts: u32, reason: impl Into<String>) -> Self {
        Self::Resolution {
            url: url.into(),
            attempts,
            reason: reason.into(),
        }
    }

    /// Build a [`ReelError::Schedule`] value.
    pub fn schedule(track: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Schedule {
            track: track.into(),
            detail: detail.into(),
        }
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
