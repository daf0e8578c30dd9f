use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by typed channel-value accessors.
///
/// The wire format carries an untyped `value` next to a one-character type
/// tag, so a reader can ask for a representation the sender never stored.
/// Those mismatches surface here, at read time, never during decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel was decoded or constructed without any value.
    #[error("channel value is not set")]
    ValueNil,

    /// The stored representation kind conflicts with the requested accessor.
    #[error("channel value is not a {expected}")]
    TypeMismatch { expected: &'static str },
}

impl ChannelError {
    pub(crate) fn not_a_number() -> Self {
        ChannelError::TypeMismatch { expected: "number" }
    }

    pub(crate) fn not_a_hex_string() -> Self {
        ChannelError::TypeMismatch {
            expected: "hex string",
        }
    }
}

/// Errors returned by [`crate::WebhookSender::send`].
///
/// One call is one attempt: there is no retry policy at this layer, so every
/// failure mode is reported to the caller as-is.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to serialize payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to send webhook request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with a non-200 status. The response body text is
    /// carried verbatim so the caller can surface the platform's diagnostics.
    #[error("webhook send failed with status {status}: {body}")]
    Remote { status: StatusCode, body: String },
}
