/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum TestkitError {
    /// Lookup of a configuration key that was never registered.
    #[error("configuration key \"{0}\" not found")]
    KeyNotFound(String),
    /// A configuration value that cannot be parsed as the requested type.
    #[error("configuration key \"{key}\" holds non-numeric value \"{value}\"")]
    InvalidFormat {
        /// The registered key whose value failed to parse.
        key: String,
        /// The stored text that failed to parse.
        value: String,
    },
    /// Caller-supplied argument rejected up front.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Browser configuration or launch failure.
    #[error("browser launch error: {0}")]
    Launch(String),
    /// DevTools protocol error from `chromiumoxide`.
    #[error("cdp error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// Timed out waiting for an element to reach the requested state.
    #[error("timed out after {timeout_ms} ms waiting for selector \"{selector}\"")]
    WaitTimeout {
        /// CSS selector that never reached the requested state.
        selector: String,
        /// Budget that was exhausted, in milliseconds.
        timeout_ms: u64,
    },
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Response status did not match the caller's expectation.
    #[error("status code mismatch: expected {expected}, got {actual}")]
    StatusMismatch {
        /// Status the caller asserted.
        expected: u16,
        /// Status the server returned.
        actual: u16,
    },
    /// Response body decoding error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Filesystem error while managing test artifacts.
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
}
