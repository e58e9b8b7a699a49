/// Failures raised while turning a signal into an action descriptor.
///
/// A resolver that simply has no action for an input returns `Ok(None)`;
/// these variants are for genuine faults.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("malformed payload for {signal_type}: {reason}")]
    MalformedPayload { signal_type: String, reason: String },

    #[error("resolver unavailable: {reason}")]
    Unavailable { reason: String },
}
