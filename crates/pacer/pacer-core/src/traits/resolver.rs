use crate::errors::ResolveError;
use crate::models::{ActionDescriptor, Payload};

/// Maps a raw signal into an action descriptor.
///
/// Must be a pure function of its inputs plus static configuration.
/// `Ok(None)` means "no action for this input" and is not a fault.
pub trait IResolver: Send + Sync {
    fn resolve(
        &self,
        signal_type: &str,
        payload: &Payload,
    ) -> Result<Option<ActionDescriptor>, ResolveError>;
}
