use crate::errors::EffectError;
use crate::models::ActionDescriptor;

/// Renders and reverts actions. The engine knows nothing about what an
/// action does beyond its descriptor.
pub trait IEffectApplier: Send {
    /// Apply an admitted action. Must return without blocking the drain loop.
    fn apply(&mut self, descriptor: &ActionDescriptor) -> Result<(), EffectError>;

    /// Revert whatever the last applied action changed.
    fn clear(&mut self) -> Result<(), EffectError>;
}
