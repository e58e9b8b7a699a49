//! Registry-backed resolver: signal type + payload → action descriptor.

use std::sync::Arc;

use pacer_core::errors::ResolveError;
use pacer_core::traits::IResolver;
use pacer_core::{ActionDescriptor, Lookup, Payload, SignalRegistry, Target};

/// Payload key naming the target of an action.
pub const TARGET_ID_KEY: &str = "targetId";
const AUTO_TARGET: &str = "auto";

/// Resolves signals through a static [`SignalRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryResolver {
    registry: Arc<SignalRegistry>,
}

impl RegistryResolver {
    pub fn new(registry: Arc<SignalRegistry>) -> Self {
        Self { registry }
    }

    /// `None` when the payload names a target that cannot be used: an id the
    /// registry does not know, or a `targetId` that is not a string or number.
    fn select_target(&self, signal_type: &str, payload: &Payload) -> Option<Target> {
        let id = match payload.get(TARGET_ID_KEY) {
            None | Some(Payload::Null) => return Some(Target::Auto),
            Some(Payload::String(s)) if s == AUTO_TARGET => return Some(Target::Auto),
            Some(Payload::String(s)) => s.clone(),
            Some(Payload::Number(n)) => number_id(n),
            Some(other) => {
                tracing::warn!(signal_type, target = %other, "invalid target id");
                return None;
            }
        };

        let known = self.registry.targets();
        if known.is_empty() || known.iter().any(|t| *t == id) {
            Some(Target::Named(id))
        } else {
            tracing::warn!(signal_type, target = %id, "unknown target id");
            None
        }
    }
}

/// Render a numeric id the way hosts write it: `2.0` and `2` are both `"2"`.
fn number_id(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl IResolver for RegistryResolver {
    fn resolve(
        &self,
        signal_type: &str,
        payload: &Payload,
    ) -> Result<Option<ActionDescriptor>, ResolveError> {
        let entry = match self.registry.lookup(signal_type) {
            Lookup::Registered(entry) => entry,
            Lookup::Unregistered => return Ok(None),
        };
        let Some(target) = self.select_target(signal_type, payload) else {
            return Ok(None);
        };
        Ok(Some(ActionDescriptor {
            pattern_name: entry.pattern.clone(),
            response_kind: entry.response.clone(),
            target,
            duration_ms: entry.duration_ms,
            priority: entry.priority,
            payload: payload.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_core::config::RegistryConfig;
    use pacer_core::Priority;
    use serde_json::json;

    fn resolver_with_targets(targets: &[&str]) -> RegistryResolver {
        let config = RegistryConfig {
            targets: targets.iter().map(|t| t.to_string()).collect(),
            ..RegistryConfig::default()
        };
        RegistryResolver::new(Arc::new(SignalRegistry::from_config(&config).unwrap()))
    }

    #[test]
    fn resolves_registered_signal() {
        let resolver = resolver_with_targets(&[]);
        let descriptor = resolver
            .resolve("undo-loop", &json!({ "targetId": 2 }))
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.pattern_name, "focus-assist");
        assert_eq!(descriptor.response_kind, "highlight-main-action");
        assert_eq!(descriptor.priority, Priority(1));
        assert_eq!(descriptor.duration_ms, 3_000);
        assert_eq!(descriptor.target, Target::Named("2".into()));
        assert_eq!(descriptor.payload, json!({ "targetId": 2 }));
    }

    #[test]
    fn unregistered_signal_has_no_action() {
        let resolver = resolver_with_targets(&[]);
        assert!(resolver.resolve("scroll-storm", &json!({})).unwrap().is_none());
    }

    #[test]
    fn missing_or_auto_target_is_auto() {
        let resolver = resolver_with_targets(&["tile-0"]);
        for payload in [json!({}), json!({ "targetId": "auto" }), json!(null)] {
            let descriptor = resolver.resolve("dwell", &payload).unwrap().unwrap();
            assert_eq!(descriptor.target, Target::Auto);
        }
    }

    #[test]
    fn unknown_target_yields_no_action() {
        let resolver = resolver_with_targets(&["tile-0", "tile-1"]);
        assert!(resolver
            .resolve("dwell", &json!({ "targetId": "tile-9" }))
            .unwrap()
            .is_none());
        assert!(resolver
            .resolve("dwell", &json!({ "targetId": "tile-1" }))
            .unwrap()
            .is_some());
    }

    #[test]
    fn structured_target_yields_no_action() {
        let resolver = resolver_with_targets(&[]);
        for payload in [
            json!({ "targetId": { "x": 1 } }),
            json!({ "targetId": true }),
            json!({ "targetId": [1, 2] }),
        ] {
            assert_eq!(resolver.resolve("dwell", &payload).unwrap(), None);
        }
    }

    #[test]
    fn integral_float_id_matches_the_integer_target() {
        let resolver = resolver_with_targets(&["2", "2.5"]);
        let whole = resolver
            .resolve("dwell", &json!({ "targetId": 2.0 }))
            .unwrap()
            .unwrap();
        assert_eq!(whole.target, Target::Named("2".into()));
        let fractional = resolver
            .resolve("dwell", &json!({ "targetId": 2.5 }))
            .unwrap()
            .unwrap();
        assert_eq!(fractional.target, Target::Named("2.5".into()));
        assert!(resolver
            .resolve("dwell", &json!({ "targetId": 3.0 }))
            .unwrap()
            .is_none());
    }
}
