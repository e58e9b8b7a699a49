use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of signal types the registry can bind to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    /// Repeated undo: the user is confused.
    UndoLoop,
    /// Repeated hovering over the same element: overload.
    HoverRepeat,
    /// Navigating back and forth: hesitation.
    Backtrack,
    /// Lingering without acting: exploration.
    Dwell,
    /// A rapid sequence of actions.
    FastAction,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::UndoLoop,
        SignalKind::HoverRepeat,
        SignalKind::Backtrack,
        SignalKind::Dwell,
        SignalKind::FastAction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::UndoLoop => "undo-loop",
            SignalKind::HoverRepeat => "hover-repeat",
            SignalKind::Backtrack => "backtrack",
            SignalKind::Dwell => "dwell",
            SignalKind::FastAction => "fast-action",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known signal kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signal kind: {0}")]
pub struct UnknownSignalKind(pub String);

impl FromStr for SignalKind {
    type Err = UnknownSignalKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSignalKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind_from_its_display_form() {
        for kind in SignalKind::ALL {
            assert_eq!(kind.to_string().parse::<SignalKind>(), Ok(kind));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("scroll-storm".parse::<SignalKind>().is_err());
        assert!("UndoLoop".parse::<SignalKind>().is_err());
    }
}
