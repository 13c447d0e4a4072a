//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`MoveError`, `CombatError`, `ItemError`) live next to
//! the actions they validate. Every rejection is non-fatal: the engine leaves
//! the state untouched apart from an optional advisory message.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same intent may succeed later (e.g. wall in the way, not your turn).
    Recoverable,

    /// Invalid input that should not be retried unchanged (e.g. unknown item).
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// The game state can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the error variant, suitable for logs and tests.
    fn error_code(&self) -> &'static str;

    /// User-facing status message to show for this rejection, if any.
    ///
    /// Rejections without an advisory are ignored silently.
    fn advisory(&self) -> Option<&'static str> {
        None
    }
}
