//! Common error infrastructure for battle-core.
//!
//! Domain errors live next to the operations that produce them
//! ([`CommandError`](crate::engine::CommandError) for rejected commands,
//! [`BattleError`](crate::engine::BattleError) for state machine misuse).
//! Each of them implements [`GameError`] so callers can classify failures
//! uniformly.
//!
//! The core never produces a fatal error: resources are clamped on every
//! mutation and missing content references resolve to no-ops.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may simply submit another command
/// - **Validation**: the request is malformed for the current state
/// - **Internal**: unexpected inconsistency, worth investigating
/// - **Fatal**: the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
