//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Domain-specific errors (e.g., `ActionError`) are defined in their respective
//! modules alongside the code that produces them.
//!
//! # Design Principles
//!
//! - **Never fatal**: no error in this crate escapes the simulation boundary as a panic
//! - **Severity Classification**: errors are categorized so the runtime knows whether
//!   to notify the player, log quietly, or investigate

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: a precondition was not met; the player may be told why
/// - **Validation**: the referenced object does not exist (benign race with a removal)
/// - **Internal**: an invariant check failed after mutation; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry later or after changing the situation.
    ///
    /// Examples: target out of range, inventory full, not enough seeds
    Recoverable,

    /// Validation error - the referenced id is unknown or of the wrong kind.
    ///
    /// Examples: entity already looted, item already opened
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: an entity left alive with zero hit points
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and assertions in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
