//! Common error types used across the workspace.
//!
//! Each failure class gets its own typed error; [`PacError`] unifies them
//! via `#[from]` conversions (no `String` variants). All three classes abort
//! a composition entirely — there is no local recovery.

use crate::id::Handle;
use crate::slot::SlotId;

/// Top-level error for configuration validation and device composition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacError {
    /// Malformed, missing, or extra configuration field. Caught entirely
    /// during validation, before any instantiation.
    #[error("Schema error")]
    Schema(#[from] SchemaError),

    /// A reference slot names an identity with no prior declaration.
    #[error("Unresolved reference")]
    UnresolvedReference(#[from] UnresolvedReferenceError),

    /// Instantiation or registration of a device/capability failed.
    #[error("Construction error")]
    Construction(#[from] ConstructionError),
}

/// A configuration tree failed schema validation.
///
/// Carries the dotted path of the offending field so the operator can fix
/// the configuration directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration at `{path}`: {kind}")]
pub struct SchemaError {
    /// Dotted path to the offending field (e.g. `eco_switch.sort_weight`).
    pub path: String,
    /// What went wrong at that path.
    pub kind: SchemaErrorKind,
}

impl SchemaError {
    /// Build a schema error for the given field path.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: SchemaErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// The reason a field failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaErrorKind {
    #[error("required field is missing")]
    Missing,
    #[error("unknown field")]
    UnknownField,
    #[error("unknown variant `{0}`, expected `cnt` or `wlan`")]
    UnknownVariant(String),
    #[error("expected a table")]
    ExpectedTable,
    #[error("expected a string")]
    ExpectedString,
    #[error("expected an integer")]
    ExpectedInteger,
    /// The field is fixed per slot and may not be redefined (e.g. a swing
    /// selector's option set, a sensor's unit).
    #[error("`{0}` is fixed for this slot and cannot be overridden")]
    FixedField(&'static str),
}

/// A reference slot named an identity that was never declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no sensor declared with id `{handle}`")]
pub struct UnresolvedReferenceError {
    /// The missing identity.
    pub handle: Handle,
}

/// Construction of the device graph failed after validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// A slot received a second binding call. Wiring is bind-exactly-once.
    #[error("slot `{0}` is already bound")]
    SlotAlreadyBound(SlotId),
    /// A binding call carried a capability of the wrong kind for the slot.
    #[error("slot `{0}` cannot hold a capability of this kind")]
    SlotKindMismatch(SlotId),
    /// An external collaborator refused a registration.
    #[error("collaborator `{collaborator}` rejected `{component}`")]
    Collaborator {
        collaborator: &'static str,
        component: String,
    },
}
