//! Per-kind configuration records.
//!
//! A clause or aggregation kind is not a type of its own: it is a generic
//! node carrying a small static record that says which options the kind
//! accepts, which of them are validated, how the clause body is laid out and
//! which child slots exist. Leaf builders in [`crate::queries`] and
//! [`crate::aggregations`] are thin wrappers over nodes configured this way.

use crate::error::{QueryError, Result};
use crate::validate::{default_validator, Validator};
use crate::WireValue;

/// One option a kind accepts.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Wire option name, e.g. `prefix_length`.
    pub name: &'static str,
    /// Validator run before the value is stored, if the option is constrained.
    pub validator: Option<Validator>,
}

impl OptionSpec {
    /// An option that accepts any value.
    pub const fn free(name: &'static str) -> Self {
        OptionSpec {
            name,
            validator: None,
        }
    }

    /// An option whose values are checked by `validator`.
    pub const fn checked(name: &'static str, validator: Validator) -> Self {
        OptionSpec {
            name,
            validator: Some(validator),
        }
    }
}

/// The set of options a kind accepts.
#[derive(Debug, Clone, Copy)]
pub enum OptionSet {
    /// Any option name is accepted; well-known constrained names are still
    /// validated (see [`default_validator`]).
    Open,
    /// Only the listed options are accepted.
    Only(&'static [OptionSpec]),
}

impl OptionSet {
    /// Resolves and validates an option assignment.
    ///
    /// Returns the value to store (validated values come back in canonical
    /// form). `kind` also selects kind-specific defaults on open tables;
    /// `context` only feeds error messages.
    pub(crate) fn resolve(
        &self,
        kind: &str,
        context: &str,
        option: &str,
        value: WireValue,
    ) -> Result<WireValue> {
        let validator = match self {
            OptionSet::Open => default_validator(kind, option),
            OptionSet::Only(specs) => match specs.iter().find(|spec| spec.name == option) {
                Some(spec) => spec.validator,
                None => {
                    tracing::debug!(option, kind, "option not accepted by kind");
                    return Err(QueryError::unsupported(format!("option `{option}`"), kind));
                }
            },
        };
        match validator {
            Some(validate) => validate(&value, option, context),
            None => Ok(value),
        }
    }
}

/// How a clause body is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `{ tag: { field: { ...options } } }`
    FieldKeyed,
    /// `{ tag: { ...options, slot: [children] } }`
    Flat,
}

/// Static configuration of a clause kind.
#[derive(Debug, Clone, Copy)]
pub struct ClauseShape {
    pub layout: Layout,
    pub options: OptionSet,
    /// Child slot names in wire order; the first is the default slot.
    /// Empty for leaf kinds.
    pub child_slots: &'static [&'static str],
}

impl ClauseShape {
    /// Open field-keyed leaf.
    pub const FIELD_KEYED: ClauseShape = ClauseShape {
        layout: Layout::FieldKeyed,
        options: OptionSet::Open,
        child_slots: &[],
    };

    /// Open flat leaf.
    pub const FLAT: ClauseShape = ClauseShape {
        layout: Layout::Flat,
        options: OptionSet::Open,
        child_slots: &[],
    };

    /// Returns `true` if the kind holds child clauses.
    pub fn is_compound(&self) -> bool {
        !self.child_slots.is_empty()
    }
}
