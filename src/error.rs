//! Error types for the crafting substrate
//!
//! Only true misuse is an error here. Crafting failures (gate misses, ash)
//! are normal outcomes carried by the returned material's kind, never by
//! this enum.

use thiserror::Error;

use crate::element::Element;
use crate::material::MaterialKind;

/// Result type for substrate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by construction, validation, and craft preconditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Cauldron strength must stay positive, at construction and at every
    /// strength check.
    #[error("cauldron strength must be positive, but found {0}")]
    NonPositiveStrength(f64),

    /// A `Nothing` or `Ash` material was fed back into the cauldron.
    #[error("cannot craft with {0} as an ingredient")]
    UnusableIngredient(MaterialKind),

    /// The cauldron carries a status effect and refuses to craft until it
    /// has been fixed.
    #[error("cauldron is afflicted and must be fixed before crafting")]
    AfflictedCauldron,

    /// A named-element magnitude was supplied negative ("negative water" is
    /// spelled "fire").
    #[error("magnitude of {element} must be non-negative, got {value}")]
    NegativeMagnitude { element: Element, value: f64 },

    /// A mastery entry was configured negative.
    #[error("mastery of {element} must be non-negative, got {value}")]
    NegativeMastery { element: Element, value: f64 },

    /// No element goes by that name.
    #[error("unknown element name: {0:?}")]
    UnknownElement(String),
}
