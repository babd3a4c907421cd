//! Elemental Cauldron - octonion crafting substrate
//!
//! Materials are eight-dimensional hypercomplex numbers. Combining them is
//! octonion multiplication: non-commutative, non-associative, and full of
//! surprises - two fiery ingredients can cancel into pure absence.
//!
//! # Core Types
//!
//! - **Octonion**: 8-component hypercomplex value type (the algebra)
//! - **Element / ElementalVector**: the 16-element signed reading of an
//!   octonion (8 opposing pairs, one per component)
//! - **Material**: immutable composition + quality + mass + provenance
//! - **Cauldron**: the mutable crafting state machine
//!
//! # Architecture: Algebra / Projection / Resolution
//!
//! The system separates into three layers:
//!
//! 1. **Algebra** - pure octonion arithmetic; every operation returns a new
//!    value
//! 2. **Projection** - the elemental lens: signed components split into
//!    non-negative named magnitudes
//! 3. **Resolution** - the cauldron: validation gates, quality scoring,
//!    mastery learning, remediation
//!
//! Only the cauldron mutates, and only through `&mut` methods; everything
//! below it is value types.
//!
//! # Core Concepts
//!
//! - **Strength gate**: compositions stronger than the cauldron destroy the
//!   attempt and leave an affliction behind
//! - **Mastery gate**: elements the cauldron has not mastered cannot be
//!   worked
//! - **Ash**: a craft that passes its gates but scores below the quality
//!   threshold crumbles into an unusable byproduct
//! - **Learning**: successful crafts grow mastery by the result's
//!   composition fractions (the gain always sums to 1)
//! - **Remediation**: an afflicted cauldron refuses to craft until
//!   [`Cauldron::fix`] neutralizes the effect with a suitable agent
//!
//! # Example: brewing past the gates
//!
//! ```rust
//! use elemental_cauldron::{
//!     Cauldron, CauldronConfig, Element, ElementalVector, Material, MaterialKind,
//! };
//!
//! // A practiced cauldron: strength 10, every mastery at 10.
//! let config = CauldronConfig::new(10.0).with_uniform_masteries(10.0);
//! let mut cauldron = Cauldron::new(config).unwrap();
//!
//! let base = Material::new(
//!     MaterialKind::Elixir,
//!     ElementalVector::from_magnitudes([
//!         (Element::Substance, 1.0),
//!         (Element::Fire, 1.0),
//!     ])
//!     .unwrap(),
//!     50.0,
//! );
//! let additive = Material::new(MaterialKind::Reagent, Element::Fire.unit(), 50.0);
//!
//! let brew = cauldron.craft(&base, &additive).unwrap();
//!
//! // (1 + fire) * fire = fire - 1: the substance burned into absence.
//! assert_eq!(brew.kind(), MaterialKind::Elixir);
//! assert_eq!(brew.composition().magnitude(Element::Absence), 1.0);
//! assert!(brew.quality() > 30.0);
//!
//! // The cauldron learned from the work.
//! assert!(cauldron.mastery(Element::Absence) > 10.0);
//!
//! // Provenance is a binary tree, walkable pre-order.
//! assert_eq!(brew.walk_recipe().len(), 2);
//! ```
//!
//! # Key Insight
//!
//! The evaluation order of a chained product is part of the contract.
//! Octonion multiplication does not associate, so `chain_product` folds
//! strictly left-to-right and nothing in the engine ever reassociates.

mod cauldron;
mod config;
mod element;
mod error;
mod material;
mod observer;
mod octonion;

pub use cauldron::{sigmoid100, Cauldron, MASTERY_COMPETENCE};
pub use config::{CauldronConfig, GateProfile, DEFAULT_STRENGTH, MAX_ASH_QUALITY};
pub use element::{Element, ElementMap, ElementalVector};
pub use error::{Error, Result};
pub use material::{ItemStats, Material, MaterialKind, Recipe};
pub use observer::{ChannelObserver, CraftEvent, CraftObserver, CraftStage, FnObserver};
pub use octonion::{chain_product, Octonion};
