//! Cauldron - the crafting resolution engine
//!
//! The cauldron is the only mutable state in the substrate. Each craft runs
//! the ingredient composition through a fixed sequence of validation gates,
//! scores the survivors, and either yields a usable material, crumbles the
//! work to ash, or fails outright - leaving a status affliction behind that
//! must be remediated with [`Cauldron::fix`] before crafting can resume.
//!
//! Successful crafts feed back into the cauldron: mastery grows in
//! proportion to the composition of what was made.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{CauldronConfig, GateProfile};
use crate::element::{Element, ElementMap, ElementalVector};
use crate::error::{Error, Result};
use crate::material::Material;
use crate::observer::{CraftEvent, CraftObserver, CraftStage};

/// Mastery projection at which a result rates 50 out of 100.
pub const MASTERY_COMPETENCE: f64 = 10.0;

/// Saturating response curve bounded in (-100, 100).
///
/// Reaches 50 when `x == midpoint`; symmetric about zero.
pub fn sigmoid100(x: f64, midpoint: f64) -> f64 {
    let t = x / midpoint;
    100.0 * t / (1.0 + t.abs())
}

/// The crafting state machine.
///
/// Owns its mutable state; `craft` and `fix` take `&mut self`, so the
/// borrow checker enforces the single-writer discipline the domain assumes.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cauldron {
    /// Maximum composition norm the cauldron can withstand.
    strength: f64,

    /// Per-element mastery levels, grown by successful crafts.
    masteries: ElementMap,

    /// Status affliction; zero when healthy.
    effect: ElementalVector,

    /// Quality below which results crumble to ash.
    ash_threshold: f64,

    /// Which compositions the gates run against.
    gate_profile: GateProfile,

    /// Whether successful crafts split positive substance into the reserve.
    capture_substance: bool,

    /// Raw substance captured from successful crafts.
    substance_reserve: f64,

    #[cfg_attr(feature = "serde", serde(skip))]
    observers: Vec<Arc<dyn CraftObserver>>,
}

impl Cauldron {
    /// Create a cauldron from a validated configuration.
    pub fn new(config: CauldronConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            strength: config.strength,
            masteries: config.masteries,
            effect: config.effect,
            ash_threshold: config.ash_threshold,
            gate_profile: config.gate_profile,
            capture_substance: config.capture_substance,
            substance_reserve: 0.0,
            observers: Vec::new(),
        })
    }

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    /// Strength limit.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// The full mastery table.
    pub fn masteries(&self) -> &ElementMap {
        &self.masteries
    }

    /// Mastery level of a single element.
    pub fn mastery(&self, element: Element) -> f64 {
        self.masteries[element]
    }

    /// Current status affliction (zero when healthy).
    pub fn effect(&self) -> ElementalVector {
        self.effect
    }

    /// Whether a status affliction is blocking crafting.
    pub fn is_afflicted(&self) -> bool {
        !self.effect.is_zero()
    }

    /// Raw substance captured so far.
    pub fn substance_reserve(&self) -> f64 {
        self.substance_reserve
    }

    /// The configured gate profile.
    pub fn gate_profile(&self) -> GateProfile {
        self.gate_profile
    }

    /// Rate a composition against the current masteries, bounded in
    /// (-100, 100) with 50 at competence.
    ///
    /// The projection is the dot product of the mastery table with the unit
    /// vector parallel to the composition.
    pub fn mastery_rating(&self, composition: &ElementalVector) -> f64 {
        let norm = composition.strength();
        if norm == 0.0 {
            return 0.0;
        }
        let projection: f64 = Element::ALL
            .iter()
            .map(|&e| self.masteries[e] * composition.magnitude(e) / norm)
            .sum();
        sigmoid100(projection, MASTERY_COMPETENCE)
    }

    /// Subscribe an observer to resolution events.
    pub fn subscribe(&mut self, observer: Arc<dyn CraftObserver>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: CraftEvent) {
        for observer in &self.observers {
            observer.on_event(event.clone());
        }
    }

    // =========================================================================
    // CRAFTING
    // =========================================================================

    /// Combine a base and an additive.
    ///
    /// Outcomes, in resolution order:
    /// - `Err` - precondition violations: non-positive strength, a
    ///   `Nothing`/`Ash` ingredient, or an unremediated affliction. No state
    ///   is touched.
    /// - `Nothing` - a strength or mastery gate fired; the cauldron's
    ///   `effect` records the cause.
    /// - `Ash` - the gates passed but quality fell below the ash threshold;
    ///   mastery does not grow.
    /// - a material of the base's kind - carries the octonionic product of
    ///   the two compositions, the computed quality, the combined mass, and
    ///   the pair as its recipe; mastery grows by the result's composition
    ///   fractions.
    pub fn craft(&mut self, base: &Material, additive: &Material) -> Result<Material> {
        if self.strength <= 0.0 {
            return Err(Error::NonPositiveStrength(self.strength));
        }
        if !base.is_usable() {
            return Err(Error::UnusableIngredient(base.kind()));
        }
        if !additive.is_usable() {
            return Err(Error::UnusableIngredient(additive.kind()));
        }
        if self.is_afflicted() {
            return Err(Error::AfflictedCauldron);
        }

        if self.gate_profile == GateProfile::Strict {
            if let Some(nothing) = self.run_gates(&additive.composition(), CraftStage::Additive) {
                return Ok(nothing);
            }
        }

        // The octonionic product, not an elementwise merge: combining
        // materials can produce elements neither ingredient carried.
        let result = base.composition() * additive.composition();

        if let Some(nothing) = self.run_gates(&result, CraftStage::Result) {
            return Ok(nothing);
        }

        let result_mastery = self.mastery_rating(&result);
        let quality =
            (base.quality() + additive.quality() + 2.0 * result_mastery) / 4.0;

        if quality < self.ash_threshold {
            debug!(quality, threshold = self.ash_threshold, "craft crumbled to ash");
            self.emit(CraftEvent::AshProduced { quality });
            return Ok(Material::ash(result, quality).with_mass(base.mass() + additive.mass()));
        }

        self.learn(&result);

        let mut composition = result;
        if self.capture_substance {
            let captured = composition.magnitude(Element::Substance);
            if captured > 0.0 {
                composition = composition - Element::Substance.unit() * captured;
                self.substance_reserve += captured;
                trace!(captured, reserve = self.substance_reserve, "substance captured");
            }
        }

        self.emit(CraftEvent::Crafted {
            quality,
            strength: composition.strength(),
        });

        Ok(Material::new(base.kind(), composition, quality)
            .with_mass(base.mass() + additive.mass())
            .with_recipe(base.clone(), additive.clone()))
    }

    /// Run the strength gate, then the mastery gate, against one
    /// composition. On failure, records the cause as the cauldron's status
    /// affliction and returns the `Nothing` material.
    fn run_gates(&mut self, composition: &ElementalVector, stage: CraftStage) -> Option<Material> {
        let norm = composition.strength();
        if norm > self.strength {
            self.effect = Element::Substance.unit() * norm;
            debug!(?stage, norm, limit = self.strength, "strength gate fired");
            self.emit(CraftEvent::StrengthExceeded {
                stage,
                strength: norm,
                limit: self.strength,
            });
            return Some(Material::nothing());
        }

        // The substance/absence pair is governed by the strength gate, not
        // per-element mastery.
        let deficits: Vec<(Element, f64)> = Element::ALL
            .iter()
            .filter(|e| e.pair() != 0)
            .filter_map(|&e| {
                let magnitude = composition.magnitude(e);
                (self.masteries[e] < magnitude).then(|| (e, magnitude - self.masteries[e]))
            })
            .collect();

        if !deficits.is_empty() {
            let mut effect = ElementalVector::ZERO;
            for &(element, deficit) in &deficits {
                effect = effect + element.unit() * deficit;
            }
            self.effect = effect;
            debug!(?stage, count = deficits.len(), "mastery gate fired");
            self.emit(CraftEvent::MasteryExceeded { stage, deficits });
            return Some(Material::nothing());
        }

        None
    }

    /// Grow mastery by the result's composition fractions. The gain per
    /// craft sums to 1 regardless of the result's absolute magnitude.
    fn learn(&mut self, result: &ElementalVector) {
        let total = result.magnitudes().total();
        if total == 0.0 {
            return;
        }
        for element in Element::ALL {
            self.masteries[element] += result.magnitude(element) / total;
        }
        trace!(total = self.masteries.total(), "mastery updated");
    }

    // =========================================================================
    // REMEDIATION
    // =========================================================================

    /// Attempt to neutralize the cauldron's status affliction with an agent.
    ///
    /// The affliction clears only if the product of the effect and the
    /// agent's composition is at least 90% substance by absolute magnitude.
    /// On failure the effect is left unchanged. A healthy cauldron reports
    /// success immediately.
    pub fn fix(&mut self, agent: &Material) -> bool {
        if !self.is_afflicted() {
            return true;
        }

        let result = self.effect * agent.composition();
        let total = result.magnitudes().total();
        let success = total > 0.0 && result.magnitude(Element::Substance) / total > 0.9;

        if success {
            self.effect = ElementalVector::ZERO;
        }
        debug!(success, "remediation attempted");
        self.emit(CraftEvent::Remediated { success });
        success
    }
}

impl fmt::Debug for Cauldron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cauldron")
            .field("strength", &self.strength)
            .field("masteries", &self.masteries)
            .field("effect", &self.effect)
            .field("ash_threshold", &self.ash_threshold)
            .field("gate_profile", &self.gate_profile)
            .field("substance_reserve", &self.substance_reserve)
            .field("observers", &self.observers.len())
            .finish()
    }
}
