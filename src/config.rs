//! Cauldron configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementMap, ElementalVector};
use crate::error::{Error, Result};

/// Which compositions the validation gates run against.
///
/// The strict profile checks the additive before combining and the combined
/// result after; the result-only profile trusts the ingredients and checks
/// only what comes out. Both are supported policies, not bug/fix pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GateProfile {
    /// Gate the additive, then gate the combined result (four gates).
    #[default]
    Strict,
    /// Gate only the combined result (two gates).
    ResultOnly,
}

/// Configuration for a cauldron.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CauldronConfig {
    /// Maximum composition norm the cauldron can withstand. Must be > 0.
    pub strength: f64,

    /// Per-element mastery levels, all >= 0.
    pub masteries: ElementMap,

    /// Status affliction the cauldron starts with (zero when healthy).
    pub effect: ElementalVector,

    /// Crafts below this quality crumble to ash (strict `<`).
    pub ash_threshold: f64,

    /// Which compositions the gates run against.
    pub gate_profile: GateProfile,

    /// Split positive substance off successful results into the cauldron's
    /// reserve instead of the produced material.
    pub capture_substance: bool,
}

/// Default ash threshold: anything below this quality is unusable.
pub const MAX_ASH_QUALITY: f64 = 30.0;

/// Default cauldron strength.
pub const DEFAULT_STRENGTH: f64 = 10.0;

/// The default mastery table: competent with raw substance, passable with
/// the inner pairs, ignorant of everything elemental.
fn default_masteries() -> ElementMap {
    let mut masteries = ElementMap::zero();
    masteries[Element::Substance] = 10.0;
    masteries[Element::Absence] = 5.0;
    masteries[Element::Ardor] = 3.0;
    masteries[Element::Aegis] = 3.0;
    masteries[Element::Speed] = 1.0;
    masteries[Element::Stall] = 1.0;
    masteries
}

impl CauldronConfig {
    /// Create a configuration with the given strength and defaults for
    /// everything else.
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            ..Self::default()
        }
    }

    /// Replace the mastery table.
    pub fn with_masteries(mut self, masteries: ElementMap) -> Self {
        self.masteries = masteries;
        self
    }

    /// Set every element's mastery to the same level.
    pub fn with_uniform_masteries(mut self, level: f64) -> Self {
        self.masteries = ElementMap::uniform(level);
        self
    }

    /// Start with a status affliction already in place.
    pub fn with_effect(mut self, effect: ElementalVector) -> Self {
        self.effect = effect;
        self
    }

    /// Override the ash quality threshold.
    pub fn with_ash_threshold(mut self, threshold: f64) -> Self {
        self.ash_threshold = threshold;
        self
    }

    /// Select the gate profile.
    pub fn with_gate_profile(mut self, profile: GateProfile) -> Self {
        self.gate_profile = profile;
        self
    }

    /// Enable substance capture.
    pub fn with_substance_capture(mut self) -> Self {
        self.capture_substance = true;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.strength <= 0.0 {
            return Err(Error::NonPositiveStrength(self.strength));
        }
        for (element, value) in self.masteries.iter() {
            if value < 0.0 {
                return Err(Error::NegativeMastery { element, value });
            }
        }
        Ok(())
    }
}

impl Default for CauldronConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            masteries: default_masteries(),
            effect: ElementalVector::ZERO,
            ash_threshold: MAX_ASH_QUALITY,
            gate_profile: GateProfile::Strict,
            capture_substance: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CauldronConfig::default();
        assert_eq!(config.strength, 10.0);
        assert_eq!(config.ash_threshold, 30.0);
        assert_eq!(config.gate_profile, GateProfile::Strict);
        assert_eq!(config.masteries[Element::Substance], 10.0);
        assert_eq!(config.masteries[Element::Absence], 5.0);
        assert_eq!(config.masteries[Element::Fire], 0.0);
        assert!(config.effect.is_zero());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_strength() {
        assert!(matches!(
            CauldronConfig::new(0.0).validate(),
            Err(Error::NonPositiveStrength(_))
        ));
        assert!(matches!(
            CauldronConfig::new(-3.0).validate(),
            Err(Error::NonPositiveStrength(_))
        ));
    }

    #[test]
    fn test_rejects_negative_mastery() {
        let mut masteries = ElementMap::uniform(1.0);
        masteries[Element::Void] = -0.5;
        let config = CauldronConfig::default().with_masteries(masteries);
        assert!(matches!(
            config.validate(),
            Err(Error::NegativeMastery {
                element: Element::Void,
                ..
            })
        ));
    }

    #[test]
    fn test_builders() {
        let config = CauldronConfig::new(4.0)
            .with_uniform_masteries(2.0)
            .with_ash_threshold(5.0)
            .with_gate_profile(GateProfile::ResultOnly)
            .with_substance_capture();
        assert_eq!(config.strength, 4.0);
        assert_eq!(config.masteries[Element::Shadow], 2.0);
        assert_eq!(config.ash_threshold, 5.0);
        assert_eq!(config.gate_profile, GateProfile::ResultOnly);
        assert!(config.capture_substance);
    }
}
