//! Elemental projection - the named reading of an octonion
//!
//! Each of the 8 octonion components carries a pair of opposing elements: the
//! positive pole holds the component when it is non-negative, the negative
//! pole holds its magnitude when it is negative. At most one pole of a pair
//! is ever nonzero, and `positive - negative` reconstructs the signed
//! component exactly.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::octonion::Octonion;

/// The sixteen named elements, two opposing poles per octonion component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Element {
    Substance,
    Absence,
    Ardor,
    Aegis,
    Speed,
    Stall,
    Flourish,
    Wither,
    Quintessence,
    Void,
    Fire,
    Water,
    Air,
    Earth,
    Light,
    Shadow,
}

use Element::*;

impl Element {
    /// All sixteen elements, pair by pair, positive pole first.
    pub const ALL: [Element; 16] = [
        Substance,
        Absence,
        Ardor,
        Aegis,
        Speed,
        Stall,
        Flourish,
        Wither,
        Quintessence,
        Void,
        Fire,
        Water,
        Air,
        Earth,
        Light,
        Shadow,
    ];

    /// The eight opposing pairs, indexed by octonion component.
    pub const OPPOSING_PAIRS: [(Element, Element); 8] = [
        (Substance, Absence),
        (Ardor, Aegis),
        (Speed, Stall),
        (Flourish, Wither),
        (Quintessence, Void),
        (Fire, Water),
        (Air, Earth),
        (Light, Shadow),
    ];

    /// Dense index into an [`ElementMap`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The octonion component this element projects from.
    #[inline]
    pub const fn pair(self) -> usize {
        self.index() / 2
    }

    /// Whether this is the positive pole of its pair.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    /// The opposing element.
    pub const fn opposite(self) -> Element {
        let idx = self.index();
        Self::ALL[if idx % 2 == 0 { idx + 1 } else { idx - 1 }]
    }

    /// Lowercase element name.
    pub const fn name(self) -> &'static str {
        ELEMENT_NAMES[self.index()]
    }

    /// The unit vector carrying magnitude 1 of this element.
    pub fn unit(self) -> ElementalVector {
        let mut components = [0.0; 8];
        components[self.pair()] = if self.is_positive() { 1.0 } else { -1.0 };
        ElementalVector::from(Octonion::new(components))
    }
}

const ELEMENT_NAMES: [&str; 16] = [
    "substance",
    "absence",
    "ardor",
    "aegis",
    "speed",
    "stall",
    "flourish",
    "wither",
    "quintessence",
    "void",
    "fire",
    "water",
    "air",
    "earth",
    "light",
    "shadow",
];

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Element {
    type Err = Error;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Error> {
        let lowered = s.to_ascii_lowercase();
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.name() == lowered)
            .ok_or_else(|| Error::UnknownElement(s.to_string()))
    }
}

// =============================================================================
// ELEMENT MAP
// =============================================================================

/// A dense per-element table of values (masteries, magnitudes, fractions).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementMap {
    values: [f64; 16],
}

impl ElementMap {
    /// All-zero table.
    pub const fn zero() -> Self {
        Self { values: [0.0; 16] }
    }

    /// Table with the same value for every element.
    pub const fn uniform(value: f64) -> Self {
        Self {
            values: [value; 16],
        }
    }

    #[inline]
    pub fn get(&self, element: Element) -> f64 {
        self.values[element.index()]
    }

    #[inline]
    pub fn set(&mut self, element: Element, value: f64) {
        self.values[element.index()] = value;
    }

    /// Iterate entries in pair order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.iter().map(move |&e| (e, self.get(e)))
    }

    /// Sum of all entries.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl Index<Element> for ElementMap {
    type Output = f64;

    fn index(&self, element: Element) -> &f64 {
        &self.values[element.index()]
    }
}

impl IndexMut<Element> for ElementMap {
    fn index_mut(&mut self, element: Element) -> &mut f64 {
        &mut self.values[element.index()]
    }
}

// =============================================================================
// ELEMENTAL VECTOR
// =============================================================================

/// An octonion read through the elemental lens.
///
/// Wraps [`Octonion`] and inherits its algebra; adds the signed split into
/// sixteen non-negative named magnitudes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementalVector {
    octonion: Octonion,
}

impl ElementalVector {
    /// The zero vector (the composition of the null material).
    pub const ZERO: Self = Self {
        octonion: Octonion::ZERO,
    };

    /// Build from named non-negative magnitudes.
    ///
    /// Supplying a negative magnitude is a validation error (a "negative
    /// amount of water" is expressed as fire, not rejected silently).
    /// Supplying both poles of a pair nets their difference; this is
    /// tolerated convenience input, not the canonical form.
    pub fn from_magnitudes<T>(magnitudes: T) -> Result<Self, Error>
    where
        T: IntoIterator<Item = (Element, f64)>,
    {
        let mut components = [0.0; 8];
        for (element, magnitude) in magnitudes {
            if magnitude < 0.0 {
                return Err(Error::NegativeMagnitude {
                    element,
                    value: magnitude,
                });
            }
            let signed = if element.is_positive() {
                magnitude
            } else {
                -magnitude
            };
            components[element.pair()] += signed;
        }
        Ok(Self::from(Octonion::new(components)))
    }

    /// The underlying octonion.
    #[inline]
    pub const fn octonion(&self) -> Octonion {
        self.octonion
    }

    /// Magnitude of a named element, always >= 0.
    ///
    /// Exactly one pole of each pair can be nonzero: the positive pole when
    /// the component is positive, the negative pole otherwise.
    pub fn magnitude(&self, element: Element) -> f64 {
        let component = self.octonion.get(element.pair());
        if element.is_positive() {
            component.max(0.0)
        } else {
            (-component).max(0.0)
        }
    }

    /// Magnitude looked up by case-insensitive element name.
    pub fn magnitude_named(&self, name: &str) -> Result<f64, Error> {
        Ok(self.magnitude(name.parse()?))
    }

    /// All sixteen magnitudes.
    pub fn magnitudes(&self) -> ElementMap {
        let mut map = ElementMap::zero();
        for element in Element::ALL {
            map.set(element, self.magnitude(element));
        }
        map
    }

    /// Fraction of the composition carried by each element.
    ///
    /// Divides by the sum of absolute component magnitudes, not the norm, so
    /// the fractions form a proper proportion: they sum to 1 for any nonzero
    /// vector. The zero vector yields the all-zero table.
    pub fn composition(&self) -> ElementMap {
        let total: f64 = self.octonion.components().iter().map(|c| c.abs()).sum();
        let mut map = ElementMap::zero();
        if total > 0.0 {
            for element in Element::ALL {
                map.set(element, self.magnitude(element) / total);
            }
        }
        map
    }

    /// Euclidean norm of the underlying octonion.
    pub fn strength(&self) -> f64 {
        self.octonion.norm()
    }

    /// Check if the vector is zero.
    pub fn is_zero(&self) -> bool {
        self.octonion.is_zero()
    }
}

impl From<Octonion> for ElementalVector {
    fn from(octonion: Octonion) -> Self {
        Self { octonion }
    }
}

impl From<ElementalVector> for Octonion {
    fn from(vector: ElementalVector) -> Octonion {
        vector.octonion
    }
}

impl Add for ElementalVector {
    type Output = ElementalVector;

    fn add(self, rhs: ElementalVector) -> ElementalVector {
        Self::from(self.octonion + rhs.octonion)
    }
}

impl Sub for ElementalVector {
    type Output = ElementalVector;

    fn sub(self, rhs: ElementalVector) -> ElementalVector {
        Self::from(self.octonion - rhs.octonion)
    }
}

impl Neg for ElementalVector {
    type Output = ElementalVector;

    fn neg(self) -> ElementalVector {
        Self::from(-self.octonion)
    }
}

impl Mul for ElementalVector {
    type Output = ElementalVector;

    /// The octonionic product - not commutative, not associative.
    fn mul(self, rhs: ElementalVector) -> ElementalVector {
        Self::from(self.octonion * rhs.octonion)
    }
}

impl Mul<f64> for ElementalVector {
    type Output = ElementalVector;

    fn mul(self, rhs: f64) -> ElementalVector {
        Self::from(self.octonion * rhs)
    }
}

impl Mul<ElementalVector> for f64 {
    type Output = ElementalVector;

    fn mul(self, rhs: ElementalVector) -> ElementalVector {
        rhs * self
    }
}

impl fmt::Display for ElementalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let terms: Vec<String> = Element::ALL
            .iter()
            .filter_map(|&element| {
                let magnitude = self.magnitude(element);
                if magnitude == 0.0 {
                    None
                } else if magnitude == 1.0 {
                    Some(element.name().to_string())
                } else {
                    Some(format!("{magnitude} {}", element.name()))
                }
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn vector() -> impl Strategy<Value = ElementalVector> {
        prop::array::uniform8(-10.0f64..10.0)
            .prop_map(|c| ElementalVector::from(Octonion::new(c)))
    }

    #[test]
    fn test_signed_split() {
        let x = ElementalVector::from(Octonion::new([
            2.0, -1.5, 0.0, 0.0, 0.0, 3.0, 0.0, -0.5,
        ]));
        assert_eq!(x.magnitude(Substance), 2.0);
        assert_eq!(x.magnitude(Absence), 0.0);
        assert_eq!(x.magnitude(Aegis), 1.5);
        assert_eq!(x.magnitude(Ardor), 0.0);
        assert_eq!(x.magnitude(Fire), 3.0);
        assert_eq!(x.magnitude(Shadow), 0.5);
        // At most one pole of each pair is nonzero.
        for (positive, negative) in Element::OPPOSING_PAIRS {
            assert!(x.magnitude(positive) == 0.0 || x.magnitude(negative) == 0.0);
        }
    }

    #[test]
    fn test_from_magnitudes() {
        let x = ElementalVector::from_magnitudes([(Water, 2.0), (Substance, 1.0)]).unwrap();
        assert_eq!(x.octonion().get(5), -2.0);
        assert_eq!(x.magnitude(Water), 2.0);
        assert_eq!(x.magnitude(Fire), 0.0);
        assert_eq!(x.magnitude(Substance), 1.0);
    }

    #[test]
    fn test_from_magnitudes_rejects_negative() {
        let err = ElementalVector::from_magnitudes([(Water, -1.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeMagnitude { element: Water, .. }
        ));
    }

    #[test]
    fn test_from_magnitudes_nets_both_poles() {
        // Tolerated convenience input: both poles net to their difference.
        let x = ElementalVector::from_magnitudes([(Fire, 3.0), (Water, 1.0)]).unwrap();
        assert_eq!(x.magnitude(Fire), 2.0);
        assert_eq!(x.magnitude(Water), 0.0);
    }

    #[test]
    fn test_element_lookup() {
        assert_eq!("FIRE".parse::<Element>().unwrap(), Fire);
        assert_eq!("quintessence".parse::<Element>().unwrap(), Quintessence);
        assert!(matches!(
            "phlogiston".parse::<Element>(),
            Err(Error::UnknownElement(_))
        ));
        let x = Element::Light.unit();
        assert_eq!(x.magnitude_named("light").unwrap(), 1.0);
        assert_eq!(x.magnitude_named("Shadow").unwrap(), 0.0);
    }

    #[test]
    fn test_opposites() {
        for (positive, negative) in Element::OPPOSING_PAIRS {
            assert_eq!(positive.opposite(), negative);
            assert_eq!(negative.opposite(), positive);
            assert!(positive.is_positive());
            assert!(!negative.is_positive());
            assert_eq!(positive.pair(), negative.pair());
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Water.unit().octonion().get(5), -1.0);
        assert_eq!(Substance.unit().octonion(), Octonion::ONE);
        for element in Element::ALL {
            assert_eq!(element.unit().magnitude(element), 1.0);
            assert_eq!(element.unit().magnitude(element.opposite()), 0.0);
            assert_eq!(element.unit().strength(), 1.0);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementalVector::ZERO.to_string(), "0");
        let x = ElementalVector::from_magnitudes([(Fire, 1.0), (Absence, 2.0)]).unwrap();
        assert_eq!(x.to_string(), "2 absence + fire");
    }

    #[test]
    fn test_element_map() {
        let mut map = ElementMap::zero();
        map[Fire] = 2.0;
        map.set(Void, 0.5);
        assert_eq!(map[Fire], 2.0);
        assert_eq!(map.get(Void), 0.5);
        assert_eq!(map.total(), 2.5);
        assert_eq!(ElementMap::uniform(1.0).total(), 16.0);
    }

    proptest! {
        #[test]
        fn prop_magnitude_round_trip(x in vector()) {
            let rebuilt = ElementalVector::from_magnitudes(
                x.magnitudes().iter().collect::<Vec<_>>(),
            ).unwrap();
            prop_assert_eq!(rebuilt, x);
        }

        #[test]
        fn prop_composition_is_simplex(x in vector()) {
            let total = x.composition().total();
            if x.is_zero() {
                prop_assert_eq!(total, 0.0);
            } else {
                prop_assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_composition_fractions() {
        let x = ElementalVector::from_magnitudes([(Fire, 1.0), (Absence, 3.0)]).unwrap();
        let fractions = x.composition();
        assert_relative_eq!(fractions[Fire], 0.25);
        assert_relative_eq!(fractions[Absence], 0.75);
        assert_eq!(fractions[Substance], 0.0);
    }
}
