//! Materials - the things the cauldron consumes and produces
//!
//! A material is an immutable record: elemental composition, quality, mass,
//! and optional provenance (the recipe that produced it). Item kinds are a
//! closed enumeration with derived combat stats looked up from a fixed
//! registry table; there is no open subtype hierarchy.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementalVector};

/// The closed set of material kinds.
///
/// `Nothing` and `Ash` are the degenerate variants: `Nothing` is the
/// crafting-failure sentinel, `Ash` a below-threshold byproduct. Neither can
/// be fed back into a craft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaterialKind {
    /// The null material - what a failed craft yields.
    Nothing,
    /// Burned-out byproduct of a low-quality craft.
    Ash,
    /// Plain crafting stock with no use of its own.
    Reagent,
    /// Close-range damage dealer (swords and the like).
    Melee,
    /// Long-range damage dealer (bombs and the like).
    Ranged,
    /// Damage inhibitor.
    Armor,
    /// Consumable that enacts its composition on the user.
    Elixir,
}

impl MaterialKind {
    /// Whether materials of this kind can participate in crafting.
    pub const fn is_usable(self) -> bool {
        !matches!(self, MaterialKind::Nothing | MaterialKind::Ash)
    }

    const fn label(self) -> &'static str {
        match self {
            MaterialKind::Nothing => "Nothing",
            MaterialKind::Ash => "Ash",
            MaterialKind::Reagent => "Reagent",
            MaterialKind::Melee => "Melee",
            MaterialKind::Ranged => "Ranged",
            MaterialKind::Armor => "Armor",
            MaterialKind::Elixir => "Elixir",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// DERIVED ITEM STATS
// =============================================================================

/// Combat-relevant stats derived from a composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemStats {
    pub damage: i64,
    pub defense: i64,
    pub range: i64,
}

/// Activity level of an element: its magnitude truncated to an integer.
fn activity(composition: &ElementalVector, element: Element) -> i64 {
    composition.magnitude(element) as i64
}

fn melee_stats(composition: &ElementalVector) -> ItemStats {
    ItemStats {
        damage: activity(composition, Element::Ardor) + activity(composition, Element::Fire),
        defense: 0,
        range: 1,
    }
}

fn ranged_stats(composition: &ElementalVector) -> ItemStats {
    ItemStats {
        damage: activity(composition, Element::Ardor) + activity(composition, Element::Fire),
        defense: 0,
        range: 1 + activity(composition, Element::Speed) + activity(composition, Element::Air),
    }
}

fn armor_stats(composition: &ElementalVector) -> ItemStats {
    ItemStats {
        damage: 0,
        defense: activity(composition, Element::Aegis) + activity(composition, Element::Earth),
        range: 0,
    }
}

fn elixir_stats(composition: &ElementalVector) -> ItemStats {
    ItemStats {
        damage: activity(composition, Element::Wither),
        defense: activity(composition, Element::Flourish),
        range: 0,
    }
}

type StatFn = fn(&ElementalVector) -> ItemStats;

/// Registry mapping item kinds to their derived-stat functions. Kinds not
/// listed here carry no stats.
const STAT_REGISTRY: [(MaterialKind, StatFn); 4] = [
    (MaterialKind::Melee, melee_stats),
    (MaterialKind::Ranged, ranged_stats),
    (MaterialKind::Armor, armor_stats),
    (MaterialKind::Elixir, elixir_stats),
];

// =============================================================================
// MATERIAL
// =============================================================================

/// The two ingredients a material was crafted from.
///
/// Forms an owned binary provenance tree; a material with no recipe is a
/// leaf.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recipe {
    pub base: Material,
    pub additive: Material,
}

/// A material that can be manipulated.
///
/// Immutable once created: crafting always produces a new material, never
/// mutates an existing one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    kind: MaterialKind,
    composition: ElementalVector,
    quality: f64,
    mass: f64,
    recipe: Option<Box<Recipe>>,
    name: Option<String>,
}

impl Material {
    /// Create a leaf material with mass 1 and no provenance.
    pub fn new(kind: MaterialKind, composition: ElementalVector, quality: f64) -> Self {
        Self {
            kind,
            composition,
            quality,
            mass: 1.0,
            recipe: None,
            name: None,
        }
    }

    /// The null material: zero composition, zero quality, zero mass.
    pub fn nothing() -> Self {
        Self {
            kind: MaterialKind::Nothing,
            composition: ElementalVector::ZERO,
            quality: 0.0,
            mass: 0.0,
            recipe: None,
            name: None,
        }
    }

    /// A burned-out byproduct that still carries its composition and quality
    /// but can no longer be used.
    pub fn ash(composition: ElementalVector, quality: f64) -> Self {
        Self {
            kind: MaterialKind::Ash,
            composition,
            quality,
            mass: 1.0,
            recipe: None,
            name: None,
        }
    }

    /// Set the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record the two ingredients this material was crafted from.
    pub fn with_recipe(mut self, base: Material, additive: Material) -> Self {
        self.recipe = Some(Box::new(Recipe { base, additive }));
        self
    }

    #[inline]
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    #[inline]
    pub fn composition(&self) -> ElementalVector {
        self.composition
    }

    #[inline]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Display name, `"unnamed"` if none was given.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// The recipe this material was crafted from, if any.
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_deref()
    }

    /// Derived strength: the norm of the composition.
    pub fn strength(&self) -> f64 {
        self.composition.strength()
    }

    /// Whether this material can participate in crafting.
    pub fn is_usable(&self) -> bool {
        self.kind.is_usable()
    }

    /// Derived combat stats, `None` for kinds that are not items.
    pub fn stats(&self) -> Option<ItemStats> {
        STAT_REGISTRY
            .iter()
            .find(|(kind, _)| *kind == self.kind)
            .map(|(_, stat_fn)| stat_fn(&self.composition))
    }

    /// All ancestor materials in pre-order: base, base's ancestors, additive,
    /// additive's ancestors. A leaf has no ancestors.
    pub fn walk_recipe(&self) -> Vec<&Material> {
        fn collect<'a>(material: &'a Material, out: &mut Vec<&'a Material>) {
            if let Some(recipe) = material.recipe() {
                out.push(&recipe.base);
                collect(&recipe.base, out);
                out.push(&recipe.additive);
                collect(&recipe.additive, out);
            }
        }
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} ({}) | {} | m={}, q={:.2}>",
            self.kind,
            self.name(),
            self.composition,
            self.mass,
            self.quality,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element::*;

    fn reagent(magnitudes: &[(Element, f64)]) -> Material {
        Material::new(
            MaterialKind::Reagent,
            ElementalVector::from_magnitudes(magnitudes.iter().copied()).unwrap(),
            50.0,
        )
    }

    #[test]
    fn test_degenerate_kinds_are_unusable() {
        assert!(!Material::nothing().is_usable());
        assert!(!Material::ash(ElementalVector::ZERO, 10.0).is_usable());
        assert!(reagent(&[(Substance, 1.0)]).is_usable());
        assert_eq!(Material::nothing().quality(), 0.0);
        assert!(Material::nothing().composition().is_zero());
    }

    #[test]
    fn test_strength_is_composition_norm() {
        let material = reagent(&[(Substance, 3.0), (Water, 4.0)]);
        assert!((material.strength() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_stat_registry() {
        let composition =
            ElementalVector::from_magnitudes([(Ardor, 2.5), (Fire, 1.0), (Air, 3.9)]).unwrap();

        let sword = Material::new(MaterialKind::Melee, composition, 60.0);
        assert_eq!(
            sword.stats(),
            Some(ItemStats {
                damage: 3,
                defense: 0,
                range: 1
            })
        );

        let bomb = Material::new(MaterialKind::Ranged, composition, 60.0);
        assert_eq!(bomb.stats().unwrap().range, 4);

        let armor_composition =
            ElementalVector::from_magnitudes([(Aegis, 2.0), (Earth, 1.2)]).unwrap();
        let shield = Material::new(MaterialKind::Armor, armor_composition, 60.0);
        assert_eq!(shield.stats().unwrap().defense, 3);

        assert_eq!(reagent(&[(Substance, 1.0)]).stats(), None);
        assert_eq!(Material::nothing().stats(), None);
    }

    #[test]
    fn test_walk_recipe_preorder() {
        let water = reagent(&[(Water, 1.0)]).with_name("water");
        let salt = reagent(&[(Substance, 1.0)]).with_name("salt");
        let brine = reagent(&[(Water, 1.0), (Substance, 1.0)])
            .with_name("brine")
            .with_recipe(water.clone(), salt.clone());
        let ember = reagent(&[(Fire, 1.0)]).with_name("ember");
        let potion = reagent(&[(Fire, 1.0)])
            .with_name("potion")
            .with_recipe(brine.clone(), ember.clone());

        let names: Vec<&str> = potion.walk_recipe().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["brine", "water", "salt", "ember"]);
        assert!(water.walk_recipe().is_empty());
    }

    #[test]
    fn test_display() {
        let material = reagent(&[(Fire, 1.0)]).with_name("ember").with_mass(2.0);
        assert_eq!(material.to_string(), "<Reagent (ember) | fire | m=2, q=50.00>");
    }
}
