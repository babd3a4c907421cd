//! Octonion - 8-component hypercomplex value type
//!
//! The atomic unit of every composition in the crafting substrate. Components
//! are ordered `[R, I, J, K, L, IL, JL, KL]`: the real part followed by the
//! seven imaginary basis units.
//!
//! Octonion multiplication is neither commutative nor associative, so the
//! evaluation order of chained products is part of the contract. Use
//! [`chain_product`] for an explicit left-to-right fold.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Component indices.
const R: usize = 0;
const I: usize = 1;
const J: usize = 2;
const K: usize = 3;
const L: usize = 4;
const IL: usize = 5;
const JL: usize = 6;
const KL: usize = 7;

const BASIS_NAMES: [&str; 8] = ["", "I", "J", "K", "L", "IL", "JL", "KL"];

/// An octonion with double-precision components.
///
/// Immutable value type: every operation returns a new octonion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Octonion {
    components: [f64; 8],
}

impl Octonion {
    /// The zero octonion.
    pub const ZERO: Self = Self {
        components: [0.0; 8],
    };

    /// The real unit, `1`.
    pub const ONE: Self = Self::unit(R);

    /// The seven imaginary basis units.
    pub const UNIT_I: Self = Self::unit(I);
    pub const UNIT_J: Self = Self::unit(J);
    pub const UNIT_K: Self = Self::unit(K);
    pub const UNIT_L: Self = Self::unit(L);
    pub const UNIT_IL: Self = Self::unit(IL);
    pub const UNIT_JL: Self = Self::unit(JL);
    pub const UNIT_KL: Self = Self::unit(KL);

    const fn unit(idx: usize) -> Self {
        let mut components = [0.0; 8];
        components[idx] = 1.0;
        Self { components }
    }

    /// Create from positional basis coefficients `[R, I, J, K, L, IL, JL, KL]`.
    pub const fn new(components: [f64; 8]) -> Self {
        Self { components }
    }

    /// Create a purely real octonion.
    pub const fn real(r: f64) -> Self {
        let mut components = [0.0; 8];
        components[R] = r;
        Self { components }
    }

    /// All eight components, in basis order.
    #[inline]
    pub const fn components(&self) -> &[f64; 8] {
        &self.components
    }

    /// Component at basis index (0 = real part).
    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        self.components[idx]
    }

    /// The real (scalar) part.
    #[inline]
    pub fn real_part(&self) -> f64 {
        self.components[R]
    }

    /// Check if all components are zero.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0.0)
    }

    /// The octonionic conjugate: every component negated except the real part.
    pub fn conjugate(&self) -> Self {
        let mut components = self.components;
        for c in &mut components[R + 1..] {
            *c = -*c;
        }
        Self { components }
    }

    /// Squared norm: the real part of `self * self.conjugate()`.
    pub fn norm_squared(&self) -> f64 {
        (*self * self.conjugate()).real_part()
    }

    /// Euclidean norm.
    ///
    /// Tiny negative squared norms from floating-point cancellation are
    /// clamped to zero rather than producing a NaN.
    pub fn norm(&self) -> f64 {
        self.norm_squared().max(0.0).sqrt()
    }
}

// =============================================================================
// OCTONIONIC PRODUCT
// =============================================================================

/// `a_i*b_j + a_j*b_i` - the symmetric half of a basis product.
#[inline]
fn sym(a: &[f64; 8], b: &[f64; 8], i: usize, j: usize) -> f64 {
    a[i] * b[j] + a[j] * b[i]
}

/// `a_i*b_j - a_j*b_i` - the antisymmetric half of a basis product.
#[inline]
fn alt(a: &[f64; 8], b: &[f64; 8], i: usize, j: usize) -> f64 {
    a[i] * b[j] - a[j] * b[i]
}

/// The octonionic product.
///
/// The triads in each imaginary component are a fixed constant of the
/// algebra (the Fano-plane structure of the seven imaginary units). The
/// table is written out in full rather than generated.
fn product(a: &[f64; 8], b: &[f64; 8]) -> [f64; 8] {
    let zr = a[R] * b[R]
        - [I, J, K, L, IL, JL, KL]
            .iter()
            .map(|&i| a[i] * b[i])
            .sum::<f64>();

    let zi = sym(a, b, R, I) + alt(a, b, L, IL) + alt(a, b, KL, JL) + alt(a, b, J, K);
    let zj = sym(a, b, R, J) + alt(a, b, L, JL) + alt(a, b, IL, KL) + alt(a, b, K, I);
    let zk = sym(a, b, R, K) + alt(a, b, L, KL) + alt(a, b, JL, IL) + alt(a, b, I, J);
    let zl = sym(a, b, R, L) + alt(a, b, IL, I) + alt(a, b, JL, J) + alt(a, b, KL, K);
    let zil = sym(a, b, R, IL) + alt(a, b, I, L) + alt(a, b, KL, J) + alt(a, b, K, JL);
    let zjl = sym(a, b, R, JL) + alt(a, b, J, L) + alt(a, b, IL, K) + alt(a, b, I, KL);
    let zkl = sym(a, b, R, KL) + alt(a, b, K, L) + alt(a, b, JL, I) + alt(a, b, J, IL);

    [zr, zi, zj, zk, zl, zil, zjl, zkl]
}

/// Multiply octonions left-to-right.
///
/// The order is explicit because octonion multiplication is not associative;
/// callers must not reassociate. Returns `None` for an empty iterator.
pub fn chain_product<T>(factors: T) -> Option<Octonion>
where
    T: IntoIterator<Item = Octonion>,
{
    factors.into_iter().reduce(|acc, x| acc * x)
}

impl Add for Octonion {
    type Output = Octonion;

    fn add(self, rhs: Octonion) -> Octonion {
        let mut components = self.components;
        for (c, r) in components.iter_mut().zip(rhs.components.iter()) {
            *c += r;
        }
        Octonion { components }
    }
}

impl Sub for Octonion {
    type Output = Octonion;

    fn sub(self, rhs: Octonion) -> Octonion {
        self + -rhs
    }
}

impl Neg for Octonion {
    type Output = Octonion;

    fn neg(self) -> Octonion {
        self * -1.0
    }
}

impl Mul for Octonion {
    type Output = Octonion;

    fn mul(self, rhs: Octonion) -> Octonion {
        Octonion {
            components: product(&self.components, &rhs.components),
        }
    }
}

impl Mul<f64> for Octonion {
    type Output = Octonion;

    fn mul(self, rhs: f64) -> Octonion {
        let mut components = self.components;
        for c in &mut components {
            *c *= rhs;
        }
        Octonion { components }
    }
}

impl Mul<Octonion> for f64 {
    type Output = Octonion;

    fn mul(self, rhs: Octonion) -> Octonion {
        rhs * self
    }
}

impl fmt::Display for Octonion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let terms: Vec<String> = self
            .components
            .iter()
            .zip(BASIS_NAMES.iter())
            .filter(|(&c, _)| c != 0.0)
            .map(|(&c, &basis)| {
                if basis.is_empty() {
                    format!("{c}")
                } else if c == 1.0 {
                    basis.to_string()
                } else if c == -1.0 {
                    format!("-{basis}")
                } else {
                    format!("{c}{basis}")
                }
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}
