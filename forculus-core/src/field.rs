//! Modular arithmetic in the prime field F_q used by the Forculus secret
//! sharing polynomial, with q = 2^160 + 7.

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};

use crate::error::{Error, Result};

/// The Forculus field modulus, q = 2^160 + 7.
pub static Q: LazyLock<BigUint> = LazyLock::new(|| (BigUint::from(1u8) << 160) + BigUint::from(7u8));

/// An element of F_q.
///
/// All arithmetic operations reduce their result modulo [`Q`]; there is no
/// way to construct a `Scalar` outside the field's canonical representative
/// range `[0, q)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl Scalar {
    /// The additive identity.
    pub fn zero() -> Self {
        Scalar(BigUint::ZERO)
    }

    /// Reduces an arbitrary non-negative integer into its canonical
    /// representative in `[0, q)`.
    pub fn from_biguint(n: BigUint) -> Self {
        Scalar(n % &*Q)
    }

    /// Interprets `bytes` as a big-endian unsigned integer and reduces it
    /// modulo q (`bytes_to_uint` in the wire-format glossary).
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    /// Returns the canonical big-integer representative of this element.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consumes `self`, returning the canonical big-integer representative.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// `true` iff this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::ZERO
    }

    /// `self + other` (mod q).
    pub fn add(&self, other: &Scalar) -> Scalar {
        Scalar((&self.0 + &other.0) % &*Q)
    }

    /// `self - other` (mod q).
    pub fn sub(&self, other: &Scalar) -> Scalar {
        if self.0 >= other.0 {
            Scalar(&self.0 - &other.0)
        } else {
            Scalar(&*Q - (&other.0 - &self.0))
        }
    }

    /// `self * other` (mod q).
    pub fn mul(&self, other: &Scalar) -> Scalar {
        Scalar((&self.0 * &other.0) % &*Q)
    }

    /// Multiplicative inverse of `self` modulo q, computed via the extended
    /// Euclidean algorithm.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `self` is zero.
    pub fn inv(&self) -> Result<Scalar> {
        if self.is_zero() {
            return Err(Error::InvalidArgument(
                "cannot invert zero in F_q".to_string(),
            ));
        }
        let a = BigInt::from(self.0.clone());
        let q = BigInt::from(Q.clone());
        let (gcd, x, _) = extended_gcd(&a, &q);
        debug_assert_eq!(gcd, BigInt::from(1), "q is prime, gcd(a, q) must be 1");
        let x = ((x % &q) + &q) % &q;
        Ok(Scalar(
            x.to_biguint()
                .expect("x was reduced modulo q and is therefore non-negative"),
        ))
    }

    /// `self / other` (mod q), i.e. `self * other.inv()`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `other` is zero.
    pub fn div(&self, other: &Scalar) -> Result<Scalar> {
        Ok(self.mul(&other.inv()?))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::from_biguint(BigUint::from(value))
    }
}

/// Extended Euclidean algorithm: returns `(g, x, y)` such that `a*x + b*y = g = gcd(a, b)`.
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a == &BigInt::ZERO {
        (b.clone(), BigInt::ZERO, BigInt::from(1))
    } else {
        let (g, x, y) = extended_gcd(&(b % a), a);
        let x_next = y - (b / a) * &x;
        (g, x_next, x)
    }
}

/// Reconstructs the constant term c_0 of a degree-`threshold - 1` polynomial
/// from at least `threshold` `(x, y)` evaluation points via Lagrange
/// interpolation.
///
/// Only the first `threshold` points (in the order given) are used; the
/// rest are ignored. Fails with [`Error::InsufficientShares`] if fewer than
/// `threshold` points are supplied, or [`Error::DuplicatePoint`] if two of
/// the selected points share an x-coordinate.
pub fn lagrange_c0(points: &[(Scalar, Scalar)], threshold: usize) -> Result<Scalar> {
    if points.len() < threshold {
        return Err(Error::InsufficientShares {
            need: threshold,
            have: points.len(),
        });
    }
    let points = &points[..threshold];

    let mut x_product = Scalar::from_biguint(BigUint::from(1u8));
    for (x_i, _) in points {
        x_product = x_product.mul(x_i);
    }

    let mut sum = Scalar::zero();
    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut denom = x_i.clone();
        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let diff = x_j.sub(x_i);
            if diff.is_zero() {
                return Err(Error::DuplicatePoint);
            }
            denom = denom.mul(&diff);
        }
        let term = y_i.div(&denom)?;
        sum = sum.add(&term);
    }

    Ok(x_product.mul(&sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: u64) -> Scalar {
        Scalar::from(n)
    }

    #[test]
    fn add_sub_mul_roundtrip() {
        let a = s(12345);
        let b = s(98765);
        assert_eq!(a.add(&b).sub(&b), a);
        assert_eq!(a.mul(&b).div(&b).unwrap(), a);
    }

    #[test]
    fn inv_of_zero_fails() {
        assert!(matches!(s(0).inv(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn inv_is_multiplicative_inverse() {
        let a = s(424242);
        let inv = a.inv().unwrap();
        assert_eq!(a.mul(&inv), s(1));
    }

    #[test]
    fn sub_wraps_around_modulus() {
        let a = s(1);
        let b = s(2);
        let diff = a.sub(&b);
        assert_eq!(diff.add(&b), a);
    }

    #[test]
    fn lagrange_reconstructs_known_polynomial() {
        // f(x) = 7 + 3x + 5x^2, threshold 3
        let c = [s(7), s(3), s(5)];
        let eval = |x: u64| {
            let x = s(x);
            c[0].add(&c[1].mul(&x)).add(&c[2].mul(&x).mul(&x))
        };
        let points = vec![
            (s(1), eval(1)),
            (s(2), eval(2)),
            (s(3), eval(3)),
            (s(4), eval(4)),
        ];
        assert_eq!(lagrange_c0(&points, 3).unwrap(), s(7));
        // using a different subset of the same points still recovers c_0
        assert_eq!(lagrange_c0(&points[1..], 3).unwrap(), s(7));
    }

    #[test]
    fn lagrange_rejects_too_few_points() {
        let points = vec![(s(1), s(1))];
        assert!(matches!(
            lagrange_c0(&points, 2),
            Err(Error::InsufficientShares { need: 2, have: 1 })
        ));
    }

    #[test]
    fn lagrange_rejects_duplicate_x() {
        let points = vec![(s(1), s(10)), (s(1), s(20))];
        assert!(matches!(lagrange_c0(&points, 2), Err(Error::DuplicatePoint)));
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn arb_scalar() -> impl Strategy<Value = Scalar> {
        any::<u64>().prop_map(Scalar::from)
    }

    proptest! {
        /// Lagrange reconstruction on k points generated from a known
        /// random polynomial returns the known c_0 exactly (§8).
        #[test]
        fn lagrange_reconstructs_random_polynomial(
            threshold in 2usize..10,
            coefficients in prop::collection::vec(arb_scalar(), 2..10),
            xs in prop::collection::hash_set(1u64..1_000_000, 10),
        ) {
            let threshold = threshold.min(coefficients.len());
            let coefficients = &coefficients[..threshold];
            let xs: Vec<u64> = xs.into_iter().take(threshold).collect();
            prop_assume!(xs.len() == threshold);

            let eval = |x: &Scalar| {
                let mut acc = Scalar::zero();
                for c in coefficients.iter().rev() {
                    acc = acc.mul(x).add(c);
                }
                acc
            };
            let points: Vec<(Scalar, Scalar)> = xs
                .iter()
                .map(|&x| {
                    let x = Scalar::from(x);
                    let y = eval(&x);
                    (x, y)
                })
                .collect();

            let c0 = lagrange_c0(&points, threshold).unwrap();
            prop_assert_eq!(c0, coefficients[0].clone());
        }
    }
}
