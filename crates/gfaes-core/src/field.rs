//! Polynomial arithmetic over GF(2^8).
//!
//! Elements are bytes whose bits are the coefficients of a polynomial of degree
//! at most 7. All products are reduced modulo the Rijndael polynomial
//! `x^8 + x^4 + x^3 + x + 1`.

use crate::error::{Error, Result};

/// Degree of the field extension (`2^ORDER` elements).
pub const ORDER: u32 = 8;

/// Irreducible modulus `x^8 + x^4 + x^3 + x + 1`.
pub const MODULUS: u16 = 0x11b;

const HIGH_BIT: u8 = 1 << (ORDER - 1);

/// Adds two elements. Addition and subtraction are both XOR in characteristic two.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplies two elements, reducing while doubling `a` for every bit of `b`.
pub fn multiply(mut a: u8, b: u8) -> u8 {
    let mut product = 0u8;
    for bit in 0..ORDER {
        if b & (1 << bit) != 0 {
            product ^= a;
        }
        a = double(a);
    }
    product
}

/// Multiplies by `x`, folding the modulus back in when the top coefficient overflows.
#[inline]
pub fn double(a: u8) -> u8 {
    let shifted = a << 1;
    if a & HIGH_BIT != 0 {
        shifted ^ (MODULUS as u8)
    } else {
        shifted
    }
}

/// Index of the highest set bit. The zero polynomial reports degree 0.
pub fn degree(polynomial: u16) -> u32 {
    match polynomial {
        0 => 0,
        p => u16::BITS - 1 - p.leading_zeros(),
    }
}

/// Long division of `dividend` by `divisor`, returning `(quotient, remainder)`.
///
/// The divisor may be at most degree [`ORDER`], so the field modulus itself is a
/// valid divisor.
pub fn divide(dividend: u16, divisor: u16) -> Result<(u16, u16)> {
    if divisor == 0 || degree(divisor) > ORDER {
        return Err(Error::InvalidDivisor {
            divisor,
            order: ORDER,
        });
    }

    let divisor_degree = degree(divisor);
    let mut quotient = 0u16;
    let mut remainder = dividend;
    let mut bit = degree(dividend);

    while bit >= divisor_degree {
        if remainder & (1 << bit) != 0 {
            let shift = bit - divisor_degree;
            quotient ^= 1 << shift;
            remainder ^= divisor << shift;
        }
        if bit == 0 {
            break;
        }
        bit -= 1;
    }

    Ok((quotient, remainder))
}

/// Reduces an arbitrary polynomial modulo [`MODULUS`].
pub fn reduce(polynomial: u16) -> Result<u8> {
    let (_, remainder) = divide(polynomial, MODULUS)?;
    Ok(remainder as u8)
}

/// Multiplicative inverse via the extended Euclidean algorithm.
///
/// Zero has no inverse and maps to zero by convention.
pub fn inverse(element: u8) -> Result<u8> {
    if element == 0 {
        return Ok(0);
    }

    let (mut r_old, mut r) = (u16::from(element), MODULUS);
    let (mut s_old, mut s) = (1u8, 0u8);

    while r != 0 {
        let (quotient, remainder) = divide(r_old, r)?;
        (r_old, r) = (r, remainder);
        let quotient = reduce(quotient)?;
        (s_old, s) = (s, add(s_old, multiply(quotient, s)));
    }

    if r_old != 1 {
        return Err(Error::NoInverse {
            element,
            modulus: MODULUS,
        });
    }

    Ok(s_old)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_is_xor() {
        assert_eq!(add(0b0101_0101, 0b1100_1000), 0b1001_1101);
        assert_eq!(add(0xff, 0xff), 0);
    }

    #[test]
    fn multiply_known_answers() {
        assert_eq!(multiply(7, 5), 27);
        assert_eq!(multiply(0x53, 0xca), 0x01);
        assert_eq!(multiply(0x57, 0x83), 0xc1);
        assert_eq!(multiply(0x02, 0x80), 0x1b);
    }

    #[test]
    fn multiply_is_commutative() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(multiply(a, b), multiply(b, a), "{a:#04x} * {b:#04x}");
            }
        }
    }

    #[test]
    fn degree_tracks_highest_bit() {
        assert_eq!(degree(0), 0);
        assert_eq!(degree(1), 0);
        assert_eq!(degree(0x80), 7);
        assert_eq!(degree(MODULUS), 8);
    }

    #[test]
    fn divide_returns_quotient_and_remainder() {
        // (x^3 + x + 1) / (x + 1) = x^2 + x, remainder 1
        assert_eq!(divide(0b1011, 0b11), Ok((0b110, 1)));
        assert_eq!(divide(0x53, MODULUS), Ok((0, 0x53)));
        assert_eq!(divide(MODULUS, MODULUS), Ok((1, 0)));
    }

    #[test]
    fn divide_rejects_bad_divisors() {
        assert!(matches!(divide(5, 0), Err(Error::InvalidDivisor { .. })));
        assert!(matches!(
            divide(5, 0x300),
            Err(Error::InvalidDivisor { divisor: 0x300, .. })
        ));
    }

    #[test]
    fn inverse_known_answers() {
        assert_eq!(inverse(0), Ok(0));
        assert_eq!(inverse(1), Ok(1));
        assert_eq!(inverse(0x53), Ok(0xca));
        assert_eq!(inverse(0b1000_0000), Ok(0b1000_0011));
        assert_eq!(inverse(0b1001_0101), Ok(0b1000_1010));
    }

    #[test]
    fn every_nonzero_element_has_an_inverse() {
        for a in 1..=255u8 {
            let inv = inverse(a).expect("field element is invertible");
            assert_eq!(multiply(a, inv), 1, "{a:#04x}");
        }
    }

    proptest! {
        #[test]
        fn multiply_distributes_over_add(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
            prop_assert_eq!(multiply(a, add(b, c)), add(multiply(a, b), multiply(a, c)));
        }

        #[test]
        fn division_reconstructs_dividend(dividend in 0u16..0x200, divisor in 1u16..0x200) {
            let (quotient, remainder) = divide(dividend, divisor).unwrap();
            prop_assert!(remainder == 0 || degree(remainder) < degree(divisor));
            let mut product = 0u16;
            for bit in 0..u16::BITS {
                if quotient & (1 << bit) != 0 {
                    product ^= divisor << bit;
                }
            }
            prop_assert_eq!(product ^ remainder, dividend);
        }
    }
}
