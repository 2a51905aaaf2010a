//! Decimal rounding with round-half-to-even on the exact binary value
//!
//! `round_half_even(x, n)` returns the same value as Python's `round(x, n)`:
//! the decision is made against the exact value the `f64` holds, not its
//! shortest decimal form. `2.675` is stored slightly below 2.675 and rounds
//! to 2.67; `2.125` is exact and a true tie, so it rounds to the even 2.12.

/// Highest supported number of decimal places
const MAX_PLACES: u32 = 15;

/// Round `value` to `places` decimal places, ties to even.
///
/// Non-finite values, zero, and `places` above 15 are returned unchanged.
pub fn round_half_even(value: f64, places: u32) -> f64 {
    if !value.is_finite() || value == 0.0 || places > MAX_PLACES {
        return value;
    }

    // value = mantissa / 2^shift exactly
    let Some((mantissa, shift)) = dyadic_parts(value.abs()) else {
        // already an integer
        return value;
    };

    let scale = 10u128.pow(places);
    let numerator = u128::from(mantissa) * scale;

    // numerator < 2^103, so beyond this shift the scaled value is below 0.5
    let rounded = if shift > 120 {
        0
    } else {
        let quotient = numerator >> shift;
        let remainder = numerator & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);

        if remainder > half || (remainder == half && quotient & 1 == 1) {
            quotient + 1
        } else {
            quotient
        }
    };

    let magnitude = rounded as f64 / scale as f64;
    if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Split a positive finite `f64` into `(mantissa, shift)` with
/// `value == mantissa / 2^shift` and `shift >= 1`, reduced so the mantissa
/// is odd. Returns `None` when the value is a whole number.
fn dyadic_parts(value: f64) -> Option<(u64, u32)> {
    let bits = value.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mantissa, exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent_bits - 1075)
    };

    if exponent >= 0 || mantissa == 0 {
        return None;
    }

    let shift = exponent.unsigned_abs();
    let trailing = mantissa.trailing_zeros().min(shift);
    let (mantissa, shift) = (mantissa >> trailing, shift - trailing);

    if shift == 0 {
        None
    } else {
        Some((mantissa, shift))
    }
}
