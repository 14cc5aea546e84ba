//! KA3D 16-bit float decoding
//!
//! The exporter packs floats as 1 sign bit, 5 exponent bits and 10 mantissa
//! bits, but its expansion back to 32 bits is not IEEE 754 half precision:
//! the exponent is re-biased by a flat +112 and only two patterns are special
//! cased. Files were authored against that behavior, so it is kept verbatim.

/// Exponent bias difference between the packed form and f32.
const EXPONENT_REBIAS: u32 = 112;

/// Re-biased exponent that decodes to signed zero when the mantissa is 0.
const ZERO_EXPONENT: u32 = 112;

/// Re-biased exponent that decodes to signed infinity when the mantissa is 0.
const INFINITY_EXPONENT: u32 = 142;

/// Decode a KA3D half float.
///
/// - `(exponent, mantissa) == (112, 0)` gives signed zero.
/// - `(exponent, mantissa) == (142, 0)` gives signed infinity.
/// - Everything else is re-assembled directly, so `0x7C00` is 65536.0 and
///   no NaN is ever produced.
#[must_use]
pub fn half_to_f32(bits: u16) -> f32 {
    let bits = u32::from(bits);
    let sign = (bits >> 15) & 0x1;
    let mut exponent = ((bits >> 10) & 0x1F) + EXPONENT_REBIAS;
    let mantissa = (bits & 0x3FF) << 13;

    if mantissa == 0 {
        if exponent == ZERO_EXPONENT {
            exponent = 0;
        } else if exponent == INFINITY_EXPONENT {
            exponent = 0xFF;
        }
    }

    f32::from_bits((sign << 31) | (exponent << 23) | mantissa)
}
