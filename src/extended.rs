//! IEEE-754 80-bit extended precision, in the layout used by Apple's SANE / AIFF formats.
//!
//! The encoding is 10 bytes, always big-endian:
//!
//! ```text
//! +------+----------+--------------------+--------------------+
//! | sign | exponent | mantissa hi (u32)  | mantissa lo (u32)  |
//! | 1 b  | 15 bits  | explicit integer b | ...                |
//! +------+----------+--------------------+--------------------+
//! ```
//!
//! The exponent bias is 16383 and the integer bit of the mantissa is stored explicitly.
//!
//! # References
//! * Apple Computer, "Apple Numerics Manual", 2nd ed., chapter 2.
//! * Ken Turkowski, `ConvertToIeeeExtended` / `ConvertFromIeeeExtended` (1991).

use zerocopy::byteorder::{BE, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

const BIAS: i32 = 16383;
const INF_EXPONENT: u16 = 0x7fff;
const SIGN: u16 = 0x8000;

/// An 80-bit extended-precision value, exactly as it appears in the stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct Extended80 {
    sign_exponent: U16<BE>,
    mantissa_hi: U32<BE>,
    mantissa_lo: U32<BE>,
}

impl Extended80 {
    /// Size of the encoding in bytes.
    pub const SIZE: usize = 10;

    /// Encodes `value`.
    ///
    /// Both zeros encode as all-zero bytes. Infinities encode with the maximum exponent and a
    /// zero mantissa. NaN has no representation here and is encoded as positive infinity.
    pub fn from_f64(value: f64) -> Self {
        let sign = if value < 0.0 { SIGN } else { 0 };

        let (sign_exponent, mantissa) = if value == 0.0 {
            (0, 0)
        } else if !value.is_finite() {
            (sign | INF_EXPONENT, 0)
        } else {
            let bits = value.to_bits();
            let biased = ((bits >> 52) & 0x7ff) as i32;
            let fraction = bits & ((1u64 << 52) - 1);

            // Normalize so that bit 52 holds the leading one.
            let (exponent, significand) = if biased == 0 {
                let shift = fraction.leading_zeros() - 11;
                (-1022 - shift as i32, fraction << shift)
            } else {
                (biased - 1023, fraction | (1u64 << 52))
            };

            (sign | (exponent + BIAS) as u16, significand << 11)
        };

        Self {
            sign_exponent: U16::new(sign_exponent),
            mantissa_hi: U32::new((mantissa >> 32) as u32),
            mantissa_lo: U32::new(mantissa as u32),
        }
    }

    /// Decodes the value.
    ///
    /// The maximum exponent decodes as infinity regardless of the mantissa. Values outside the
    /// range of `f64` overflow to infinity or underflow towards zero.
    pub fn to_f64(&self) -> f64 {
        let sign_exponent = self.sign_exponent.get();
        let exponent = (sign_exponent & !SIGN) as i32;
        let hi = self.mantissa_hi.get();
        let lo = self.mantissa_lo.get();

        let magnitude = if exponent == 0 && hi == 0 && lo == 0 {
            0.0
        } else if exponent == INF_EXPONENT as i32 {
            f64::INFINITY
        } else {
            let e = exponent - BIAS;
            scalbn(hi as f64, e - 31) + scalbn(lo as f64, e - 63)
        };

        if sign_exponent & SIGN != 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Returns the 10 stream bytes.
    pub fn to_bytes(&self) -> [u8; 10] {
        let mut bytes = [0u8; 10];
        bytes.copy_from_slice(self.as_bytes());
        bytes
    }

    /// Interprets 10 stream bytes.
    pub fn from_bytes(bytes: [u8; 10]) -> Self {
        zerocopy::transmute!(bytes)
    }
}

impl From<f64> for Extended80 {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Extended80> for f64 {
    fn from(value: Extended80) -> Self {
        value.to_f64()
    }
}

/// Computes `x * 2^n` without intermediate overflow or loss when the result is representable.
fn scalbn(mut x: f64, mut n: i32) -> f64 {
    let p1023 = f64::from_bits(0x7fe0_0000_0000_0000); // 2^1023
    let pm969 = f64::from_bits(0x0360_0000_0000_0000); // 2^-969 = 2^-1022 * 2^53

    if n > 1023 {
        x *= p1023;
        n -= 1023;
        if n > 1023 {
            x *= p1023;
            n -= 1023;
            if n > 1023 {
                n = 1023;
            }
        }
    } else if n < -1022 {
        // Stepping by 2^-969 instead of 2^-1022 keeps the intermediate out of the subnormal
        // range, so rounding happens only once.
        x *= pm969;
        n += 969;
        if n < -1022 {
            x *= pm969;
            n += 969;
            if n < -1022 {
                n = -1022;
            }
        }
    }

    x * f64::from_bits(((0x3ff + n) as u64) << 52)
}
