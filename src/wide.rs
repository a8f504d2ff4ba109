//! 64-bit integers built from two 32-bit words, and the byte-at-a-time codec that reads and
//! writes them.
//!
//! Old data files were produced by programs that had no native 64-bit integer and represented
//! one as a pair of 32-bit words. The codec here decomposes a value with nothing but
//! "shift right by 8", "take the low byte" and "multiply by 256 and add a byte". Because those
//! operations are defined for every `WideInt`, the native `u64`/`i64` path and the two-word
//! `ULongLong`/`LongLong` path produce identical bytes for the same logical value.

use crate::ByteOrder;

/// Arithmetic needed to move a 64-bit value through the wide-integer codec.
pub trait WideInt: Copy {
    /// The value zero.
    const ZERO: Self;

    /// Returns the least-significant 8 bits.
    fn low_byte(self) -> u8;

    /// Shifts the value right by 8 bits.
    fn shr8(self) -> Self;

    /// Returns `self * 256 + byte`, discarding bits shifted out of the top.
    fn accumulate(self, byte: u8) -> Self;
}

impl WideInt for u64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn low_byte(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    fn shr8(self) -> Self {
        self >> 8
    }

    #[inline(always)]
    fn accumulate(self, byte: u8) -> Self {
        (self << 8) | byte as u64
    }
}

impl WideInt for i64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn low_byte(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    fn shr8(self) -> Self {
        self >> 8
    }

    #[inline(always)]
    fn accumulate(self, byte: u8) -> Self {
        (self << 8) | byte as i64
    }
}

/// An unsigned 64-bit integer stored as two 32-bit words.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, PartialOrd, Ord)]
pub struct ULongLong {
    // Field order gives the derived `Ord` numeric ordering.
    hi: u32,
    lo: u32,
}

impl ULongLong {
    /// Builds a value from its high and low words.
    pub const fn new(hi: u32, lo: u32) -> Self {
        Self { hi, lo }
    }

    /// The most-significant 32 bits.
    pub const fn hi(self) -> u32 {
        self.hi
    }

    /// The least-significant 32 bits.
    pub const fn lo(self) -> u32 {
        self.lo
    }

    /// Returns the value as a native `u64`.
    pub const fn to_u64(self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }
}

impl From<u64> for ULongLong {
    fn from(value: u64) -> Self {
        Self::new((value >> 32) as u32, value as u32)
    }
}

impl From<ULongLong> for u64 {
    fn from(value: ULongLong) -> Self {
        value.to_u64()
    }
}

impl WideInt for ULongLong {
    const ZERO: Self = Self::new(0, 0);

    fn low_byte(self) -> u8 {
        (self.lo & 0xff) as u8
    }

    fn shr8(self) -> Self {
        Self::new(self.hi >> 8, (self.lo >> 8) | (self.hi << 24))
    }

    fn accumulate(self, byte: u8) -> Self {
        Self::new((self.hi << 8) | (self.lo >> 24), (self.lo << 8) | byte as u32)
    }
}

/// A signed 64-bit integer stored as a signed high word and an unsigned low word.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, PartialOrd, Ord)]
pub struct LongLong {
    hi: i32,
    lo: u32,
}

impl LongLong {
    /// Builds a value from its high and low words.
    pub const fn new(hi: i32, lo: u32) -> Self {
        Self { hi, lo }
    }

    /// The most-significant 32 bits, including the sign.
    pub const fn hi(self) -> i32 {
        self.hi
    }

    /// The least-significant 32 bits.
    pub const fn lo(self) -> u32 {
        self.lo
    }

    /// Returns the value as a native `i64`.
    pub const fn to_i64(self) -> i64 {
        ((self.hi as i64) << 32) | self.lo as i64
    }
}

impl From<i64> for LongLong {
    fn from(value: i64) -> Self {
        Self::new((value >> 32) as i32, value as u32)
    }
}

impl From<LongLong> for i64 {
    fn from(value: LongLong) -> Self {
        value.to_i64()
    }
}

impl WideInt for LongLong {
    const ZERO: Self = Self::new(0, 0);

    fn low_byte(self) -> u8 {
        (self.lo & 0xff) as u8
    }

    /// Arithmetic shift: the sign of the high word is preserved.
    fn shr8(self) -> Self {
        Self::new(self.hi >> 8, (self.lo >> 8) | ((self.hi as u32) << 24))
    }

    fn accumulate(self, byte: u8) -> Self {
        Self::new(
            (self.hi << 8) | (self.lo >> 24) as i32,
            (self.lo << 8) | byte as u32,
        )
    }
}

/// Encodes one value into 8 bytes.
///
/// The low byte is peeled off eight times. For big-endian streams the peeled bytes are stored
/// back-to-front, so the most-significant byte comes first.
pub fn encode_wide<T: WideInt>(value: T, order: ByteOrder) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    let mut v = value;
    for i in 0..8 {
        let slot = match order {
            ByteOrder::BigEndian => 7 - i,
            ByteOrder::LittleEndian => i,
        };
        bytes[slot] = v.low_byte();
        v = v.shr8();
    }
    bytes
}

/// Decodes one value from 8 bytes.
///
/// Bytes are accumulated most-significant first: in stream order for big-endian streams and in
/// reverse stream order for little-endian streams.
pub fn decode_wide<T: WideInt>(bytes: &[u8; 8], order: ByteOrder) -> T {
    let mut v = T::ZERO;
    for i in 0..8 {
        let b = match order {
            ByteOrder::BigEndian => bytes[i],
            ByteOrder::LittleEndian => bytes[7 - i],
        };
        v = v.accumulate(b);
    }
    v
}

/// Appends the encoding of every element of `values` to `out`.
pub(crate) fn encode_wide_slice<T: WideInt>(values: &[T], order: ByteOrder, out: &mut Vec<u8>) {
    out.reserve(values.len() * 8);
    for &v in values {
        out.extend_from_slice(&encode_wide(v, order));
    }
}

/// Decodes `bytes`, which holds exactly `8 * values.len()` bytes, into `values`.
pub(crate) fn decode_wide_slice<T: WideInt>(bytes: &[u8], order: ByteOrder, values: &mut [T]) {
    debug_assert_eq!(bytes.len(), values.len() * 8);
    for (v, chunk) in values.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut b = [0u8; 8];
        b.copy_from_slice(chunk);
        *v = decode_wide(&b, order);
    }
}
