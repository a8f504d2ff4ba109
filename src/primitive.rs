use crate::ByteOrder;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// A fixed-width integer that can be moved between host order and stream order.
///
/// Values are read by copying raw stream bytes into the integer's memory and then calling
/// `from_order`; they are written by calling `to_order` and copying the integer's memory out.
/// Both are no-ops when the stream order matches the host.
pub(crate) trait Primitive: Copy + FromBytes + IntoBytes + Immutable {
    /// Converts a host-order value to its in-memory stream representation.
    fn to_order(self, order: ByteOrder) -> Self;

    /// Converts an in-memory stream representation to a host-order value.
    fn from_order(self, order: ByteOrder) -> Self;
}

macro_rules! impl_primitive {
    ($($t:ty),*) => {
        $(
            impl Primitive for $t {
                #[inline(always)]
                fn to_order(self, order: ByteOrder) -> Self {
                    match order {
                        ByteOrder::BigEndian => self.to_be(),
                        ByteOrder::LittleEndian => self.to_le(),
                    }
                }

                #[inline(always)]
                fn from_order(self, order: ByteOrder) -> Self {
                    match order {
                        ByteOrder::BigEndian => <$t>::from_be(self),
                        ByteOrder::LittleEndian => <$t>::from_le(self),
                    }
                }
            }
        )*
    };
}

impl_primitive!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Appends the stream representation of every element of `values` to `out`.
pub(crate) fn encode_slice<T: Primitive>(values: &[T], order: ByteOrder, out: &mut Vec<u8>) {
    out.reserve(core::mem::size_of_val(values));
    for &v in values {
        out.extend_from_slice(v.to_order(order).as_bytes());
    }
}

/// Converts, in place, elements whose memory was filled directly from the stream.
pub(crate) fn decode_in_place<T: Primitive>(values: &mut [T], order: ByteOrder) {
    if order.is_swapped() {
        for v in values.iter_mut() {
            *v = v.from_order(order);
        }
    }
}
