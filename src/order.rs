/// The order in which the bytes of a multi-byte value are transmitted.
///
/// The byte order is a property of the stream, not of the host. A stream written with
/// `BigEndian` on a little-endian machine is byte-for-byte identical to the same stream written
/// on a big-endian machine.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first. This is the default for new streams.
    #[default]
    LittleEndian,
    /// Most-significant byte first ("network order").
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the host CPU.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;

    /// The byte order of the host CPU.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Converts the "big-endian ordered" flag into a `ByteOrder`.
    pub fn from_big_endian(big_endian: bool) -> Self {
        if big_endian {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// Returns `true` for `BigEndian`.
    pub fn is_big_endian(self) -> bool {
        self == Self::BigEndian
    }

    /// Returns `true` if values in this order need a byte swap on the current host.
    pub fn is_swapped(self) -> bool {
        self != Self::NATIVE
    }

    /// Returns the opposite byte order.
    pub fn reversed(self) -> Self {
        match self {
            Self::LittleEndian => Self::BigEndian,
            Self::BigEndian => Self::LittleEndian,
        }
    }
}
