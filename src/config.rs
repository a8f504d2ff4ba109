use crate::ByteOrder;

/// Selects how `f32` and `f64` values are encoded.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum FloatPrecision {
    /// 4-byte IEEE-754 single and 8-byte IEEE-754 double, in stream byte order.
    Basic,

    /// 10-byte IEEE-754 80-bit extended precision, always big-endian. `f32` values are widened
    /// to `f64` before encoding.
    ///
    /// This is the default, because existing data files were written with it.
    #[default]
    Extended,
}

/// Settings shared by `DataReader` and `DataWriter`.
///
/// A reader must use the same configuration as the writer that produced the stream; nothing in
/// the stream records it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct DataStreamConfig {
    /// Byte order of multi-byte integers and basic-precision floats.
    pub byte_order: ByteOrder,
    /// Encoding used for floating-point values.
    pub precision: FloatPrecision,
}

impl DataStreamConfig {
    /// Little-endian, extended precision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the byte order.
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Shorthand for `byte_order(ByteOrder::BigEndian)`.
    pub fn big_endian(self) -> Self {
        self.byte_order(ByteOrder::BigEndian)
    }

    /// Shorthand for `byte_order(ByteOrder::LittleEndian)`.
    pub fn little_endian(self) -> Self {
        self.byte_order(ByteOrder::LittleEndian)
    }

    /// Sets the floating-point precision.
    pub fn precision(mut self, precision: FloatPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Shorthand for `precision(FloatPrecision::Basic)`.
    pub fn basic_precision(self) -> Self {
        self.precision(FloatPrecision::Basic)
    }

    /// Shorthand for `precision(FloatPrecision::Extended)`.
    pub fn extended_precision(self) -> Self {
        self.precision(FloatPrecision::Extended)
    }
}
