use crate::conv::{TextConv, Utf8};
use crate::extended::Extended80;
use crate::primitive::{encode_slice, Primitive};
use crate::wide::{encode_wide, encode_wide_slice, LongLong, ULongLong, WideInt};
use crate::{ByteOrder, DataStreamConfig, FloatPrecision, WriteData};
use log::{debug, trace};
use std::io::{self, Write};
use zerocopy::IntoBytes;

/// Encodes values into a byte stream that `DataReader` can decode.
///
/// Multi-byte values are written in the configured byte order, floating-point values in the
/// configured precision and strings through the configured text converter. Nothing about the
/// configuration is written to the stream.
///
/// # Errors
///
/// Errors from the underlying `Write` are returned unchanged. Strings that the text converter
/// cannot encode fail with `ErrorKind::InvalidInput`, as do strings and byte slices that are
/// longer than a `u32` length prefix can describe. Nothing is written for a value that fails
/// before its first byte is emitted.
pub struct DataWriter<W> {
    /// The output data.
    pub out: W,
    config: DataStreamConfig,
    conv: Box<dyn TextConv>,
}

impl<W: Write> DataWriter<W> {
    /// Creates a writer with the default configuration (little-endian, extended precision) and
    /// the strict UTF-8 converter.
    pub fn wrap(out: W) -> Self {
        Self::with_config(out, DataStreamConfig::default(), Utf8)
    }

    /// Creates a writer with the default configuration and the given text converter.
    pub fn with_conv(out: W, conv: impl TextConv + 'static) -> Self {
        Self::with_config(out, DataStreamConfig::default(), conv)
    }

    /// Creates a writer with an explicit configuration and text converter.
    pub fn with_config(out: W, config: DataStreamConfig, conv: impl TextConv + 'static) -> Self {
        Self {
            out,
            config,
            conv: Box::new(conv),
        }
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Accesses the inner buffer
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Flushes the underlying `Write`.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// The current configuration.
    pub fn config(&self) -> DataStreamConfig {
        self.config
    }

    /// Replaces the configuration. Affects every value written afterwards.
    pub fn set_config(&mut self, config: DataStreamConfig) {
        trace!("DataWriter: config {:?} -> {:?}", self.config, config);
        self.config = config;
    }

    /// The byte order of multi-byte values.
    pub fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    /// Sets the byte order of multi-byte values.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        trace!("DataWriter: byte order {:?}", byte_order);
        self.config.byte_order = byte_order;
    }

    /// Selects big-endian (`true`) or little-endian (`false`) byte order.
    pub fn big_endian_ordered(&mut self, big_endian: bool) {
        self.set_byte_order(ByteOrder::from_big_endian(big_endian));
    }

    /// Encodes floating-point values in the 10-byte extended format.
    pub fn use_extended_precision(&mut self) {
        trace!("DataWriter: extended precision");
        self.config.precision = FloatPrecision::Extended;
    }

    /// Encodes floating-point values as 4-byte and 8-byte IEEE-754.
    pub fn use_basic_precision(&mut self) {
        trace!("DataWriter: basic precision");
        self.config.precision = FloatPrecision::Basic;
    }

    /// Returns `true` if floating-point values use the extended format.
    pub fn is_extended_precision(&self) -> bool {
        self.config.precision == FloatPrecision::Extended
    }

    /// The text converter used for strings.
    pub fn conv(&self) -> &dyn TextConv {
        &*self.conv
    }

    /// Replaces the text converter used for strings.
    pub fn set_conv(&mut self, conv: impl TextConv + 'static) {
        trace!("DataWriter: text converter {}", conv.name());
        self.conv = Box::new(conv);
    }

    #[inline(always)]
    fn write_primitive<T: Primitive>(&mut self, value: T) -> io::Result<()> {
        self.out
            .write_all(value.to_order(self.config.byte_order).as_bytes())
    }

    fn write_primitive_slice<T: Primitive>(&mut self, values: &[T]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut bytes = Vec::new();
        encode_slice(values, self.config.byte_order, &mut bytes);
        self.out.write_all(&bytes)
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `u64` value
    pub fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64) -> io::Result<()> {
        self.write_primitive(value)
    }

    /// Writes `values` as consecutive bytes.
    pub fn write_u8_slice(&mut self, values: &[u8]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `i8` values.
    pub fn write_i8_slice(&mut self, values: &[i8]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `u16` values.
    pub fn write_u16_slice(&mut self, values: &[u16]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `i16` values.
    pub fn write_i16_slice(&mut self, values: &[i16]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `u32` values.
    pub fn write_u32_slice(&mut self, values: &[u32]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `i32` values.
    pub fn write_i32_slice(&mut self, values: &[i32]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `u64` values.
    pub fn write_u64_slice(&mut self, values: &[u64]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes `values` as consecutive `i64` values.
    pub fn write_i64_slice(&mut self, values: &[i64]) -> io::Result<()> {
        self.write_primitive_slice(values)
    }

    /// Writes a 64-bit value with the byte-at-a-time wide-integer codec.
    pub fn write_wide<T: WideInt>(&mut self, value: T) -> io::Result<()> {
        self.out
            .write_all(&encode_wide(value, self.config.byte_order))
    }

    /// Writes `values` as consecutive 64-bit values, using the wide-integer codec.
    pub fn write_wide_slice<T: WideInt>(&mut self, values: &[T]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut bytes = Vec::new();
        encode_wide_slice(values, self.config.byte_order, &mut bytes);
        self.out.write_all(&bytes)
    }

    /// Writes a signed two-word 64-bit integer.
    pub fn write_ll(&mut self, value: LongLong) -> io::Result<()> {
        self.write_wide(value)
    }

    /// Writes an unsigned two-word 64-bit integer.
    pub fn write_ull(&mut self, value: ULongLong) -> io::Result<()> {
        self.write_wide(value)
    }

    /// Writes consecutive signed two-word 64-bit integers.
    pub fn write_ll_slice(&mut self, values: &[LongLong]) -> io::Result<()> {
        self.write_wide_slice(values)
    }

    /// Writes consecutive unsigned two-word 64-bit integers.
    pub fn write_ull_slice(&mut self, values: &[ULongLong]) -> io::Result<()> {
        self.write_wide_slice(values)
    }

    /// Writes an `f64`. See `DataReader::read_f64` for the encoding.
    pub fn write_f64(&mut self, value: f64) -> io::Result<()> {
        match self.config.precision {
            FloatPrecision::Extended => self.out.write_all(Extended80::from_f64(value).as_bytes()),
            FloatPrecision::Basic => {
                let bits = value.to_bits();
                let hi = (bits >> 32) as u32;
                let lo = bits as u32;
                let (first, second) = match self.config.byte_order {
                    ByteOrder::BigEndian => (hi, lo),
                    ByteOrder::LittleEndian => (lo, hi),
                };
                self.write_u32(first)?;
                self.write_u32(second)
            }
        }
    }

    /// Writes an `f32`. With extended precision, the value is widened to `f64` first.
    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        match self.config.precision {
            FloatPrecision::Extended => self.write_f64(value as f64),
            FloatPrecision::Basic => self.write_u32(value.to_bits()),
        }
    }

    /// Writes consecutive `f64` values.
    pub fn write_f64_slice(&mut self, values: &[f64]) -> io::Result<()> {
        for &v in values {
            self.write_f64(v)?;
        }
        Ok(())
    }

    /// Writes consecutive `f32` values.
    pub fn write_f32_slice(&mut self, values: &[f32]) -> io::Result<()> {
        for &v in values {
            self.write_f32(v)?;
        }
        Ok(())
    }

    /// Writes a `u32` length prefix followed by `bytes`.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) -> io::Result<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} bytes do not fit a 32-bit length prefix", bytes.len()),
            )
        })?;
        trace!("DataWriter: length prefix {len}");
        self.write_u32(len)?;
        if len > 0 {
            self.out.write_all(bytes)?;
        }
        Ok(())
    }

    /// Encodes `s` with the text converter and writes it in length-prefixed form. The prefix
    /// counts encoded bytes, not characters. An empty string is written as a zero prefix only.
    pub fn write_string(&mut self, s: &str) -> io::Result<()> {
        let encoded = match self.conv.encode(s) {
            Ok(encoded) => encoded,
            Err(e) => {
                debug!(
                    "DataWriter: cannot encode {} chars as {}: {e}",
                    s.chars().count(),
                    self.conv.name()
                );
                return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
            }
        };
        self.write_bytes_prefixed(&encoded)
    }

    /// Writes any value that implements `WriteData` and returns `self`, so calls can be chained.
    ///
    /// ```
    /// # use data_stream_io::DataWriter;
    /// let mut w = DataWriter::new();
    /// w.put(&42u8)?.put(&0x0102u16)?.put("hi")?;
    /// assert_eq!(w.out, [42, 0x02, 0x01, 2, 0, 0, 0, b'h', b'i']);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn put<T: WriteData + ?Sized>(&mut self, value: &T) -> io::Result<&mut Self> {
        value.write_to(self)?;
        Ok(self)
    }
}

impl DataWriter<Vec<u8>> {
    /// Creates a new `DataWriter` over a `Vec<u8>`
    pub fn new() -> Self {
        Self::wrap(Vec::new())
    }

    /// Creates a new `DataWriter` over a `Vec<u8>` with the given capacity.
    pub fn with_capacity(len: usize) -> Self {
        Self::wrap(Vec::with_capacity(len))
    }
}

impl Default for DataWriter<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}
