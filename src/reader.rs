use crate::conv::{TextConv, Utf8};
use crate::extended::Extended80;
use crate::primitive::{decode_in_place, Primitive};
use crate::wide::{decode_wide, decode_wide_slice, LongLong, ULongLong, WideInt};
use crate::{ByteOrder, DataStreamConfig, FloatPrecision, ReadData};
use log::{debug, trace};
use std::io::{self, Read};
use zerocopy::{FromZeros, IntoBytes};

/// Reads values from a byte stream. The values are encoded using the rules described in the
/// crate documentation; the stream must have been written by a `DataWriter` with the same
/// `DataStreamConfig` and an equivalent text converter.
///
/// `DataReader` does no buffering of its own. Every call issues one or more reads against the
/// underlying `Read`, so wrap unbuffered sources (files, sockets) in a `std::io::BufReader`.
///
/// # Errors
///
/// Errors from the underlying `Read` are returned unchanged. A stream that ends in the middle
/// of a value fails with `ErrorKind::UnexpectedEof`; the bytes that were consumed are lost, and
/// the position of the stream is undefined. Strings that the text converter cannot decode fail
/// with `ErrorKind::InvalidData`, and the error carries the converter's `ConvError`.
pub struct DataReader<R> {
    /// The byte source.
    pub input: R,
    config: DataStreamConfig,
    conv: Box<dyn TextConv>,
}

impl<R: Read> DataReader<R> {
    /// Creates a reader with the default configuration (little-endian, extended precision) and
    /// the strict UTF-8 converter.
    pub fn new(input: R) -> Self {
        Self::with_config(input, DataStreamConfig::default(), Utf8)
    }

    /// Creates a reader with the default configuration and the given text converter.
    pub fn with_conv(input: R, conv: impl TextConv + 'static) -> Self {
        Self::with_config(input, DataStreamConfig::default(), conv)
    }

    /// Creates a reader with an explicit configuration and text converter.
    pub fn with_config(input: R, config: DataStreamConfig, conv: impl TextConv + 'static) -> Self {
        Self {
            input,
            config,
            conv: Box::new(conv),
        }
    }

    /// Extracts the byte source.
    pub fn into_inner(self) -> R {
        self.input
    }

    /// Accesses the byte source.
    pub fn get_ref(&self) -> &R {
        &self.input
    }

    /// Accesses the byte source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.input
    }

    /// The current configuration.
    pub fn config(&self) -> DataStreamConfig {
        self.config
    }

    /// Replaces the configuration. Affects every value read afterwards.
    pub fn set_config(&mut self, config: DataStreamConfig) {
        trace!("DataReader: config {:?} -> {:?}", self.config, config);
        self.config = config;
    }

    /// The byte order of multi-byte values.
    pub fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    /// Sets the byte order of multi-byte values.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        trace!("DataReader: byte order {:?}", byte_order);
        self.config.byte_order = byte_order;
    }

    /// Selects big-endian (`true`) or little-endian (`false`) byte order.
    pub fn big_endian_ordered(&mut self, big_endian: bool) {
        self.set_byte_order(ByteOrder::from_big_endian(big_endian));
    }

    /// Decodes floating-point values from the 10-byte extended format.
    pub fn use_extended_precision(&mut self) {
        trace!("DataReader: extended precision");
        self.config.precision = FloatPrecision::Extended;
    }

    /// Decodes floating-point values from 4-byte and 8-byte IEEE-754.
    pub fn use_basic_precision(&mut self) {
        trace!("DataReader: basic precision");
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
        trace!("DataReader: text converter {}", conv.name());
        self.conv = Box::new(conv);
    }

    #[inline(always)]
    fn read_primitive<T: Primitive>(&mut self) -> io::Result<T> {
        let mut value = T::new_zeroed();
        self.input.read_exact(value.as_mut_bytes())?;
        Ok(value.from_order(self.config.byte_order))
    }

    fn read_primitive_into<T: Primitive>(&mut self, values: &mut [T]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.input.read_exact(values.as_mut_bytes())?;
        decode_in_place(values, self.config.byte_order);
        Ok(())
    }

    /// Reads a single `u8` value.
    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.read_primitive()
    }

    /// Reads a single `i8` value.
    pub fn read_i8(&mut self) -> io::Result<i8> {
        self.read_primitive()
    }

    /// Reads a `u16` in stream byte order.
    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.read_primitive()
    }

    /// Reads an `i16` in stream byte order.
    pub fn read_i16(&mut self) -> io::Result<i16> {
        self.read_primitive()
    }

    /// Reads a `u32` in stream byte order.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.read_primitive()
    }

    /// Reads an `i32` in stream byte order.
    pub fn read_i32(&mut self) -> io::Result<i32> {
        self.read_primitive()
    }

    /// Reads a `u64` in stream byte order.
    pub fn read_u64(&mut self) -> io::Result<u64> {
        self.read_primitive()
    }

    /// Reads an `i64` in stream byte order.
    pub fn read_i64(&mut self) -> io::Result<i64> {
        self.read_primitive()
    }

    /// Fills `values` with consecutive bytes from the stream.
    pub fn read_u8_into(&mut self, values: &mut [u8]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `i8` values.
    pub fn read_i8_into(&mut self, values: &mut [i8]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `u16` values.
    pub fn read_u16_into(&mut self, values: &mut [u16]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `i16` values.
    pub fn read_i16_into(&mut self, values: &mut [i16]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `u32` values.
    pub fn read_u32_into(&mut self, values: &mut [u32]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `i32` values.
    pub fn read_i32_into(&mut self, values: &mut [i32]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `u64` values.
    pub fn read_u64_into(&mut self, values: &mut [u64]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Fills `values` with consecutive `i64` values.
    pub fn read_i64_into(&mut self, values: &mut [i64]) -> io::Result<()> {
        self.read_primitive_into(values)
    }

    /// Reads a 64-bit value with the byte-at-a-time wide-integer codec.
    ///
    /// The bytes are identical to those read by `read_u64`; this entry point exists so that
    /// `ULongLong` and `LongLong` can be read directly.
    pub fn read_wide<T: WideInt>(&mut self) -> io::Result<T> {
        let mut bytes = [0u8; 8];
        self.input.read_exact(&mut bytes)?;
        Ok(decode_wide(&bytes, self.config.byte_order))
    }

    /// Fills `values` with consecutive 64-bit values, using the wide-integer codec.
    pub fn read_wide_into<T: WideInt>(&mut self, values: &mut [T]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut bytes = vec![0u8; values.len() * 8];
        self.input.read_exact(&mut bytes)?;
        decode_wide_slice(&bytes, self.config.byte_order, values);
        Ok(())
    }

    /// Reads a signed two-word 64-bit integer.
    pub fn read_ll(&mut self) -> io::Result<LongLong> {
        self.read_wide()
    }

    /// Reads an unsigned two-word 64-bit integer.
    pub fn read_ull(&mut self) -> io::Result<ULongLong> {
        self.read_wide()
    }

    /// Fills `values` with consecutive signed two-word 64-bit integers.
    pub fn read_ll_into(&mut self, values: &mut [LongLong]) -> io::Result<()> {
        self.read_wide_into(values)
    }

    /// Fills `values` with consecutive unsigned two-word 64-bit integers.
    pub fn read_ull_into(&mut self, values: &mut [ULongLong]) -> io::Result<()> {
        self.read_wide_into(values)
    }

    /// Reads an `f64`.
    ///
    /// With extended precision, this reads 10 bytes of IEEE 80-bit extended, big-endian
    /// regardless of the stream byte order. With basic precision, it reads the IEEE-754 double
    /// as two 32-bit words: the high word first in big-endian streams, the low word first in
    /// little-endian streams. Each word is itself in stream byte order, so the 8 bytes are the
    /// whole double in stream byte order.
    pub fn read_f64(&mut self) -> io::Result<f64> {
        match self.config.precision {
            FloatPrecision::Extended => {
                let mut ext = Extended80::new_zeroed();
                self.input.read_exact(ext.as_mut_bytes())?;
                Ok(ext.to_f64())
            }
            FloatPrecision::Basic => {
                let first = self.read_u32()?;
                let second = self.read_u32()?;
                let (hi, lo) = match self.config.byte_order {
                    ByteOrder::BigEndian => (first, second),
                    ByteOrder::LittleEndian => (second, first),
                };
                Ok(f64::from_bits(((hi as u64) << 32) | lo as u64))
            }
        }
    }

    /// Reads an `f32`.
    ///
    /// With extended precision, the value is stored as a 10-byte extended double and narrowed.
    pub fn read_f32(&mut self) -> io::Result<f32> {
        match self.config.precision {
            FloatPrecision::Extended => Ok(self.read_f64()? as f32),
            FloatPrecision::Basic => Ok(f32::from_bits(self.read_u32()?)),
        }
    }

    /// Fills `values` with consecutive `f64` values.
    pub fn read_f64_into(&mut self, values: &mut [f64]) -> io::Result<()> {
        for v in values.iter_mut() {
            *v = self.read_f64()?;
        }
        Ok(())
    }

    /// Fills `values` with consecutive `f32` values.
    pub fn read_f32_into(&mut self, values: &mut [f32]) -> io::Result<()> {
        for v in values.iter_mut() {
            *v = self.read_f32()?;
        }
        Ok(())
    }

    /// Reads a `u32` length prefix, then that many bytes.
    ///
    /// The payload is read incrementally, so a corrupt length prefix fails with
    /// `UnexpectedEof` when the stream runs out rather than allocating the full length up front.
    pub fn read_bytes_prefixed(&mut self) -> io::Result<Vec<u8>> {
        let len = self.read_u32()?;
        trace!("DataReader: length prefix {len}");

        let mut bytes = Vec::new();
        if len == 0 {
            return Ok(bytes);
        }

        let n = self.input.by_ref().take(len as u64).read_to_end(&mut bytes)?;
        if n != len as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream ended after {n} of {len} payload bytes"),
            ));
        }
        Ok(bytes)
    }

    /// Reads a length-prefixed string and decodes it with the text converter.
    ///
    /// A zero length reads no payload and returns an empty string.
    pub fn read_string(&mut self) -> io::Result<String> {
        let bytes = self.read_bytes_prefixed()?;
        if bytes.is_empty() {
            return Ok(String::new());
        }
        match self.conv.decode(&bytes) {
            Ok(s) => Ok(s.into_owned()),
            Err(e) => {
                debug!(
                    "DataReader: cannot decode {} bytes as {}: {e}",
                    bytes.len(),
                    self.conv.name()
                );
                Err(io::Error::new(io::ErrorKind::InvalidData, e))
            }
        }
    }

    /// Reads a length-prefixed string without decoding it.
    ///
    /// The encoded stream does not record which text encoding was used, so the caller is
    /// responsible for interpreting the bytes.
    #[cfg(feature = "bstr")]
    pub fn read_bstring(&mut self) -> io::Result<bstr::BString> {
        Ok(bstr::BString::from(self.read_bytes_prefixed()?))
    }

    /// Reads any value that implements `ReadData`.
    ///
    /// ```
    /// # use data_stream_io::DataReader;
    /// let mut r = DataReader::new(&[0x2au8, 0x00, 0x01][..]);
    /// let a: u8 = r.get()?;
    /// let b: u16 = r.get()?;
    /// assert_eq!((a, b), (0x2a, 0x0100));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn get<T: ReadData>(&mut self) -> io::Result<T> {
        T::read_from(self)
    }

    /// Reads a value into `value` and returns `self`, so calls can be chained.
    pub fn read_into<T: ReadData>(&mut self, value: &mut T) -> io::Result<&mut Self> {
        *value = T::read_from(self)?;
        Ok(self)
    }
}
