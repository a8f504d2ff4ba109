//! Reads and writes portable binary data streams: fixed-width integers, floating-point values and
//! length-prefixed strings, in a byte order chosen per stream rather than by the host CPU.
//!
//! The stream carries no framing or type information. A reader must call the same sequence of
//! `read_*` methods, with the same configuration, as the writer called `write_*` methods.
//!
//! | Type                  | Encoding                                                        |
//! |-----------------------|-----------------------------------------------------------------|
//! | `u8`, `i8`            | 1 byte                                                          |
//! | `u16`, `i16`          | 2 bytes, stream byte order                                      |
//! | `u32`, `i32`          | 4 bytes, stream byte order                                      |
//! | `u64`, `i64`, `*LongLong` | 8 bytes, stream byte order                                  |
//! | `f32` (basic)         | 4 bytes, IEEE-754 single, stream byte order                     |
//! | `f64` (basic)         | 8 bytes, IEEE-754 double, stream byte order                     |
//! | `f32`/`f64` (extended)| 10 bytes, IEEE-754 80-bit extended, always big-endian          |
//! | string                | `u32` byte length, then the converter's encoding, no terminator |
//!
//! New streams are little-endian, use extended precision and encode strings as UTF-8.
//!
//! ```
//! use data_stream_io::{DataReader, DataStreamConfig, DataWriter, Utf8};
//!
//! let config = DataStreamConfig::new().big_endian().basic_precision();
//!
//! let mut w = DataWriter::with_config(Vec::new(), config, Utf8);
//! w.write_u32(7)?;
//! w.write_string("seven")?;
//! w.write_f64(7.0)?;
//!
//! let mut r = DataReader::with_config(&w.out[..], config, Utf8);
//! assert_eq!(r.read_u32()?, 7);
//! assert_eq!(r.read_string()?, "seven");
//! assert_eq!(r.read_f64()?, 7.0);
//! # Ok::<(), std::io::Error>(())
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod config;
mod conv;
mod extended;
mod order;
mod primitive;
mod reader;
mod value;
mod wide;
mod writer;


pub use config::{DataStreamConfig, FloatPrecision};
pub use conv::{ConvError, Latin1, TextConv, Utf16, Utf8, Utf8Lossy};
pub use extended::Extended80;
pub use order::ByteOrder;
pub use reader::DataReader;
pub use value::{ReadData, WriteData};
pub use wide::{decode_wide, encode_wide, LongLong, ULongLong, WideInt};
pub use writer::DataWriter;
