//! Character converters: how strings become bytes in the stream, and back.

use crate::ByteOrder;
use std::borrow::Cow;
use zerocopy::byteorder::{BE, LE, U16};
use zerocopy::FromBytes;

/// Converts between text and the bytes stored in a data stream.
///
/// Converters are stateless. `DataReader` and `DataWriter` hold one behind a `Box` and call it
/// once per string.
pub trait TextConv: Send + Sync {
    /// Encodes `text`. The result does not include a terminator.
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError>;

    /// Decodes bytes that were produced by `encode`.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError>;

    /// A short name, used in log messages.
    fn name(&self) -> &str;
}

/// Error type for `TextConv`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ConvError {
    /// The bytes are not a valid sequence in the converter's encoding.
    Malformed,

    /// The text contains a character that the converter's encoding cannot represent.
    Unmappable,

    /// The converter cannot encode into this encoding at all.
    Unsupported,
}

impl core::error::Error for ConvError {}

impl core::fmt::Display for ConvError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => f.write_str("The bytes are not valid in the stream's text encoding"),
            Self::Unmappable => {
                f.write_str("The text contains characters the stream's encoding cannot represent")
            }
            Self::Unsupported => f.write_str("The text encoding cannot be used for output"),
        }
    }
}

/// Strict UTF-8. Decoding fails on malformed input. This is the default converter.
#[derive(Copy, Clone, Debug, Default)]
pub struct Utf8;

impl TextConv for Utf8 {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError> {
        core::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| ConvError::Malformed)
    }

    fn name(&self) -> &str {
        "UTF-8"
    }
}

/// UTF-8 that replaces malformed sequences with U+FFFD instead of failing.
#[derive(Copy, Clone, Debug, Default)]
pub struct Utf8Lossy;

impl TextConv for Utf8Lossy {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError> {
        Ok(String::from_utf8_lossy(bytes))
    }

    fn name(&self) -> &str {
        "UTF-8 (lossy)"
    }
}

/// ISO-8859-1: every byte is the code point of the same value.
#[derive(Copy, Clone, Debug, Default)]
pub struct Latin1;

impl TextConv for Latin1 {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError> {
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }
        text.chars()
            .map(|c| u8::try_from(c).map_err(|_| ConvError::Unmappable))
            .collect::<Result<Vec<u8>, _>>()
            .map(Cow::Owned)
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError> {
        if bytes.is_ascii() {
            // ASCII is valid UTF-8.
            return Ok(Cow::Borrowed(core::str::from_utf8(bytes).map_err(|_| ConvError::Malformed)?));
        }
        Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
    }

    fn name(&self) -> &str {
        "ISO-8859-1"
    }
}

/// UTF-16 code units in the given byte order, without a byte-order mark.
///
/// The code-unit order is independent of the stream's byte order.
#[derive(Copy, Clone, Debug, Default)]
pub struct Utf16(pub ByteOrder);

impl TextConv for Utf16 {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError> {
        let mut out = Vec::with_capacity(text.len() * 2);
        for c in text.encode_utf16() {
            match self.0 {
                ByteOrder::LittleEndian => out.extend_from_slice(&c.to_le_bytes()),
                ByteOrder::BigEndian => out.extend_from_slice(&c.to_be_bytes()),
            }
        }
        Ok(Cow::Owned(out))
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError> {
        let units: Vec<u16> = match self.0 {
            ByteOrder::LittleEndian => <[U16<LE>]>::ref_from_bytes(bytes)
                .map_err(|_| ConvError::Malformed)?
                .iter()
                .map(|c| c.get())
                .collect(),
            ByteOrder::BigEndian => <[U16<BE>]>::ref_from_bytes(bytes)
                .map_err(|_| ConvError::Malformed)?
                .iter()
                .map(|c| c.get())
                .collect(),
        };
        String::from_utf16(&units)
            .map(Cow::Owned)
            .map_err(|_| ConvError::Malformed)
    }

    fn name(&self) -> &str {
        match self.0 {
            ByteOrder::LittleEndian => "UTF-16LE",
            ByteOrder::BigEndian => "UTF-16BE",
        }
    }
}

/// Any encoding from the WHATWG Encoding Standard, strictly: unmappable characters and
/// malformed bytes are errors rather than being replaced.
///
/// UTF-16 encodings can only be decoded here, because the Encoding Standard does not define an
/// encoder for them. Use `Utf16` to write UTF-16.
#[cfg(feature = "encoding_rs")]
impl TextConv for &'static encoding_rs::Encoding {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvError> {
        if self.output_encoding() != *self {
            return Err(ConvError::Unsupported);
        }
        let (bytes, _, had_errors) = encoding_rs::Encoding::encode(*self, text);
        if had_errors {
            Err(ConvError::Unmappable)
        } else {
            Ok(bytes)
        }
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvError> {
        self.decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(ConvError::Malformed)
    }

    fn name(&self) -> &str {
        encoding_rs::Encoding::name(*self)
    }
}
