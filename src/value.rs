//! Type-directed reading and writing, for `DataReader::get` and `DataWriter::put`.

use crate::wide::{LongLong, ULongLong};
use crate::{DataReader, DataWriter};
use std::io::{self, Read, Write};

/// A value that can be decoded from a `DataReader`.
pub trait ReadData: Sized {
    /// Reads one value.
    fn read_from<R: Read>(reader: &mut DataReader<R>) -> io::Result<Self>;
}

/// A value that can be encoded into a `DataWriter`.
pub trait WriteData {
    /// Writes one value.
    fn write_to<W: Write>(&self, writer: &mut DataWriter<W>) -> io::Result<()>;
}

macro_rules! impl_data {
    ($($t:ty => $read:ident, $write:ident;)*) => {
        $(
            impl ReadData for $t {
                fn read_from<R: Read>(reader: &mut DataReader<R>) -> io::Result<Self> {
                    reader.$read()
                }
            }

            impl WriteData for $t {
                fn write_to<W: Write>(&self, writer: &mut DataWriter<W>) -> io::Result<()> {
                    writer.$write(*self)
                }
            }
        )*
    };
}

impl_data! {
    u8 => read_u8, write_u8;
    i8 => read_i8, write_i8;
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
    ULongLong => read_ull, write_ull;
    LongLong => read_ll, write_ll;
}

impl ReadData for String {
    fn read_from<R: Read>(reader: &mut DataReader<R>) -> io::Result<Self> {
        reader.read_string()
    }
}

impl WriteData for str {
    fn write_to<W: Write>(&self, writer: &mut DataWriter<W>) -> io::Result<()> {
        writer.write_string(self)
    }
}

impl WriteData for String {
    fn write_to<W: Write>(&self, writer: &mut DataWriter<W>) -> io::Result<()> {
        writer.write_string(self)
    }
}

impl<T: WriteData + ?Sized> WriteData for &T {
    fn write_to<W: Write>(&self, writer: &mut DataWriter<W>) -> io::Result<()> {
        (**self).write_to(writer)
    }
}
