// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Little-endian byte cursor used by every serializer.
//!
//! [`Writer`] appends to a growable buffer, [`Reader`] walks a borrowed slice
//! and fails with [`Error::BufferOutOfBound`] instead of reading past its end.

use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian};

macro_rules! impl_write_fixed {
    ($($name:ident: $ty:ty => $write:ident),* $(,)?) => {
        $(
            #[inline(always)]
            pub fn $name(&mut self, value: $ty) {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                LittleEndian::$write(&mut buf, value);
                self.bf.extend_from_slice(&buf);
            }
        )*
    };
}

macro_rules! impl_read_fixed {
    ($($name:ident: $ty:ty => $read:ident),* $(,)?) => {
        $(
            #[inline(always)]
            pub fn $name(&mut self) -> Result<$ty, Error> {
                let bytes = self.take(std::mem::size_of::<$ty>())?;
                Ok(LittleEndian::$read(bytes))
            }
        )*
    };
}

#[derive(Default)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Writer {
        Writer {
            bf: Vec::with_capacity(capacity),
        }
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.bf.reserve(additional);
    }

    pub fn write_bytes(&mut self, v: &[u8]) -> usize {
        self.bf.extend_from_slice(v);
        v.len()
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) {
        self.bf.push(value as u8);
    }

    impl_write_fixed! {
        write_u16: u16 => write_u16,
        write_i16: i16 => write_i16,
        write_u32: u32 => write_u32,
        write_i32: i32 => write_i32,
        write_u64: u64 => write_u64,
        write_i64: i64 => write_i64,
        write_f32: f32 => write_f32,
        write_f64: f64 => write_f64,
    }

    pub fn write_varint32(&mut self, value: i32) {
        let zigzag = ((value << 1) ^ (value >> 31)) as u32;
        self.write_varuint32(zigzag)
    }

    pub fn write_varuint32(&mut self, value: u32) {
        self.write_varuint64(value as u64)
    }

    pub fn write_varint64(&mut self, value: i64) {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self.write_varuint64(zigzag)
    }

    /// Writes 7 bits per byte, low group first; the ninth byte carries the
    /// remaining 8 bits unmasked.
    pub fn write_varuint64(&mut self, mut value: u64) {
        for _ in 0..8 {
            if value < 0x80 {
                self.write_u8(value as u8);
                return;
            }
            self.write_u8((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.write_u8(value as u8);
    }

    /// Header varint used by strings: at most 5 bytes, value must fit in 36 bits.
    pub fn write_varuint36_small(&mut self, value: u64) {
        debug_assert!(value < (1u64 << 36), "value too large for 36-bit varint");
        let mut value = value;
        for _ in 0..4 {
            if value < 0x80 {
                self.write_u8(value as u8);
                return;
            }
            self.write_u8((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.write_u8(value as u8);
    }

    /// Caller must have checked that every char is below U+0100.
    pub fn write_latin1_string(&mut self, s: &str) {
        self.bf.extend(s.chars().map(|c| c as u32 as u8));
    }

    pub fn write_utf8_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

pub struct Reader<'bf> {
    bf: &'bf [u8],
    cursor: usize,
}

impl<'bf> Reader<'bf> {
    pub fn new(bf: &'bf [u8]) -> Reader<'bf> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    fn take(&mut self, len: usize) -> Result<&'bf [u8], Error> {
        let end = self
            .cursor
            .checked_add(len)
            .filter(|end| *end <= self.bf.len())
            .ok_or_else(|| Error::buffer_out_of_bound(self.cursor, len, self.bf.len()))?;
        let bytes = &self.bf[self.cursor..end];
        self.cursor = end;
        Ok(bytes)
    }

    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    impl_read_fixed! {
        read_u16: u16 => read_u16,
        read_i16: i16 => read_i16,
        read_u32: u32 => read_u32,
        read_i32: i32 => read_i32,
        read_u64: u64 => read_u64,
        read_i64: i64 => read_i64,
        read_f32: f32 => read_f32,
        read_f64: f64 => read_f64,
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let start = self.cursor;
        let mut result = 0u32;
        for i in 0..5 {
            let b = self.read_u8()? as u32;
            if i == 4 {
                if b > 0x0F {
                    return Err(Error::invalid_data(format!(
                        "varuint32 at offset {start} overflows 32 bits"
                    )));
                }
                result |= b << 28;
                break;
            }
            result |= (b & 0x7F) << (7 * i);
            if b < 0x80 {
                break;
            }
        }
        Ok(result)
    }

    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        let encoded = self.read_varuint32()?;
        Ok(((encoded >> 1) as i32) ^ -((encoded & 1) as i32))
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        let mut result = 0u64;
        for i in 0..8 {
            let b = self.read_u8()? as u64;
            result |= (b & 0x7F) << (7 * i);
            if b < 0x80 {
                return Ok(result);
            }
        }
        let b = self.read_u8()? as u64;
        Ok(result | (b << 56))
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let encoded = self.read_varuint64()?;
        Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
    }

    pub fn read_varuint36small(&mut self) -> Result<u64, Error> {
        let mut result = 0u64;
        for i in 0..4 {
            let b = self.read_u8()? as u64;
            result |= (b & 0x7F) << (7 * i);
            if b < 0x80 {
                return Ok(result);
            }
        }
        let b = self.read_u8()? as u64;
        Ok(result | (b << 28))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'bf [u8], Error> {
        self.take(len)
    }

    pub fn read_latin1_string(&mut self, len: usize) -> Result<String, Error> {
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    pub fn read_utf8_string(&mut self, len: usize) -> Result<String, Error> {
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| Error::encoding_error(format!("invalid utf8 string: {e}")))
    }

    /// `len` is the byte length of the UTF-16LE payload.
    pub fn read_utf16_string(&mut self, len: usize) -> Result<String, Error> {
        if len % 2 != 0 {
            return Err(Error::encoding_error(format!(
                "utf16 byte length must be even, got {len}"
            )));
        }
        let bytes = self.take(len)?;
        let units: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
        String::from_utf16(&units)
            .map_err(|e| Error::encoding_error(format!("invalid utf16 string: {e}")))
    }
}
