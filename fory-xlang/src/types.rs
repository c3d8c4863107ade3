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

use crate::error::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum StrEncoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf8 = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(i8)]
pub enum RefFlag {
    Null = -3,
    // Ref indicates that the object was written before; a ref id follows.
    Ref = -2,
    // NotNullValue indicates that the object is a non-null value without identity tracking.
    NotNullValue = -1,
    // RefValue indicates that the object is referencable and seen for the first time.
    RefValue = 0,
}

/// Wire type ids. Values are shared with every other Fory runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[allow(non_camel_case_types)]
#[repr(u32)]
pub enum TypeId {
    BOOL = 1,
    INT8 = 2,
    INT16 = 3,
    INT32 = 4,
    VAR_INT32 = 5,
    INT64 = 6,
    VAR_INT64 = 7,
    FLOAT32 = 10,
    FLOAT64 = 11,
    STRING = 12,
    NAMED_STRUCT = 17,
    LIST = 21,
    SET = 22,
    DURATION = 24,
    TIMESTAMP = 25,
    LOCAL_DATE = 26,
    BINARY = 28,
    // Declared-but-dynamic position; only ever folded into struct hashes.
    UNKNOWN = 74,
}

pub const BOOL: u32 = TypeId::BOOL as u32;
pub const INT8: u32 = TypeId::INT8 as u32;
pub const INT16: u32 = TypeId::INT16 as u32;
pub const INT32: u32 = TypeId::INT32 as u32;
pub const VAR_INT32: u32 = TypeId::VAR_INT32 as u32;
pub const INT64: u32 = TypeId::INT64 as u32;
pub const VAR_INT64: u32 = TypeId::VAR_INT64 as u32;
pub const FLOAT32: u32 = TypeId::FLOAT32 as u32;
pub const FLOAT64: u32 = TypeId::FLOAT64 as u32;
pub const STRING: u32 = TypeId::STRING as u32;
pub const NAMED_STRUCT: u32 = TypeId::NAMED_STRUCT as u32;
pub const LIST: u32 = TypeId::LIST as u32;
pub const SET: u32 = TypeId::SET as u32;
pub const DURATION: u32 = TypeId::DURATION as u32;
pub const TIMESTAMP: u32 = TypeId::TIMESTAMP as u32;
pub const LOCAL_DATE: u32 = TypeId::LOCAL_DATE as u32;
pub const BINARY: u32 = TypeId::BINARY as u32;
pub const UNKNOWN: u32 = TypeId::UNKNOWN as u32;

const MAX_UNT32: u64 = (1 << 31) - 1;

pub fn compute_string_hash(s: &str) -> u32 {
    let mut hash: u64 = 17;
    s.as_bytes().iter().for_each(|b| {
        hash = (hash * 31) + (*b as u64);
        while hash >= MAX_UNT32 {
            hash /= 7;
        }
    });
    hash as u32
}

pub fn compute_field_hash(hash: u32, id: u32) -> u32 {
    let mut new_hash: u64 = (hash as u64) * 31 + (id as u64);
    while new_hash >= MAX_UNT32 {
        new_hash /= 7;
    }
    new_hash as u32
}

pub mod config_flags {
    pub const IS_NULL_FLAG: u8 = 1 << 0;
    pub const IS_LITTLE_ENDIAN_FLAG: u8 = 1 << 1;
    pub const IS_CROSS_LANGUAGE_FLAG: u8 = 1 << 2;
    pub const IS_OUT_OF_BAND_FLAG: u8 = 1 << 3;
}

/// Header byte written after the element count of a non-empty list or set.
/// Element layout is `[ref marker if TRACKING_REF] [type id unless
/// DECL_ELEMENT_TYPE] payload`.
pub mod collection_flags {
    /// Every element starts with a reference marker.
    pub const TRACKING_REF: u8 = 0b1;
    /// At least one element is null. Requires `TRACKING_REF`.
    pub const HAS_NULL: u8 = 0b10;
    /// One element type id follows the header and elements carry none.
    pub const DECL_ELEMENT_TYPE: u8 = 0b100;

    pub(crate) const ALL: u8 = TRACKING_REF | HAS_NULL | DECL_ELEMENT_TYPE;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Xlang = 0,
    Java = 1,
    Python = 2,
    Cpp = 3,
    Go = 4,
    Javascript = 5,
    Rust = 6,
    Dart = 7,
}

impl TryFrom<u8> for Language {
    type Error = Error;

    fn try_from(num: u8) -> Result<Self, Error> {
        match num {
            0 => Ok(Language::Xlang),
            1 => Ok(Language::Java),
            2 => Ok(Language::Python),
            3 => Ok(Language::Cpp),
            4 => Ok(Language::Go),
            5 => Ok(Language::Javascript),
            6 => Ok(Language::Rust),
            7 => Ok(Language::Dart),
            _ => Err(Error::invalid_data(format!(
                "Unsupported language code, value:{num}"
            ))),
        }
    }
}

pub const MAGIC_NUMBER: u16 = 0x62d4;
