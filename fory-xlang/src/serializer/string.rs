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
use crate::meta::{get_latin1_length, TypeInfo};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::value_mismatch;
use crate::types::StrEncoding;
use crate::value::Value;

pub(super) fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let s = value
        .as_str()
        .ok_or_else(|| value_mismatch(&TypeInfo::String, value))?;
    write_str(s, context);
    Ok(())
}

/// String payload without marker or type id; also used for struct names.
pub(super) fn write_str(s: &str, context: &mut WriteContext) {
    match get_latin1_length(s) {
        Some(len) => {
            let bitor = (len as u64) << 2 | StrEncoding::Latin1 as u64;
            context.writer.write_varuint36_small(bitor);
            context.writer.write_latin1_string(s);
        }
        None => {
            let bitor = (s.len() as u64) << 2 | StrEncoding::Utf8 as u64;
            context.writer.write_varuint36_small(bitor);
            context.writer.write_utf8_string(s);
        }
    }
}

pub(super) fn read(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::String(read_str(context)?))
}

pub(super) fn read_str(context: &mut ReadContext) -> Result<String, Error> {
    let bitor = context.reader.read_varuint36small()?;
    let len = (bitor >> 2) as usize;
    let encoding = (bitor & 0b11) as u8;
    let encoding = StrEncoding::try_from(encoding)
        .map_err(|_| Error::encoding_error(format!("wrong encoding value: {encoding}")))?;
    match encoding {
        StrEncoding::Latin1 => context.reader.read_latin1_string(len),
        StrEncoding::Utf16 => context.reader.read_utf16_string(len),
        StrEncoding::Utf8 => context.reader.read_utf8_string(len),
    }
}
