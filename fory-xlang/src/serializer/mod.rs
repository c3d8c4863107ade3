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

//! Pattern-match dispatch from a [`TypeInfo`] to the per-kind codecs.
//!
//! Every position is written as an optional reference marker, the varuint32
//! wire type id and the payload. The marker is present at the root and at
//! every non-primitive position. Collection elements follow the collection
//! header instead, see [`types::collection_flags`].

use crate::error::Error;
use crate::meta::TypeInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{self, RefFlag};
use crate::value::Value;

mod any;
mod binary;
mod bool;
mod collection;
mod datetime;
mod number;
mod string;
mod struct_;
mod tuple;
mod util;

pub use datetime::EPOCH;

/// Encoding behavior bound to one [`TypeInfo`].
#[derive(Clone, Debug, PartialEq)]
pub struct Serializer {
    type_info: TypeInfo,
}

impl Serializer {
    pub fn new(type_info: TypeInfo) -> Serializer {
        Serializer { type_info }
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// Writes `value` as a root position: reference marker, type id, payload.
    pub fn write(&self, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
        write_value(&self.type_info, value, context, true)
    }

    pub fn read(&self, context: &mut ReadContext) -> Result<Value, Error> {
        read_value(&self.type_info, context, true)
    }
}

pub fn write_value(
    type_info: &TypeInfo,
    value: &Value,
    context: &mut WriteContext,
    is_root: bool,
) -> Result<(), Error> {
    let write_ref_info = is_root || type_info.needs_ref_flag();
    write_position(type_info, value, context, write_ref_info, true)
}

/// Writes one position. Collection elements take `write_ref_info` from the
/// collection header, and skip the type id when the header already carries it.
pub(crate) fn write_position(
    type_info: &TypeInfo,
    value: &Value,
    context: &mut WriteContext,
    write_ref_info: bool,
    write_type_id: bool,
) -> Result<(), Error> {
    if value.is_null() {
        if !write_ref_info || type_info.is_primitive() {
            return Err(Error::type_error(format!(
                "null is not allowed at a {type_info} position"
            )));
        }
        context.writer.write_i8(RefFlag::Null as i8);
        return Ok(());
    }

    let inferred;
    let type_info = if let TypeInfo::Any = type_info {
        inferred = any::infer_type_info(value, context.get_type_resolver())?;
        &inferred
    } else {
        type_info
    };

    if write_ref_info {
        if context.is_track_ref() {
            if context
                .ref_writer
                .try_write_value_ref(&mut context.writer, value)
            {
                return Ok(());
            }
        } else {
            context.writer.write_i8(RefFlag::NotNullValue as i8);
        }
    }
    if write_type_id {
        context.writer.write_varuint32(type_info.type_id());
    }
    write_data(type_info, value, context)
}

fn write_data(type_info: &TypeInfo, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match type_info {
        TypeInfo::Bool => bool::write(value, context),
        TypeInfo::Int8 => number::write_int8(value, context),
        TypeInfo::Int16 => number::write_int16(value, context),
        TypeInfo::Int32 => number::write_int32(value, context),
        TypeInfo::Int64 => number::write_int64(value, context),
        TypeInfo::Float32 => number::write_float32(value, context),
        TypeInfo::Float64 => number::write_float64(value, context),
        TypeInfo::String => string::write(value, context),
        TypeInfo::Binary => binary::write(value, context),
        TypeInfo::Array(elem) => collection::write_array(elem, value, context),
        TypeInfo::Set(elem) => collection::write_set(elem, value, context),
        TypeInfo::Tuple(elems) => tuple::write(elems, value, context),
        TypeInfo::Struct(info) => struct_::write(info, value, context),
        TypeInfo::Timestamp => datetime::write_timestamp(value, context),
        TypeInfo::Duration => datetime::write_duration(value, context),
        TypeInfo::Any => Err(Error::type_error("unresolved any position")),
    }
}

pub fn read_value(
    type_info: &TypeInfo,
    context: &mut ReadContext,
    is_root: bool,
) -> Result<Value, Error> {
    read_position(type_info, context, is_root || type_info.needs_ref_flag(), None)
}

/// Reads one position. `declared_type_id` is set for collection elements
/// whose type id was written once in the collection header.
pub(crate) fn read_position(
    type_info: &TypeInfo,
    context: &mut ReadContext,
    read_ref_info: bool,
    declared_type_id: Option<u32>,
) -> Result<Value, Error> {
    let mut ref_id = None;
    if read_ref_info {
        match context.ref_reader.read_ref_flag(&mut context.reader)? {
            RefFlag::Null => return Ok(Value::Null),
            RefFlag::Ref => {
                let id = context.ref_reader.read_ref_id(&mut context.reader)?;
                let value = context.ref_reader.get_ref(id)?;
                if !util::accepts(type_info, &value) {
                    return Err(util::value_mismatch(type_info, &value));
                }
                return Ok(value);
            }
            RefFlag::NotNullValue => {}
            RefFlag::RefValue => ref_id = Some(context.ref_reader.reserve_ref_id()),
        }
    }

    let remote_type_id = match declared_type_id {
        Some(type_id) => type_id,
        None => context.reader.read_varuint32()?,
    };
    let value = read_data(type_info, remote_type_id, context, ref_id)?;
    if let Some(id) = ref_id {
        context.ref_reader.set_ref(id, value.clone());
    }
    Ok(value)
}

/// Decodes the payload after the type id. Composite readers register their
/// empty cell under `ref_id` before reading children.
fn read_data(
    type_info: &TypeInfo,
    remote_type_id: u32,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let expected = type_info.type_id();
    match type_info {
        TypeInfo::Any => any::read(remote_type_id, context, ref_id),
        TypeInfo::Int32 if remote_type_id == types::VAR_INT32 => number::read_var_int32(context),
        TypeInfo::Int64 if remote_type_id == types::VAR_INT64 => number::read_var_int64(context),
        TypeInfo::Duration if remote_type_id == types::LOCAL_DATE => {
            datetime::read_duration(context)
        }
        _ if remote_type_id != expected => Err(Error::type_mismatch(expected, remote_type_id)),
        TypeInfo::Bool => bool::read(context),
        TypeInfo::Int8 => number::read_int8(context),
        TypeInfo::Int16 => number::read_int16(context),
        TypeInfo::Int32 => number::read_int32(context),
        TypeInfo::Int64 => number::read_int64(context),
        TypeInfo::Float32 => number::read_float32(context),
        TypeInfo::Float64 => number::read_float64(context),
        TypeInfo::String => string::read(context),
        TypeInfo::Binary => binary::read(context),
        TypeInfo::Array(elem) => collection::read_array(elem, context, ref_id),
        TypeInfo::Set(elem) => collection::read_set(elem, context, ref_id),
        TypeInfo::Tuple(elems) => tuple::read(elems, context, ref_id),
        TypeInfo::Struct(info) => struct_::read(info, context, ref_id),
        TypeInfo::Timestamp => datetime::read_timestamp(context),
        TypeInfo::Duration => datetime::read_duration(context),
    }
}
