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

//! Dynamic positions: the type is taken from the value on write and from the
//! wire type id on read.

use crate::error::Error;
use crate::meta::TypeInfo;
use crate::resolver::context::ReadContext;
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{
    binary, bool, collection, datetime, number, string, struct_,
};
use crate::types;
use crate::value::Value;

pub(super) fn infer_type_info(value: &Value, resolver: &TypeResolver) -> Result<TypeInfo, Error> {
    let type_info = match value {
        Value::Null => {
            return Err(Error::type_error("null has no type of its own"));
        }
        Value::Bool(_) => TypeInfo::Bool,
        Value::Int8(_) => TypeInfo::Int8,
        Value::Int16(_) => TypeInfo::Int16,
        Value::Int32(_) => TypeInfo::Int32,
        Value::Int64(_) => TypeInfo::Int64,
        Value::Float32(_) => TypeInfo::Float32,
        Value::Float64(_) => TypeInfo::Float64,
        Value::String(_) => TypeInfo::String,
        Value::Binary(_) => TypeInfo::Binary,
        Value::Date(_) => TypeInfo::Timestamp,
        Value::Array(_) => TypeInfo::Array(Box::new(TypeInfo::Any)),
        Value::Set(_) => TypeInfo::Set(Box::new(TypeInfo::Any)),
        Value::Tuple(cell) => TypeInfo::Tuple(vec![TypeInfo::Any; cell.borrow().len()]),
        Value::Struct(cell) => {
            let struct_value = cell.borrow();
            let info = resolver
                .get_struct_info(struct_value.type_name())
                .ok_or_else(|| {
                    Error::type_error(format!(
                        "struct {} is not registered",
                        struct_value.type_name()
                    ))
                })?;
            TypeInfo::Struct(info.clone())
        }
    };
    Ok(type_info)
}

/// Lists decode as arrays; a tuple's arity is not known without its type.
pub(super) fn read(
    remote_type_id: u32,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    match remote_type_id {
        types::BOOL => bool::read(context),
        types::INT8 => number::read_int8(context),
        types::INT16 => number::read_int16(context),
        types::INT32 => number::read_int32(context),
        types::VAR_INT32 => number::read_var_int32(context),
        types::INT64 => number::read_int64(context),
        types::VAR_INT64 => number::read_var_int64(context),
        types::FLOAT32 => number::read_float32(context),
        types::FLOAT64 => number::read_float64(context),
        types::STRING => string::read(context),
        types::BINARY => binary::read(context),
        types::LIST => collection::read_array(&TypeInfo::Any, context, ref_id),
        types::SET => collection::read_set(&TypeInfo::Any, context, ref_id),
        types::NAMED_STRUCT => struct_::read_named(context, ref_id),
        types::TIMESTAMP => datetime::read_timestamp(context),
        types::DURATION | types::LOCAL_DATE => datetime::read_duration(context),
        _ => Err(Error::type_error(format!(
            "type id {remote_type_id} is not supported"
        ))),
    }
}
