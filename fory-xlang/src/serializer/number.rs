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
use crate::meta::TypeInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::value_mismatch;
use crate::value::Value;

/// Integers of any width are accepted and range-checked against the declared
/// width.
macro_rules! impl_int_codec {
    ($write:ident, $read:ident, $ty:ty, $kind:expr, $variant:ident, $write_fn:ident, $read_fn:ident) => {
        pub(super) fn $write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
            let wide = value.as_i64().ok_or_else(|| value_mismatch(&$kind, value))?;
            let v = <$ty>::try_from(wide).map_err(|_| {
                Error::type_error(format!("{} is out of range for {}", wide, $kind))
            })?;
            context.writer.$write_fn(v);
            Ok(())
        }

        #[inline(always)]
        pub(super) fn $read(context: &mut ReadContext) -> Result<Value, Error> {
            Ok(Value::$variant(context.reader.$read_fn()?))
        }
    };
}

impl_int_codec!(write_int8, read_int8, i8, TypeInfo::Int8, Int8, write_i8, read_i8);
impl_int_codec!(write_int16, read_int16, i16, TypeInfo::Int16, Int16, write_i16, read_i16);
impl_int_codec!(write_int32, read_int32, i32, TypeInfo::Int32, Int32, write_i32, read_i32);
impl_int_codec!(write_int64, read_int64, i64, TypeInfo::Int64, Int64, write_i64, read_i64);

pub(super) fn read_var_int32(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Int32(context.reader.read_varint32()?))
}

pub(super) fn read_var_int64(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Int64(context.reader.read_varint64()?))
}

pub(super) fn write_float32(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let v = match value {
        Value::Float32(v) => *v,
        Value::Float64(v) => *v as f32,
        _ => return Err(value_mismatch(&TypeInfo::Float32, value)),
    };
    context.writer.write_f32(v);
    Ok(())
}

pub(super) fn write_float64(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let v = value
        .as_f64()
        .ok_or_else(|| value_mismatch(&TypeInfo::Float64, value))?;
    context.writer.write_f64(v);
    Ok(())
}

#[inline(always)]
pub(super) fn read_float32(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Float32(context.reader.read_f32()?))
}

#[inline(always)]
pub(super) fn read_float64(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Float64(context.reader.read_f64()?))
}
