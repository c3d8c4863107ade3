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
use crate::value::Value;

#[cold]
pub(super) fn value_mismatch(type_info: &TypeInfo, value: &Value) -> Error {
    Error::type_error(format!(
        "a {} value cannot be encoded at a {type_info} position",
        value.kind_name()
    ))
}

/// Whether a value already materialized (through a back-reference) may stand
/// at a position of the given type. Arrays and tuples share the list encoding
/// so each accepts the other.
pub(super) fn accepts(type_info: &TypeInfo, value: &Value) -> bool {
    match (type_info, value) {
        (TypeInfo::Any, _) => true,
        (TypeInfo::Bool, Value::Bool(_))
        | (TypeInfo::Int8, Value::Int8(_))
        | (TypeInfo::Int16, Value::Int16(_))
        | (TypeInfo::Int32, Value::Int32(_))
        | (TypeInfo::Int64, Value::Int64(_))
        | (TypeInfo::Float32, Value::Float32(_))
        | (TypeInfo::Float64, Value::Float64(_))
        | (TypeInfo::String, Value::String(_))
        | (TypeInfo::Binary, Value::Binary(_))
        | (TypeInfo::Set(_), Value::Set(_))
        | (TypeInfo::Timestamp | TypeInfo::Duration, Value::Date(_)) => true,
        (TypeInfo::Array(_) | TypeInfo::Tuple(_), Value::Array(_) | Value::Tuple(_)) => true,
        (TypeInfo::Struct(info), Value::Struct(cell)) => cell
            .try_borrow()
            .map(|v| v.type_name() == info.name())
            .unwrap_or(true),
        _ => false,
    }
}
