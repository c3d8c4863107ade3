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

//! Named structs.
//!
//! Payload: namespace and type name as bare strings, the i32 layout hash,
//! then each declared field in order. Field names never hit the wire, so the
//! hash is what keeps two layouts under one name from cross-decoding.

use crate::error::Error;
use crate::meta::{StructInfo, TypeInfo};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::string::{read_str, write_str};
use crate::serializer::util::value_mismatch;
use crate::serializer::{read_value, write_value};
use crate::value::{StructValue, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub(super) fn write(
    info: &Arc<StructInfo>,
    value: &Value,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let cell = value
        .as_struct()
        .ok_or_else(|| value_mismatch(&TypeInfo::Struct(info.clone()), value))?;
    let struct_value = cell.borrow();
    if struct_value.type_name() != info.name() {
        return Err(Error::type_error(format!(
            "value of struct {} cannot be written as struct {}",
            struct_value.type_name(),
            info.name()
        )));
    }
    context.inc_depth()?;
    write_str(info.namespace(), context);
    write_str(info.type_name(), context);
    context.writer.write_i32(info.hash());
    let null = Value::Null;
    for field in info.fields() {
        let field_value = struct_value.get(&field.name).unwrap_or(&null);
        write_value(&field.type_info, field_value, context, false)?;
    }
    context.dec_depth();
    Ok(())
}

/// Reads a struct whose layout is fixed by the declared position.
pub(super) fn read(
    info: &StructInfo,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let (namespace, type_name) = read_name(context)?;
    if namespace != info.namespace() || type_name != info.type_name() {
        return Err(Error::type_error(format!(
            "expected struct {}, stream holds {}",
            info.name(),
            StructInfo::qualified_name(&namespace, &type_name)
        )));
    }
    read_body(info, context, ref_id)
}

/// Reads a struct at a dynamic position, resolving its layout by wire name.
pub(super) fn read_named(context: &mut ReadContext, ref_id: Option<u32>) -> Result<Value, Error> {
    let (namespace, type_name) = read_name(context)?;
    let info = context
        .get_type_resolver()
        .get_struct_info_by_name(&namespace, &type_name)
        .ok_or_else(|| {
            Error::type_error(format!(
                "struct {} is not registered",
                StructInfo::qualified_name(&namespace, &type_name)
            ))
        })?;
    read_body(info, context, ref_id)
}

fn read_name(context: &mut ReadContext) -> Result<(String, String), Error> {
    let namespace = read_str(context)?;
    let type_name = read_str(context)?;
    Ok((namespace, type_name))
}

fn read_body(
    info: &StructInfo,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let remote_hash = context.reader.read_i32()?;
    if remote_hash != info.hash() {
        return Err(Error::struct_version_mismatch(format!(
            "Read class {} version {remote_hash} is not consistent with {}",
            info.name(),
            info.hash()
        )));
    }
    context.inc_depth()?;
    let cell = Rc::new(RefCell::new(StructValue::with_capacity(
        info.name(),
        info.fields().len(),
    )));
    let value = Value::Struct(cell.clone());
    if let Some(id) = ref_id {
        context.ref_reader.set_ref(id, value.clone());
    }
    for field in info.fields() {
        let field_value = read_value(&field.type_info, context, false)?;
        cell.borrow_mut().push_field(field.name.clone(), field_value);
    }
    context.dec_depth();
    Ok(value)
}
