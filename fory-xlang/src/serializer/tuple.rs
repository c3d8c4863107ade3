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
use crate::serializer::collection::{read_elements, write_elements, ElemTypes};
use crate::serializer::util::value_mismatch;
use crate::value::Value;

/// Tuples use the list encoding with one declared type per slot.
pub(super) fn write(
    elems: &[TypeInfo],
    value: &Value,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let cell = value
        .as_list()
        .ok_or_else(|| value_mismatch(&TypeInfo::Tuple(elems.to_vec()), value))?;
    let items = cell.borrow();
    if items.len() != elems.len() {
        return Err(Error::type_error(format!(
            "tuple of {} elements cannot be written as a tuple of {}",
            items.len(),
            elems.len()
        )));
    }
    write_elements(ElemTypes::Slots(elems), &items, context)
}

pub(super) fn read(
    elems: &[TypeInfo],
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let start = context.reader.get_cursor();
    let arity = context.reader.read_varuint32()? as usize;
    if arity != elems.len() {
        return Err(Error::invalid_data(format!(
            "tuple arity mismatch at offset {start}: expected {}, got {arity}",
            elems.len()
        )));
    }
    read_elements(context, arity, ref_id, Value::Tuple, ElemTypes::Slots(elems))
}
