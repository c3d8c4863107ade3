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

//! List and set payloads, shared with tuples.
//!
//! A payload is the varuint32 element count, then for a non-empty collection
//! a header byte (see [`collection_flags`]) that tells the reader how each
//! element is laid out. The reader follows the header, so a list written
//! against a declared element type can be read without one and the other way
//! round.

use crate::error::Error;
use crate::meta::TypeInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::value_mismatch;
use crate::serializer::{read_position, write_position};
use crate::types::collection_flags::{self, DECL_ELEMENT_TYPE, HAS_NULL, TRACKING_REF};
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Local element types of a collection.
#[derive(Clone, Copy)]
pub(super) enum ElemTypes<'a> {
    /// Arrays and sets: one type for every element.
    Uniform(&'a TypeInfo),
    /// Tuples: one type per slot. Callers check the arity first.
    Slots(&'a [TypeInfo]),
}

impl<'a> ElemTypes<'a> {
    fn get(self, index: usize) -> &'a TypeInfo {
        match self {
            ElemTypes::Uniform(elem) => elem,
            ElemTypes::Slots(slots) => &slots[index],
        }
    }

    fn header(self, items: &[Value]) -> u8 {
        let mut header = match self {
            ElemTypes::Uniform(TypeInfo::Any) => TRACKING_REF,
            ElemTypes::Uniform(elem) if elem.needs_ref_flag() => TRACKING_REF | DECL_ELEMENT_TYPE,
            ElemTypes::Uniform(_) => DECL_ELEMENT_TYPE,
            ElemTypes::Slots(slots) if slots.iter().any(TypeInfo::needs_ref_flag) => TRACKING_REF,
            ElemTypes::Slots(_) => 0,
        };
        if items.iter().any(Value::is_null) {
            header |= HAS_NULL;
        }
        header
    }
}

pub(super) fn write_array(
    elem: &TypeInfo,
    value: &Value,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let cell = value
        .as_list()
        .ok_or_else(|| value_mismatch(&TypeInfo::Array(Box::new(elem.clone())), value))?;
    write_elements(ElemTypes::Uniform(elem), &cell.borrow(), context)
}

pub(super) fn write_set(
    elem: &TypeInfo,
    value: &Value,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let cell = value
        .as_set()
        .ok_or_else(|| value_mismatch(&TypeInfo::Set(Box::new(elem.clone())), value))?;
    write_elements(ElemTypes::Uniform(elem), &cell.borrow(), context)
}

pub(super) fn write_elements(
    elems: ElemTypes,
    items: &[Value],
    context: &mut WriteContext,
) -> Result<(), Error> {
    context.inc_depth()?;
    context.writer.write_varuint32(items.len() as u32);
    if !items.is_empty() {
        let header = elems.header(items);
        context.writer.write_u8(header);
        let declared = header & DECL_ELEMENT_TYPE != 0;
        if declared {
            context.writer.write_varuint32(elems.get(0).type_id());
        }
        let tracking = header & TRACKING_REF != 0;
        for (i, item) in items.iter().enumerate() {
            write_position(elems.get(i), item, context, tracking, !declared)?;
        }
    }
    context.dec_depth();
    Ok(())
}

pub(super) fn read_array(
    elem: &TypeInfo,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    read_elements(context, len, ref_id, Value::Array, ElemTypes::Uniform(elem))
}

/// Members are taken as written; duplicates from a foreign writer are kept.
pub(super) fn read_set(
    elem: &TypeInfo,
    context: &mut ReadContext,
    ref_id: Option<u32>,
) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    read_elements(context, len, ref_id, Value::Set, ElemTypes::Uniform(elem))
}

/// Reads the header and `len` elements into a fresh cell, which is published
/// under `ref_id` before the first element is read.
pub(super) fn read_elements<W>(
    context: &mut ReadContext,
    len: usize,
    ref_id: Option<u32>,
    wrap: W,
    elems: ElemTypes,
) -> Result<Value, Error>
where
    W: FnOnce(Rc<RefCell<Vec<Value>>>) -> Value,
{
    context.inc_depth()?;
    // every element takes at least one byte
    let cell = Rc::new(RefCell::new(Vec::with_capacity(
        len.min(context.reader.remaining()),
    )));
    let value = wrap(cell.clone());
    if let Some(id) = ref_id {
        context.ref_reader.set_ref(id, value.clone());
    }
    if len > 0 {
        let offset = context.reader.get_cursor();
        let header = context.reader.read_u8()?;
        if header & !collection_flags::ALL != 0 {
            return Err(Error::invalid_data(format!(
                "unknown collection header {header:#010b} at offset {offset}"
            )));
        }
        let tracking = header & TRACKING_REF != 0;
        if header & HAS_NULL != 0 && !tracking {
            return Err(Error::invalid_data(format!(
                "collection at offset {offset} has null elements without reference markers"
            )));
        }
        let declared_type_id = if header & DECL_ELEMENT_TYPE != 0 {
            Some(context.reader.read_varuint32()?)
        } else {
            None
        };
        for i in 0..len {
            let item = read_position(elems.get(i), context, tracking, declared_type_id)?;
            cell.borrow_mut().push(item);
        }
    }
    context.dec_depth();
    Ok(value)
}
