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

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::types::RefFlag;
use crate::value::Value;
use std::collections::HashMap;

/// Reference writer for tracking shared references during serialization.
///
/// RefWriter maps the address of each composite cell it has seen to a
/// sequential reference id, so that a second encounter of the same cell is
/// written as a back-reference instead of a second copy. This is what keeps
/// shared and circular structures intact.
///
/// # Examples
///
/// ```rust
/// use fory_xlang::buffer::Writer;
/// use fory_xlang::resolver::ref_resolver::RefWriter;
/// use fory_xlang::Value;
///
/// let mut ref_writer = RefWriter::new();
/// let mut writer = Writer::default();
/// let list = Value::array(vec![Value::Int8(1)]);
///
/// // First encounter - returns false, the value should be serialized
/// assert!(!ref_writer.try_write_value_ref(&mut writer, &list));
///
/// // Second encounter - returns true, a back-reference was written
/// let alias = list.clone();
/// assert!(ref_writer.try_write_value_ref(&mut writer, &alias));
/// ```
#[derive(Default)]
pub struct RefWriter {
    /// Maps cell addresses to reference IDs
    refs: HashMap<usize, u32>,
    /// Next reference ID to assign
    next_ref_id: u32,
}

impl RefWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to write a reference for the cell at `ptr_addr`.
    ///
    /// Returns `true` if a back-reference (`Ref` flag followed by the varuint32
    /// id) was written, `false` if this is the first occurrence; in that case
    /// the `RefValue` flag has been written and the value must follow.
    pub fn try_write_ref(&mut self, writer: &mut Writer, ptr_addr: usize) -> bool {
        if let Some(&ref_id) = self.refs.get(&ptr_addr) {
            writer.write_i8(RefFlag::Ref as i8);
            writer.write_varuint32(ref_id);
            true
        } else {
            let ref_id = self.next_ref_id;
            self.next_ref_id += 1;
            self.refs.insert(ptr_addr, ref_id);
            writer.write_i8(RefFlag::RefValue as i8);
            false
        }
    }

    /// Like [`RefWriter::try_write_ref`] for values with identity. Values
    /// without identity get the `NotNullValue` flag and `false`.
    pub fn try_write_value_ref(&mut self, writer: &mut Writer, value: &Value) -> bool {
        match value.identity() {
            Some(ptr_addr) => self.try_write_ref(writer, ptr_addr),
            None => {
                writer.write_i8(RefFlag::NotNullValue as i8);
                false
            }
        }
    }

    /// Number of ids handed out so far.
    pub fn len(&self) -> usize {
        self.next_ref_id as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_ref_id == 0
    }

    /// Clear all stored references.
    pub fn clear(&mut self) {
        self.refs.clear();
        self.next_ref_id = 0;
    }
}

/// Reference reader for resolving back-references during deserialization.
///
/// Ids are assigned in the same order the writer assigned them: one per
/// `RefValue` flag read. The id is reserved before the value's payload is
/// decoded, and composites fill their slot with their (still empty) cell
/// right away so that children can refer back to them.
///
/// # Examples
///
/// ```rust
/// use fory_xlang::resolver::ref_resolver::RefReader;
/// use fory_xlang::Value;
///
/// let mut ref_reader = RefReader::new();
/// let list = Value::array(vec![]);
///
/// let ref_id = ref_reader.store_ref(list.clone());
/// let retrieved = ref_reader.get_ref(ref_id).unwrap();
/// assert!(list.ptr_eq(&retrieved));
/// assert!(ref_reader.get_ref(ref_id + 1).is_err());
/// ```
#[derive(Default)]
pub struct RefReader {
    refs: Vec<Option<Value>>,
}

impl RefReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id for a value whose payload is about to be read.
    pub fn reserve_ref_id(&mut self) -> u32 {
        let ref_id = self.refs.len() as u32;
        self.refs.push(None);
        ref_id
    }

    /// Fill a reserved slot.
    pub fn set_ref(&mut self, ref_id: u32, value: Value) {
        if let Some(slot) = self.refs.get_mut(ref_id as usize) {
            *slot = Some(value);
        }
    }

    /// Store a value under a fresh id.
    pub fn store_ref(&mut self, value: Value) -> u32 {
        let ref_id = self.refs.len() as u32;
        self.refs.push(Some(value));
        ref_id
    }

    /// Resolve a back-reference. Unknown ids and ids whose value is still
    /// being decoded (a scalar referring to itself) are rejected.
    pub fn get_ref(&self, ref_id: u32) -> Result<Value, Error> {
        match self.refs.get(ref_id as usize) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(Error::invalid_ref(format!(
                "reference {ref_id} points to a value that is still being read"
            ))),
            None => Err(Error::invalid_ref(format!(
                "invalid reference id {ref_id}, only {} references were read",
                self.refs.len()
            ))),
        }
    }

    pub fn read_ref_flag(&self, reader: &mut Reader) -> Result<RefFlag, Error> {
        let flag_value = reader.read_i8()?;
        RefFlag::try_from(flag_value)
            .map_err(|_| Error::invalid_data(format!("Invalid reference flag: {flag_value}")))
    }

    pub fn read_ref_id(&self, reader: &mut Reader) -> Result<u32, Error> {
        reader.read_varuint32()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn clear(&mut self) {
        self.refs.clear();
    }
}
