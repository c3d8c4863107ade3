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
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::meta::TypeInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{read_value, write_value, Serializer};
use crate::types::config_flags::{
    IS_CROSS_LANGUAGE_FLAG, IS_LITTLE_ENDIAN_FLAG, IS_NULL_FLAG, IS_OUT_OF_BAND_FLAG,
};
use crate::types::{Language, MAGIC_NUMBER};
use crate::value::Value;
use std::sync::Arc;

/// The cross-language serialization engine.
///
/// A `Fory` owns its configuration and its registry of struct types. Each
/// `serialize`/`deserialize` call builds a fresh context, so a fully
/// registered instance can be shared between threads (`Arc<Fory>`).
///
/// # Examples
///
/// ```rust
/// use fory_xlang::{Fory, Value};
///
/// let fory = Fory::default();
/// let bytes = fory.serialize(&Value::from("hello")).unwrap();
/// assert_eq!(fory.deserialize(&bytes).unwrap(), Value::from("hello"));
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use fory_xlang::Fory;
///
/// let fory = Fory::default().track_ref(true).max_depth(16);
/// ```
#[derive(Clone, Default, Debug)]
pub struct Fory {
    config: Config,
    type_resolver: Arc<TypeResolver>,
}

impl Fory {
    pub fn new(config: Config) -> Self {
        Fory {
            config,
            type_resolver: Arc::default(),
        }
    }

    /// Enables or disables reference tracking.
    ///
    /// When enabled, a composite value reached twice is written once and then
    /// referenced by id, which also makes cyclic values serializable. Readers
    /// honor reference markers whatever their own setting.
    pub fn track_ref(mut self, track_ref: bool) -> Self {
        self.config.track_ref = track_ref;
        self
    }

    /// Sets the maximum nesting depth of composite values, on write and read.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    /// Registers `type_info` (and every struct nested in it) and returns a
    /// handle bound to it.
    ///
    /// The handle keeps a snapshot of this instance; types registered later are
    /// visible to this `Fory` but not to handles returned earlier.
    pub fn register_serializer(&mut self, type_info: TypeInfo) -> Result<Registration, Error> {
        let serializer = Arc::make_mut(&mut self.type_resolver).register(&type_info)?;
        Ok(Registration {
            fory: self.clone(),
            serializer,
        })
    }

    pub fn write_head(&self, is_none: bool, writer: &mut Writer) {
        writer.write_u16(MAGIC_NUMBER);
        let mut bitmap = IS_LITTLE_ENDIAN_FLAG | IS_CROSS_LANGUAGE_FLAG;
        if is_none {
            bitmap |= IS_NULL_FLAG;
        }
        writer.write_u8(bitmap);
        if is_none {
            return;
        }
        writer.write_u8(Language::Rust as u8);
    }

    /// Returns `true` when the stream holds a null root.
    fn read_head(&self, reader: &mut Reader) -> Result<bool, Error> {
        let magic_number = reader.read_u16()?;
        ensure!(
            magic_number == MAGIC_NUMBER,
            Error::invalid_data(format!(
                "The fory xlang serialization must start with magic number {:X}. \
                Please check whether the serialization is based on the xlang protocol \
                and the data didn't corrupt.",
                MAGIC_NUMBER
            ))
        );
        let bitmap = reader.read_u8()?;
        if bitmap & IS_NULL_FLAG != 0 {
            log::trace!("null root, header bitmap {bitmap:#06b}");
            return Ok(true);
        }
        if bitmap & IS_LITTLE_ENDIAN_FLAG == 0 {
            log::trace!("rejecting big endian stream, header bitmap {bitmap:#06b}");
            return Err(Error::unsupported("big endian is not supported now"));
        }
        if bitmap & IS_CROSS_LANGUAGE_FLAG == 0 {
            log::trace!("rejecting non xlang stream, header bitmap {bitmap:#06b}");
            return Err(Error::unsupported("support crosslanguage mode only"));
        }
        if bitmap & IS_OUT_OF_BAND_FLAG != 0 {
            log::trace!("rejecting out-of-band stream, header bitmap {bitmap:#06b}");
            return Err(Error::unsupported("outofband mode is not supported now"));
        }
        let peer_lang = Language::try_from(reader.read_u8()?)?;
        log::trace!("reading stream written by {peer_lang:?}");
        Ok(false)
    }

    /// Serializes `value`, inferring its type. Structs must be registered.
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>, Error> {
        self.serialize_impl(value, None)
    }

    /// Serializes `value` with an explicit serializer.
    pub fn serialize_with(&self, value: &Value, serializer: &Serializer) -> Result<Vec<u8>, Error> {
        self.serialize_impl(value, Some(serializer))
    }

    fn serialize_impl(
        &self,
        value: &Value,
        serializer: Option<&Serializer>,
    ) -> Result<Vec<u8>, Error> {
        let mut context = WriteContext::new(&self.type_resolver, &self.config);
        let is_none = value.is_null();
        self.write_head(is_none, &mut context.writer);
        if !is_none {
            match serializer {
                Some(serializer) => serializer.write(value, &mut context)?,
                None => write_value(&TypeInfo::Any, value, &mut context, true)?,
            }
        }
        Ok(context.into_bytes())
    }

    /// Deserializes a stream, taking every type from the wire.
    pub fn deserialize(&self, bf: &[u8]) -> Result<Value, Error> {
        self.deserialize_impl(bf, None)
    }

    /// Deserializes a stream whose root was written with `serializer`'s type.
    pub fn deserialize_with(&self, bf: &[u8], serializer: &Serializer) -> Result<Value, Error> {
        self.deserialize_impl(bf, Some(serializer))
    }

    fn deserialize_impl(&self, bf: &[u8], serializer: Option<&Serializer>) -> Result<Value, Error> {
        let mut context = ReadContext::new(Reader::new(bf), &self.type_resolver, &self.config);
        if self.read_head(&mut context.reader)? {
            return Ok(Value::Null);
        }
        let value = match serializer {
            Some(serializer) => serializer.read(&mut context)?,
            None => read_value(&TypeInfo::Any, &mut context, true)?,
        };
        let remaining = context.reader.remaining();
        ensure!(
            remaining == 0,
            Error::invalid_data(format!(
                "{remaining} unread bytes after the root value at offset {}",
                context.reader.get_cursor()
            ))
        );
        Ok(value)
    }
}

/// A registered type bound to the engine it was registered with.
#[derive(Clone, Debug)]
pub struct Registration {
    fory: Fory,
    serializer: Serializer,
}

impl Registration {
    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    pub fn type_info(&self) -> &TypeInfo {
        self.serializer.type_info()
    }

    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>, Error> {
        self.fory.serialize_with(value, &self.serializer)
    }

    pub fn deserialize(&self, bf: &[u8]) -> Result<Value, Error> {
        self.fory.deserialize_with(bf, &self.serializer)
    }
}
