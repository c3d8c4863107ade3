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
use crate::error::Error;
use crate::resolver::ref_resolver::{RefReader, RefWriter};
use crate::resolver::type_resolver::TypeResolver;

/// Per-call state of one `serialize`. Never shared between calls.
pub struct WriteContext<'se> {
    pub writer: Writer,
    pub ref_writer: RefWriter,
    type_resolver: &'se TypeResolver,
    config: &'se Config,
    current_depth: u32,
}

impl<'se> WriteContext<'se> {
    pub fn new(type_resolver: &'se TypeResolver, config: &'se Config) -> WriteContext<'se> {
        WriteContext {
            writer: Writer::default(),
            ref_writer: RefWriter::new(),
            type_resolver,
            config,
            current_depth: 0,
        }
    }

    pub fn get_type_resolver(&self) -> &'se TypeResolver {
        self.type_resolver
    }

    #[inline(always)]
    pub fn is_track_ref(&self) -> bool {
        self.config.is_track_ref()
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.config.max_depth())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

/// Per-call state of one `deserialize`.
pub struct ReadContext<'de, 'bf: 'de> {
    pub reader: Reader<'bf>,
    pub ref_reader: RefReader,
    type_resolver: &'de TypeResolver,
    config: &'de Config,
    current_depth: u32,
}

impl<'de, 'bf: 'de> ReadContext<'de, 'bf> {
    pub fn new(
        reader: Reader<'bf>,
        type_resolver: &'de TypeResolver,
        config: &'de Config,
    ) -> ReadContext<'de, 'bf> {
        ReadContext {
            reader,
            ref_reader: RefReader::new(),
            type_resolver,
            config,
            current_depth: 0,
        }
    }

    pub fn get_type_resolver(&self) -> &'de TypeResolver {
        self.type_resolver
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.config.max_depth())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

#[inline(always)]
fn check_depth(current_depth: u32, max_depth: u32) -> Result<(), Error> {
    if current_depth > max_depth {
        return Err(Error::depth_exceed(format!(
            "Maximum nesting depth ({max_depth}) exceeded. Current depth: {current_depth}. \
            This may indicate a circular reference serialized without reference tracking \
            or an overly deep object graph."
        )));
    }
    Ok(())
}
