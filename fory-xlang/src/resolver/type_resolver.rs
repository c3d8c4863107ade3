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
use crate::meta::{StructInfo, TypeInfo};
use crate::serializer::Serializer;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named struct layouts, keyed by `(namespace, type_name)`.
///
/// Owned by a single [`Fory`](crate::Fory) instance; two instances never see
/// each other's registrations.
#[derive(Clone, Default, Debug)]
pub struct TypeResolver {
    type_info_map_by_name: HashMap<(String, String), Arc<StructInfo>>,
}

impl TypeResolver {
    /// Registers every struct reachable from `type_info` and returns a
    /// serializer bound to it.
    ///
    /// Registering the same layout again is a no-op. Registering a different
    /// layout under a taken name fails and leaves the registry untouched.
    pub fn register(&mut self, type_info: &TypeInfo) -> Result<Serializer, Error> {
        let mut pending: Vec<Arc<StructInfo>> = Vec::new();
        collect_structs(type_info, &mut pending)?;
        for info in &pending {
            self.check_conflict(info)?;
        }

        let mut added = 0;
        for info in pending {
            let key = (info.namespace().to_owned(), info.type_name().to_owned());
            if !self.type_info_map_by_name.contains_key(&key) {
                self.type_info_map_by_name.insert(key, info);
                added += 1;
            }
        }
        log::debug!("registered {type_info}: {added} new struct type(s)");
        Ok(Serializer::new(type_info.clone()))
    }

    fn check_conflict(&self, info: &StructInfo) -> Result<(), Error> {
        let key = (info.namespace().to_owned(), info.type_name().to_owned());
        match self.type_info_map_by_name.get(&key) {
            Some(existing) if existing.fields() != info.fields() => {
                Err(layout_conflict(info.name()))
            }
            _ => Ok(()),
        }
    }

    #[inline(always)]
    pub fn get_struct_info_by_name(
        &self,
        namespace: &str,
        type_name: &str,
    ) -> Option<&Arc<StructInfo>> {
        self.type_info_map_by_name
            .get(&(namespace.to_owned(), type_name.to_owned()))
    }

    /// Looks up a struct by its qualified name, e.g. `example.foo`.
    pub fn get_struct_info(&self, name: &str) -> Option<&Arc<StructInfo>> {
        let (namespace, type_name) = match name.rfind('.') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("", name),
        };
        self.get_struct_info_by_name(namespace, type_name)
    }

    pub fn len(&self) -> usize {
        self.type_info_map_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_info_map_by_name.is_empty()
    }
}

fn layout_conflict(name: &str) -> Error {
    Error::type_error(format!(
        "struct {name} is already registered with a different layout"
    ))
}

/// Depth-first walk collecting each distinct struct once. Field names must be
/// unique and one name may not stand for two layouts within the tree.
fn collect_structs(type_info: &TypeInfo, out: &mut Vec<Arc<StructInfo>>) -> Result<(), Error> {
    match type_info {
        TypeInfo::Array(elem) | TypeInfo::Set(elem) => collect_structs(elem, out),
        TypeInfo::Tuple(elems) => elems.iter().try_for_each(|elem| collect_structs(elem, out)),
        TypeInfo::Struct(info) => {
            if let Some(seen) = out.iter().find(|s| s.name() == info.name()) {
                if seen.fields() != info.fields() {
                    return Err(layout_conflict(info.name()));
                }
                return Ok(());
            }
            if info.type_name().is_empty() {
                return Err(Error::type_error(format!(
                    "struct name `{}` has an empty type name",
                    info.name()
                )));
            }
            if let Some(field) = info.duplicate_field() {
                return Err(Error::type_error(format!(
                    "struct {} declares field `{field}` more than once",
                    info.name()
                )));
            }
            out.push(info.clone());
            info.fields()
                .iter()
                .try_for_each(|field| collect_structs(&field.type_info, out))
        }
        _ => Ok(()),
    }
}
