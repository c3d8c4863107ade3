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

//! Declared types.
//!
//! A [`TypeInfo`] tree tells the serializers how to encode each position of a
//! value: which wire type id to emit, whether a reference marker precedes it,
//! and how to walk its children. [`Type`] offers short constructors for
//! building such trees.

use crate::types::{self, compute_field_hash, compute_string_hash};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum TypeInfo {
    /// Resolved from the runtime value on write and from the wire type id on read.
    Any,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Binary,
    Array(Box<TypeInfo>),
    Set(Box<TypeInfo>),
    Tuple(Vec<TypeInfo>),
    Struct(Arc<StructInfo>),
    /// Milliseconds since the epoch.
    Timestamp,
    /// Whole days since the epoch.
    Duration,
}

impl TypeInfo {
    /// Wire type id written for this kind. `Any` has none of its own and maps
    /// to `UNKNOWN`, which only shows up inside struct hashes.
    pub fn type_id(&self) -> u32 {
        match self {
            TypeInfo::Any => types::UNKNOWN,
            TypeInfo::Bool => types::BOOL,
            TypeInfo::Int8 => types::INT8,
            TypeInfo::Int16 => types::INT16,
            TypeInfo::Int32 => types::INT32,
            TypeInfo::Int64 => types::INT64,
            TypeInfo::Float32 => types::FLOAT32,
            TypeInfo::Float64 => types::FLOAT64,
            TypeInfo::String => types::STRING,
            TypeInfo::Binary => types::BINARY,
            TypeInfo::Array(_) | TypeInfo::Tuple(_) => types::LIST,
            TypeInfo::Set(_) => types::SET,
            TypeInfo::Struct(_) => types::NAMED_STRUCT,
            TypeInfo::Timestamp => types::TIMESTAMP,
            TypeInfo::Duration => types::DURATION,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeInfo::Bool
                | TypeInfo::Int8
                | TypeInfo::Int16
                | TypeInfo::Int32
                | TypeInfo::Int64
                | TypeInfo::Float32
                | TypeInfo::Float64
        )
    }

    /// Nested positions carry a reference marker unless they are primitive.
    #[inline(always)]
    pub fn needs_ref_flag(&self) -> bool {
        !self.is_primitive()
    }

    pub fn as_struct(&self) -> Option<&Arc<StructInfo>> {
        match self {
            TypeInfo::Struct(info) => Some(info),
            _ => None,
        }
    }

    fn fold_hash(&self, hash: u32) -> u32 {
        let hash = compute_field_hash(hash, self.type_id());
        match self {
            TypeInfo::Array(elem) | TypeInfo::Set(elem) => elem.fold_hash(hash),
            TypeInfo::Tuple(elems) => elems.iter().fold(hash, |h, elem| elem.fold_hash(h)),
            TypeInfo::Struct(info) => compute_field_hash(hash, compute_string_hash(info.name())),
            _ => hash,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInfo::Any => f.write_str("any"),
            TypeInfo::Bool => f.write_str("bool"),
            TypeInfo::Int8 => f.write_str("int8"),
            TypeInfo::Int16 => f.write_str("int16"),
            TypeInfo::Int32 => f.write_str("int32"),
            TypeInfo::Int64 => f.write_str("int64"),
            TypeInfo::Float32 => f.write_str("float32"),
            TypeInfo::Float64 => f.write_str("float64"),
            TypeInfo::String => f.write_str("string"),
            TypeInfo::Binary => f.write_str("binary"),
            TypeInfo::Array(elem) => write!(f, "array<{elem}>"),
            TypeInfo::Set(elem) => write!(f, "set<{elem}>"),
            TypeInfo::Tuple(elems) => {
                f.write_str("tuple<")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str(">")
            }
            TypeInfo::Struct(info) => write!(f, "struct {}", info.name()),
            TypeInfo::Timestamp => f.write_str("timestamp"),
            TypeInfo::Duration => f.write_str("duration"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub type_info: TypeInfo,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            type_info,
        }
    }
}

/// A named struct layout.
///
/// The qualified name is split at its last `.` into namespace and type name,
/// both of which are written on the wire. The hash is folded over field names
/// and declared types so two layouts under one name are told apart.
#[derive(Clone, Debug, PartialEq)]
pub struct StructInfo {
    name: String,
    namespace: String,
    type_name: String,
    fields: Vec<FieldInfo>,
    hash: i32,
}

impl StructInfo {
    pub fn new(name: impl Into<String>, fields: Vec<FieldInfo>) -> StructInfo {
        let name = name.into();
        let (namespace, type_name) = match name.rfind('.') {
            Some(pos) => (name[..pos].to_owned(), name[pos + 1..].to_owned()),
            None => (String::new(), name.clone()),
        };
        let hash = Self::compute_hash(&fields);
        StructInfo {
            name,
            namespace,
            type_name,
            fields,
            hash,
        }
    }

    fn compute_hash(fields: &[FieldInfo]) -> i32 {
        let mut hash = 17u32;
        for field in fields {
            hash = compute_field_hash(hash, compute_string_hash(&field.name));
            hash = field.type_info.fold_hash(hash);
        }
        hash as i32
    }

    /// Joins a wire namespace and type name back into a qualified name.
    pub fn qualified_name(namespace: &str, type_name: &str) -> String {
        if namespace.is_empty() {
            type_name.to_owned()
        } else {
            format!("{namespace}.{type_name}")
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn hash(&self) -> i32 {
        self.hash
    }

    pub(crate) fn duplicate_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .enumerate()
            .find(|(i, field)| self.fields[..*i].iter().any(|f| f.name == field.name))
            .map(|(_, field)| field.name.as_str())
    }
}

/// Shorthand constructors for [`TypeInfo`] trees.
///
/// ```
/// use fory_xlang::Type;
///
/// let t = Type::struct_(
///     "example.foo",
///     [("a", Type::string()), ("tags", Type::array(Type::string()))],
/// );
/// assert_eq!(t.to_string(), "struct example.foo");
/// ```
pub struct Type;

impl Type {
    pub fn any() -> TypeInfo {
        TypeInfo::Any
    }

    pub fn bool() -> TypeInfo {
        TypeInfo::Bool
    }

    pub fn int8() -> TypeInfo {
        TypeInfo::Int8
    }

    pub fn int16() -> TypeInfo {
        TypeInfo::Int16
    }

    pub fn int32() -> TypeInfo {
        TypeInfo::Int32
    }

    pub fn int64() -> TypeInfo {
        TypeInfo::Int64
    }

    pub fn float32() -> TypeInfo {
        TypeInfo::Float32
    }

    pub fn float64() -> TypeInfo {
        TypeInfo::Float64
    }

    pub fn string() -> TypeInfo {
        TypeInfo::String
    }

    pub fn binary() -> TypeInfo {
        TypeInfo::Binary
    }

    pub fn array(elem: TypeInfo) -> TypeInfo {
        TypeInfo::Array(Box::new(elem))
    }

    pub fn set(elem: TypeInfo) -> TypeInfo {
        TypeInfo::Set(Box::new(elem))
    }

    pub fn tuple<I: IntoIterator<Item = TypeInfo>>(elems: I) -> TypeInfo {
        TypeInfo::Tuple(elems.into_iter().collect())
    }

    pub fn struct_<I, S>(name: &str, fields: I) -> TypeInfo
    where
        I: IntoIterator<Item = (S, TypeInfo)>,
        S: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, type_info)| FieldInfo::new(name, type_info))
            .collect();
        TypeInfo::Struct(Arc::new(StructInfo::new(name, fields)))
    }

    pub fn timestamp() -> TypeInfo {
        TypeInfo::Timestamp
    }

    pub fn duration() -> TypeInfo {
        TypeInfo::Duration
    }
}
