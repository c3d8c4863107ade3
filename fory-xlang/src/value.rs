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

//! Dynamic values walked by the serializers.
//!
//! Composite values (array, set, tuple, struct) live in shared cells so that
//! the same object can be referenced from several places, including from
//! inside itself. Cloning a composite [`Value`] clones the handle, not the
//! contents; use [`Value::ptr_eq`] to compare identities.

use chrono::NaiveDateTime;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type Shared<T> = Rc<RefCell<T>>;

const MAX_DEBUG_DEPTH: usize = 8;

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Binary(Vec<u8>),
    /// A moment in time; encoded as a timestamp or as a day count depending
    /// on the declared type of its position.
    Date(NaiveDateTime),

    Array(Shared<Vec<Value>>),
    Set(Shared<Vec<Value>>),
    Tuple(Shared<Vec<Value>>),
    Struct(Shared<StructValue>),
}

/// Field values of a struct, keyed by name.
///
/// Field order here is irrelevant: the wire order comes from the registered
/// type. Fields the type declares but the value lacks are written as null.
#[derive(Clone, Default)]
pub struct StructValue {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl StructValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        StructValue {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_capacity(type_name: impl Into<String>, capacity: usize) -> Self {
        StructValue {
            type_name: type_name.into(),
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Builder form of [`StructValue::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Appends without checking for an existing field of that name.
    pub(crate) fn push_field(&mut self, name: String, value: Value) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Qualified name of the registered struct type, e.g. `example.foo`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Builds a set; later duplicates of an equal element are dropped.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Value {
        let mut members: Vec<Value> = Vec::new();
        for item in items {
            if !members.contains(&item) {
                members.push(item);
            }
        }
        Value::Set(Rc::new(RefCell::new(members)))
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(RefCell::new(items)))
    }

    pub fn struct_(value: StructValue) -> Value {
        Value::Struct(Rc::new(RefCell::new(value)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer variant, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(*v as i64),
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Any float variant, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Element cell of an array or tuple.
    pub fn as_list(&self) -> Option<&Shared<Vec<Value>>> {
        match self {
            Value::Array(v) | Value::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Shared<Vec<Value>>> {
        match self {
            Value::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Shared<StructValue>> {
        match self {
            Value::Struct(v) => Some(v),
            _ => None,
        }
    }

    /// Whether both values are handles to the same composite cell.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Address of the shared cell for composites; `None` for plain values.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(v) | Value::Set(v) | Value::Tuple(v) => {
                Some(Rc::as_ptr(v) as *const () as usize)
            }
            Value::Struct(v) => Some(Rc::as_ptr(v) as *const () as usize),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Set(_) => "set",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
        }
    }
}

/// Cell pairs currently being compared, outermost first.
type EqPath = Vec<(usize, usize)>;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        value_eq(self, other, &mut EqPath::new())
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        struct_eq(self, other, &mut EqPath::new())
    }
}

fn value_eq(a: &Value, b: &Value, path: &mut EqPath) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int8(a), Value::Int8(b)) => a == b,
        (Value::Int16(a), Value::Int16(b)) => a == b,
        (Value::Int32(a), Value::Int32(b)) => a == b,
        (Value::Int64(a), Value::Int64(b)) => a == b,
        (Value::Float32(a), Value::Float32(b)) => a == b,
        (Value::Float64(a), Value::Float64(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Binary(a), Value::Binary(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Array(a), Value::Array(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
            cells_eq(a, b, path, |a, b, path| items_eq(a, b, path))
        }
        (Value::Set(a), Value::Set(b)) => {
            cells_eq(a, b, path, |a, b, path| same_members(a, b, path))
        }
        (Value::Struct(a), Value::Struct(b)) => cells_eq(a, b, path, struct_eq),
        _ => false,
    }
}

/// A pair of cells met again while it is still being compared is taken as
/// equal, so cyclic values compare in finite time.
fn cells_eq<T, F>(a: &Shared<T>, b: &Shared<T>, path: &mut EqPath, eq: F) -> bool
where
    F: FnOnce(&T, &T, &mut EqPath) -> bool,
{
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let pair = (Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize);
    if path.contains(&pair) {
        return true;
    }
    path.push(pair);
    let equal = eq(&a.borrow(), &b.borrow(), path);
    path.pop();
    equal
}

fn items_eq(a: &[Value], b: &[Value], path: &mut EqPath) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| value_eq(x, y, path))
}

fn same_members(a: &[Value], b: &[Value], path: &mut EqPath) -> bool {
    fn covered(a: &[Value], b: &[Value], path: &mut EqPath) -> bool {
        a.iter().all(|x| b.iter().any(|y| value_eq(x, y, path)))
    }
    a.len() == b.len() && covered(a, b, path) && covered(b, a, path)
}

/// Missing fields compare equal to `Null`.
fn struct_eq(a: &StructValue, b: &StructValue, path: &mut EqPath) -> bool {
    fn covered(a: &StructValue, b: &StructValue, path: &mut EqPath) -> bool {
        a.fields.iter().all(|(name, value)| match b.get(name) {
            Some(v) => value_eq(value, v, path),
            None => value.is_null(),
        })
    }
    a.type_name == b.type_name && covered(a, b, path) && covered(b, a, path)
}

struct DebugValue<'a> {
    value: &'a Value,
    depth: usize,
}

struct DebugItems<'a> {
    items: &'a [Value],
    depth: usize,
}

impl fmt::Debug for DebugItems<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|value| DebugValue {
                value,
                depth: self.depth,
            }))
            .finish()
    }
}

impl DebugValue<'_> {
    fn fmt_list(&self, f: &mut fmt::Formatter<'_>, name: &str, cell: &Shared<Vec<Value>>) -> fmt::Result {
        if self.depth >= MAX_DEBUG_DEPTH {
            return write!(f, "{name}(..)");
        }
        match cell.try_borrow() {
            Ok(items) => f
                .debug_tuple(name)
                .field(&DebugItems {
                    items: &items,
                    depth: self.depth + 1,
                })
                .finish(),
            Err(_) => write!(f, "{name}(<borrowed>)"),
        }
    }
}

impl fmt::Debug for DebugValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
            Value::Int16(v) => f.debug_tuple("Int16").field(v).finish(),
            Value::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            Value::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Value::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            Value::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            Value::String(v) => f.debug_tuple("String").field(v).finish(),
            Value::Binary(v) => f.debug_tuple("Binary").field(v).finish(),
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::Array(cell) => self.fmt_list(f, "Array", cell),
            Value::Set(cell) => self.fmt_list(f, "Set", cell),
            Value::Tuple(cell) => self.fmt_list(f, "Tuple", cell),
            Value::Struct(cell) => {
                if self.depth >= MAX_DEBUG_DEPTH {
                    return f.write_str("Struct(..)");
                }
                let Ok(value) = cell.try_borrow() else {
                    return f.write_str("Struct(<borrowed>)");
                };
                let mut builder = f.debug_struct(value.type_name());
                for (name, field) in value.fields() {
                    builder.field(
                        name,
                        &DebugValue {
                            value: field,
                            depth: self.depth + 1,
                        },
                    );
                }
                builder.finish()
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DebugValue {
            value: self,
            depth: 0,
        }
        .fmt(f)
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct(&self.type_name);
        for (name, field) in &self.fields {
            builder.field(name, &DebugValue { value: field, depth: 1 });
        }
        builder.finish()
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Binary,
    NaiveDateTime => Date,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Value::struct_(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
