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

//! # Fory Xlang
//!
//! A cross-language binary serialization engine. Values are described by a
//! [`TypeInfo`] tree and written in the Fory xlang wire format, so the bytes
//! can be read back by any other Fory runtime.
//!
//! ## Architecture
//!
//! - **`fory`**: the engine; header framing, `serialize`/`deserialize` and
//!   type registration
//! - **`buffer`**: little-endian `Writer`/`Reader` with varint support
//! - **`meta`**: `TypeInfo`, struct layouts and the [`Type`] builders
//! - **`value`**: the dynamic [`Value`] model
//! - **`serializer`**: per-kind codecs and the dispatch between them
//! - **`resolver`**: struct registry, reference tables and per-call contexts
//! - **`types`**: wire constants
//! - **`config`** and **`error`**
//!
//! ## Usage
//!
//! ```rust
//! use fory_xlang::{Fory, StructValue, Type, Value};
//!
//! let mut fory = Fory::default();
//! let foo = fory
//!     .register_serializer(Type::struct_(
//!         "example.foo",
//!         [("a", Type::int32()), ("tags", Type::set(Type::string()))],
//!     ))
//!     .unwrap();
//!
//! let value = Value::from(
//!     StructValue::new("example.foo")
//!         .with("a", 42)
//!         .with("tags", Value::set(vec![Value::from("x")])),
//! );
//! let bytes = foo.serialize(&value).unwrap();
//! assert_eq!(foo.deserialize(&bytes).unwrap(), value);
//! // registered structs are also found by name
//! assert_eq!(fory.deserialize(&bytes).unwrap(), value);
//! ```
//!
//! ## Reference tracking
//!
//! With [`Fory::track_ref`] enabled, composite values reached more than once
//! are written once and referenced afterwards, which preserves sharing and
//! lets cyclic values round-trip. Without it a cycle fails with
//! [`Error::DepthExceed`] once [`Config::max_depth`] is reached.

pub mod buffer;
pub mod config;
pub mod error;
pub mod fory;
pub mod meta;
pub mod resolver;
pub mod serializer;
pub mod types;
pub mod value;

pub use config::Config;
pub use error::{Error, ErrorKind};
pub use fory::{Fory, Registration};
pub use meta::{FieldInfo, StructInfo, Type, TypeInfo};
pub use serializer::Serializer;
pub use value::{StructValue, Value};
