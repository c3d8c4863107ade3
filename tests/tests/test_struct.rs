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

use fory_xlang::error::{should_panic_on_error, Error, ErrorKind};
use fory_xlang::{Fory, StructValue, Type, TypeInfo, Value};

fn foo_type() -> TypeInfo {
    Type::struct_(
        "example.foo",
        [
            ("a", Type::string()),
            ("b", Type::int32()),
            ("c", Type::array(Type::string())),
        ],
    )
}

fn foo_value() -> Value {
    Value::from(
        StructValue::new("example.foo")
            .with("a", "hello")
            .with("b", 7)
            .with("c", Value::array(vec![Value::from("x")])),
    )
}

#[test]
fn test_struct_roundtrip() {
    let mut fory = Fory::default();
    let foo = fory.register_serializer(foo_type()).unwrap();
    let bytes = foo.serialize(&foo_value()).unwrap();
    assert_eq!(foo.deserialize(&bytes).unwrap(), foo_value());
    // registered structs are found by wire name
    assert_eq!(fory.deserialize(&bytes).unwrap(), foo_value());
    // and inferred by value name
    let bytes = fory.serialize(&foo_value()).unwrap();
    assert_eq!(foo.deserialize(&bytes).unwrap(), foo_value());
}

#[test]
fn test_field_order_is_declaration_order() {
    let mut fory = Fory::default();
    let foo = fory.register_serializer(foo_type()).unwrap();
    let shuffled = Value::from(
        StructValue::new("example.foo")
            .with("c", Value::array(vec![Value::from("x")]))
            .with("b", 7)
            .with("a", "hello"),
    );
    assert_eq!(
        foo.serialize(&shuffled).unwrap(),
        foo.serialize(&foo_value()).unwrap()
    );
}

#[test]
fn test_missing_fields() {
    if should_panic_on_error() {
        return;
    }
    let mut fory = Fory::default();
    let foo = fory.register_serializer(foo_type()).unwrap();
    let partial = Value::from(StructValue::new("example.foo").with("b", 1));
    let decoded = foo.deserialize(&foo.serialize(&partial).unwrap()).unwrap();
    assert_eq!(decoded, partial);
    let decoded = decoded.as_struct().unwrap().borrow().clone();
    assert_eq!(decoded.get("a"), Some(&Value::Null));
    assert_eq!(decoded.len(), 3);

    // primitive fields cannot be null
    let no_b = Value::from(StructValue::new("example.foo").with("a", "x"));
    let err = foo.serialize(&no_b).unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_nested_structs() {
    let inner = Type::struct_("example.inner", [("x", Type::int16())]);
    let outer = Type::struct_(
        "example.outer",
        [
            ("one", inner.clone()),
            ("many", Type::array(inner)),
            ("anything", Type::any()),
        ],
    );
    let mut fory = Fory::default();
    let registration = fory.register_serializer(outer).unwrap();
    let inner_value = |x: i16| Value::from(StructValue::new("example.inner").with("x", x));
    let input = Value::from(
        StructValue::new("example.outer")
            .with("one", inner_value(1))
            .with("many", Value::array(vec![inner_value(2), inner_value(3)]))
            .with("anything", inner_value(4)),
    );
    let bytes = registration.serialize(&input).unwrap();
    assert_eq!(registration.deserialize(&bytes).unwrap(), input);
    assert!(fory.get_type_resolver().get_struct_info("example.inner").is_some());
}

#[test]
fn test_conflicting_registration() {
    if should_panic_on_error() {
        return;
    }
    let mut fory = Fory::default();
    fory.register_serializer(foo_type()).unwrap();
    // same layout again is fine
    fory.register_serializer(foo_type()).unwrap();
    let err = fory
        .register_serializer(Type::struct_("example.foo", [("a", Type::int8())]))
        .unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_registries_are_isolated() {
    if should_panic_on_error() {
        return;
    }
    let mut writer = Fory::default();
    let foo = writer.register_serializer(foo_type()).unwrap();
    let bytes = foo.serialize(&foo_value()).unwrap();

    // same name, different layout
    let mut other = Fory::default();
    other
        .register_serializer(Type::struct_(
            "example.foo",
            [
                ("a", Type::string()),
                ("b", Type::int64()),
                ("c", Type::array(Type::string())),
            ],
        ))
        .unwrap();
    let err = other.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::StructVersionMismatch(_)));

    // nothing registered
    let err = Fory::default().deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_struct_name_mismatch() {
    if should_panic_on_error() {
        return;
    }
    let mut fory = Fory::default();
    let foo = fory
        .register_serializer(Type::struct_("example.foo", [("a", Type::int8())]))
        .unwrap();
    let bar = fory
        .register_serializer(Type::struct_("example.bar", [("a", Type::int8())]))
        .unwrap();
    let bytes = foo
        .serialize(&Value::from(StructValue::new("example.foo").with("a", 1i8)))
        .unwrap();
    let err = bar.deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);

    let err = bar
        .serialize(&Value::from(StructValue::new("example.foo").with("a", 1i8)))
        .unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_unregistered_struct() {
    if should_panic_on_error() {
        return;
    }
    let fory = Fory::default();
    let err = fory.serialize(&foo_value()).unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_registration_snapshot() {
    let mut fory = Fory::default();
    let first = fory.register_serializer(Type::int8()).unwrap();
    fory.register_serializer(foo_type()).unwrap();
    // the earlier handle does not see later registrations
    assert!(first.serialize(&Value::Int8(1)).is_ok());
    assert!(fory.serialize(&foo_value()).is_ok());
}
