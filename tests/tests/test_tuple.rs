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

use fory_xlang::error::{should_panic_on_error, Error};
use fory_xlang::{Fory, Type, Value};
use fory_xlang_tests::{body, datetime, roundtrip_with};

#[test]
fn test_tuple() {
    let type_info = Type::tuple([Type::int8(), Type::int16(), Type::timestamp()]);
    let input = Value::tuple(vec![
        Value::Int8(1),
        Value::Int16(2),
        Value::Date(datetime(2024, 2, 29, 12, 30)),
    ]);
    assert_eq!(roundtrip_with(type_info, &input), input);
}

#[test]
fn test_nested_tuple() {
    let type_info = Type::tuple([
        Type::string(),
        Type::tuple([Type::bool(), Type::array(Type::float64())]),
    ]);
    let input = Value::tuple(vec![
        Value::from("x"),
        Value::tuple(vec![
            Value::Bool(true),
            Value::array(vec![Value::Float64(0.5)]),
        ]),
    ]);
    assert_eq!(roundtrip_with(type_info, &input), input);
}

#[test]
fn test_arity_mismatch_on_read() {
    if should_panic_on_error() {
        return;
    }
    let mut fory = Fory::default();
    let pair = fory
        .register_serializer(Type::tuple([Type::int8(), Type::int8()]))
        .unwrap();
    let triple = fory
        .register_serializer(Type::tuple([Type::int8(), Type::int8(), Type::int8()]))
        .unwrap();
    let bytes = pair
        .serialize(&Value::tuple(vec![Value::Int8(1), Value::Int8(2)]))
        .unwrap();
    let err = triple.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_arity_mismatch_on_write() {
    if should_panic_on_error() {
        return;
    }
    let mut fory = Fory::default();
    let pair = fory
        .register_serializer(Type::tuple([Type::int8(), Type::int8()]))
        .unwrap();
    let err = pair
        .serialize(&Value::tuple(vec![Value::Int8(1)]))
        .unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

#[test]
fn test_dynamic_tuple_reads_as_array() {
    let fory = Fory::default();
    let input = Value::tuple(vec![Value::Int8(1), Value::from("a")]);
    let bytes = fory.serialize(&input).unwrap();
    let output = fory.deserialize(&bytes).unwrap();
    assert_eq!(
        output,
        Value::array(vec![Value::Int8(1), Value::from("a")])
    );
}

#[test]
fn test_declared_tuple_read_without_type() {
    let mut fory = Fory::default();
    let pair = fory
        .register_serializer(Type::tuple([Type::int8(), Type::int16()]))
        .unwrap();
    let bytes = pair
        .serialize(&Value::tuple(vec![Value::Int8(1), Value::Int16(2)]))
        .unwrap();
    // primitive slots: no markers, one type id per slot
    assert_eq!(body(&bytes), &[0xff, 21, 2, 0, 2, 1, 3, 2, 0]);
    assert_eq!(
        fory.deserialize(&bytes).unwrap(),
        Value::array(vec![Value::Int8(1), Value::Int16(2)])
    );
}

#[test]
fn test_dynamic_tuple_read_with_type() {
    let mut fory = Fory::default();
    let pair = fory
        .register_serializer(Type::tuple([Type::int8(), Type::string()]))
        .unwrap();
    let input = Value::tuple(vec![Value::Int8(1), Value::from("two")]);
    let bytes = fory.serialize(&input).unwrap();
    assert_eq!(pair.deserialize(&bytes).unwrap(), input);
}
