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
use fory_xlang::{Fory, StructValue, Type, Value};
use fory_xlang_tests::body;

#[test]
fn test_shared_value_written_once() {
    let fory = Fory::default().track_ref(true);
    let shared = Value::array(vec![Value::Int8(1)]);
    let outer = Value::array(vec![shared.clone(), shared.clone()]);
    let bytes = fory.serialize(&outer).unwrap();
    assert_eq!(
        body(&bytes),
        &[
            0x00, 21, 2, 0b1, // root: ref value, list, two elements, header
            0x00, 21, 1, 0b1, 0xff, 2, 1, // first occurrence
            0xfe, 1, // back-reference to id 1
        ]
    );

    let decoded = fory.deserialize(&bytes).unwrap();
    assert_eq!(decoded, outer);
    let items = decoded.as_list().unwrap().borrow();
    assert!(items[0].ptr_eq(&items[1]));
}

#[test]
fn test_shared_value_without_tracking() {
    let fory = Fory::default();
    let shared = Value::array(vec![Value::Int8(1)]);
    let outer = Value::array(vec![shared.clone(), shared]);
    let decoded = fory.deserialize(&fory.serialize(&outer).unwrap()).unwrap();
    assert_eq!(decoded, outer);
    let items = decoded.as_list().unwrap().borrow();
    assert!(!items[0].ptr_eq(&items[1]));
}

#[test]
fn test_reader_follows_stream_markers() {
    // a reader without tracking still resolves back-references
    let writer = Fory::default().track_ref(true);
    let shared = Value::set(vec![Value::from("s")]);
    let bytes = writer
        .serialize(&Value::tuple(vec![shared.clone(), shared]))
        .unwrap();
    let decoded = Fory::default().deserialize(&bytes).unwrap();
    let items = decoded.as_list().unwrap().borrow();
    assert!(items[0].ptr_eq(&items[1]));
}

#[test]
fn test_cyclic_array() {
    let fory = Fory::default().track_ref(true);
    let cycle = Value::array(vec![]);
    cycle.as_list().unwrap().borrow_mut().push(cycle.clone());
    let bytes = fory.serialize(&cycle).unwrap();
    assert_eq!(body(&bytes), &[0x00, 21, 1, 0b1, 0xfe, 0]);

    let decoded = fory.deserialize(&bytes).unwrap();
    {
        let items = decoded.as_list().unwrap().borrow();
        assert_eq!(items.len(), 1);
        assert!(items[0].ptr_eq(&decoded));
    }
    assert_eq!(decoded, cycle);
    assert_eq!(cycle, decoded);
}

#[test]
fn test_cyclic_values_compare() {
    let fory = Fory::default().track_ref(true);
    // a -> [b] -> [a], compared against a one-element self loop
    let a = Value::array(vec![]);
    let b = Value::array(vec![a.clone()]);
    a.as_list().unwrap().borrow_mut().push(b);
    let self_loop = Value::array(vec![]);
    self_loop
        .as_list()
        .unwrap()
        .borrow_mut()
        .push(self_loop.clone());
    assert_eq!(a, self_loop);

    let decoded = fory.deserialize(&fory.serialize(&a).unwrap()).unwrap();
    assert_eq!(decoded, a);

    let different = Value::array(vec![Value::Int8(1)]);
    different
        .as_list()
        .unwrap()
        .borrow_mut()
        .push(different.clone());
    assert_ne!(different, self_loop);

    // set construction compares members
    let set = Value::set(vec![a.clone(), self_loop.clone(), decoded]);
    assert_eq!(set.as_set().unwrap().borrow().len(), 1);
}

#[test]
fn test_cyclic_struct() {
    let mut fory = Fory::default().track_ref(true);
    let node = fory
        .register_serializer(Type::struct_(
            "example.node",
            [("value", Type::int32()), ("next", Type::any())],
        ))
        .unwrap();
    let a = Value::from(StructValue::new("example.node").with("value", 1));
    let b = Value::from(
        StructValue::new("example.node")
            .with("value", 2)
            .with("next", a.clone()),
    );
    a.as_struct().unwrap().borrow_mut().set("next", b.clone());

    let bytes = node.serialize(&a).unwrap();
    let decoded = node.deserialize(&bytes).unwrap();
    let decoded_a = decoded.as_struct().unwrap().borrow();
    assert_eq!(decoded_a.get("value"), Some(&Value::Int32(1)));
    let decoded_b = decoded_a.get("next").unwrap();
    let next_of_b = decoded_b.as_struct().unwrap().borrow().get("next").cloned();
    assert!(next_of_b.unwrap().ptr_eq(&decoded));
}

#[test]
fn test_cycle_without_tracking_fails() {
    if should_panic_on_error() {
        return;
    }
    let fory = Fory::default();
    let cycle = Value::array(vec![]);
    cycle.as_list().unwrap().borrow_mut().push(cycle.clone());
    let err = fory.serialize(&cycle).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)));
    // break the cycle so the test does not leak
    cycle.as_list().unwrap().borrow_mut().clear();
}

#[test]
fn test_invalid_ref() {
    if should_panic_on_error() {
        return;
    }
    let fory = Fory::default();
    let err = fory.deserialize(&[0xd4, 0x62, 6, 6, 0xfe, 5]).unwrap_err();
    assert!(matches!(err, Error::InvalidRef(_)));
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_strings_are_not_tracked() {
    let fory = Fory::default().track_ref(true);
    let s = Value::from("same");
    let bytes = fory
        .serialize(&Value::array(vec![s.clone(), s]))
        .unwrap();
    assert_eq!(
        body(&bytes),
        &[
            0x00, 21, 2, 0b1, // list header
            0xff, 12, 16, b's', b'a', b'm', b'e', //
            0xff, 12, 16, b's', b'a', b'm', b'e',
        ]
    );
}

#[test]
fn test_struct_fields_share_value() {
    let mut fory = Fory::default().track_ref(true);
    let pair = fory
        .register_serializer(Type::struct_(
            "example.pair",
            [("a", Type::array(Type::int8())), ("b", Type::array(Type::int8()))],
        ))
        .unwrap();
    let shared = Value::array(vec![Value::Int8(7)]);
    let value = Value::from(
        StructValue::new("example.pair")
            .with("a", shared.clone())
            .with("b", shared),
    );
    let bytes = pair.serialize(&value).unwrap();
    // field a: ref value (id 1), list, one element, declared int8 header, payload
    let field_a: &[u8] = &[0x00, 21, 1, 0b100, 2, 7];
    // field b: back-reference to id 1
    let field_b: &[u8] = &[0xfe, 1];
    let tail = [field_a, field_b].concat();
    assert!(bytes.ends_with(&tail));

    let decoded = pair.deserialize(&bytes).unwrap();
    assert_eq!(decoded, value);
    let decoded = decoded.as_struct().unwrap().borrow();
    assert!(decoded
        .get("a")
        .unwrap()
        .ptr_eq(decoded.get("b").unwrap()));
}
