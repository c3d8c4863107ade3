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

use fory_xlang::{Fory, StructValue, Type, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_simple_multi_thread() {
    let fory = Arc::new(Fory::default());
    let src: HashSet<i32> = [41, 42, 43, 45, 46, 47].into_iter().collect();
    // serialize
    let mut handles = vec![];
    for item in &src {
        let fory_clone = Arc::clone(&fory);
        let item = *item;
        let handle = thread::spawn(move || fory_clone.serialize(&Value::Int32(item)).unwrap());
        handles.push(handle);
    }
    let mut serialized_data = vec![];
    for handle in handles {
        let bytes = handle.join().unwrap();
        serialized_data.push(bytes);
    }
    // deserialize
    let mut dest = HashSet::new();
    let mut handles = vec![];
    for bytes in serialized_data {
        let fory_clone = Arc::clone(&fory);
        let handle = thread::spawn(move || {
            fory_clone
                .deserialize(&bytes)
                .unwrap()
                .as_i64()
                .unwrap() as i32
        });
        handles.push(handle);
    }
    for handle in handles {
        let value = handle.join().unwrap();
        dest.insert(value);
    }
    // verify
    assert_eq!(dest, src);
}

#[test]
fn test_struct_multi_thread() {
    let mut fory = Fory::default().track_ref(true);
    fory.register_serializer(Type::struct_(
        "example.item",
        [("f1", Type::int32()), ("tags", Type::set(Type::string()))],
    ))
    .unwrap();
    let fory = Arc::new(fory);
    let src: HashSet<i32> = [42, 43, 45, 46, 47].into_iter().collect();
    // values are Rc based, so each thread builds its own
    let mut handles = vec![];
    for f1 in src.iter().copied() {
        let fory_clone = Arc::clone(&fory);
        let handle = thread::spawn(move || {
            let item = Value::from(
                StructValue::new("example.item")
                    .with("f1", f1)
                    .with("tags", Value::set(vec![Value::from(f1.to_string())])),
            );
            let bytes = fory_clone.serialize(&item).unwrap();
            let decoded = fory_clone.deserialize(&bytes).unwrap();
            assert_eq!(decoded, item);
            let f1 = decoded.as_struct().unwrap().borrow().get("f1").cloned();
            f1.and_then(|v| v.as_i64()).unwrap() as i32
        });
        handles.push(handle);
    }
    let dest: HashSet<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(dest, src);
}
