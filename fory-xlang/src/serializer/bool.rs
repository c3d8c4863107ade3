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
use crate::meta::TypeInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::util::value_mismatch;
use crate::value::Value;

#[inline]
pub(super) fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let v = value
        .as_bool()
        .ok_or_else(|| value_mismatch(&TypeInfo::Bool, value))?;
    context.writer.write_u8(v as u8);
    Ok(())
}

/// Any non-zero byte is `true`, as in the other runtimes.
#[inline]
pub(super) fn read(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Bool(context.reader.read_u8()? != 0))
}
