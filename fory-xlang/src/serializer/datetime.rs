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
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    None => {
        panic!("Unreachable code")
    }
    Some(epoch) => epoch,
};

/// Milliseconds since the naive epoch, floored.
pub(super) fn write_timestamp(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let dt = value
        .as_date()
        .ok_or_else(|| value_mismatch(&TypeInfo::Timestamp, value))?;
    context.writer.write_i64(dt.and_utc().timestamp_millis());
    Ok(())
}

pub(super) fn read_timestamp(context: &mut ReadContext) -> Result<Value, Error> {
    let millis = context.reader.read_i64()?;
    let dt = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::invalid_data(format!("timestamp {millis}ms is out of range")))?;
    Ok(Value::Date(dt.naive_utc()))
}

/// Whole days since the epoch; the time of day is dropped.
pub(super) fn write_duration(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let dt = value
        .as_date()
        .ok_or_else(|| value_mismatch(&TypeInfo::Duration, value))?;
    let days = dt.date().signed_duration_since(EPOCH).num_days();
    let days = i32::try_from(days)
        .map_err(|_| Error::type_error(format!("{dt} is out of range for a day count")))?;
    context.writer.write_i32(days);
    Ok(())
}

pub(super) fn read_duration(context: &mut ReadContext) -> Result<Value, Error> {
    let days = context.reader.read_i32()?;
    let date = TimeDelta::try_days(days as i64)
        .and_then(|delta| EPOCH.checked_add_signed(delta))
        .ok_or_else(|| Error::invalid_data(format!("day count {days} is out of range")))?;
    Ok(Value::Date(NaiveDateTime::new(date, NaiveTime::MIN)))
}
