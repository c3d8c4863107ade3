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

use fory_xlang::buffer::{Reader, Writer};
use fory_xlang::error::{should_panic_on_error, Error};
use rand::Rng;

#[test]
fn test_varint32() {
    let test_data: Vec<i32> = vec![
        // 1 byte(0..127)
        0,
        1,
        127,
        // 2 byte(128..16_383)
        128,
        300,
        16_383,
        // 3 byte(16_384..2_097_151)
        16_384,
        20_000,
        2_097_151,
        // 4 byte(2_097_152..268_435_455)
        2_097_152,
        100_000_000,
        268_435_455,
        // 5 byte(268_435_456..i32::MAX)
        268_435_456,
        i32::MAX,
        -1,
        i32::MIN,
    ];
    for &data in &test_data {
        let mut writer = Writer::default();
        writer.write_varint32(data);
        let binding = writer.dump();
        let mut reader = Reader::new(binding.as_slice());
        assert_eq!(reader.read_varint32().unwrap(), data);
        assert_eq!(reader.remaining(), 0);
    }
    for &data in &test_data {
        let mut writer = Writer::default();
        writer.write_varuint32(data as u32);
        let binding = writer.dump();
        let mut reader = Reader::new(binding.as_slice());
        assert_eq!(reader.read_varuint32().unwrap(), data as u32);
    }
}

#[test]
fn test_varuint32_lengths() {
    for (value, len) in [
        (0u32, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (u32::MAX, 5),
    ] {
        let mut writer = Writer::default();
        writer.write_varuint32(value);
        assert_eq!(writer.len(), len, "length of {value}");
    }
}

#[test]
fn test_varint64_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let data: i64 = rng.gen();
        let mut writer = Writer::default();
        writer.write_varint64(data);
        let bytes = writer.dump();
        assert!(bytes.len() <= 9);
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_varint64().unwrap(), data);
    }
    for data in [0u64, 1, u64::MAX, 1 << 56, (1 << 56) - 1] {
        let mut writer = Writer::default();
        writer.write_varuint64(data);
        let bytes = writer.dump();
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_varuint64().unwrap(), data);
    }
}

#[test]
fn test_varuint36_small() {
    let test_data: Vec<u64> = vec![
        // 1 byte
        0,
        1,
        127,
        // 2 bytes
        128,
        300,
        16_383,
        // 3 bytes
        16_384,
        20_000,
        2_097_151,
        // 4 bytes
        2_097_152,
        100_000_000,
        268_435_455,
        // 5 bytes (36-bit max)
        268_435_456,
        1_000_000_000,
        68_719_476_735, // max 36-bit
    ];

    for &data in &test_data {
        let mut writer = Writer::default();
        writer.write_varuint36_small(data);
        let buf = writer.dump();
        assert!(buf.len() <= 5);

        let mut reader = Reader::new(buf.as_slice());
        let value = reader.read_varuint36small().unwrap();
        assert_eq!(value, data, "failed for data {}", data);
    }
}

#[test]
fn test_fixed_width_little_endian() {
    let mut writer = Writer::default();
    writer.write_u16(0x62d4);
    writer.write_i32(-2);
    writer.write_f64(1.5);
    let bytes = writer.dump();
    assert_eq!(&bytes[..2], &[0xd4, 0x62]);
    assert_eq!(&bytes[2..6], &[0xfe, 0xff, 0xff, 0xff]);

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_u16().unwrap(), 0x62d4);
    assert_eq!(reader.read_i32().unwrap(), -2);
    assert_eq!(reader.read_f64().unwrap(), 1.5);
    assert_eq!(reader.get_cursor(), 14);
}

#[test]
fn test_strings() {
    let mut writer = Writer::default();
    writer.write_latin1_string("caf\u{e9}");
    writer.write_utf8_string("\u{4f60}\u{597d}");
    let bytes = writer.dump();
    assert_eq!(bytes.len(), 4 + 6);

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_latin1_string(4).unwrap(), "caf\u{e9}");
    assert_eq!(reader.read_utf8_string(6).unwrap(), "\u{4f60}\u{597d}");

    let utf16: Vec<u8> = "h\u{e9}\u{4f60}"
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    let mut reader = Reader::new(&utf16);
    assert_eq!(
        reader.read_utf16_string(utf16.len()).unwrap(),
        "h\u{e9}\u{4f60}"
    );
}

#[test]
fn test_read_out_of_bound() {
    if should_panic_on_error() {
        return;
    }
    let bytes = [1u8, 2, 3];
    let mut reader = Reader::new(&bytes);
    assert!(matches!(
        reader.read_i32(),
        Err(Error::BufferOutOfBound(0, 4, 3))
    ));
    // a failed read does not move the cursor
    assert_eq!(reader.get_cursor(), 0);
    assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
    assert!(reader.read_u8().is_err());

    // unterminated varint
    let mut reader = Reader::new(&[0x80, 0x80]);
    assert!(matches!(
        reader.read_varuint32(),
        Err(Error::BufferOutOfBound(..))
    ));
}

#[test]
fn test_invalid_encodings() {
    if should_panic_on_error() {
        return;
    }
    let mut reader = Reader::new(&[0xff, 0xff, 0xff, 0xff, 0x7f]);
    assert!(matches!(reader.read_varuint32(), Err(Error::InvalidData(_))));

    let mut reader = Reader::new(&[0xc3, 0x28]);
    assert!(matches!(
        reader.read_utf8_string(2),
        Err(Error::EncodingError(_))
    ));

    let mut reader = Reader::new(&[0x61, 0x00, 0x62]);
    assert!(matches!(
        reader.read_utf16_string(3),
        Err(Error::EncodingError(_))
    ));
}
