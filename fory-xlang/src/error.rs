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

//! Error type shared by every serialize/deserialize path.
//!
//! Error constructors sit on every buffer read and type check, so they are
//! marked `#[cold]` to keep the successful paths tight.

use std::borrow::Cow;

use thiserror::Error;

/// Set FORY_PANIC_ON_ERROR=1 at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("FORY_PANIC_ON_ERROR").is_some();

#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for Fory serialization and deserialization operations.
///
/// # Always Use Static Constructor Functions
///
/// Do not build variants with the enum syntax; use [`Error::invalid_data`],
/// [`Error::type_mismatch`] and friends. They accept anything convertible into
/// `Cow<'static, str>` and honor `FORY_PANIC_ON_ERROR`.
///
/// ```rust
/// use fory_xlang::error::Error;
///
/// let err = Error::type_error("Expected string type");
/// let err = Error::invalid_data(format!("Invalid value: {}", 42));
/// let err = Error::type_mismatch(1, 2);
/// ```
///
/// ## Debug Mode: FORY_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 FORY_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// With the variable set at compile time every constructor panics with the
/// error message, so the backtrace points at the exact place the error was
/// created.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The type id read from the stream differs from the expected one.
    ///
    /// Do not construct this variant directly; use [`Error::type_mismatch`] instead.
    #[error("Type mismatch: type_a = {0}, type_b = {1}")]
    TypeMismatch(u32, u32),

    /// Buffer boundary violation during read operations.
    ///
    /// Do not construct this variant directly; use [`Error::buffer_out_of_bound`] instead.
    #[error("Buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// Invalid or corrupted data encountered.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Back-reference to an id that was never assigned.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_ref`] instead.
    #[error("{0}")]
    InvalidRef(Cow<'static, str>),

    /// General type-related error.
    ///
    /// Do not construct this variant directly; use [`Error::type_error`] instead.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// Error in encoding format or conversion.
    ///
    /// Do not construct this variant directly; use [`Error::encoding_error`] instead.
    #[error("{0}")]
    EncodingError(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Unsupported stream mode.
    ///
    /// Do not construct this variant directly; use [`Error::unsupported`] instead.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),

    /// Struct layout hash mismatch between local and remote schemas.
    ///
    /// Do not construct this variant directly; use [`Error::struct_version_mismatch`] instead.
    #[error("{0}")]
    StructVersionMismatch(Cow<'static, str>),

    /// Generic unknown error.
    ///
    /// Do not construct this variant directly; use [`Error::unknown`] instead.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

/// Coarse grouping of [`Error`] variants so callers can branch on the cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed stream: bad magic, truncated buffer, arity mismatch.
    Framing,
    /// Big endian, non cross-language or out-of-band stream.
    UnsupportedMode,
    /// Value or stream does not match the declared or registered types.
    Schema,
    /// Back-reference to an unknown id.
    Reference,
    /// Nesting limit hit.
    Resource,
    Other,
}

macro_rules! impl_message_ctor {
    ($($(#[$doc:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline(always)]
            #[cold]
            #[track_caller]
            pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
                let err = Error::$variant(s.into());
                if PANIC_ON_ERROR {
                    panic!("FORY_PANIC_ON_ERROR: {}", err);
                }
                err
            }
        )*
    };
}

impl Error {
    /// Creates a new [`Error::TypeMismatch`] with the expected and actual type ids.
    ///
    /// ```
    /// use fory_xlang::error::Error;
    ///
    /// let err = Error::type_mismatch(1, 2);
    /// assert_eq!(err.to_string(), "Type mismatch: type_a = 1, type_b = 2");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch(type_a: u32, type_b: u32) -> Self {
        let err = Error::TypeMismatch(type_a, type_b);
        if PANIC_ON_ERROR {
            panic!("FORY_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, capacity);
        if PANIC_ON_ERROR {
            panic!("FORY_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    impl_message_ctor! {
        /// Creates a new [`Error::InvalidData`].
        ///
        /// ```
        /// use fory_xlang::error::Error;
        ///
        /// let err = Error::invalid_data(format!("Invalid data at position {}", 42));
        /// ```
        invalid_data => InvalidData,
        /// Creates a new [`Error::InvalidRef`].
        invalid_ref => InvalidRef,
        /// Creates a new [`Error::TypeError`].
        type_error => TypeError,
        /// Creates a new [`Error::EncodingError`].
        encoding_error => EncodingError,
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed,
        /// Creates a new [`Error::Unsupported`]. The message is reported verbatim.
        ///
        /// ```
        /// use fory_xlang::error::Error;
        ///
        /// let err = Error::unsupported("outofband mode is not supported now");
        /// assert_eq!(err.to_string(), "outofband mode is not supported now");
        /// ```
        unsupported => Unsupported,
        /// Creates a new [`Error::StructVersionMismatch`].
        struct_version_mismatch => StructVersionMismatch,
        /// Creates a new [`Error::Unknown`].
        unknown => Unknown,
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BufferOutOfBound(..) | Error::InvalidData(_) | Error::EncodingError(_) => {
                ErrorKind::Framing
            }
            Error::Unsupported(_) => ErrorKind::UnsupportedMode,
            Error::TypeMismatch(..) | Error::TypeError(_) | Error::StructVersionMismatch(_) => {
                ErrorKind::Schema
            }
            Error::InvalidRef(_) => ErrorKind::Reference,
            Error::DepthExceed(_) => ErrorKind::Resource,
            Error::Unknown(_) => ErrorKind::Other,
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// ```
/// use fory_xlang::ensure;
/// use fory_xlang::error::Error;
///
/// fn check_value(n: i32) -> Result<(), Error> {
///     ensure!(n > 0, "value must be positive");
///     ensure!(n < 10, "value {} too large", n);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}
