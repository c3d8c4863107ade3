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

pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Configuration for Fory serialization.
///
/// Shared between the [`Fory`](crate::fory::Fory) instance and the
/// `WriteContext`/`ReadContext` of each call. The stream is always written in
/// cross-language, little-endian mode, so neither is configurable.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether reference tracking is enabled.
    /// When enabled, shared references and circular references are tracked
    /// and preserved during serialization/deserialization.
    pub track_ref: bool,
    /// Maximum nesting depth of composite values, checked on write and read.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            track_ref: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_track_ref(&self) -> bool {
        self.track_ref
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
