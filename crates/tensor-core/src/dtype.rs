// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported tensor element data types.

use std::fmt;

/// Enumerates the element types a model input or [`crate::Tensor`] can hold.
///
/// The serialized spelling (`"float32"`, `"uint8"`, ...) is the one written
/// into model descriptors and understood by the external model compiler.
/// `Double` is kept distinct from `Float64` so that descriptors round-trip
/// with the spelling the caller chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// Boolean, one byte per element.
    Bool,
    /// 8-bit unsigned integer (raw pixel data).
    UInt8,
    /// 32-bit IEEE 754 floating point.
    Float32,
    /// 64-bit IEEE 754 floating point.
    Float64,
    /// Alias of `Float64` with its own descriptor spelling.
    Double,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
}

impl DType {
    /// Every variant, in declaration order.
    pub const ALL: [DType; 7] = [
        DType::Bool,
        DType::UInt8,
        DType::Float32,
        DType::Float64,
        DType::Double,
        DType::Int32,
        DType::Int64,
    ];

    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::Bool | DType::UInt8 => 1,
            DType::Float32 | DType::Int32 => 4,
            DType::Float64 | DType::Double | DType::Int64 => 8,
        }
    }

    /// Returns the descriptor spelling of this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::UInt8 => "uint8",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Double => "double",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
        }
    }

    /// Parses the exact descriptor spelling. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Returns `true` if both types share the same in-memory representation.
    pub fn same_layout(self, other: DType) -> bool {
        let canon = |d: DType| if d == DType::Double { DType::Float64 } else { d };
        canon(self) == canon(other)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for d in DType::ALL {
            assert_eq!(DType::parse(d.as_str()), Some(d));
        }
        assert_eq!(DType::parse("f32"), None);
        assert_eq!(DType::parse("Float32"), None);
    }

    #[test]
    fn test_size_bytes() {
        assert_eq!(DType::Bool.size_bytes(), 1);
        assert_eq!(DType::Float32.size_bytes(), 4);
        assert_eq!(DType::Double.size_bytes(), 8);
    }

    #[test]
    fn test_same_layout() {
        assert!(DType::Double.same_layout(DType::Float64));
        assert!(DType::Float64.same_layout(DType::Double));
        assert!(!DType::Float32.same_layout(DType::Float64));
    }
}
