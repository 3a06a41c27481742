// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned tensor values and typed element access.

use crate::{DType, Shape, TensorError};
use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A Rust scalar type that maps onto one [`DType`].
///
/// Sealed: only the primitive types the descriptor vocabulary knows about
/// implement it.
pub trait Element: sealed::Sealed + Copy + fmt::Display {
    /// The data type a tensor of this element reports.
    const DTYPE: DType;

    /// Appends the little-endian encoding of `self` to `out`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Decodes one element from exactly `DTYPE.size_bytes()` bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_numeric_element {
    ($ty:ty, $dtype:expr) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const DTYPE: DType = $dtype;

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }
        }
    };
}

impl_numeric_element!(u8, DType::UInt8);
impl_numeric_element!(f32, DType::Float32);
impl_numeric_element!(f64, DType::Float64);
impl_numeric_element!(i32, DType::Int32);
impl_numeric_element!(i64, DType::Int64);

impl sealed::Sealed for bool {}

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// An owned, n-dimensional tensor stored in contiguous memory.
///
/// `Tensor` is what callers hand to the orchestrator under a logical name
/// and what the inference backend hands back. This crate never computes on
/// it; it only carries shape, dtype and bytes across the boundary.
///
/// # Memory Layout
/// Row-major (C) order, little-endian elements, flat byte buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    dtype: DType,
    data: Vec<u8>,
}

impl Tensor {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape, DType};
    /// let t = Tensor::zeros(Shape::matrix(2, 3), DType::Float32);
    /// assert_eq!(t.size_bytes(), 24); // 2 * 3 * 4 bytes
    /// ```
    pub fn zeros(shape: Shape, dtype: DType) -> Self {
        let size = shape.size_bytes(dtype);
        Self {
            shape,
            dtype,
            data: vec![0u8; size],
        }
    }

    /// Creates a tensor from raw bytes.
    ///
    /// Returns an error if the buffer size does not match `shape.size_bytes(dtype)`.
    pub fn from_bytes(shape: Shape, dtype: DType, data: Vec<u8>) -> Result<Self, TensorError> {
        let expected = shape.size_bytes(dtype);
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, dtype, data })
    }

    /// Creates a tensor from a slice of typed values.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::from_slice(Shape::vector(3), &[1i32, 2, 3]).unwrap();
    /// assert_eq!(t.to_vec::<i32>().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn from_slice<T: Element>(shape: Shape, values: &[T]) -> Result<Self, TensorError> {
        let expected_elements = shape.num_elements();
        if values.len() != expected_elements {
            return Err(TensorError::BufferSizeMismatch {
                expected: expected_elements * T::DTYPE.size_bytes(),
                actual: values.len() * T::DTYPE.size_bytes(),
            });
        }
        let mut data = Vec::with_capacity(values.len() * T::DTYPE.size_bytes());
        for &v in values {
            v.write_le(&mut data);
        }
        Ok(Self {
            shape,
            dtype: T::DTYPE,
            data,
        })
    }

    /// Creates a 1-D `float32` tensor, the most common shape in examples.
    pub fn from_f32(values: &[f32]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 4);
        for &v in values {
            v.write_le(&mut data);
        }
        Self {
            shape: Shape::vector(values.len()),
            dtype: DType::Float32,
            data,
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the raw byte slice backing this tensor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the memory footprint of this tensor in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Decodes the buffer into typed values.
    ///
    /// `Double` tensors may be read as `f64`.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, TensorError> {
        if !self.dtype.same_layout(T::DTYPE) {
            return Err(TensorError::DTypeMismatch {
                actual: self.dtype,
                requested: T::DTYPE,
            });
        }
        Ok(self
            .data
            .chunks_exact(T::DTYPE.size_bytes())
            .map(T::read_le)
            .collect())
    }

    fn write_values<T: Element>(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.to_vec::<T>().map_err(|_| fmt::Error)?;
        write!(f, "[")?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Renders the flat element list, e.g. `[5, 7, 9]`.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dtype {
            DType::Bool => self.write_values::<bool>(f),
            DType::UInt8 => self.write_values::<u8>(f),
            DType::Float32 => self.write_values::<f32>(f),
            DType::Float64 | DType::Double => self.write_values::<f64>(f),
            DType::Int32 => self.write_values::<i32>(f),
            DType::Int64 => self.write_values::<i64>(f),
        }
    }
}
