// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::Type;

/// The column type a native value is stored as.
pub trait GetType {
	fn get_type() -> Type;
}

impl GetType for f32 {
	fn get_type() -> Type {
		Type::Float4
	}
}

impl GetType for f64 {
	fn get_type() -> Type {
		Type::Float8
	}
}

impl GetType for i8 {
	fn get_type() -> Type {
		Type::Int1
	}
}

impl GetType for i16 {
	fn get_type() -> Type {
		Type::Int2
	}
}

impl GetType for i32 {
	fn get_type() -> Type {
		Type::Int4
	}
}

impl GetType for i64 {
	fn get_type() -> Type {
		Type::Int8
	}
}

impl GetType for u8 {
	fn get_type() -> Type {
		Type::Uint1
	}
}

impl GetType for u16 {
	fn get_type() -> Type {
		Type::Uint2
	}
}

impl GetType for u32 {
	fn get_type() -> Type {
		Type::Uint4
	}
}

impl GetType for u64 {
	fn get_type() -> Type {
		Type::Uint8
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_native_types() {
		assert_eq!(<f32 as GetType>::get_type(), Type::Float4);
		assert_eq!(<i16 as GetType>::get_type(), Type::Int2);
		assert_eq!(<u32 as GetType>::get_type(), Type::Uint4);
	}
}
