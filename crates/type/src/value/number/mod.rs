// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod convert;

pub use convert::SafeConvert;

use crate::{GetType, Type, Value};

/// Native numeric representations a column buffer can hold.
pub trait IsNumber: Copy + Clone + Default + PartialEq + std::fmt::Debug + std::fmt::Display + GetType {}

impl IsNumber for f32 {}
impl IsNumber for f64 {}
impl IsNumber for i8 {}
impl IsNumber for i16 {}
impl IsNumber for i32 {}
impl IsNumber for i64 {}
impl IsNumber for u8 {}
impl IsNumber for u16 {}
impl IsNumber for u32 {}
impl IsNumber for u64 {}

/// A numeric cell decoded from its engine representation, before it is
/// converted to the width of the column it lands in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
	Float4(f32),
	Float8(f64),
	Int1(i8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Uint1(u8),
	Uint2(u16),
	Uint4(u32),
	Uint8(u64),
}

impl Number {
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Float4(v) => Some(Number::Float4(*v)),
			Value::Float8(v) => Some(Number::Float8(*v)),
			Value::Int1(v) => Some(Number::Int1(*v)),
			Value::Int2(v) => Some(Number::Int2(*v)),
			Value::Int4(v) => Some(Number::Int4(*v)),
			Value::Int8(v) => Some(Number::Int8(*v)),
			Value::Uint1(v) => Some(Number::Uint1(*v)),
			Value::Uint2(v) => Some(Number::Uint2(*v)),
			Value::Uint4(v) => Some(Number::Uint4(*v)),
			Value::Uint8(v) => Some(Number::Uint8(*v)),
			Value::Undefined | Value::Boolean(_) | Value::Utf8(_) | Value::Blob(_) => None,
		}
	}

	pub fn get_type(&self) -> Type {
		match self {
			Number::Float4(_) => Type::Float4,
			Number::Float8(_) => Type::Float8,
			Number::Int1(_) => Type::Int1,
			Number::Int2(_) => Type::Int2,
			Number::Int4(_) => Type::Int4,
			Number::Int8(_) => Type::Int8,
			Number::Uint1(_) => Type::Uint1,
			Number::Uint2(_) => Type::Uint2,
			Number::Uint4(_) => Type::Uint4,
			Number::Uint8(_) => Type::Uint8,
		}
	}
}

macro_rules! impl_number_into_integer {
	($($dst:ty),+) => {
		$(
			impl SafeConvert<$dst> for Number {
				fn checked_convert(self) -> Option<$dst> {
					match self {
						Number::Int1(v) => v.checked_convert(),
						Number::Int2(v) => v.checked_convert(),
						Number::Int4(v) => v.checked_convert(),
						Number::Int8(v) => v.checked_convert(),
						Number::Uint1(v) => v.checked_convert(),
						Number::Uint2(v) => v.checked_convert(),
						Number::Uint4(v) => v.checked_convert(),
						Number::Uint8(v) => v.checked_convert(),
						// fractional values never land in integer columns
						Number::Float4(_) | Number::Float8(_) => None,
					}
				}
			}
		)+
	};
}

macro_rules! impl_number_into_float {
	($($dst:ty),+) => {
		$(
			impl SafeConvert<$dst> for Number {
				fn checked_convert(self) -> Option<$dst> {
					match self {
						Number::Float4(v) => v.checked_convert(),
						Number::Float8(v) => v.checked_convert(),
						Number::Int1(v) => v.checked_convert(),
						Number::Int2(v) => v.checked_convert(),
						Number::Int4(v) => v.checked_convert(),
						Number::Int8(v) => v.checked_convert(),
						Number::Uint1(v) => v.checked_convert(),
						Number::Uint2(v) => v.checked_convert(),
						Number::Uint4(v) => v.checked_convert(),
						Number::Uint8(v) => v.checked_convert(),
					}
				}
			}
		)+
	};
}

impl_number_into_integer!(i8, i16, i32, i64);
impl_number_into_float!(f32, f64);
