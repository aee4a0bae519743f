// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_type::{Type, Value};
use serde::{Deserialize, Serialize};

use crate::{Error, column::container::NumberContainer};

/// Sealed values of one column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
	Float4(NumberContainer<f32>),
	Float8(NumberContainer<f64>),
	Int1(NumberContainer<i8>),
	Int2(NumberContainer<i16>),
	Int4(NumberContainer<i32>),
	Int8(NumberContainer<i64>),
	/// Dictionary codes of a `Utf8` column; raw text is never stored.
	Category(NumberContainer<u32>),
}

macro_rules! with_container {
	($self:expr, |$c:ident| $body:expr) => {
		match $self {
			ColumnData::Float4($c) => $body,
			ColumnData::Float8($c) => $body,
			ColumnData::Int1($c) => $body,
			ColumnData::Int2($c) => $body,
			ColumnData::Int4($c) => $body,
			ColumnData::Int8($c) => $body,
			ColumnData::Category($c) => $body,
		}
	};
}

impl ColumnData {
	/// Whether a column of type `ty` can be materialized at all.
	pub fn is_supported(ty: Type) -> bool {
		matches!(
			ty,
			Type::Float4 | Type::Float8 | Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8 | Type::Utf8
		)
	}

	pub fn with_capacity(ty: Type, capacity: usize) -> Option<Self> {
		Some(match ty {
			Type::Float4 => ColumnData::Float4(NumberContainer::with_capacity(capacity)),
			Type::Float8 => ColumnData::Float8(NumberContainer::with_capacity(capacity)),
			Type::Int1 => ColumnData::Int1(NumberContainer::with_capacity(capacity)),
			Type::Int2 => ColumnData::Int2(NumberContainer::with_capacity(capacity)),
			Type::Int4 => ColumnData::Int4(NumberContainer::with_capacity(capacity)),
			Type::Int8 => ColumnData::Int8(NumberContainer::with_capacity(capacity)),
			Type::Utf8 => ColumnData::Category(NumberContainer::with_capacity(capacity)),
			_ => return None,
		})
	}

	pub fn float4(values: impl IntoIterator<Item = f32>) -> Self {
		ColumnData::Float4(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn float8(values: impl IntoIterator<Item = f64>) -> Self {
		ColumnData::Float8(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn int1(values: impl IntoIterator<Item = i8>) -> Self {
		ColumnData::Int1(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn int2(values: impl IntoIterator<Item = i16>) -> Self {
		ColumnData::Int2(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn int4(values: impl IntoIterator<Item = i32>) -> Self {
		ColumnData::Int4(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn int8(values: impl IntoIterator<Item = i64>) -> Self {
		ColumnData::Int8(NumberContainer::from_vec(values.into_iter().collect()))
	}

	pub fn category(codes: impl IntoIterator<Item = u32>) -> Self {
		ColumnData::Category(NumberContainer::from_vec(codes.into_iter().collect()))
	}

	/// The schema type this data was built for.
	pub fn get_type(&self) -> Type {
		match self {
			ColumnData::Float4(_) => Type::Float4,
			ColumnData::Float8(_) => Type::Float8,
			ColumnData::Int1(_) => Type::Int1,
			ColumnData::Int2(_) => Type::Int2,
			ColumnData::Int4(_) => Type::Int4,
			ColumnData::Int8(_) => Type::Int8,
			ColumnData::Category(_) => Type::Utf8,
		}
	}

	pub fn len(&self) -> usize {
		with_container!(self, |c| c.len())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_defined(&self, idx: usize) -> bool {
		with_container!(self, |c| c.is_defined(idx))
	}

	pub fn undefined_count(&self) -> usize {
		with_container!(self, |c| c.undefined_count())
	}

	pub fn push_undefined(&mut self) {
		with_container!(self, |c| c.push_undefined())
	}

	pub fn as_string(&self, idx: usize) -> String {
		with_container!(self, |c| c.as_string(idx))
	}

	/// Category entries come back as their code (`Uint4`).
	pub fn get_value(&self, idx: usize) -> Value {
		match self {
			ColumnData::Float4(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Float4(*v)),
			ColumnData::Float8(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Float8(*v)),
			ColumnData::Int1(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Int1(*v)),
			ColumnData::Int2(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Int2(*v)),
			ColumnData::Int4(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Int4(*v)),
			ColumnData::Int8(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Int8(*v)),
			ColumnData::Category(c) => c.get(idx).map_or(Value::Undefined, |v| Value::Uint4(*v)),
		}
	}

	pub fn extend(&mut self, other: &ColumnData) -> crate::Result<()> {
		match (&mut *self, other) {
			(ColumnData::Float4(l), ColumnData::Float4(r)) => l.extend(r),
			(ColumnData::Float8(l), ColumnData::Float8(r)) => l.extend(r),
			(ColumnData::Int1(l), ColumnData::Int1(r)) => l.extend(r),
			(ColumnData::Int2(l), ColumnData::Int2(r)) => l.extend(r),
			(ColumnData::Int4(l), ColumnData::Int4(r)) => l.extend(r),
			(ColumnData::Int8(l), ColumnData::Int8(r)) => l.extend(r),
			(ColumnData::Category(l), ColumnData::Category(r)) => l.extend(r),
			(l, r) => {
				return Err(Error::SchemaMismatch(format!(
					"cannot extend {} column with {} values",
					l.get_type(),
					r.get_type()
				)));
			}
		}
		Ok(())
	}

	pub fn take(&self, indices: &[usize]) -> ColumnData {
		match self {
			ColumnData::Float4(c) => ColumnData::Float4(c.take(indices)),
			ColumnData::Float8(c) => ColumnData::Float8(c.take(indices)),
			ColumnData::Int1(c) => ColumnData::Int1(c.take(indices)),
			ColumnData::Int2(c) => ColumnData::Int2(c.take(indices)),
			ColumnData::Int4(c) => ColumnData::Int4(c.take(indices)),
			ColumnData::Int8(c) => ColumnData::Int8(c.take(indices)),
			ColumnData::Category(c) => ColumnData::Category(c.take(indices)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_capacity_rejects_unsupported() {
		for ty in [Type::Boolean, Type::Uint1, Type::Uint8, Type::Blob, Type::Undefined] {
			assert!(ColumnData::with_capacity(ty, 4).is_none(), "{}", ty);
			assert!(!ColumnData::is_supported(ty));
		}
		for ty in [Type::Int1, Type::Int2, Type::Int4, Type::Int8, Type::Float4, Type::Float8, Type::Utf8] {
			let data = ColumnData::with_capacity(ty, 4).unwrap();
			assert_eq!(data.get_type(), ty);
			assert!(data.is_empty());
		}
	}

	#[test]
	fn test_push_undefined() {
		let mut col = ColumnData::int2([1]);
		col.push_undefined();
		let ColumnData::Int2(container) = &col else {
			panic!("Expected Int2");
		};
		assert_eq!(container.data(), &[1, 0]);
		assert!(col.is_defined(0));
		assert!(!col.is_defined(1));
		assert_eq!(col.undefined_count(), 1);
	}

	#[test]
	fn test_get_value() {
		let mut col = ColumnData::category([3]);
		col.push_undefined();
		assert_eq!(col.get_value(0), Value::Uint4(3));
		assert_eq!(col.get_value(1), Value::Undefined);
		assert_eq!(ColumnData::float8([2.5]).get_value(0), Value::Float8(2.5));
	}

	#[test]
	fn test_extend_same_type() {
		let mut col = ColumnData::int8([1, 2]);
		col.extend(&ColumnData::int8([3])).unwrap();
		assert_eq!(col, ColumnData::int8([1, 2, 3]));
	}

	#[test]
	fn test_extend_type_mismatch() {
		let mut col = ColumnData::int8([1]);
		let err = col.extend(&ColumnData::int4([2])).unwrap_err();
		assert!(matches!(err, Error::SchemaMismatch(_)));
		assert_eq!(col, ColumnData::int8([1]));
	}

	#[test]
	fn test_take() {
		let col = ColumnData::float4([1.0, 2.0, 3.0]);
		assert_eq!(col.take(&[2, 0]), ColumnData::float4([3.0, 1.0]));
	}
}
