// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use colframe_type::{IsNumber, Number, SafeConvert, Type};

use crate::{
	Error,
	column::{ColumnData, container::NumberContainer},
};

/// Append-only buffer for one column, sealed exactly once.
#[derive(Debug)]
pub struct ColumnBuilder {
	ty: Type,
	data: ColumnData,
	sealed: bool,
}

impl ColumnBuilder {
	pub fn new(ty: Type) -> crate::Result<Self> {
		Self::with_capacity(ty, 0)
	}

	pub fn with_capacity(ty: Type, capacity: usize) -> crate::Result<Self> {
		let data = ColumnData::with_capacity(ty, capacity).ok_or(Error::UnsupportedType {
			column: None,
			ty,
		})?;
		Ok(Self {
			ty,
			data,
			sealed: false,
		})
	}

	pub fn ty(&self) -> Type {
		self.ty
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn is_sealed(&self) -> bool {
		self.sealed
	}

	/// Whether `value` converts exactly into this column's width.
	pub fn accepts(&self, value: Number) -> bool {
		match self.ty {
			Type::Float4 => SafeConvert::<f32>::checked_convert(value).is_some(),
			Type::Float8 => SafeConvert::<f64>::checked_convert(value).is_some(),
			Type::Int1 => SafeConvert::<i8>::checked_convert(value).is_some(),
			Type::Int2 => SafeConvert::<i16>::checked_convert(value).is_some(),
			Type::Int4 => SafeConvert::<i32>::checked_convert(value).is_some(),
			Type::Int8 => SafeConvert::<i64>::checked_convert(value).is_some(),
			_ => false,
		}
	}

	pub fn append_value(&mut self, value: Number) -> crate::Result<()> {
		self.ensure_open()?;
		match &mut self.data {
			ColumnData::Float4(c) => push_converted(c, value),
			ColumnData::Float8(c) => push_converted(c, value),
			ColumnData::Int1(c) => push_converted(c, value),
			ColumnData::Int2(c) => push_converted(c, value),
			ColumnData::Int4(c) => push_converted(c, value),
			ColumnData::Int8(c) => push_converted(c, value),
			ColumnData::Category(_) => Err(Error::TypeMismatch {
				expected: self.ty,
				actual: value.get_type(),
			}),
		}
	}

	pub fn append_category(&mut self, code: u32) -> crate::Result<()> {
		self.ensure_open()?;
		match &mut self.data {
			ColumnData::Category(c) => {
				c.push(code);
				Ok(())
			}
			_ => Err(Error::TypeMismatch {
				expected: self.ty,
				actual: Type::Utf8,
			}),
		}
	}

	pub fn append_null(&mut self) -> crate::Result<()> {
		self.ensure_open()?;
		self.data.push_undefined();
		Ok(())
	}

	/// Hands the buffer over as an immutable column; the builder stays
	/// behind empty and rejects every later call.
	pub fn seal(&mut self) -> crate::Result<ColumnData> {
		self.ensure_open()?;
		self.sealed = true;
		let empty = ColumnData::with_capacity(self.ty, 0).ok_or(Error::UnsupportedType {
			column: None,
			ty: self.ty,
		})?;
		Ok(mem::replace(&mut self.data, empty))
	}

	fn ensure_open(&self) -> crate::Result<()> {
		if self.sealed {
			return Err(Error::AlreadySealed {
				ty: self.ty,
			});
		}
		Ok(())
	}
}

fn push_converted<T>(container: &mut NumberContainer<T>, value: Number) -> crate::Result<()>
where
	T: IsNumber,
	Number: SafeConvert<T>,
{
	let converted = SafeConvert::<T>::checked_convert(value).ok_or(Error::TypeMismatch {
		expected: T::get_type(),
		actual: value.get_type(),
	})?;
	container.push(converted);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::container::NumberContainer;

	const SUPPORTED: [Type; 7] = [Type::Int1, Type::Int2, Type::Int4, Type::Int8, Type::Float4, Type::Float8, Type::Utf8];

	#[test]
	fn test_new_rejects_unsupported_types() {
		for ty in [Type::Boolean, Type::Uint4, Type::Blob, Type::Undefined] {
			let err = ColumnBuilder::new(ty).unwrap_err();
			assert_eq!(
				err,
				Error::UnsupportedType {
					column: None,
					ty
				}
			);
		}
	}

	#[test]
	fn test_integer_round_trip_at_declared_width() {
		let mut builder = ColumnBuilder::new(Type::Int1).unwrap();
		builder.append_value(Number::Int1(i8::MIN)).unwrap();
		builder.append_value(Number::Int1(i8::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::int1([i8::MIN, i8::MAX]));

		let mut builder = ColumnBuilder::new(Type::Int2).unwrap();
		builder.append_value(Number::Int2(i16::MIN)).unwrap();
		builder.append_value(Number::Int2(i16::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::int2([i16::MIN, i16::MAX]));

		let mut builder = ColumnBuilder::new(Type::Int4).unwrap();
		builder.append_value(Number::Int4(i32::MIN)).unwrap();
		builder.append_value(Number::Int4(i32::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::int4([i32::MIN, i32::MAX]));

		let mut builder = ColumnBuilder::new(Type::Int8).unwrap();
		builder.append_value(Number::Int8(i64::MIN)).unwrap();
		builder.append_value(Number::Int8(i64::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::int8([i64::MIN, i64::MAX]));
	}

	#[test]
	fn test_float_round_trip_at_declared_width() {
		let mut builder = ColumnBuilder::new(Type::Float4).unwrap();
		builder.append_value(Number::Float4(0.1)).unwrap();
		builder.append_value(Number::Float4(f32::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::float4([0.1, f32::MAX]));

		let mut builder = ColumnBuilder::new(Type::Float8).unwrap();
		builder.append_value(Number::Float8(0.1)).unwrap();
		builder.append_value(Number::Float8(f64::MIN_POSITIVE)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::float8([0.1, f64::MIN_POSITIVE]));
	}

	#[test]
	fn test_widening_into_larger_column() {
		let mut builder = ColumnBuilder::new(Type::Int8).unwrap();
		builder.append_value(Number::Int1(-5)).unwrap();
		builder.append_value(Number::Uint4(u32::MAX)).unwrap();
		assert_eq!(builder.seal().unwrap(), ColumnData::int8([-5, u32::MAX as i64]));
	}

	#[test]
	fn test_narrowing_that_does_not_fit_is_rejected() {
		let mut builder = ColumnBuilder::new(Type::Int1).unwrap();
		assert!(!builder.accepts(Number::Int4(300)));
		let err = builder.append_value(Number::Int4(300)).unwrap_err();
		assert_eq!(
			err,
			Error::TypeMismatch {
				expected: Type::Int1,
				actual: Type::Int4
			}
		);
		assert!(builder.is_empty());
	}

	#[test]
	fn test_fraction_into_integer_is_rejected() {
		let mut builder = ColumnBuilder::new(Type::Int8).unwrap();
		assert!(!builder.accepts(Number::Float8(1.5)));
		assert!(builder.accepts(Number::Int8(1)));
		assert_eq!(
			builder.append_value(Number::Float8(1.5)).unwrap_err(),
			Error::TypeMismatch {
				expected: Type::Int8,
				actual: Type::Float8
			}
		);
	}

	#[test]
	fn test_mismatch_names_the_column_width() {
		for (ty, value) in [
			(Type::Float4, Number::Int8(i64::MAX)),
			(Type::Int2, Number::Int4(i32::MAX)),
			(Type::Int4, Number::Uint8(u64::MAX)),
		] {
			let mut builder = ColumnBuilder::new(ty).unwrap();
			assert_eq!(
				builder.append_value(value).unwrap_err(),
				Error::TypeMismatch {
					expected: ty,
					actual: value.get_type()
				}
			);
		}
	}

	#[test]
	fn test_null_is_distinct_from_zero() {
		let mut builder = ColumnBuilder::new(Type::Int4).unwrap();
		builder.append_value(Number::Int4(0)).unwrap();
		builder.append_null().unwrap();
		builder.append_null().unwrap();

		let ColumnData::Int4(container) = builder.seal().unwrap() else {
			panic!("Expected Int4");
		};
		assert_eq!(container.iter().collect::<Vec<_>>(), vec![Some(0), None, None]);
	}

	#[test]
	fn test_category_codes() {
		let mut builder = ColumnBuilder::new(Type::Utf8).unwrap();
		builder.append_category(0).unwrap();
		builder.append_null().unwrap();
		builder.append_category(1).unwrap();
		assert_eq!(
			builder.seal().unwrap(),
			ColumnData::Category(NumberContainer::from_options([Some(0), None, Some(1)]))
		);
	}

	#[test]
	fn test_category_into_numeric_column_is_rejected() {
		let mut builder = ColumnBuilder::new(Type::Int4).unwrap();
		assert!(matches!(builder.append_category(0), Err(Error::TypeMismatch { .. })));

		let mut builder = ColumnBuilder::new(Type::Utf8).unwrap();
		assert!(!builder.accepts(Number::Int4(0)));
		assert!(matches!(builder.append_value(Number::Int4(0)), Err(Error::TypeMismatch { .. })));
	}

	#[test]
	fn test_seal_twice_fails_for_every_type() {
		for ty in SUPPORTED {
			let mut builder = ColumnBuilder::new(ty).unwrap();
			builder.append_null().unwrap();
			assert_eq!(builder.seal().unwrap().len(), 1);
			assert!(builder.is_sealed());
			assert_eq!(
				builder.seal().unwrap_err(),
				Error::AlreadySealed {
					ty
				}
			);
		}
	}

	#[test]
	fn test_append_after_seal_fails() {
		let mut builder = ColumnBuilder::new(Type::Float8).unwrap();
		builder.seal().unwrap();
		assert!(matches!(builder.append_value(Number::Float8(1.0)), Err(Error::AlreadySealed { .. })));
		assert!(matches!(builder.append_null(), Err(Error::AlreadySealed { .. })));

		let mut builder = ColumnBuilder::new(Type::Utf8).unwrap();
		builder.seal().unwrap();
		assert!(matches!(builder.append_category(0), Err(Error::AlreadySealed { .. })));
	}

	#[test]
	fn test_empty_seal() {
		let mut builder = ColumnBuilder::with_capacity(Type::Int2, 16).unwrap();
		let data = builder.seal().unwrap();
		assert!(data.is_empty());
		assert_eq!(data.get_type(), Type::Int2);
	}
}
