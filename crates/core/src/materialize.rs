// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_type::{Number, Row, Schema, Type, Value};

use crate::{
	Error,
	column::{ColumnBuilder, ColumnData},
	dictionary::{CategoryDictionary, DictionaryProvider},
};

/// Routes the cells of each row to the builder of their column.
///
/// A row is checked in full before any builder is touched, so a rejected
/// row never leaves the columns with unequal lengths.
#[derive(Debug)]
pub struct RowMaterializer {
	schema: Schema,
	dictionaries: Vec<Option<Box<dyn CategoryDictionary>>>,
}

impl RowMaterializer {
	pub fn new(schema: Schema, provider: &dyn DictionaryProvider) -> crate::Result<Self> {
		for column in schema.iter() {
			if !ColumnData::is_supported(column.ty) {
				return Err(Error::UnsupportedType {
					column: Some(column.name.clone()),
					ty: column.ty,
				});
			}
		}

		let dictionaries = schema
			.iter()
			.map(|column| match column.ty {
				Type::Utf8 => Some(provider.create(&column.name)),
				_ => None,
			})
			.collect();

		Ok(Self {
			schema,
			dictionaries,
		})
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// One empty builder per schema column, in schema order.
	pub fn builders(&self, capacity: usize) -> crate::Result<Vec<ColumnBuilder>> {
		self.schema
			.iter()
			.map(|column| {
				ColumnBuilder::with_capacity(column.ty, capacity).map_err(|_| Error::UnsupportedType {
					column: Some(column.name.clone()),
					ty: column.ty,
				})
			})
			.collect()
	}

	/// Checks arity and every cell of `row` without mutating anything.
	pub fn validate(&self, row_idx: u64, row: &Row, builders: &[ColumnBuilder]) -> crate::Result<()> {
		if builders.len() != self.schema.len() {
			return Err(Error::SchemaMismatch(format!(
				"{} builders for {} schema columns",
				builders.len(),
				self.schema.len()
			)));
		}

		if row.len() != self.schema.len() {
			return Err(Error::RowArity {
				row: row_idx,
				expected: self.schema.len(),
				actual: row.len(),
			});
		}

		for ((cell, column), builder) in row.iter().zip(self.schema.iter()).zip(builders) {
			let fits = match (cell, column.ty) {
				(Value::Undefined, _) => true,
				(Value::Utf8(_), Type::Utf8) => true,
				(_, Type::Utf8) => false,
				(cell, _) => Number::from_value(cell).is_some_and(|n| builder.accepts(n)),
			};
			if !fits {
				return Err(Error::CellType {
					row: row_idx,
					column: column.name.clone(),
					expected: column.ty,
					actual: cell.get_type(),
				});
			}
		}

		Ok(())
	}

	/// Appends `row` to `builders`. Row-level problems are reported before
	/// any append happens; a dictionary overflow mid-row is fatal and leaves
	/// the builders unusable.
	pub fn dispatch(&mut self, row_idx: u64, row: &Row, builders: &mut [ColumnBuilder]) -> crate::Result<()> {
		self.validate(row_idx, row, builders)?;

		for (idx, (cell, builder)) in row.iter().zip(builders.iter_mut()).enumerate() {
			match cell {
				Value::Undefined => builder.append_null()?,
				Value::Utf8(s) => {
					let code = self.dictionaries[idx].as_mut().and_then(|dict| dict.resolve(s)).ok_or_else(
						|| Error::DictionaryOverflow {
							column: self.schema[idx].name.clone(),
						},
					)?;
					builder.append_category(code)?;
				}
				cell => {
					let number = Number::from_value(cell).ok_or(Error::CellType {
						row: row_idx,
						column: self.schema[idx].name.clone(),
						expected: self.schema[idx].ty,
						actual: cell.get_type(),
					})?;
					builder.append_value(number)?;
				}
			}
		}

		Ok(())
	}

	/// Category strings of column `idx`, indexed by code.
	pub fn domain(&self, idx: usize) -> Option<Vec<String>> {
		self.dictionaries.get(idx)?.as_ref().map(|dict| dict.domain())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dictionary::EnumDictionaryProvider;

	fn materializer(columns: &[(&str, Type)]) -> RowMaterializer {
		RowMaterializer::new(Schema::testing(columns), &EnumDictionaryProvider::new()).unwrap()
	}

	fn row(values: Vec<Value>) -> Row {
		Row::new(values)
	}

	#[test]
	fn test_unsupported_schema_rejected_up_front() {
		let err = RowMaterializer::new(
			Schema::testing(&[("a", Type::Int4), ("flag", Type::Boolean)]),
			&EnumDictionaryProvider::new(),
		)
		.unwrap_err();
		assert_eq!(
			err,
			Error::UnsupportedType {
				column: Some("flag".to_string()),
				ty: Type::Boolean
			}
		);
	}

	#[test]
	fn test_dispatch_appends_every_column() {
		let mut m = materializer(&[("age", Type::Int4), ("label", Type::Utf8), ("score", Type::Float8)]);
		let mut builders = m.builders(0).unwrap();

		m.dispatch(0, &row(vec![Value::Int4(23), Value::from("yes"), Value::Float8(0.5)]), &mut builders).unwrap();
		m.dispatch(1, &row(vec![Value::Undefined, Value::from("no"), Value::Undefined]), &mut builders).unwrap();
		m.dispatch(2, &row(vec![Value::Int4(41), Value::from("yes"), Value::Int1(2)]), &mut builders).unwrap();

		assert!(builders.iter().all(|b| b.len() == 3));
		assert_eq!(m.domain(1), Some(vec!["yes".to_string(), "no".to_string()]));
		assert_eq!(m.domain(0), None);

		let label = builders[1].seal().unwrap();
		assert_eq!(label, ColumnData::category([0, 1, 0]));
		let score = builders[2].seal().unwrap();
		assert_eq!(score.get_value(2), Value::Float8(2.0));
	}

	#[test]
	fn test_arity_mismatch_leaves_builders_untouched() {
		let mut m = materializer(&[("a", Type::Int4), ("b", Type::Int4)]);
		let mut builders = m.builders(0).unwrap();

		let err = m.dispatch(7, &row(vec![Value::Int4(3)]), &mut builders).unwrap_err();
		assert_eq!(
			err,
			Error::RowArity {
				row: 7,
				expected: 2,
				actual: 1
			}
		);
		assert!(builders.iter().all(|b| b.is_empty()));
	}

	#[test]
	fn test_cell_type_rejects_whole_row() {
		let mut m = materializer(&[("a", Type::Int4), ("b", Type::Int1)]);
		let mut builders = m.builders(0).unwrap();

		let err = m.dispatch(0, &row(vec![Value::Int4(1), Value::Int4(300)]), &mut builders).unwrap_err();
		assert_eq!(
			err,
			Error::CellType {
				row: 0,
				column: "b".to_string(),
				expected: Type::Int1,
				actual: Type::Int4
			}
		);
		assert!(builders.iter().all(|b| b.is_empty()));
	}

	#[test]
	fn test_text_in_numeric_column_and_number_in_text_column() {
		let m = materializer(&[("a", Type::Int8), ("b", Type::Utf8)]);
		let builders = m.builders(0).unwrap();

		assert!(matches!(
			m.validate(0, &row(vec![Value::from("x"), Value::from("y")]), &builders),
			Err(Error::CellType {
				actual: Type::Utf8,
				..
			})
		));
		assert!(matches!(
			m.validate(0, &row(vec![Value::Int8(1), Value::Int8(2)]), &builders),
			Err(Error::CellType {
				expected: Type::Utf8,
				..
			})
		));
		assert!(matches!(
			m.validate(0, &row(vec![Value::Boolean(true), Value::Undefined]), &builders),
			Err(Error::CellType {
				actual: Type::Boolean,
				..
			})
		));
	}

	#[test]
	fn test_dictionary_overflow_is_fatal() {
		let schema = Schema::testing(&[("label", Type::Utf8)]);
		let mut m = RowMaterializer::new(schema, &EnumDictionaryProvider::with_limit(1)).unwrap();
		let mut builders = m.builders(0).unwrap();

		m.dispatch(0, &row(vec![Value::from("a")]), &mut builders).unwrap();
		let err = m.dispatch(1, &row(vec![Value::from("b")]), &mut builders).unwrap_err();
		assert_eq!(
			err,
			Error::DictionaryOverflow {
				column: "label".to_string()
			}
		);
	}

	#[test]
	fn test_builder_count_must_match_schema() {
		let m = materializer(&[("a", Type::Int4)]);
		assert!(matches!(m.validate(0, &row(vec![Value::Int4(1)]), &[]), Err(Error::SchemaMismatch(_))));
	}
}
