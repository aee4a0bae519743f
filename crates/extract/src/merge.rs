// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_core::{ColumnData, Error, Frame, FrameColumn, NumberContainer, RowOrdering};
use colframe_type::Schema;
use indexmap::IndexSet;
use tracing::instrument;

/// Concatenates worker sub-frames positionally into one frame.
///
/// Under [`RowOrdering::Sequenced`] the rows are reordered by the sequence
/// numbers the sub-frames carry. Category columns are re-encoded against
/// one dictionary built in first-appearance order of the merged rows. The
/// merged frame carries no row numbers.
#[instrument(name = "extract::merge", level = "debug", skip(schema, parts), fields(parts = parts.len()))]
pub fn merge(schema: &Schema, parts: Vec<Frame>, ordering: RowOrdering) -> colframe_core::Result<Frame> {
	for (idx, part) in parts.iter().enumerate() {
		check_schema(schema, idx, part)?;
	}

	let rows: usize = parts.iter().map(Frame::row_count).sum();
	let mut row_numbers = Vec::with_capacity(rows);
	let mut columns = Vec::with_capacity(schema.len());

	for (col_idx, column) in schema.iter().enumerate() {
		let mut data = ColumnData::with_capacity(column.ty, rows).ok_or_else(|| Error::UnsupportedType {
			column: Some(column.name.clone()),
			ty: column.ty,
		})?;
		let mut domain = IndexSet::new();

		for part in &parts {
			let source = &part[col_idx];
			match &source.data {
				ColumnData::Category(codes) => {
					let remapped = remap_categories(codes, source, &mut domain)?;
					data.extend(&ColumnData::Category(remapped))?;
				}
				other => data.extend(other)?,
			}
		}

		columns.push(match data {
			ColumnData::Category(_) => FrameColumn::category(column.name.clone(), data, domain.into_iter().collect()),
			data => FrameColumn::new(column.name.clone(), data),
		});
	}

	for part in &parts {
		row_numbers.extend_from_slice(part.row_numbers());
	}

	let merged = Frame::with_row_count(columns, rows)?;
	let merged = match ordering {
		RowOrdering::Unordered => merged,
		RowOrdering::Sequenced => {
			if row_numbers.len() != rows {
				return Err(Error::SchemaMismatch(
					"sequenced merge needs a row number for every row".to_string(),
				));
			}
			let mut order: Vec<usize> = (0..rows).collect();
			order.sort_by_key(|&idx| row_numbers[idx]);
			merged.take(&order)
		}
	};

	renumber_categories(merged.without_row_numbers())
}

fn check_schema(schema: &Schema, idx: usize, part: &Frame) -> colframe_core::Result<()> {
	if part.column_count() != schema.len() {
		return Err(Error::SchemaMismatch(format!(
			"sub-frame {} has {} columns, expected {}",
			idx,
			part.column_count(),
			schema.len()
		)));
	}
	for (column, expected) in part.columns().iter().zip(schema.iter()) {
		if column.name != expected.name || column.get_type() != expected.ty {
			return Err(Error::SchemaMismatch(format!(
				"sub-frame {} has column '{}' {}, expected '{}' {}",
				idx,
				column.name,
				column.get_type(),
				expected.name,
				expected.ty
			)));
		}
	}
	Ok(())
}

fn remap_categories(
	codes: &NumberContainer<u32>,
	source: &FrameColumn,
	domain: &mut IndexSet<String>,
) -> colframe_core::Result<NumberContainer<u32>> {
	let mut result = NumberContainer::with_capacity(codes.len());
	for code in codes.iter() {
		match code.and_then(|code| source.category_value(code)) {
			Some(value) => {
				let (idx, _) = domain.insert_full(value.to_string());
				result.push(to_code(idx, &source.name)?);
			}
			None => result.push_undefined(),
		}
	}
	Ok(result)
}

/// Reassigns category codes in order of first appearance.
fn renumber_categories(frame: Frame) -> colframe_core::Result<Frame> {
	let rows = frame.row_count();
	let columns = frame
		.into_columns()
		.into_iter()
		.map(|column| {
			let ColumnData::Category(codes) = &column.data else {
				return Ok(column);
			};
			let mut domain = IndexSet::new();
			let mut renumbered = NumberContainer::with_capacity(codes.len());
			for code in codes.iter() {
				match code.and_then(|code| column.category_value(code)) {
					Some(value) => {
						let (idx, _) = domain.insert_full(value.to_string());
						renumbered.push(to_code(idx, &column.name)?);
					}
					None => renumbered.push_undefined(),
				}
			}
			Ok(FrameColumn::category(column.name, ColumnData::Category(renumbered), domain.into_iter().collect()))
		})
		.collect::<colframe_core::Result<Vec<_>>>()?;
	Frame::with_row_count(columns, rows)
}

fn to_code(idx: usize, column: &str) -> colframe_core::Result<u32> {
	u32::try_from(idx).map_err(|_| Error::DictionaryOverflow {
		column: column.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use colframe_type::{Type, Value};

	use super::*;

	fn schema() -> Schema {
		Schema::testing(&[("n", Type::Int4), ("label", Type::Utf8)])
	}

	fn part(numbers: &[i32], codes: &[u32], domain: &[&str], row_numbers: &[u64]) -> Frame {
		Frame::new(vec![
			FrameColumn::new("n", ColumnData::int4(numbers.iter().copied())),
			FrameColumn::category(
				"label",
				ColumnData::category(codes.iter().copied()),
				domain.iter().map(|s| s.to_string()).collect(),
			),
		])
		.unwrap()
		.with_row_numbers(row_numbers.to_vec())
		.unwrap()
	}

	#[test]
	fn test_unordered_concatenates_in_part_order() {
		let left = part(&[1, 3], &[0, 1], &["a", "b"], &[0, 2]);
		let right = part(&[2], &[0], &["b"], &[1]);

		let merged = merge(&schema(), vec![left, right], RowOrdering::Unordered).unwrap();
		assert_eq!(merged.row_count(), 3);
		assert!(merged.row_numbers().is_empty());
		assert_eq!(merged[0].data, ColumnData::int4([1, 3, 2]));
		assert_eq!(merged[1].data, ColumnData::category([0, 1, 1]));
		assert_eq!(merged[1].domain, Some(vec!["a".to_string(), "b".to_string()]));
	}

	#[test]
	fn test_sequenced_restores_order_and_codes() {
		let left = part(&[1, 3], &[0, 1], &["a", "b"], &[0, 2]);
		let right = part(&[2], &[0], &["c"], &[1]);

		let merged = merge(&schema(), vec![left, right], RowOrdering::Sequenced).unwrap();
		assert_eq!(merged[0].data, ColumnData::int4([1, 2, 3]));
		assert_eq!(merged[1].data, ColumnData::category([0, 1, 2]));
		assert_eq!(merged[1].domain, Some(vec!["a".to_string(), "c".to_string(), "b".to_string()]));
		assert_eq!(merged.value(1, 1), Some(Value::from("c")));
	}

	#[test]
	fn test_no_parts_yields_empty_frame() {
		let merged = merge(&schema(), vec![], RowOrdering::Sequenced).unwrap();
		assert_eq!(merged.row_count(), 0);
		assert_eq!(merged.column_count(), 2);
	}

	#[test]
	fn test_schema_mismatch() {
		let other = Frame::new(vec![FrameColumn::new("n", ColumnData::int8([1]))]).unwrap();
		let err = merge(&schema(), vec![other], RowOrdering::Unordered).unwrap_err();
		assert!(matches!(err, Error::SchemaMismatch(_)));

		let wrong_type = Frame::new(vec![
			FrameColumn::new("n", ColumnData::int8([1])),
			FrameColumn::category("label", ColumnData::category([0]), vec!["a".to_string()]),
		])
		.unwrap();
		assert!(matches!(merge(&schema(), vec![wrong_type], RowOrdering::Unordered), Err(Error::SchemaMismatch(_))));
	}

	#[test]
	fn test_sequenced_requires_row_numbers() {
		let bare = part(&[1], &[0], &["a"], &[]);
		assert!(matches!(merge(&schema(), vec![bare], RowOrdering::Sequenced), Err(Error::SchemaMismatch(_))));
	}

	#[test]
	fn test_null_categories_survive() {
		let with_null = Frame::new(vec![
			FrameColumn::new("n", ColumnData::int4([1, 2])),
			FrameColumn::category(
				"label",
				ColumnData::Category(NumberContainer::from_options([None, Some(0)])),
				vec!["z".to_string()],
			),
		])
		.unwrap();
		let merged = merge(&schema(), vec![with_null], RowOrdering::Unordered).unwrap();
		assert_eq!(merged.value(0, 1), Some(Value::Undefined));
		assert_eq!(merged.value(1, 1), Some(Value::from("z")));
	}
}
