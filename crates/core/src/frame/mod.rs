// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Index;

pub use column::FrameColumn;
use colframe_type::{Row, Schema, Value};
use serde::{Deserialize, Serialize};

use crate::{Error, column::ColumnData};

mod column;
mod display;

/// Immutable columnar result of one extraction.
///
/// Every column holds the same number of rows. `row_numbers` is either
/// empty or carries one global sequence number per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
	row_numbers: Vec<u64>,
	columns: Vec<FrameColumn>,
	rows: usize,
}

#[derive(Deserialize)]
struct RawFrame {
	row_numbers: Vec<u64>,
	columns: Vec<FrameColumn>,
	rows: usize,
}

impl TryFrom<RawFrame> for Frame {
	type Error = Error;

	fn try_from(raw: RawFrame) -> crate::Result<Self> {
		Self::with_row_count(raw.columns, raw.rows)?.with_row_numbers(raw.row_numbers)
	}
}

impl Frame {
	pub fn new(columns: Vec<FrameColumn>) -> crate::Result<Self> {
		let rows = columns.first().map_or(0, FrameColumn::len);
		Self::with_row_count(columns, rows)
	}

	/// Like [`Frame::new`], but also valid for frames without columns.
	pub fn with_row_count(columns: Vec<FrameColumn>, rows: usize) -> crate::Result<Self> {
		for column in &columns {
			if column.len() != rows {
				return Err(Error::FrameShape {
					column: column.name.clone(),
					expected: rows,
					actual: column.len(),
				});
			}
		}
		Ok(Self {
			row_numbers: Vec::new(),
			columns,
			rows,
		})
	}

	/// A zero-row frame with one empty column per schema column.
	pub fn empty(schema: &Schema) -> crate::Result<Self> {
		let columns = schema
			.iter()
			.map(|c| {
				let data = ColumnData::with_capacity(c.ty, 0).ok_or_else(|| Error::UnsupportedType {
					column: Some(c.name.clone()),
					ty: c.ty,
				})?;
				Ok(FrameColumn::new(c.name.clone(), data))
			})
			.collect::<crate::Result<Vec<_>>>()?;
		Self::with_row_count(columns, 0)
	}

	pub fn with_row_numbers(mut self, row_numbers: Vec<u64>) -> crate::Result<Self> {
		if !row_numbers.is_empty() && row_numbers.len() != self.rows {
			return Err(Error::FrameShape {
				column: "row_numbers".to_string(),
				expected: self.rows,
				actual: row_numbers.len(),
			});
		}
		self.row_numbers = row_numbers;
		Ok(self)
	}

	pub fn without_row_numbers(mut self) -> Self {
		self.row_numbers.clear();
		self
	}

	pub fn row_numbers(&self) -> &[u64] {
		&self.row_numbers
	}

	pub fn row_count(&self) -> usize {
		self.rows
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows == 0
	}

	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.columns.iter().map(|c| c.name.as_str())
	}

	pub fn columns(&self) -> &[FrameColumn] {
		&self.columns
	}

	pub fn into_columns(self) -> Vec<FrameColumn> {
		self.columns
	}

	pub fn column(&self, name: &str) -> Option<&FrameColumn> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn value(&self, row: usize, column: usize) -> Option<Value> {
		if row >= self.rows {
			return None;
		}
		self.columns.get(column).map(|c| c.value(row))
	}

	pub fn row(&self, idx: usize) -> Option<Row> {
		if idx >= self.rows {
			return None;
		}
		Some(self.columns.iter().map(|c| c.value(idx)).collect())
	}

	pub fn to_rows(&self) -> Vec<Row> {
		(0..self.rows).map(|idx| self.columns.iter().map(|c| c.value(idx)).collect()).collect()
	}

	/// Gathers the rows at `indices`, in that order.
	///
	/// # Panics
	///
	/// Panics if any index is not below [`row_count`](Self::row_count).
	pub fn take(&self, indices: &[usize]) -> Self {
		Self {
			row_numbers: if self.row_numbers.is_empty() {
				Vec::new()
			} else {
				indices.iter().map(|&idx| self.row_numbers[idx]).collect()
			},
			columns: self.columns.iter().map(|c| c.take(indices)).collect(),
			rows: indices.len(),
		}
	}
}

impl Index<usize> for Frame {
	type Output = FrameColumn;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}
