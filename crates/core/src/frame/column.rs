// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_type::{Type, Value};
use serde::{Deserialize, Serialize};

use crate::column::ColumnData;

/// A named, sealed column of a [`Frame`](crate::Frame).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameColumn {
	pub name: String,
	pub data: ColumnData,
	/// Category strings indexed by code; present only for `Utf8` columns.
	pub domain: Option<Vec<String>>,
}

impl FrameColumn {
	pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
		let domain = matches!(data, ColumnData::Category(_)).then(Vec::new);
		Self {
			name: name.into(),
			data,
			domain,
		}
	}

	pub fn category(name: impl Into<String>, data: ColumnData, domain: Vec<String>) -> Self {
		Self {
			name: name.into(),
			data,
			domain: Some(domain),
		}
	}

	pub fn get_type(&self) -> Type {
		self.data.get_type()
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// The string behind a category code.
	pub fn category_value(&self, code: u32) -> Option<&str> {
		self.domain.as_ref()?.get(code as usize).map(String::as_str)
	}

	/// Logical value at `idx`; category codes resolve to their strings.
	pub fn value(&self, idx: usize) -> Value {
		match &self.data {
			ColumnData::Category(codes) => codes
				.get(idx)
				.and_then(|code| self.category_value(*code))
				.map_or(Value::Undefined, |s| Value::Utf8(s.to_string())),
			data => data.get_value(idx),
		}
	}

	pub fn as_string(&self, idx: usize) -> String {
		match &self.data {
			ColumnData::Category(_) => self.value(idx).to_string(),
			data => data.as_string(idx),
		}
	}

	pub fn take(&self, indices: &[usize]) -> Self {
		Self {
			name: self.name.clone(),
			data: self.data.take(indices),
			domain: self.domain.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::NumberContainer;

	#[test]
	fn test_category_value_resolves_domain() {
		let column = FrameColumn::category(
			"label",
			ColumnData::Category(NumberContainer::from_options([Some(1), None, Some(0)])),
			vec!["yes".to_string(), "no".to_string()],
		);
		assert_eq!(column.value(0), Value::Utf8("no".to_string()));
		assert_eq!(column.value(1), Value::Undefined);
		assert_eq!(column.value(2), Value::Utf8("yes".to_string()));
		assert_eq!(column.as_string(1), "Undefined");
		assert_eq!(column.get_type(), Type::Utf8);
	}

	#[test]
	fn test_numeric_value() {
		let column = FrameColumn::new("age", ColumnData::int4([23, 41]));
		assert_eq!(column.domain, None);
		assert_eq!(column.value(1), Value::Int4(41));
		assert_eq!(column.as_string(0), "23");
	}

	#[test]
	fn test_new_category_has_empty_domain() {
		let column = FrameColumn::new("label", ColumnData::category([]));
		assert_eq!(column.domain, Some(vec![]));
	}
}
