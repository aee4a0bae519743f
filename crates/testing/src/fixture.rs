// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_type::{Row, Schema, Type, Value};

pub fn row(values: impl IntoIterator<Item = Value>) -> Row {
	values.into_iter().collect()
}

/// `[("age", Int4), ("label", Utf8)]`
pub fn age_label_schema() -> Schema {
	Schema::testing(&[("age", Type::Int4), ("label", Type::Utf8)])
}

/// `[[23, "yes"], [NA, "no"], [41, "yes"]]`
pub fn age_label_rows() -> Vec<Row> {
	vec![
		row([Value::Int4(23), Value::from("yes")]),
		row([Value::Undefined, Value::from("no")]),
		row([Value::Int4(41), Value::from("yes")]),
	]
}

/// One column of every materializable type.
pub fn mixed_schema() -> Schema {
	Schema::testing(&[
		("id", Type::Int8),
		("small", Type::Int1),
		("medium", Type::Int2),
		("count", Type::Int4),
		("ratio", Type::Float4),
		("score", Type::Float8),
		("group", Type::Utf8),
	])
}

const GROUPS: [&str; 5] = ["red", "green", "blue", "cyan", "magenta"];

/// Deterministic rows for [`mixed_schema`]; every seventh row carries
/// nulls and the category column cycles through a handful of values.
pub fn mixed_rows(count: usize) -> Vec<Row> {
	(0..count)
		.map(|i| {
			let n = i as i64;
			if i % 7 == 3 {
				return row([
					Value::Int8(n),
					Value::Undefined,
					Value::Undefined,
					Value::Int4((n * 3) as i32),
					Value::Undefined,
					Value::Float8(n as f64 * 0.5),
					Value::Undefined,
				]);
			}
			row([
				Value::Int8(n),
				Value::Int1((n % 100) as i8),
				Value::Int2((n * 11 % 30_000) as i16),
				Value::Int4((n * 3) as i32),
				Value::Float4(n as f32 / 4.0),
				Value::Float8(n as f64 * 0.5),
				Value::from(GROUPS[(i * 7 / 3) % GROUPS.len()]),
			])
		})
		.collect()
}

/// Drops the value of column `idx` so the row no longer fits its schema.
pub fn truncated(row: &Row, idx: usize) -> Row {
	row.iter().enumerate().filter(|(i, _)| *i != idx).map(|(_, v)| v.clone()).collect()
}
