// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use serde::{Deserialize, Serialize};

use crate::Value;

/// One positional tuple of cells; read once by the materializer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(Vec<Value>);

impl Row {
	pub fn new(values: Vec<Value>) -> Self {
		Self(values)
	}

	pub fn into_values(self) -> Vec<Value> {
		self.0
	}
}

impl Deref for Row {
	type Target = [Value];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Index<usize> for Row {
	type Output = Value;

	fn index(&self, index: usize) -> &Self::Output {
		&self.0[index]
	}
}

impl From<Vec<Value>> for Row {
	fn from(values: Vec<Value>) -> Self {
		Self(values)
	}
}

impl FromIterator<Value> for Row {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for Row {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
