// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	ops::{Deref, Index},
	sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::Type;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaColumn {
	pub name: String,
	pub ty: Type,
}

impl SchemaColumn {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
		}
	}
}

/// Ordered column layout every row of an extraction must satisfy.
///
/// Cloning is cheap; the columns are shared and never change after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
	columns: Arc<[SchemaColumn]>,
}

impl Schema {
	pub fn new(columns: Vec<SchemaColumn>) -> Self {
		Self {
			columns: columns.into(),
		}
	}

	pub fn testing(columns: &[(&str, Type)]) -> Self {
		Self::new(columns.iter().map(|(name, ty)| SchemaColumn::new(*name, *ty)).collect())
	}

	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.columns.iter().map(|c| c.name.as_str())
	}

	pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
		self.columns.iter().map(|c| c.ty)
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name == name)
	}
}

impl Deref for Schema {
	type Target = [SchemaColumn];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Index<usize> for Schema {
	type Output = SchemaColumn;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}

impl FromIterator<SchemaColumn> for Schema {
	fn from_iter<I: IntoIterator<Item = SchemaColumn>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}
