// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

use indexmap::IndexSet;

/// Maps the strings of one column to dense category codes.
pub trait CategoryDictionary: Debug + Send {
	/// Returns the code of `value`, registering it if unseen. `None` means
	/// the dictionary cannot take another category.
	fn resolve(&mut self, value: &str) -> Option<u32>;

	fn get(&self, value: &str) -> Option<u32>;

	/// Registered strings, indexed by code.
	fn domain(&self) -> Vec<String>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Creates a fresh dictionary for every `Utf8` column of an extraction.
pub trait DictionaryProvider: Send + Sync {
	fn create(&self, column: &str) -> Box<dyn CategoryDictionary>;
}

/// Assigns codes in order of first appearance.
#[derive(Debug, Default, Clone)]
pub struct EnumDictionary {
	values: IndexSet<String>,
	limit: Option<usize>,
}

impl EnumDictionary {
	pub fn new() -> Self {
		Self::default()
	}

	/// A dictionary that refuses to grow past `limit` categories.
	pub fn with_limit(limit: usize) -> Self {
		Self {
			values: IndexSet::new(),
			limit: Some(limit),
		}
	}

	fn capacity(&self) -> usize {
		let max = (u32::MAX as usize).saturating_add(1);
		self.limit.map_or(max, |limit| limit.min(max))
	}
}

impl CategoryDictionary for EnumDictionary {
	fn resolve(&mut self, value: &str) -> Option<u32> {
		if let Some(code) = self.get(value) {
			return Some(code);
		}
		if self.values.len() >= self.capacity() {
			return None;
		}
		let (code, _) = self.values.insert_full(value.to_string());
		u32::try_from(code).ok()
	}

	fn get(&self, value: &str) -> Option<u32> {
		self.values.get_index_of(value).and_then(|code| u32::try_from(code).ok())
	}

	fn domain(&self) -> Vec<String> {
		self.values.iter().cloned().collect()
	}

	fn len(&self) -> usize {
		self.values.len()
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnumDictionaryProvider {
	limit: Option<usize>,
}

impl EnumDictionaryProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_limit(limit: usize) -> Self {
		Self {
			limit: Some(limit),
		}
	}
}

impl DictionaryProvider for EnumDictionaryProvider {
	fn create(&self, _column: &str) -> Box<dyn CategoryDictionary> {
		match self.limit {
			Some(limit) => Box::new(EnumDictionary::with_limit(limit)),
			None => Box::new(EnumDictionary::new()),
		}
	}
}
