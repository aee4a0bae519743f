// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use colframe_type::{IsNumber, util::BitVec};
use serde::{Deserialize, Serialize};

/// Values of one numeric column plus its definedness mask.
///
/// Undefined slots hold `T::default()` in `data` and a cleared bit in
/// `defined`, so an undefined entry never collides with a legal zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNumberContainer<T>", bound(deserialize = "T: IsNumber + Deserialize<'de>"))]
pub struct NumberContainer<T: IsNumber> {
	data: Vec<T>,
	defined: BitVec,
}

#[derive(Deserialize)]
struct RawNumberContainer<T> {
	data: Vec<T>,
	defined: BitVec,
}

impl<T: IsNumber> TryFrom<RawNumberContainer<T>> for NumberContainer<T> {
	type Error = serde::de::value::Error;

	fn try_from(raw: RawNumberContainer<T>) -> Result<Self, Self::Error> {
		if raw.data.len() != raw.defined.len() {
			return Err(serde::de::Error::custom(format!(
				"container holds {} values but {} definedness bits",
				raw.data.len(),
				raw.defined.len()
			)));
		}
		Ok(Self {
			data: raw.data,
			defined: raw.defined,
		})
	}
}

impl<T: IsNumber> Deref for NumberContainer<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		self.data.as_slice()
	}
}

impl<T: IsNumber> Default for NumberContainer<T> {
	fn default() -> Self {
		Self::with_capacity(0)
	}
}

impl<T: IsNumber> NumberContainer<T> {
	pub fn new(data: Vec<T>, defined: BitVec) -> Self {
		debug_assert_eq!(data.len(), defined.len());
		Self {
			data,
			defined,
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
			defined: BitVec::with_capacity(capacity),
		}
	}

	pub fn from_vec(data: Vec<T>) -> Self {
		let defined = BitVec::repeat(data.len(), true);
		Self {
			data,
			defined,
		}
	}

	/// Builds a container from optional values; `None` becomes undefined.
	pub fn from_options(values: impl IntoIterator<Item = Option<T>>) -> Self {
		let mut result = Self::with_capacity(0);
		for value in values {
			match value {
				Some(v) => result.push(v),
				None => result.push_undefined(),
			}
		}
		result
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn capacity(&self) -> usize {
		self.data.capacity()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn push(&mut self, value: T) {
		self.data.push(value);
		self.defined.push(true);
	}

	pub fn push_undefined(&mut self) {
		self.data.push(T::default());
		self.defined.push(false);
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		if index < self.len() && self.defined.get(index) {
			self.data.get(index)
		} else {
			None
		}
	}

	pub fn is_defined(&self, idx: usize) -> bool {
		idx < self.len() && self.defined.get(idx)
	}

	pub fn is_fully_defined(&self) -> bool {
		self.defined.all_ones()
	}

	pub fn undefined_count(&self) -> usize {
		self.defined.count_zeros()
	}

	pub fn data(&self) -> &[T] {
		&self.data
	}

	pub fn bitvec(&self) -> &BitVec {
		&self.defined
	}

	pub fn as_string(&self, index: usize) -> String {
		match self.get(index) {
			Some(value) => value.to_string(),
			None => "Undefined".to_string(),
		}
	}

	pub fn extend(&mut self, other: &Self) {
		self.data.extend_from_slice(&other.data);
		self.defined.extend(&other.defined);
	}

	/// Gathers the entries at `indices`, in that order.
	///
	/// # Panics
	///
	/// Panics if any index is out of bounds.
	pub fn take(&self, indices: &[usize]) -> Self {
		Self {
			data: indices.iter().map(|&idx| self.data[idx]).collect(),
			defined: self.defined.take(indices),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
		self.data.iter().zip(self.defined.iter()).map(|(&v, defined)| if defined { Some(v) } else { None })
	}
}
