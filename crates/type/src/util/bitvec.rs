// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};

/// Growable packed bit vector, used as the definedness mask of a column.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBitVec")]
pub struct BitVec {
	bits: Vec<u8>,
	len: usize,
}

#[derive(Deserialize)]
struct RawBitVec {
	bits: Vec<u8>,
	len: usize,
}

impl TryFrom<RawBitVec> for BitVec {
	type Error = serde::de::value::Error;

	fn try_from(raw: RawBitVec) -> Result<Self, Self::Error> {
		if raw.bits.len() != raw.len.div_ceil(8) {
			return Err(serde::de::Error::custom(format!(
				"bit vector of length {} needs {} bytes, got {}",
				raw.len,
				raw.len.div_ceil(8),
				raw.bits.len()
			)));
		}
		let tail = raw.len % 8;
		if let Some(&last) = raw.bits.last() {
			if tail != 0 && last >> tail != 0 {
				return Err(serde::de::Error::custom(format!(
					"bit vector of length {} has bits set past its end",
					raw.len
				)));
			}
		}
		Ok(Self {
			bits: raw.bits,
			len: raw.len,
		})
	}
}

impl BitVec {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			bits: Vec::with_capacity(capacity.div_ceil(8)),
			len: 0,
		}
	}

	pub fn repeat(len: usize, value: bool) -> Self {
		let mut result = Self::with_capacity(len);
		for _ in 0..len {
			result.push(value);
		}
		result
	}

	pub fn from_slice(bits: &[bool]) -> Self {
		let mut result = Self::with_capacity(bits.len());
		for &bit in bits {
			result.push(bit);
		}
		result
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn push(&mut self, bit: bool) {
		let byte = self.len / 8;
		if byte == self.bits.len() {
			self.bits.push(0);
		}
		if bit {
			self.bits[byte] |= 1 << (self.len % 8);
		}
		self.len += 1;
	}

	pub fn get(&self, idx: usize) -> bool {
		assert!(idx < self.len, "bit index {} out of bounds for length {}", idx, self.len);
		self.bits[idx / 8] & (1 << (idx % 8)) != 0
	}

	pub fn set(&mut self, idx: usize, value: bool) {
		assert!(idx < self.len, "bit index {} out of bounds for length {}", idx, self.len);
		let mask = 1 << (idx % 8);
		if value {
			self.bits[idx / 8] |= mask;
		} else {
			self.bits[idx / 8] &= !mask;
		}
	}

	pub fn extend(&mut self, other: &BitVec) {
		for bit in other.iter() {
			self.push(bit);
		}
	}

	pub fn count_ones(&self) -> usize {
		self.iter().filter(|&b| b).count()
	}

	pub fn count_zeros(&self) -> usize {
		self.len - self.count_ones()
	}

	pub fn all_ones(&self) -> bool {
		self.count_ones() == self.len
	}

	pub fn iter(&self) -> BitVecIter<'_> {
		BitVecIter {
			bitvec: self,
			pos: 0,
		}
	}

	/// Gathers the bits at `indices`, in that order.
	///
	/// # Panics
	///
	/// Panics if any index is out of bounds.
	pub fn take(&self, indices: &[usize]) -> Self {
		let mut result = Self::with_capacity(indices.len());
		for &idx in indices {
			result.push(self.get(idx));
		}
		result
	}
}

impl Debug for BitVec {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("BitVec[")?;
		for bit in self.iter() {
			f.write_str(if bit { "1" } else { "0" })?;
		}
		f.write_str("]")
	}
}

pub struct BitVecIter<'a> {
	bitvec: &'a BitVec,
	pos: usize,
}

impl Iterator for BitVecIter<'_> {
	type Item = bool;

	fn next(&mut self) -> Option<Self::Item> {
		if self.pos >= self.bitvec.len {
			return None;
		}
		let bit = self.bitvec.get(self.pos);
		self.pos += 1;
		Some(bit)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.bitvec.len - self.pos;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for BitVecIter<'_> {}

#[cfg(test)]
mod tests {
	use super::BitVec;

	#[test]
	fn test_push_get_across_byte_boundary() {
		let mut bv = BitVec::new();
		for i in 0..19 {
			bv.push(i % 3 == 0);
		}
		assert_eq!(bv.len(), 19);
		for i in 0..19 {
			assert_eq!(bv.get(i), i % 3 == 0, "bit {}", i);
		}
		assert_eq!(bv.count_ones(), 7);
		assert_eq!(bv.count_zeros(), 12);
	}

	#[test]
	fn test_set() {
		let mut bv = BitVec::repeat(10, false);
		bv.set(9, true);
		bv.set(0, true);
		bv.set(0, false);
		assert_eq!(bv.iter().collect::<Vec<_>>(), [vec![false; 9], vec![true]].concat());
	}

	#[test]
	fn test_extend_and_take() {
		let mut bv = BitVec::from_slice(&[true, false, true]);
		bv.extend(&BitVec::from_slice(&[false, true]));
		assert_eq!(bv, BitVec::from_slice(&[true, false, true, false, true]));
		assert_eq!(bv.take(&[4, 1, 0]), BitVec::from_slice(&[true, false, true]));
	}

	#[test]
	fn test_all_ones() {
		assert!(BitVec::new().all_ones());
		assert!(BitVec::repeat(12, true).all_ones());
		assert!(!BitVec::from_slice(&[true, false]).all_ones());
	}

	#[test]
	#[should_panic(expected = "out of bounds")]
	fn test_get_out_of_bounds() {
		BitVec::repeat(3, true).get(3);
	}

	#[test]
	fn test_deserialize_checks_byte_count() {
		let bv = BitVec::from_slice(&[true, false, true, true, false, false, false, false, true]);
		let json = serde_json::to_string(&bv).unwrap();
		assert_eq!(serde_json::from_str::<BitVec>(&json).unwrap(), bv);

		let err = serde_json::from_str::<BitVec>(r#"{"bits":[],"len":3}"#).unwrap_err();
		assert!(err.to_string().contains("needs 1 bytes, got 0"), "{}", err);
		assert!(serde_json::from_str::<BitVec>(r#"{"bits":[1,0],"len":3}"#).is_err());
	}

	#[test]
	fn test_deserialize_rejects_bits_past_len() {
		assert!(serde_json::from_str::<BitVec>(r#"{"bits":[5],"len":3}"#).is_ok());
		assert!(serde_json::from_str::<BitVec>(r#"{"bits":[8],"len":3}"#).is_err());
	}

	#[test]
	fn test_debug() {
		assert_eq!(format!("{:?}", BitVec::from_slice(&[true, false, true])), "BitVec[101]");
	}
}
