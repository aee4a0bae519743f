// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Row order guarantee of a merged distributed extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrdering {
	/// Sub-frames are concatenated in worker order; callers that need the
	/// input order must sort afterwards.
	#[default]
	Unordered,
	/// Rows carry their global sequence number and the merge restores the
	/// input order.
	Sequenced,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
	/// Escalate the first row with the wrong number of cells to a fatal error.
	pub strict_arity: bool,
	/// Escalate the first cell that does not fit its column to a fatal error.
	pub strict_types: bool,
	/// Upper bound for a whole distributed extraction.
	pub deadline: Option<Duration>,
	pub ordering: RowOrdering,
	/// Rows buffered per worker while routing a stream.
	pub channel_capacity: usize,
	/// Size of the worker pool; defaults to one thread per worker.
	pub threads: Option<usize>,
}

impl Default for ExtractionConfig {
	fn default() -> Self {
		Self {
			strict_arity: false,
			strict_types: false,
			deadline: None,
			ordering: RowOrdering::Unordered,
			channel_capacity: 1024,
			threads: None,
		}
	}
}

impl ExtractionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn strict_arity(mut self, strict: bool) -> Self {
		self.strict_arity = strict;
		self
	}

	pub fn strict_types(mut self, strict: bool) -> Self {
		self.strict_types = strict;
		self
	}

	pub fn deadline(mut self, deadline: Duration) -> Self {
		self.deadline = Some(deadline);
		self
	}

	pub fn ordering(mut self, ordering: RowOrdering) -> Self {
		self.ordering = ordering;
		self
	}

	pub fn channel_capacity(mut self, capacity: usize) -> Self {
		self.channel_capacity = capacity;
		self
	}

	pub fn threads(mut self, threads: usize) -> Self {
		self.threads = Some(threads);
		self
	}

	pub fn validate(&self) -> crate::Result<()> {
		if self.channel_capacity == 0 {
			return Err(Error::InvalidConfig("channel_capacity must be greater than zero".to_string()));
		}
		if self.threads == Some(0) {
			return Err(Error::InvalidConfig("threads must be greater than zero".to_string()));
		}
		if self.deadline == Some(Duration::ZERO) {
			return Err(Error::InvalidConfig("deadline must be greater than zero".to_string()));
		}
		Ok(())
	}
}
