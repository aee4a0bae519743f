// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt::Write, time::Duration};

use colframe_type::Type;

use crate::state::ExtractionState;

/// A worker of a distributed extraction that ended in `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionError {
	pub worker: usize,
	pub error: Box<Error>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("type {ty} cannot be materialized{}", describe_column(.column))]
	UnsupportedType {
		column: Option<String>,
		ty: Type,
	},

	#[error("row {row} has {actual} cells but the schema has {expected} columns")]
	RowArity {
		row: u64,
		expected: usize,
		actual: usize,
	},

	#[error("row {row}: {actual} value cannot be stored in column '{column}' of type {expected}")]
	CellType {
		row: u64,
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("column builder of type {expected} cannot accept a {actual} value")]
	TypeMismatch {
		expected: Type,
		actual: Type,
	},

	#[error("column builder of type {ty} is already sealed")]
	AlreadySealed {
		ty: Type,
	},

	#[error("dictionary of column '{column}' cannot hold more categories")]
	DictionaryOverflow {
		column: String,
	},

	#[error("column '{column}' has {actual} rows but the frame has {expected}")]
	FrameShape {
		column: String,
		expected: usize,
		actual: usize,
	},

	#[error("schema mismatch: {0}")]
	SchemaMismatch(String),

	#[error("invalid extraction state transition {from} -> {to}")]
	InvalidTransition {
		from: ExtractionState,
		to: ExtractionState,
	},

	#[error("extraction did not complete within {deadline:?}; pending workers: {pending:?}")]
	ExtractionTimeout {
		deadline: Duration,
		pending: Vec<usize>,
	},

	#[error("{} partition(s) failed: {}", .failures.len(), describe_failures(.failures))]
	PartitionFailure {
		failures: Vec<PartitionError>,
	},

	#[error("worker {worker} stopped without reporting a result")]
	WorkerLost {
		worker: usize,
	},

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("extraction was cancelled")]
	Cancelled,
}

impl Error {
	/// Row-level errors are counted and skipped unless a strict mode
	/// escalates them.
	pub fn is_row_level(&self) -> bool {
		matches!(self, Error::RowArity { .. } | Error::CellType { .. })
	}

	pub fn failed_workers(&self) -> Vec<usize> {
		match self {
			Error::PartitionFailure {
				failures,
			} => failures.iter().map(|f| f.worker).collect(),
			_ => Vec::new(),
		}
	}
}

fn describe_column(column: &Option<String>) -> String {
	match column {
		Some(name) => format!(" (column '{}')", name),
		None => String::new(),
	}
}

fn describe_failures(failures: &[PartitionError]) -> String {
	let mut out = String::new();
	for (i, failure) in failures.iter().enumerate() {
		if i > 0 {
			out.push_str("; ");
		}
		let _ = write!(out, "worker {}: {}", failure.worker, failure.error);
	}
	out
}
