// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::AddAssign;

use colframe_type::{Row, Schema};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
	Error,
	column::ColumnBuilder,
	config::ExtractionConfig,
	dictionary::{DictionaryProvider, EnumDictionaryProvider},
	frame::{Frame, FrameColumn},
	materialize::RowMaterializer,
	state::ExtractionState,
};

/// Row counters of one assembly; skipped rows show up here instead of
/// as errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
	pub rows_read: u64,
	pub rows_accepted: u64,
	pub arity_errors: u64,
	pub type_errors: u64,
}

impl AssemblyStats {
	pub fn rows_skipped(&self) -> u64 {
		self.arity_errors + self.type_errors
	}
}

impl AddAssign for AssemblyStats {
	fn add_assign(&mut self, rhs: Self) {
		self.rows_read += rhs.rows_read;
		self.rows_accepted += rhs.rows_accepted;
		self.arity_errors += rhs.arity_errors;
		self.type_errors += rhs.type_errors;
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assembled {
	pub frame: Frame,
	pub stats: AssemblyStats,
}

/// Drives one set of column builders from the first row to the sealed
/// [`Frame`]. Dropping an assembler before [`finish`](Self::finish)
/// discards the builders unsealed.
#[derive(Debug)]
pub struct FrameAssembler {
	materializer: RowMaterializer,
	builders: Vec<ColumnBuilder>,
	row_numbers: Vec<u64>,
	sequenced: bool,
	strict_arity: bool,
	strict_types: bool,
	stats: AssemblyStats,
	state: ExtractionState,
}

impl FrameAssembler {
	pub fn new(schema: Schema, config: &ExtractionConfig) -> crate::Result<Self> {
		Self::with_dictionaries(schema, config, &EnumDictionaryProvider::new())
	}

	pub fn with_dictionaries(
		schema: Schema,
		config: &ExtractionConfig,
		provider: &dyn DictionaryProvider,
	) -> crate::Result<Self> {
		let materializer = RowMaterializer::new(schema, provider)?;
		let builders = materializer.builders(0)?;
		Ok(Self {
			materializer,
			builders,
			row_numbers: Vec::new(),
			sequenced: false,
			strict_arity: config.strict_arity,
			strict_types: config.strict_types,
			stats: AssemblyStats::default(),
			state: ExtractionState::Idle,
		})
	}

	pub fn schema(&self) -> &Schema {
		self.materializer.schema()
	}

	pub fn state(&self) -> ExtractionState {
		self.state
	}

	pub fn stats(&self) -> AssemblyStats {
		self.stats
	}

	/// Appends the next row; its read position becomes its row number.
	pub fn push(&mut self, row: Row) -> crate::Result<()> {
		let idx = self.stats.rows_read;
		self.ingest(idx, row)
	}

	/// Appends a row tagged with its global sequence number. The sealed
	/// frame then carries the numbers of all accepted rows.
	pub fn push_sequenced(&mut self, seq: u64, row: Row) -> crate::Result<()> {
		self.sequenced = true;
		self.ingest(seq, row)
	}

	fn ingest(&mut self, idx: u64, row: Row) -> crate::Result<()> {
		match self.state {
			ExtractionState::Collecting => {}
			_ => self.state.transition(ExtractionState::Collecting)?,
		}

		self.stats.rows_read += 1;
		match self.materializer.dispatch(idx, &row, &mut self.builders) {
			Ok(()) => {
				self.stats.rows_accepted += 1;
				self.row_numbers.push(idx);
				Ok(())
			}
			Err(err @ Error::RowArity { .. }) if !self.strict_arity => {
				warn!(row = idx, "skipping row: {}", err);
				self.stats.arity_errors += 1;
				Ok(())
			}
			Err(err @ Error::CellType { .. }) if !self.strict_types => {
				warn!(row = idx, "skipping row: {}", err);
				self.stats.type_errors += 1;
				Ok(())
			}
			Err(err) => {
				self.state.transition(ExtractionState::Failed)?;
				Err(err)
			}
		}
	}

	/// Seals every builder in schema order and hands out the frame.
	#[instrument(name = "assembler::finish", level = "debug", skip(self))]
	pub fn finish(mut self) -> crate::Result<Assembled> {
		if self.state == ExtractionState::Idle {
			self.state.transition(ExtractionState::Collecting)?;
		}
		self.state.transition(ExtractionState::Sealing)?;

		match self.seal() {
			Ok(frame) => {
				self.state.transition(ExtractionState::Done)?;
				debug!(
					rows = self.stats.rows_accepted,
					skipped = self.stats.rows_skipped(),
					columns = frame.column_count(),
					"frame assembled"
				);
				Ok(Assembled {
					frame,
					stats: self.stats,
				})
			}
			Err(err) => {
				self.state.transition(ExtractionState::Failed)?;
				Err(err)
			}
		}
	}

	fn seal(&mut self) -> crate::Result<Frame> {
		let mut columns = Vec::with_capacity(self.builders.len());
		for (idx, builder) in self.builders.iter_mut().enumerate() {
			let name = self.materializer.schema()[idx].name.clone();
			let data = builder.seal()?;
			let column = match self.materializer.domain(idx) {
				Some(domain) => FrameColumn::category(name, data, domain),
				None => FrameColumn::new(name, data),
			};
			columns.push(column);
		}

		let frame = Frame::with_row_count(columns, self.row_numbers.len())?;
		if self.sequenced {
			frame.with_row_numbers(std::mem::take(&mut self.row_numbers))
		} else {
			Ok(frame)
		}
	}
}

/// Materializes `rows` in one pass with the default configuration.
pub fn assemble(schema: Schema, rows: impl IntoIterator<Item = Row>) -> crate::Result<Assembled> {
	assemble_with(schema, &ExtractionConfig::default(), rows)
}

#[instrument(name = "assembler::assemble", level = "debug", skip(schema, config, rows))]
pub fn assemble_with(
	schema: Schema,
	config: &ExtractionConfig,
	rows: impl IntoIterator<Item = Row>,
) -> crate::Result<Assembled> {
	let mut assembler = FrameAssembler::new(schema, config)?;
	for row in rows {
		assembler.push(row)?;
	}
	assembler.finish()
}
