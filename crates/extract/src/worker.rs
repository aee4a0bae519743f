// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use colframe_core::{Assembled, FrameAssembler};
use colframe_type::Row;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, instrument};

use crate::cancel::CancelHandle;

/// How often an idle worker re-checks for cancellation.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub(crate) type Outcome = (usize, colframe_core::Result<Assembled>);

/// One partition's assembly, running on a pool thread.
pub(crate) struct Worker {
	pub(crate) index: usize,
	pub(crate) assembler: FrameAssembler,
	pub(crate) rows: Receiver<(u64, Row)>,
	pub(crate) cancel: CancelHandle,
	pub(crate) results: Sender<Outcome>,
}

impl Worker {
	pub(crate) fn run(self) {
		let Worker {
			index,
			assembler,
			rows,
			cancel,
			results,
		} = self;
		let outcome = collect(index, assembler, &rows, &cancel);
		// the coordinator is gone after a timeout
		let _ = results.send((index, outcome));
	}
}

#[instrument(name = "extract::worker", level = "debug", skip(assembler, rows, cancel))]
fn collect(
	index: usize,
	mut assembler: FrameAssembler,
	rows: &Receiver<(u64, Row)>,
	cancel: &CancelHandle,
) -> colframe_core::Result<Assembled> {
	loop {
		cancel.check()?;
		match rows.recv_timeout(POLL_INTERVAL) {
			Ok((seq, row)) => assembler.push_sequenced(seq, row)?,
			Err(RecvTimeoutError::Timeout) => continue,
			Err(RecvTimeoutError::Disconnected) => break,
		}
	}
	cancel.check()?;

	let assembled = assembler.finish()?;
	debug!(rows = assembled.stats.rows_accepted, "partition sealed");
	Ok(assembled)
}
