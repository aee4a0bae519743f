// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_core::Error;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::error;

/// Dedicated rayon pool running the workers of distributed extractions.
#[derive(Debug)]
pub(crate) struct WorkerPool {
	pool: ThreadPool,
}

impl WorkerPool {
	pub(crate) fn new(threads: usize) -> colframe_core::Result<Self> {
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|i| format!("extract-{i}"))
			.panic_handler(|_| error!("extraction worker panicked"))
			.build()
			.map_err(|e| Error::InvalidConfig(format!("failed to build worker pool: {e}")))?;

		Ok(Self {
			pool,
		})
	}

	pub(crate) fn threads(&self) -> usize {
		self.pool.current_num_threads()
	}

	pub(crate) fn spawn<F>(&self, f: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.pool.spawn(f)
	}
}
