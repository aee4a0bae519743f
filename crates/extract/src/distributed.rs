// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::Arc,
	time::{Duration, Instant},
};

use colframe_core::{
	AssemblyStats, DictionaryProvider, EnumDictionaryProvider, Error, ExtractionConfig, FrameAssembler,
	PartitionError,
};
use colframe_type::{Row, Schema};
use crossbeam_channel::{Receiver, RecvTimeoutError, SendTimeoutError, Sender, bounded, unbounded};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::{
	Extracted, ExtractionStrategy,
	cancel::CancelHandle,
	cluster::{ClusterMembership, Partitioner},
	merge::merge,
	pool::WorkerPool,
	worker::{Outcome, POLL_INTERVAL, Worker},
};

/// Materializes each partition on its own worker and merges the
/// sub-frames once every worker is done.
///
/// Rows are routed from the calling thread through bounded channels, so
/// the whole row set is never buffered in one place. The first failing
/// worker cancels the others.
pub struct DistributedStrategy {
	partitioner: Partitioner,
	config: ExtractionConfig,
	provider: Arc<dyn DictionaryProvider>,
	cancel: CancelHandle,
	pool: WorkerPool,
	// extractions take turns so one call never waits on another's workers
	running: Mutex<()>,
}

impl DistributedStrategy {
	pub fn new(membership: &dyn ClusterMembership, config: ExtractionConfig) -> colframe_core::Result<Self> {
		config.validate()?;
		let partitioner = Partitioner::new(membership)?;
		let workers = partitioner.worker_count();

		let threads = config.threads.unwrap_or(workers);
		if threads < workers {
			return Err(Error::InvalidConfig(format!(
				"{} threads cannot host {} concurrent workers",
				threads, workers
			)));
		}

		Ok(Self {
			partitioner,
			config,
			provider: Arc::new(EnumDictionaryProvider::new()),
			cancel: CancelHandle::new(),
			pool: WorkerPool::new(threads)?,
			running: Mutex::new(()),
		})
	}

	pub fn with_dictionaries(mut self, provider: Arc<dyn DictionaryProvider>) -> Self {
		self.provider = provider;
		self
	}

	pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
		self.cancel = cancel;
		self
	}

	pub fn worker_count(&self) -> usize {
		self.partitioner.worker_count()
	}

	pub fn threads(&self) -> usize {
		self.pool.threads()
	}

	/// Extracts rows that arrive already split by the engine. Partition
	/// `p` goes to worker `p % worker_count`; the global row order is the
	/// partitions concatenated in index order.
	pub fn extract_partitioned(&self, schema: Schema, partitions: Vec<Vec<Row>>) -> colframe_core::Result<Extracted> {
		let routed = partitions
			.into_iter()
			.enumerate()
			.flat_map(|(p, rows)| rows.into_iter().map(move |row| (p as u64, row)))
			.enumerate()
			.map(|(seq, (p, row))| (p, seq as u64, row));
		self.run(schema, routed)
	}

	#[instrument(name = "extract::distributed", level = "debug", skip_all, fields(workers = self.worker_count()))]
	fn run(&self, schema: Schema, rows: impl Iterator<Item = (u64, u64, Row)>) -> colframe_core::Result<Extracted> {
		let _running = self.running.lock();
		let workers = self.worker_count();
		let abort = CancelHandle::linked(&self.cancel);
		let (results_tx, results_rx) = unbounded();

		let mut senders = Vec::with_capacity(workers);
		let mut pending = Vec::with_capacity(workers);
		for index in 0..workers {
			let assembler = FrameAssembler::with_dictionaries(schema.clone(), &self.config, &*self.provider)?;
			let (tx, rx) = bounded(self.config.channel_capacity);
			senders.push(Some(tx));
			pending.push(Worker {
				index,
				assembler,
				rows: rx,
				cancel: abort.clone(),
				results: results_tx.clone(),
			});
		}
		drop(results_tx);

		for worker in pending {
			self.pool.spawn(move || worker.run());
		}
		debug!("workers started");

		let mut collector = Collector::new(workers, self.config.deadline, abort);
		let routed = route(rows, &self.partitioner, &mut senders, &mut collector, &results_rx);
		drop(senders);
		routed?;

		collector.wait(&results_rx)?;
		collector.finish(&schema, &self.config)
	}
}

impl ExtractionStrategy for DistributedStrategy {
	/// Row `i` of the stream is partition `i`.
	fn extract<I>(&self, schema: Schema, rows: I) -> colframe_core::Result<Extracted>
	where
		I: IntoIterator<Item = Row>,
	{
		let routed = rows.into_iter().enumerate().map(|(i, row)| (i as u64, i as u64, row));
		self.run(schema, routed)
	}
}

enum Delivery {
	Sent,
	Closed,
	Stopped,
}

fn route(
	rows: impl Iterator<Item = (u64, u64, Row)>,
	partitioner: &Partitioner,
	senders: &mut [Option<Sender<(u64, Row)>>],
	collector: &mut Collector,
	results: &Receiver<Outcome>,
) -> colframe_core::Result<()> {
	for (partition, seq, row) in rows {
		collector.poll(results);
		if collector.is_stopping() {
			break;
		}
		collector.check_deadline()?;

		let worker = partitioner.worker_of(partition);
		let delivery = match &senders[worker] {
			Some(tx) => deliver(tx, (seq, row), collector, results)?,
			None => Delivery::Closed,
		};
		match delivery {
			Delivery::Sent => {}
			Delivery::Closed => senders[worker] = None,
			Delivery::Stopped => break,
		}
	}
	Ok(())
}

fn deliver(
	tx: &Sender<(u64, Row)>,
	mut msg: (u64, Row),
	collector: &mut Collector,
	results: &Receiver<Outcome>,
) -> colframe_core::Result<Delivery> {
	loop {
		match tx.send_timeout(msg, POLL_INTERVAL) {
			Ok(()) => return Ok(Delivery::Sent),
			Err(SendTimeoutError::Disconnected(_)) => return Ok(Delivery::Closed),
			Err(SendTimeoutError::Timeout(back)) => {
				msg = back;
				collector.poll(results);
				if collector.is_stopping() {
					return Ok(Delivery::Stopped);
				}
				collector.check_deadline()?;
			}
		}
	}
}

/// Gathers worker outcomes and enforces the deadline.
struct Collector {
	outcomes: Vec<Option<colframe_core::Result<colframe_core::Assembled>>>,
	reported: usize,
	failed: bool,
	deadline: Option<(Duration, Instant)>,
	abort: CancelHandle,
}

impl Collector {
	fn new(workers: usize, deadline: Option<Duration>, abort: CancelHandle) -> Self {
		Self {
			outcomes: (0..workers).map(|_| None).collect(),
			reported: 0,
			failed: false,
			deadline: deadline.map(|d| (d, Instant::now() + d)),
			abort,
		}
	}

	fn is_stopping(&self) -> bool {
		self.abort.is_cancelled()
	}

	fn record(&mut self, (worker, outcome): Outcome) {
		if let Err(err) = &outcome {
			if *err != Error::Cancelled {
				warn!(worker, "partition failed: {}", err);
				self.failed = true;
				self.abort.cancel();
			}
		}
		if self.outcomes[worker].replace(outcome).is_none() {
			self.reported += 1;
		}
	}

	fn poll(&mut self, results: &Receiver<Outcome>) {
		while let Ok(outcome) = results.try_recv() {
			self.record(outcome);
		}
	}

	fn pending(&self) -> Vec<usize> {
		self.outcomes.iter().enumerate().filter(|(_, o)| o.is_none()).map(|(idx, _)| idx).collect()
	}

	fn timeout(&self) -> Error {
		self.abort.cancel();
		let pending = self.pending();
		let deadline = self.deadline.map_or(Duration::ZERO, |(d, _)| d);
		warn!(?deadline, ?pending, "extraction deadline expired");
		Error::ExtractionTimeout {
			deadline,
			pending,
		}
	}

	fn check_deadline(&self) -> colframe_core::Result<()> {
		match self.deadline {
			Some((_, at)) if Instant::now() >= at => Err(self.timeout()),
			_ => Ok(()),
		}
	}

	/// Blocks until every worker reported. Past the deadline this fails
	/// with a timeout, unless a failure already decided the outcome.
	fn wait(&mut self, results: &Receiver<Outcome>) -> colframe_core::Result<()> {
		while self.reported < self.outcomes.len() {
			let timeout = match self.deadline {
				Some((_, at)) => {
					let now = Instant::now();
					if now >= at {
						if self.failed {
							return Ok(());
						}
						return Err(self.timeout());
					}
					(at - now).min(POLL_INTERVAL)
				}
				None => POLL_INTERVAL,
			};

			match results.recv_timeout(timeout) {
				Ok(outcome) => self.record(outcome),
				Err(RecvTimeoutError::Timeout) => continue,
				Err(RecvTimeoutError::Disconnected) => {
					for worker in self.pending() {
						self.record((
							worker,
							Err(Error::WorkerLost {
								worker,
							}),
						));
					}
				}
			}
		}
		Ok(())
	}

	fn finish(self, schema: &Schema, config: &ExtractionConfig) -> colframe_core::Result<Extracted> {
		if self.abort.is_parent_cancelled() {
			return Err(Error::Cancelled);
		}

		let workers = self.outcomes.len();
		let mut failures = Vec::new();
		let mut parts = Vec::with_capacity(workers);
		let mut stats = AssemblyStats::default();

		for (worker, outcome) in self.outcomes.into_iter().enumerate() {
			match outcome {
				Some(Ok(assembled)) => {
					stats += assembled.stats;
					parts.push(assembled.frame);
				}
				Some(Err(Error::Cancelled)) | None => {}
				Some(Err(error)) => failures.push(PartitionError {
					worker,
					error: Box::new(error),
				}),
			}
		}

		if !failures.is_empty() {
			return Err(Error::PartitionFailure {
				failures,
			});
		}
		if parts.len() != workers {
			return Err(Error::Cancelled);
		}

		let frame = merge(schema, parts, config.ordering)?;
		debug!(rows = frame.row_count(), "partitions merged");
		Ok(Extracted {
			frame,
			stats,
		})
	}
}
