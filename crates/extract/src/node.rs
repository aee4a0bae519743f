// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use colframe_core::{DictionaryProvider, EnumDictionaryProvider, ExtractionConfig, FrameAssembler};
use colframe_type::{Row, Schema};
use tracing::{debug, instrument};

use crate::{
	Extracted, ExtractionStrategy,
	cancel::CancelHandle,
	cluster::{ClusterMembership, Partitioner},
};

/// Materializes only the partitions owned by this node of a cluster.
///
/// Every node sees the same row stream and keeps row `p` when
/// `p % worker_count == worker_index`. The sub-frame carries the global
/// row numbers of its rows, so the sub-frames of all nodes can be joined
/// with [`merge`](crate::merge) under either ordering.
pub struct NodeStrategy {
	partitioner: Partitioner,
	config: ExtractionConfig,
	provider: Arc<dyn DictionaryProvider>,
	cancel: CancelHandle,
}

impl NodeStrategy {
	pub fn new(membership: &dyn ClusterMembership, config: ExtractionConfig) -> colframe_core::Result<Self> {
		config.validate()?;
		Ok(Self {
			partitioner: Partitioner::new(membership)?,
			config,
			provider: Arc::new(EnumDictionaryProvider::new()),
			cancel: CancelHandle::new(),
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

	pub fn worker_index(&self) -> usize {
		self.partitioner.worker_index()
	}

	pub fn worker_count(&self) -> usize {
		self.partitioner.worker_count()
	}
}

impl ExtractionStrategy for NodeStrategy {
	#[instrument(name = "extract::node", level = "debug", skip_all, fields(worker = self.worker_index()))]
	fn extract<I>(&self, schema: Schema, rows: I) -> colframe_core::Result<Extracted>
	where
		I: IntoIterator<Item = Row>,
	{
		let mut assembler = FrameAssembler::with_dictionaries(schema, &self.config, &*self.provider)?;
		for (partition, row) in self.partitioner.filter(rows) {
			self.cancel.check()?;
			assembler.push_sequenced(partition, row)?;
		}
		self.cancel.check()?;

		let assembled = assembler.finish()?;
		debug!(rows = assembled.stats.rows_accepted, "node partition sealed");
		Ok(assembled.into())
	}
}

#[cfg(test)]
mod tests {
	use colframe_core::Error;
	use colframe_type::{Type, Value};

	use super::*;
	use crate::cluster::StaticMembership;

	fn rows(count: i32) -> Vec<Row> {
		(0..count).map(|i| Row::new(vec![Value::Int4(i)])).collect()
	}

	#[test]
	fn test_keeps_only_owned_rows() {
		let strategy = NodeStrategy::new(&StaticMembership::new(3, 1).unwrap(), ExtractionConfig::default()).unwrap();
		let schema = Schema::testing(&[("n", Type::Int4)]);

		let extracted = strategy.extract(schema, rows(8)).unwrap();
		assert_eq!(extracted.frame.row_numbers(), &[1, 4, 7]);
		assert_eq!(extracted.frame.value(1, 0), Some(Value::Int4(4)));
		assert_eq!(extracted.stats.rows_read, 3);
	}

	#[test]
	fn test_node_without_rows() {
		let strategy = NodeStrategy::new(&StaticMembership::new(4, 3).unwrap(), ExtractionConfig::default()).unwrap();
		let schema = Schema::testing(&[("n", Type::Int4)]);

		let extracted = strategy.extract(schema, rows(2)).unwrap();
		assert_eq!(extracted.frame.row_count(), 0);
		assert_eq!(extracted.frame.column_count(), 1);
	}

	#[test]
	fn test_cancelled() {
		let cancel = CancelHandle::new();
		cancel.cancel();
		let strategy = NodeStrategy::new(&StaticMembership::new(2, 0).unwrap(), ExtractionConfig::default())
			.unwrap()
			.with_cancel(cancel);
		let schema = Schema::testing(&[("n", Type::Int4)]);
		assert_eq!(strategy.extract(schema, rows(4)).unwrap_err(), Error::Cancelled);
	}
}
