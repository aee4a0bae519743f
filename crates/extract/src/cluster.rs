// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_core::Error;

/// Worker topology of a distributed extraction, supplied by the host.
pub trait ClusterMembership: Send + Sync {
	fn worker_count(&self) -> usize;

	/// Index of the local worker, in `0..worker_count()`.
	fn worker_index(&self) -> usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticMembership {
	worker_count: usize,
	worker_index: usize,
}

impl StaticMembership {
	pub fn new(worker_count: usize, worker_index: usize) -> colframe_core::Result<Self> {
		if worker_count == 0 {
			return Err(Error::InvalidConfig("worker_count must be greater than zero".to_string()));
		}
		if worker_index >= worker_count {
			return Err(Error::InvalidConfig(format!(
				"worker_index {} out of range for {} workers",
				worker_index, worker_count
			)));
		}
		Ok(Self {
			worker_count,
			worker_index,
		})
	}

	/// All workers of a cluster living in this process.
	pub fn local(worker_count: usize) -> colframe_core::Result<Self> {
		Self::new(worker_count, 0)
	}
}

impl ClusterMembership for StaticMembership {
	fn worker_count(&self) -> usize {
		self.worker_count
	}

	fn worker_index(&self) -> usize {
		self.worker_index
	}
}

/// Assigns partition index `p` to worker `p % worker_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partitioner {
	worker_count: usize,
	worker_index: usize,
}

impl Partitioner {
	pub fn new(membership: &dyn ClusterMembership) -> colframe_core::Result<Self> {
		let membership = StaticMembership::new(membership.worker_count(), membership.worker_index())?;
		Ok(Self {
			worker_count: membership.worker_count,
			worker_index: membership.worker_index,
		})
	}

	pub fn worker_count(&self) -> usize {
		self.worker_count
	}

	pub fn worker_index(&self) -> usize {
		self.worker_index
	}

	pub fn worker_of(&self, partition: u64) -> usize {
		(partition % self.worker_count as u64) as usize
	}

	pub fn owns(&self, partition: u64) -> bool {
		self.worker_of(partition) == self.worker_index
	}

	/// Keeps the items owned by the local worker, tagged with their
	/// partition index.
	pub fn filter<I>(self, items: I) -> impl Iterator<Item = (u64, I::Item)>
	where
		I: IntoIterator,
	{
		items.into_iter().enumerate().map(|(p, item)| (p as u64, item)).filter(move |(p, _)| self.owns(*p))
	}
}
