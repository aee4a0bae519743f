// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use cancel::CancelHandle;
pub use cluster::{ClusterMembership, Partitioner, StaticMembership};
use colframe_core::{Assembled, AssemblyStats, Frame};
use colframe_type::{Row, Schema};
pub use distributed::DistributedStrategy;
pub use local::LocalStrategy;
pub use merge::merge;
pub use node::NodeStrategy;

mod cancel;
mod cluster;
mod distributed;
mod local;
mod merge;
mod node;
mod pool;
mod worker;

/// Result of a whole extraction; `stats` sums the counters of every
/// worker involved.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted {
	pub frame: Frame,
	pub stats: AssemblyStats,
}

impl From<Assembled> for Extracted {
	fn from(assembled: Assembled) -> Self {
		Self {
			frame: assembled.frame,
			stats: assembled.stats,
		}
	}
}

/// Decides where the rows of one extraction are materialized.
pub trait ExtractionStrategy {
	fn extract<I>(&self, schema: Schema, rows: I) -> colframe_core::Result<Extracted>
	where
		I: IntoIterator<Item = Row>;
}
