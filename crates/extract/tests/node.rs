// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use colframe_core::{AssemblyStats, ExtractionConfig, RowOrdering};
use colframe_extract::{ExtractionStrategy, LocalStrategy, NodeStrategy, StaticMembership, merge};
use colframe_testing::{
	fixture::{mixed_rows, mixed_schema, truncated},
	init_tracing,
};

fn node(workers: usize, index: usize) -> NodeStrategy {
	NodeStrategy::new(&StaticMembership::new(workers, index).unwrap(), ExtractionConfig::default()).unwrap()
}

#[test]
fn test_nodes_merge_into_local_frame() {
	init_tracing();
	let mut rows = mixed_rows(90);
	rows[13] = truncated(&rows[13], 3);
	let expected = LocalStrategy::new(ExtractionConfig::default()).unwrap().extract(mixed_schema(), rows.clone()).unwrap();

	for workers in [1, 2, 5] {
		let mut parts = Vec::new();
		let mut stats = AssemblyStats::default();
		for index in 0..workers {
			let extracted = node(workers, index).extract(mixed_schema(), rows.clone()).unwrap();
			assert!(extracted.frame.row_numbers().iter().all(|&p| p as usize % workers == index));
			stats += extracted.stats;
			parts.push(extracted.frame);
		}

		assert_eq!(stats, expected.stats);
		let merged = merge(&mixed_schema(), parts, RowOrdering::Sequenced).unwrap();
		assert_eq!(merged, expected.frame);
	}
}

#[test]
fn test_nodes_cover_every_row_once() {
	let rows = mixed_rows(23);
	let workers = 4;

	let mut seen: Vec<u64> = (0..workers)
		.flat_map(|index| {
			node(workers, index).extract(mixed_schema(), rows.clone()).unwrap().frame.row_numbers().to_vec()
		})
		.collect();
	seen.sort_unstable();
	assert_eq!(seen, (0..23).collect::<Vec<_>>());
}
