// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use colframe_core::Error;

/// Lets the caller abandon an extraction from another thread.
///
/// A linked handle reports cancellation when either itself or its parent
/// was cancelled; cancelling it never touches the parent.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
	cancelled: Arc<AtomicBool>,
	parent: Option<Arc<AtomicBool>>,
}

impl CancelHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn linked(parent: &CancelHandle) -> Self {
		Self {
			cancelled: Arc::new(AtomicBool::new(false)),
			parent: Some(Arc::clone(&parent.cancelled)),
		}
	}

	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst) || self.parent.as_ref().is_some_and(|p| p.load(Ordering::SeqCst))
	}

	/// Whether the parent, not this handle, asked to stop.
	pub fn is_parent_cancelled(&self) -> bool {
		self.parent.as_ref().is_some_and(|p| p.load(Ordering::SeqCst))
	}

	pub fn check(&self) -> colframe_core::Result<()> {
		if self.is_cancelled() {
			return Err(Error::Cancelled);
		}
		Ok(())
	}
}
