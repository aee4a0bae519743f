// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Error;

/// Lifecycle of one extraction (or of one worker in a distributed one).
///
/// ```text
/// Idle -> Collecting -> Sealing -> Done
///             |            |
///             +--> Failed <+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionState {
	#[default]
	Idle,
	Collecting,
	Sealing,
	Done,
	Failed,
}

impl ExtractionState {
	pub fn can_transition_to(self, next: ExtractionState) -> bool {
		use ExtractionState::*;
		matches!(
			(self, next),
			(Idle, Collecting) | (Collecting, Sealing) | (Sealing, Done) | (Collecting, Failed) | (Sealing, Failed)
		)
	}

	pub fn is_terminal(self) -> bool {
		matches!(self, ExtractionState::Done | ExtractionState::Failed)
	}

	/// Moves to `next`, or reports the illegal edge without changing state.
	pub fn transition(&mut self, next: ExtractionState) -> crate::Result<()> {
		if !self.can_transition_to(next) {
			return Err(Error::InvalidTransition {
				from: *self,
				to: next,
			});
		}
		trace!(from = %self, to = %next, "extraction state transition");
		*self = next;
		Ok(())
	}
}

impl Display for ExtractionState {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ExtractionState::Idle => f.write_str("Idle"),
			ExtractionState::Collecting => f.write_str("Collecting"),
			ExtractionState::Sealing => f.write_str("Sealing"),
			ExtractionState::Done => f.write_str("Done"),
			ExtractionState::Failed => f.write_str("Failed"),
		}
	}
}
