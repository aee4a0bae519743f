// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use colframe_core::{DictionaryProvider, EnumDictionaryProvider, ExtractionConfig, FrameAssembler};
use colframe_type::{Row, Schema};
use tracing::instrument;

use crate::{Extracted, ExtractionStrategy, cancel::CancelHandle};

/// Pulls the entire row sequence into one assembler on the calling thread.
pub struct LocalStrategy {
	config: ExtractionConfig,
	provider: Arc<dyn DictionaryProvider>,
	cancel: CancelHandle,
}

impl LocalStrategy {
	pub fn new(config: ExtractionConfig) -> colframe_core::Result<Self> {
		config.validate()?;
		Ok(Self {
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
}

impl ExtractionStrategy for LocalStrategy {
	#[instrument(name = "extract::local", level = "debug", skip_all)]
	fn extract<I>(&self, schema: Schema, rows: I) -> colframe_core::Result<Extracted>
	where
		I: IntoIterator<Item = Row>,
	{
		let mut assembler = FrameAssembler::with_dictionaries(schema, &self.config, &*self.provider)?;
		for row in rows {
			self.cancel.check()?;
			assembler.push(row)?;
		}
		self.cancel.check()?;
		Ok(assembler.finish()?.into())
	}
}
