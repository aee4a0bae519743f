// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use assemble::{Assembled, AssemblyStats, FrameAssembler, assemble, assemble_with};
pub use column::{ColumnBuilder, ColumnData, NumberContainer};
pub use config::{ExtractionConfig, RowOrdering};
pub use dictionary::{CategoryDictionary, DictionaryProvider, EnumDictionary, EnumDictionaryProvider};
pub use error::{Error, PartitionError};
pub use frame::{Frame, FrameColumn};
pub use materialize::RowMaterializer;
pub use state::ExtractionState;

mod assemble;
pub mod column;
mod config;
pub mod dictionary;
mod error;
pub mod frame;
mod materialize;
mod state;

pub type Result<T> = std::result::Result<T, Error>;
