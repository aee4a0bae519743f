// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod builder;
pub mod container;
mod data;

pub use builder::ColumnBuilder;
pub use container::NumberContainer;
pub use data::ColumnData;
