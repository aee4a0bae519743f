// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod row;
mod schema;
pub mod util;
pub mod value;

pub use row::Row;
pub use schema::{Schema, SchemaColumn};
pub use value::{
	GetType, Type, Value,
	number::{IsNumber, Number, SafeConvert},
};
