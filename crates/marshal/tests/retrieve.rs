// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Integration tests for batch retrieve marshaling

use colbatch::{
	ColumnId, ColumnValue, Cursor, Error, ErrorCode, MarshalContext, Result, RetrieveColumn, SesId, TableId,
	WarningCode,
};
use colbatch_abi::result::{ERR_COLUMN_NOT_FOUND, WRN_BUFFER_TRUNCATED, WRN_COLUMN_NULL};
use colbatch_testing::{ColumnDef, MemoryEngine, init_tracing};
use colbatch_type::ColumnKind;

const INT: ColumnId = ColumnId(1);
const BYTES: ColumnId = ColumnId(2);
const EMPTY: ColumnId = ColumnId(3);
const TAGS: ColumnId = ColumnId(4);
const UNKNOWN: ColumnId = ColumnId(99);

fn create_test_engine(ctx: &MarshalContext) -> Result<MemoryEngine> {
	init_tracing();
	let engine = MemoryEngine::new()
		.with_column(INT, ColumnDef::new(ColumnKind::Int4))
		.with_column(BYTES, ColumnDef::new(ColumnKind::Bytes))
		.with_column(EMPTY, ColumnDef::new(ColumnKind::Bytes))
		.with_column(TAGS, ColumnDef::new(ColumnKind::Bytes).multi_valued());

	let mut values = vec![
		ColumnValue::new(INT, 1234i32),
		ColumnValue::new(BYTES, b"0123456789".to_vec()),
		ColumnValue::new(TAGS, b"first".to_vec()).with_multi_value_index(0),
		ColumnValue::new(TAGS, b"second".to_vec()).with_multi_value_index(0),
	];
	Cursor::new(&engine, ctx, SesId(1), TableId(1)).set_columns(&mut values, 4)?;
	ctx.reset_stats();
	Ok(engine)
}

#[test]
fn test_retrieve_into_buffers() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut int = [0u8; 4];
	let mut bytes = [0u8; 32];
	let mut columns = vec![RetrieveColumn::new(INT, &mut int), RetrieveColumn::new(BYTES, &mut bytes)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 2)?, WarningCode::SUCCESS);

	assert_eq!(columns[0].actual_size(), 4);
	assert_eq!(columns[1].actual_size(), 10);
	assert!(!columns[1].truncated());
	assert_eq!(columns[1].data(), Some(&b"0123456789"[..]));
	assert_eq!(engine.retrieve_calls(), 1);

	drop(columns);
	assert_eq!(i32::from_ne_bytes(int), 1234);
	Ok(())
}

#[test]
fn test_truncation_reported() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut int = [0u8; 4];
	let mut bytes = [0u8; 4];
	let mut columns = vec![RetrieveColumn::new(INT, &mut int), RetrieveColumn::new(BYTES, &mut bytes)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 2)?, WarningCode::BUFFER_TRUNCATED);

	assert!(!columns[0].truncated());
	assert_eq!(columns[0].error(), Some(ErrorCode::SUCCESS));
	assert!(columns[1].truncated());
	assert_eq!(columns[1].error(), Some(ErrorCode(WRN_BUFFER_TRUNCATED)));
	assert_eq!(columns[1].actual_size(), 10);
	assert_eq!(columns[1].data(), Some(&b"0123"[..]));
	Ok(())
}

#[test]
fn test_max_data_size_caps_destination() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut bytes = [0u8; 32];
	let mut columns = vec![RetrieveColumn::new(BYTES, &mut bytes).with_max_data_size(6)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 1)?, WarningCode::BUFFER_TRUNCATED);

	assert_eq!(engine.last_retrieve()[0].data_len, 6);
	assert!(columns[0].truncated());
	assert_eq!(columns[0].data(), Some(&b"012345"[..]));

	drop(columns);
	assert_eq!(&bytes[6..], &[0u8; 26]);
	Ok(())
}

#[test]
fn test_size_only() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut columns = vec![RetrieveColumn::size_only(BYTES)];
	cursor.retrieve_columns(&mut columns, 1)?;

	assert!(!engine.last_retrieve()[0].has_data);
	assert_eq!(columns[0].actual_size(), 10);
	assert_eq!(columns[0].data(), None);
	Ok(())
}

#[test]
fn test_long_value_offset() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut bytes = [0u8; 16];
	let mut columns = vec![RetrieveColumn::new(BYTES, &mut bytes).with_long_value_offset(7)];
	cursor.retrieve_columns(&mut columns, 1)?;

	assert_eq!(columns[0].actual_size(), 3);
	assert_eq!(columns[0].data(), Some(&b"789"[..]));
	Ok(())
}

#[test]
fn test_null_and_missing_columns() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut empty = [0u8; 4];
	let mut unknown = [0u8; 4];
	let mut columns = vec![RetrieveColumn::new(EMPTY, &mut empty), RetrieveColumn::new(UNKNOWN, &mut unknown)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 2)?, WarningCode::SUCCESS);

	assert!(columns[0].is_null());
	assert_eq!(columns[0].error(), Some(ErrorCode(WRN_COLUMN_NULL)));
	assert_eq!(columns[1].error(), Some(ErrorCode(ERR_COLUMN_NOT_FOUND)));
	assert_eq!(columns[1].data(), None);
	Ok(())
}

#[test]
fn test_multi_values_and_next_tagged() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut first = [0u8; 8];
	let mut second = [0u8; 8];
	let mut columns = vec![
		RetrieveColumn::new(TAGS, &mut first),
		RetrieveColumn::new(TAGS, &mut second).with_multi_value_index(2),
		RetrieveColumn::size_only(INT),
	];
	cursor.retrieve_columns(&mut columns, 3)?;

	assert_eq!(columns[0].data(), Some(&b"first"[..]));
	assert_eq!(columns[1].data(), Some(&b"second"[..]));
	assert_eq!(columns[2].next_tagged(), BYTES);
	assert_eq!(columns[0].next_tagged(), ColumnId::NONE);
	Ok(())
}

#[test]
fn test_destinations_released() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut int = [0u8; 4];
	let mut bytes = [0u8; 4];
	let mut columns = vec![RetrieveColumn::new(INT, &mut int), RetrieveColumn::new(BYTES, &mut bytes)];
	cursor.retrieve_columns(&mut columns, 2)?;

	let stats = ctx.stats();
	assert_eq!(stats.native_calls, 1);
	assert_eq!(stats.pins, 2);
	assert_eq!(stats.releases, 2);
	Ok(())
}

#[test]
fn test_invalid_arguments_make_no_call() -> Result<()> {
	let ctx = MarshalContext::new();
	let engine = create_test_engine(&ctx)?;
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut bytes = [0u8; 4];
	let mut column = RetrieveColumn::new(BYTES, &mut bytes);
	column.data_size = 8;
	let mut columns = vec![column];
	assert!(matches!(
		cursor.retrieve_columns(&mut columns, 1),
		Err(Error::ArgumentOutOfRange {
			name: "data_size",
			..
		})
	));
	assert!(matches!(
		cursor.retrieve_columns(&mut columns, 2),
		Err(Error::ArgumentOutOfRange {
			name: "count",
			..
		})
	));
	assert_eq!(engine.retrieve_calls(), 0);
	Ok(())
}

#[test]
fn test_truncation_reported_when_engine_returns_success() -> Result<()> {
	init_tracing();
	let ctx = MarshalContext::new();
	let engine = MemoryEngine::new().with_column(BYTES, ColumnDef::new(ColumnKind::Bytes)).with_silent_truncation();
	let cursor = Cursor::new(&engine, &ctx, SesId(1), TableId(1));

	let mut values = vec![ColumnValue::new(BYTES, b"0123456789".to_vec())];
	cursor.set_columns(&mut values, 1)?;

	let mut bytes = [0u8; 4];
	let mut columns = vec![RetrieveColumn::new(BYTES, &mut bytes)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 1)?, WarningCode::BUFFER_TRUNCATED);
	assert!(columns[0].truncated());
	assert_eq!(columns[0].actual_size(), 10);

	let mut bytes = [0u8; 16];
	let mut columns = vec![RetrieveColumn::new(BYTES, &mut bytes)];
	assert_eq!(cursor.retrieve_columns(&mut columns, 1)?, WarningCode::SUCCESS);
	Ok(())
}
