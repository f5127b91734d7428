// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Retrieval decoded into typed values

use colbatch_abi::{
	ColumnId, ErrorCode, SesId, TableId, WarningCode, engine::NativeApi, result::WRN_COLUMN_NULL,
};
use colbatch_type::{ColumnKind, DecodeError, Value};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::{
	context::MarshalContext,
	error::{Error, Result},
	retrieve::{RetrieveColumn, retrieve_columns},
};

/// A column to read and decode as `kind`
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveValue {
	pub column_id: ColumnId,
	pub kind: ColumnKind,
	/// `RETRIEVE_*` option flags
	pub options: u32,
	/// 1-based multi-value index
	pub multi_value_index: u32,
	value: Option<Value>,
	error: Option<ErrorCode>,
}

impl RetrieveValue {
	pub fn new(column_id: ColumnId, kind: ColumnKind) -> Self {
		Self {
			column_id,
			kind,
			options: 0,
			multi_value_index: 1,
			value: None,
			error: None,
		}
	}

	pub fn with_options(mut self, options: u32) -> Self {
		self.options = options;
		self
	}

	pub fn with_multi_value_index(mut self, multi_value_index: u32) -> Self {
		self.multi_value_index = multi_value_index;
		self
	}

	/// Decoded value, `None` when the column is null or the read failed
	pub fn value(&self) -> Option<&Value> {
		self.value.as_ref()
	}

	pub fn into_value(self) -> Option<Value> {
		self.value
	}

	pub fn error(&self) -> Option<ErrorCode> {
		self.error
	}

	pub fn is_null(&self) -> bool {
		self.error.map(|e| e.code()) == Some(WRN_COLUMN_NULL)
	}
}

/// Per-request result of a batch, kept apart from the borrowed destinations
#[derive(Clone, Copy)]
struct Outcome {
	err: i32,
	actual_size: usize,
	truncated: bool,
}

/// Issue one batch over `buffers`, one entry per request index in `indices`
fn read_batch<E: NativeApi>(
	engine: &E,
	ctx: &MarshalContext,
	sesid: SesId,
	tableid: TableId,
	requests: &[RetrieveValue],
	buffers: &mut [Vec<u8>],
	indices: &[usize],
) -> Result<(WarningCode, SmallVec<[Outcome; 16]>)> {
	let mut wanted: SmallVec<[Option<&mut Vec<u8>>; 16]> = buffers.iter_mut().map(Some).collect();
	let mut columns: Vec<RetrieveColumn<'_>> = Vec::with_capacity(indices.len());
	for &index in indices {
		let request = &requests[index];
		let Some(buffer) = wanted[index].take() else {
			continue;
		};
		columns.push(
			RetrieveColumn::new(request.column_id, buffer.as_mut_slice())
				.with_options(request.options)
				.with_multi_value_index(request.multi_value_index),
		);
	}

	let count = columns.len();
	let warning = retrieve_columns(engine, ctx, sesid, tableid, &mut columns, count)?;
	let outcomes = columns
		.iter()
		.map(|column| Outcome {
			err: column.error().map(|e| e.code()).unwrap_or_default(),
			actual_size: column.actual_size(),
			truncated: column.truncated(),
		})
		.collect();
	Ok((warning, outcomes))
}

/// Retrieve and decode `requests` in one batch.
///
/// Destinations are sized from the kind of each request, using the configured
/// retrieve buffer size for text and bytes. Variable-length entries that come
/// back truncated are read again, all together in a second batch sized to their
/// reported lengths; the result of that batch replaces the first warning.
///
/// Every request gets its error slot written even when a value fails to decode;
/// the first decode failure is returned after all requests are filled.
#[instrument(name = "marshal::retrieve_values", level = "debug", skip_all, fields(count = requests.len()))]
pub(crate) fn retrieve_values<E: NativeApi>(
	engine: &E,
	ctx: &MarshalContext,
	sesid: SesId,
	tableid: TableId,
	requests: &mut [RetrieveValue],
) -> Result<WarningCode> {
	for request in requests.iter_mut() {
		request.value = None;
		request.error = None;
	}

	let initial = ctx.config().retrieve_buffer_size;
	let mut buffers: Vec<Vec<u8>> =
		requests.iter().map(|request| vec![0u8; request.kind.fixed_size().unwrap_or(initial)]).collect();

	let all: SmallVec<[usize; 16]> = (0..requests.len()).collect();
	let (mut warning, mut outcomes) = read_batch(engine, ctx, sesid, tableid, requests, &mut buffers, &all)?;

	let retry: SmallVec<[usize; 16]> = all
		.iter()
		.copied()
		.filter(|&index| requests[index].kind.is_variable() && outcomes[index].truncated)
		.collect();
	if !retry.is_empty() {
		debug!(entries = retry.len(), "re-reading truncated values");
		for &index in &retry {
			buffers[index].resize(outcomes[index].actual_size, 0);
		}
		let (second, reread) = read_batch(engine, ctx, sesid, tableid, requests, &mut buffers, &retry)?;
		for (&index, outcome) in retry.iter().zip(reread) {
			outcomes[index] = outcome;
		}
		warning = second;
	}

	let mut failed = None;
	for ((request, buffer), outcome) in requests.iter_mut().zip(&buffers).zip(&outcomes) {
		request.error = Some(ErrorCode(outcome.err));
		if outcome.err < 0 || outcome.err == WRN_COLUMN_NULL {
			continue;
		}
		match decode(request.kind, buffer, outcome.actual_size) {
			Ok(value) => request.value = Some(value),
			Err(source) => {
				debug!(column = %request.column_id, %source, "cannot decode retrieved value");
				if failed.is_none() {
					failed = Some(Error::Decode {
						column_id: request.column_id,
						source,
					});
				}
			}
		}
	}

	match failed {
		Some(err) => Err(err),
		None => Ok(warning),
	}
}

/// Decode the first `actual_size` bytes of `buffer`; a fixed-size kind must
/// have been stored with exactly its own width
fn decode(kind: ColumnKind, buffer: &[u8], actual_size: usize) -> std::result::Result<Value, DecodeError> {
	if let Some(expected) = kind.fixed_size() {
		if actual_size != expected {
			return Err(DecodeError::Size {
				kind,
				expected,
				actual: actual_size,
			});
		}
	}
	Value::from_bytes(kind, &buffer[..actual_size.min(buffer.len())])
}
