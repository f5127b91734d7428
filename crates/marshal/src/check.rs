// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Translation of native result codes into the error model

use colbatch_abi::{ErrorCode, WarningCode};
use tracing::{debug, warn};

use crate::{
	context::MarshalContext,
	error::{Error, Result},
};

/// Translate the aggregate result code of a native call.
///
/// Negative codes notify every observer of `ctx`, in order, and then become
/// [`Error::Engine`]. Zero and positive codes are returned as the call's
/// warning, zero being plain success.
pub fn check(ctx: &MarshalContext, code: i32) -> Result<WarningCode> {
	if code < 0 {
		let code = ErrorCode(code);
		debug!(%code, observers = ctx.observers().len(), "native call failed");
		ctx.observers().notify(code);
		return Err(Error::Engine {
			code,
		});
	}

	let warning = WarningCode(code);
	if !warning.is_success() {
		warn!(%warning, "native call returned a warning");
	}
	Ok(warning)
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};

	use colbatch_abi::result::{ERR_COLUMN_NOT_FOUND, WRN_BUFFER_TRUNCATED};

	use super::*;

	#[test]
	fn test_success() {
		let ctx = MarshalContext::new();
		assert_eq!(check(&ctx, 0).unwrap(), WarningCode::SUCCESS);
	}

	#[test]
	fn test_warning_passthrough() {
		let ctx = MarshalContext::new();
		assert_eq!(check(&ctx, WRN_BUFFER_TRUNCATED).unwrap(), WarningCode::BUFFER_TRUNCATED);
		assert_eq!(check(&ctx, 12345).unwrap(), WarningCode(12345));
	}

	#[test]
	fn test_error_carries_code() {
		let ctx = MarshalContext::new();
		let err = check(&ctx, ERR_COLUMN_NOT_FOUND).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode(ERR_COLUMN_NOT_FOUND)));
	}

	#[test]
	fn test_observer_called_once_before_error() {
		let calls = Arc::new(AtomicUsize::new(0));
		let mut ctx = MarshalContext::new();
		let captured = calls.clone();
		ctx.on_error(move |code| {
			assert_eq!(code, ErrorCode(-1));
			captured.fetch_add(1, Ordering::SeqCst);
		});

		assert!(check(&ctx, -1).is_err());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_observer_not_called_for_warning() {
		let calls = Arc::new(AtomicUsize::new(0));
		let mut ctx = MarshalContext::new();
		let captured = calls.clone();
		ctx.on_error(move |_| {
			captured.fetch_add(1, Ordering::SeqCst);
		});

		check(&ctx, WRN_BUFFER_TRUNCATED).unwrap();
		check(&ctx, 0).unwrap();
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}
}
