//! Quadratic memory expansion costing.
//!
//! The EEI never decodes the stack arguments of a particular opcode to
//! find the window being touched — that is the dispatcher's job. This
//! crate only turns an `(offset, length)` window into a word count and a
//! word count into a gas cost.

use core::convert::TryFrom;
use eei_core::{end_offset, ExitError};
use eei_runtime::Config;
use primitive_types::U256;

/// `ceil((offset + length) / 32)`, or `0` for a zero-length window (a
/// zero-length read/write never expands memory, regardless of offset).
pub fn word_count(offset: U256, length: U256) -> Result<usize, ExitError> {
	if length.is_zero() {
		return Ok(0);
	}
	let end = end_offset(offset, length)?;
	Ok((end + 31) / 32)
}

/// `words * Gmem + words^2 / Qcoeff`, computed in 128 bits so the
/// quadratic term cannot overflow before the division that tames it.
pub fn expansion_cost(words: usize, config: &Config) -> Result<u64, ExitError> {
	let words = words as u128;
	let linear = words
		.checked_mul(config.gas_memory as u128)
		.ok_or(ExitError::OutOfGas)?;
	let quadratic = words
		.checked_mul(words)
		.ok_or(ExitError::OutOfGas)?
		/ config.gas_quad_coeff_div as u128;
	let total = linear.checked_add(quadratic).ok_or(ExitError::OutOfGas)?;
	u64::try_from(total).map_err(|_| ExitError::OutOfGas)
}
