//! EVM-specific arithmetic layered on top of [`primitive_types::U256`].
//!
//! The EEI never hand-rolls a limb-based bignum: `U256` already gives
//! correct, audited fixed-width arithmetic. What the interpreter needs on
//! top of it is a small set of EVM conventions plain `U256` does not
//! encode: gas-safe checked arithmetic that traps instead of wrapping,
//! floor division with `x / 0 == 0`, ceiling division, and a narrowing
//! conversion to a native `usize` that traps rather than silently
//! truncating.

use crate::ExitError;
use primitive_types::U256;

/// Add two values, trapping `OUT_OF_GAS` on overflow.
///
/// All gas bookkeeping is expressed in terms of this helper so a single
/// call site is responsible for the overflow check.
pub fn checked_add(a: U256, b: U256) -> Result<U256, ExitError> {
	a.checked_add(b).ok_or(ExitError::OutOfGas)
}

/// Multiply two values, trapping `OUT_OF_GAS` on overflow.
pub fn checked_mul(a: U256, b: U256) -> Result<U256, ExitError> {
	a.checked_mul(b).ok_or(ExitError::OutOfGas)
}

/// Floor division with the EVM's `x / 0 == 0` convention.
pub fn floor_div(a: U256, b: U256) -> U256 {
	if b.is_zero() {
		U256::zero()
	} else {
		a / b
	}
}

/// Floor modulo with the EVM's `x % 0 == 0` convention.
pub fn floor_mod(a: U256, b: U256) -> U256 {
	if b.is_zero() {
		U256::zero()
	} else {
		a % b
	}
}

/// `ceil(numerator / denominator)`. Only ever used with a positive
/// denominator (word counts, byte counts); callers must not pass zero.
pub fn ceil_div(numerator: U256, denominator: U256) -> U256 {
	let (quotient, remainder) = (numerator / denominator, numerator % denominator);
	if remainder.is_zero() {
		quotient
	} else {
		quotient + U256::one()
	}
}

/// Narrow a `U256` to `usize`, trapping `OUT_OF_GAS` rather than wrapping
/// when the value cannot be represented. Memory offsets and lengths that
/// do not fit a native `usize` could never be paid for anyway, so the gas
/// trap is both correct and cheap to check.
pub fn to_usize_or_trap(value: U256) -> Result<usize, ExitError> {
	if value > U256::from(usize::max_value()) {
		Err(ExitError::OutOfGas)
	} else {
		Ok(value.as_usize())
	}
}

/// `offset + length`, narrowed to `usize`, trapping `OUT_OF_GAS` if either
/// step would overflow or fail to fit. This is the single choke point
/// every memory-window computation in the crate goes through.
pub fn end_offset(offset: U256, length: U256) -> Result<usize, ExitError> {
	let end = checked_add(offset, length)?;
	to_usize_or_trap(end)
}
