//! Per-frame gas accounting: monotone deduction, the refund counter, the
//! EIP-150 1/64 forwarding rule, memory expansion costing and the SSTORE
//! gas/refund state machine.
//!
//! Every deduction funnels through [`GasMeter::charge`] so `OUT_OF_GAS` is
//! expressible by exactly one trap site, matching the rest of the pack's
//! habit of routing a whole class of error through a single call.

#![cfg_attr(not(feature = "std"), no_std)]

mod consts;
pub mod memory;
pub mod storage;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use crate::consts::CALL_FORWARD_DIVISOR;
pub use crate::storage::{sstore_outcome, StorageOutcome};

use eei_core::ExitError;
use eei_runtime::Config;

#[cfg(feature = "tracing")]
use crate::tracing::Event;

/// A frame's gas budget, the refund counter it feeds, and the
/// highest memory-expansion cost already paid.
#[derive(Clone, Debug)]
pub struct GasMeter {
	gas_left: u64,
	gas_refund: u64,
	highest_memory_cost: u64,
}

impl GasMeter {
	pub fn new(gas_limit: u64) -> Self {
		Self { gas_left: gas_limit, gas_refund: 0, highest_memory_cost: 0 }
	}

	pub fn gas_left(&self) -> u64 {
		self.gas_left
	}

	pub fn gas_refund(&self) -> u64 {
		self.gas_refund
	}

	/// Subtract `amount` from `gasLeft`. Traps `OUT_OF_GAS` and zeroes
	/// `gasLeft` rather than letting it go negative.
	pub fn charge(&mut self, amount: u64) -> Result<(), ExitError> {
		#[cfg(feature = "tracing")]
		crate::tracing::emit(|| Event::RecordCost(amount));

		match self.gas_left.checked_sub(amount) {
			Some(left) => {
				self.gas_left = left;
				Ok(())
			}
			None => {
				self.gas_left = 0;
				Err(ExitError::OutOfGas)
			}
		}
	}

	pub fn refund_add(&mut self, amount: u64) {
		#[cfg(feature = "tracing")]
		crate::tracing::emit(|| Event::RecordRefund(amount as i64));

		self.gas_refund = self.gas_refund.saturating_add(amount);
	}

	/// Subtract from the refund counter, saturating at zero. A caller that
	/// drives this negative has a bug; the refund counter is never
	/// negative in practice, so clamping rather than trapping is correct.
	pub fn refund_sub(&mut self, amount: u64) {
		#[cfg(feature = "tracing")]
		crate::tracing::emit(|| Event::RecordRefund(-(amount as i64)));

		self.gas_refund = self.gas_refund.saturating_sub(amount);
	}

	fn apply_refund_delta(&mut self, delta: i64) {
		if delta >= 0 {
			self.refund_add(delta as u64);
		} else {
			self.refund_sub((-delta) as u64);
		}
	}

	/// Maximum gas that may be forwarded to a nested call: EIP-150's 1/64
	/// rule.
	pub fn allowance(&self) -> u64 {
		self.gas_left - self.gas_left / CALL_FORWARD_DIVISOR
	}

	/// Merge a successful nested call's leftover gas and refund back into
	/// this meter. Used by the call orchestrator's post-call integration.
	pub fn record_stipend(&mut self, leftover_gas: u64) {
		#[cfg(feature = "tracing")]
		crate::tracing::emit(|| Event::RecordStipend(leftover_gas));

		self.gas_left = self.gas_left.saturating_add(leftover_gas);
	}

	pub fn record_refund(&mut self, refund: u64) {
		self.refund_add(refund);
	}

	/// Charge for growing memory to cover `(offset, length)`, if it is not
	/// already covered. No-op for a zero-length window or a window already
	/// within the highest word count charged for.
	pub fn record_memory_expansion(
		&mut self,
		offset: primitive_types::U256,
		length: primitive_types::U256,
		config: &Config,
	) -> Result<(), ExitError> {
		let words = memory::word_count(offset, length)?;
		if words == 0 {
			return Ok(());
		}
		let cost = memory::expansion_cost(words, config)?;
		if cost > self.highest_memory_cost {
			let delta = cost - self.highest_memory_cost;
			self.highest_memory_cost = cost;

			#[cfg(feature = "tracing")]
			crate::tracing::emit(|| Event::RecordMemoryExpansion { words, gas_cost: cost });

			self.charge(delta)?;
		}
		Ok(())
	}

	/// Charge for and apply the refund of one SSTORE, per the net-gas or
	/// flat state machine selected by `config`.
	pub fn record_sstore(
		&mut self,
		original: primitive_types::H256,
		current: primitive_types::H256,
		new: primitive_types::H256,
		config: &Config,
	) -> Result<(), ExitError> {
		let outcome = sstore_outcome(original, current, new, config);
		log::trace!(target: "eei", "sstore {:?} -> {:?} (original {:?}): gas {} refund {}",
			current, new, original, outcome.gas_cost, outcome.refund_delta);

		#[cfg(feature = "tracing")]
		crate::tracing::emit(|| Event::RecordSstore {
			gas_cost: outcome.gas_cost,
			refund_delta: outcome.refund_delta,
		});

		self.charge(outcome.gas_cost)?;
		self.apply_refund_delta(outcome.refund_delta);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use primitive_types::{H256, U256};

	#[test]
	fn charge_traps_on_underflow_and_zeroes_gas() {
		let mut meter = GasMeter::new(10);
		assert_eq!(meter.charge(11), Err(ExitError::OutOfGas));
		assert_eq!(meter.gas_left(), 0);
	}

	#[test]
	fn allowance_is_1_64_rule() {
		let meter = GasMeter::new(6400);
		assert_eq!(meter.allowance(), 6300);
	}

	#[test]
	fn refund_sub_saturates_at_zero() {
		let mut meter = GasMeter::new(1000);
		meter.refund_add(10);
		meter.refund_sub(50);
		assert_eq!(meter.gas_refund(), 0);
	}

	#[test]
	fn repeated_expansion_to_same_window_is_free() {
		let mut meter = GasMeter::new(1_000_000);
		let config = Config::istanbul();
		meter.record_memory_expansion(U256::zero(), U256::from(32), &config).unwrap();
		assert_eq!(meter.gas_left(), 1_000_000 - 3);
		meter.record_memory_expansion(U256::zero(), U256::from(32), &config).unwrap();
		assert_eq!(meter.gas_left(), 1_000_000 - 3);
	}

	#[test]
	fn sstore_reset_to_original_merges_into_refund() {
		let mut meter = GasMeter::new(1_000_000);
		let config = Config::constantinople();
		meter
			.record_sstore(H256::zero(), H256::from_low_u64_be(7), H256::zero(), &config)
			.unwrap();
		assert_eq!(meter.gas_left(), 1_000_000 - 200);
		assert_eq!(meter.gas_refund(), 19800);
	}
}
