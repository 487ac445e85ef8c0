//! The SSTORE gas/refund state machine.
//!
//! `Gnoop`, `Gdirty`, `Ginit`, `Gclean`, `Rresetclear` and `Rreset` are not
//! literal constants here: they fall out of three hardfork-configured base
//! costs (`gas_sload`, `gas_sstore_set`, `gas_sstore_reset`) by the
//! relations `Gnoop = Gdirty = gas_sload`, `Ginit = gas_sstore_set`,
//! `Gclean = gas_sstore_reset`, `Rresetclear = gas_sstore_set - gas_sload`,
//! `Rreset = gas_sstore_reset - gas_sload`. Constantinople's base costs
//! (200 sload once net-gas metering turns on, 20000 set, 5000 reset)
//! reproduce EIP-1283's published numbers through these relations; Istanbul
//! raising `gas_sload` to 800 reproduces EIP-2200's numbers through the
//! same branches, with no second copy of the state machine.

use eei_runtime::Config;
use primitive_types::H256;

/// Gas charged and refund adjustment for one SSTORE, given the slot's
/// `original` (start of transaction), `current` (pending) and `new` value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StorageOutcome {
	pub gas_cost: u64,
	/// Positive adds to the refund counter, negative subtracts (the
	/// subtraction itself still saturates at zero at the meter, per
	/// `GasMeter::refund_sub`).
	pub refund_delta: i64,
}

fn is_empty(value: H256) -> bool {
	value == H256::zero()
}

/// Net-gas (EIP-1283/EIP-2200) metering, active from Constantinople onward
/// wherever `config.sstore_gas_metering` is set (Petersburg reverts to the
/// simple table despite being chronologically later).
fn net_gas_outcome(original: H256, current: H256, new: H256, config: &Config) -> StorageOutcome {
	if current == new {
		return StorageOutcome { gas_cost: config.gas_sload, refund_delta: 0 };
	}

	if original == current {
		return if is_empty(original) {
			StorageOutcome { gas_cost: config.gas_sstore_set, refund_delta: 0 }
		} else if is_empty(new) {
			let refund = config.refund_sstore_clears as i64;
			StorageOutcome { gas_cost: config.gas_sstore_reset, refund_delta: refund }
		} else {
			StorageOutcome { gas_cost: config.gas_sstore_reset, refund_delta: 0 }
		};
	}

	// Slot already dirty this transaction.
	let mut refund = 0i64;
	if !is_empty(original) {
		if is_empty(current) {
			refund -= config.refund_sstore_clears as i64;
		} else if is_empty(new) {
			refund += config.refund_sstore_clears as i64;
		}
	}
	if original == new {
		refund += if is_empty(original) {
			(config.gas_sstore_set - config.gas_sload) as i64
		} else {
			(config.gas_sstore_reset - config.gas_sload) as i64
		};
	}

	StorageOutcome { gas_cost: config.gas_sload, refund_delta: refund }
}

/// Flat pre-Constantinople table, keyed on the 2x2 `(new == 0, slot empty)`
/// grid from the Yellow Paper as written, not the source's conjunction.
fn flat_outcome(current: H256, new: H256, config: &Config) -> StorageOutcome {
	let slot_empty = is_empty(current);
	match (is_empty(new), slot_empty) {
		(true, true) => StorageOutcome { gas_cost: config.gas_sstore_reset, refund_delta: 0 },
		(true, false) => StorageOutcome {
			gas_cost: config.gas_sstore_reset,
			refund_delta: config.refund_sstore_clears as i64,
		},
		(false, true) => StorageOutcome { gas_cost: config.gas_sstore_set, refund_delta: 0 },
		(false, false) => StorageOutcome { gas_cost: config.gas_sstore_reset, refund_delta: 0 },
	}
}

/// Compute the gas charge and refund delta for writing `new` to a slot
/// currently holding `current`, whose value at the start of the
/// transaction was `original`.
pub fn sstore_outcome(original: H256, current: H256, new: H256, config: &Config) -> StorageOutcome {
	if config.sstore_gas_metering {
		net_gas_outcome(original, current, new, config)
	} else {
		flat_outcome(current, new, config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn word(n: u64) -> H256 {
		H256::from_low_u64_be(n)
	}

	#[test]
	fn noop_charges_sload_only() {
		let config = Config::constantinople();
		let outcome = sstore_outcome(word(1), word(1), word(1), &config);
		assert_eq!(outcome, StorageOutcome { gas_cost: 200, refund_delta: 0 });
	}

	#[test]
	fn reset_to_original_constantinople() {
		let config = Config::constantinople();
		let outcome = sstore_outcome(H256::zero(), word(7), H256::zero(), &config);
		assert_eq!(outcome.gas_cost, 200);
		assert_eq!(outcome.refund_delta, 19800);
	}

	#[test]
	fn reset_to_original_istanbul() {
		let config = Config::istanbul();
		let outcome = sstore_outcome(H256::zero(), word(7), H256::zero(), &config);
		assert_eq!(outcome.gas_cost, 800);
		assert_eq!(outcome.refund_delta, 19200);
	}

	#[test]
	fn fresh_write_charges_set() {
		let config = Config::constantinople();
		let outcome = sstore_outcome(H256::zero(), H256::zero(), word(1), &config);
		assert_eq!(outcome, StorageOutcome { gas_cost: 20000, refund_delta: 0 });
	}

	#[test]
	fn flat_table_pre_constantinople() {
		let config = Config::frontier();
		let fresh = sstore_outcome(H256::zero(), H256::zero(), word(1), &config);
		assert_eq!(fresh, StorageOutcome { gas_cost: 20000, refund_delta: 0 });

		let clear = sstore_outcome(H256::zero(), word(1), H256::zero(), &config);
		assert_eq!(clear, StorageOutcome { gas_cost: 5000, refund_delta: 15000 });

		let overwrite = sstore_outcome(H256::zero(), word(1), word(2), &config);
		assert_eq!(overwrite, StorageOutcome { gas_cost: 5000, refund_delta: 0 });
	}
}
