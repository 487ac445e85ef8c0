//! Hardfork-keyed gas schedule.
//!
//! One [`Config`] is selected per transaction from a [`Hardfork`] and
//! threaded immutably through every frame of that transaction. This crate
//! never reads an environment variable, a file or a CLI flag to pick a
//! hardfork — selecting one is the embedder's job.

/// A named set of gas and semantic rules active for a range of blocks.
///
/// Declaration order matters: `gteHardfork` style comparisons are expressed
/// as a plain ordering over this enum rather than as a separate lookup
/// table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Hardfork {
	Frontier,
	TangerineWhistle,
	Constantinople,
	Petersburg,
	Istanbul,
}

/// Gas constants and feature flags for one hardfork.
///
/// The `gas_sload` / `gas_sstore_set` / `gas_sstore_reset` triple alone
/// parametrizes the entire net-gas SSTORE state machine: selecting
/// Constantinople's values reproduces EIP-1283's published numbers,
/// Istanbul's values reproduce EIP-2200's, without the state machine itself
/// changing shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
	/// Gas paid per word for `EXTCODE*`.
	pub gas_extcode: u64,
	/// Gas paid for `BALANCE`.
	pub gas_balance: u64,
	/// Gas paid for `SLOAD`, and for the SSTORE no-op/dirty branches once
	/// net-gas metering is active.
	pub gas_sload: u64,
	/// Gas paid by SSTORE when writing a previously-zero slot to non-zero.
	pub gas_sstore_set: u64,
	/// Gas paid by SSTORE for every other slot transition.
	pub gas_sstore_reset: u64,
	/// Refund granted for clearing a slot back to zero.
	pub refund_sstore_clears: u64,
	/// Whether SSTORE uses EIP-1283/EIP-2200 net-gas metering rather than
	/// the flat pre-Constantinople table.
	pub sstore_gas_metering: bool,
	/// Gas charged per word of memory currently allocated (the linear term
	/// of the expansion cost formula).
	pub gas_memory: u64,
	/// Divisor of the quadratic term of the expansion cost formula.
	pub gas_quad_coeff_div: u64,
	/// Gas stipend added to a value-carrying CALL so the callee can afford
	/// a minimal amount of work even after the 1/64 rule.
	pub call_stipend: u64,
	/// Whether `CALL`/`CALLCODE`/`DELEGATECALL` apply the 1/64 rule to the
	/// gas forwarded (`false` only for Frontier, which had no such limit).
	pub call_l64_after_gas: bool,
	/// Whether CREATE/CREATE2 bump the creator's nonce before dispatch.
	pub create_increase_nonce: bool,
	/// Maximum deployed contract code size, or `usize::MAX` if unbounded.
	pub create_contract_limit: usize,
	/// Operand stack depth limit, also used as the call-depth limit.
	pub stack_limit: usize,
	/// Linear memory size limit in bytes.
	pub memory_limit: usize,
}

impl Config {
	pub const fn frontier() -> Config {
		Config {
			gas_extcode: 20,
			gas_balance: 20,
			gas_sload: 50,
			gas_sstore_set: 20000,
			gas_sstore_reset: 5000,
			refund_sstore_clears: 15000,
			sstore_gas_metering: false,
			gas_memory: 3,
			gas_quad_coeff_div: 512,
			call_stipend: 2300,
			call_l64_after_gas: false,
			create_increase_nonce: false,
			create_contract_limit: usize::max_value(),
			stack_limit: 1024,
			memory_limit: usize::max_value(),
		}
	}

	pub const fn tangerine_whistle() -> Config {
		Config {
			call_l64_after_gas: true,
			..Self::frontier()
		}
	}

	pub const fn constantinople() -> Config {
		Config {
			gas_sload: 200,
			sstore_gas_metering: true,
			create_increase_nonce: true,
			create_contract_limit: 24576,
			..Self::tangerine_whistle()
		}
	}

	/// Petersburg reverted Constantinople's SSTORE change (reintroduced as
	/// Istanbul's EIP-2200) but kept every other Constantinople rule.
	pub const fn petersburg() -> Config {
		Config {
			gas_sload: 50,
			sstore_gas_metering: false,
			..Self::constantinople()
		}
	}

	pub const fn istanbul() -> Config {
		Config {
			gas_sload: 800,
			gas_balance: 400,
			gas_extcode: 700,
			sstore_gas_metering: true,
			..Self::petersburg()
		}
	}

	/// The `Config` for a named hardfork.
	pub const fn for_hardfork(hardfork: Hardfork) -> Config {
		match hardfork {
			Hardfork::Frontier => Self::frontier(),
			Hardfork::TangerineWhistle => Self::tangerine_whistle(),
			Hardfork::Constantinople => Self::constantinople(),
			Hardfork::Petersburg => Self::petersburg(),
			Hardfork::Istanbul => Self::istanbul(),
		}
	}
}
