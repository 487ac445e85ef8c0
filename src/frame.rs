//! The mutable record owned by one executing frame.
//!
//! `FrameState` is built, driven and dropped entirely within one call to
//! [`crate::orchestrator::dispatch_call`] or
//! [`crate::orchestrator::dispatch_create`]. No reference into it survives
//! past that call, so nested dispatch borrow-checks cleanly as plain
//! synchronous recursion: the parent never holds a live borrow of the
//! child's (or its own) `FrameState` across the nested call.
//!
//! The host (`dyn Vm`) and the hardfork `Config` are passed alongside
//! `FrameState` rather than stored inside it, since both are shared across
//! every frame of a transaction and neither needs frame-local mutation.

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::vec::Vec;
use eei_core::{ExitError, JumpTable, Memory, Stack};
use eei_gasometer::GasMeter;
use eei_runtime::{Account, Config, Context, Log, Vm};
use primitive_types::{H160, H256, U256};

/// `requireNotStatic()`: the small number of EEI operations that are
/// themselves state-mutating (SSTORE, LOG, mark-for-deletion) call this
/// directly rather than trusting every external caller to have checked
/// the frame's `is_static` flag first.
pub fn require_not_static(is_static: bool) -> Result<(), ExitError> {
	if is_static {
		Err(ExitError::StaticModeViolation)
	} else {
		Ok(())
	}
}

pub struct FrameState {
	pub code: Rc<Vec<u8>>,
	pub context: Context,
	pub origin: H160,
	pub valid_jumps: JumpTable,
	pub memory: Memory,
	pub stack: Stack,
	pub gas: GasMeter,
	pub logs: Vec<Log>,
	pub last_returned: Vec<u8>,
	pub depth: usize,
	pub selfdestruct: BTreeSet<H160>,
	pub contract: Account,
	pub is_static: bool,
	pub gas_price: U256,
	pub config: Rc<Config>,
}

impl FrameState {
	pub fn new(
		code: Rc<Vec<u8>>,
		context: Context,
		origin: H160,
		contract: Account,
		gas_limit: u64,
		gas_price: U256,
		depth: usize,
		is_static: bool,
		config: Rc<Config>,
	) -> Self {
		let valid_jumps = JumpTable::new(&code);
		FrameState {
			code,
			context,
			origin,
			valid_jumps,
			memory: Memory::new(config.memory_limit),
			stack: Stack::new(config.stack_limit),
			gas: GasMeter::new(gas_limit),
			logs: Vec::new(),
			last_returned: Vec::new(),
			depth,
			selfdestruct: BTreeSet::new(),
			contract,
			is_static,
			gas_price,
			config,
		}
	}

	/// Charge for and perform memory expansion to cover `(offset, length)`
	/// in one step: the gas meter and the buffer must always move
	/// together, since `highestMemCost` and `memoryWordCount` are two
	/// views of the same growth decision.
	pub fn expand_memory(&mut self, offset: U256, length: U256) -> Result<(), ExitError> {
		self.gas.record_memory_expansion(offset, length, &self.config)?;
		let words = Memory::required_word_count(offset, length)?;
		self.memory.resize_words(words)
	}

	/// Merge a successful nested frame's logs, refund and leftover gas
	/// into this one. Called only on a non-reverting, non-erroring nested
	/// exit; a failed nested call contributes nothing but the gas it
	/// consumed (already subtracted separately by the orchestrator).
	pub fn absorb_success(&mut self, logs: Vec<Log>, gas_refund: u64, leftover_gas: u64) {
		self.logs.extend(logs);
		self.gas.record_refund(gas_refund);
		self.gas.record_stipend(leftover_gas);
	}

	/// Snapshot the selfdestruct set before dispatching a nested call.
	/// Entries are only ever added, never removed, so a shallow copy
	/// suffices and rollback is plain assignment of the snapshot back.
	pub fn snapshot_selfdestruct(&self) -> BTreeSet<H160> {
		self.selfdestruct.clone()
	}

	pub fn restore_selfdestruct(&mut self, snapshot: BTreeSet<H160>) {
		self.selfdestruct = snapshot;
	}

	/// `SLOAD`: read `index`'s current value through the host.
	pub fn sload(&self, vm: &dyn Vm, index: H256) -> H256 {
		let value = vm.storage(self.context.address, index);

		#[cfg(feature = "tracing")]
		eei_runtime::tracing::emit(eei_runtime::tracing::Event::SLoad {
			address: self.context.address,
			index,
			value,
		});

		value
	}

	/// `SSTORE`: charge the StorageGate outcome for writing `new` to
	/// `index`, then, if gas was available, perform the write. Traps
	/// `STATIC_STATE_CHANGE` before any gas is charged or storage touched.
	pub fn sstore(&mut self, vm: &mut dyn Vm, index: H256, new: H256) -> Result<(), ExitError> {
		require_not_static(self.is_static)?;

		let address = self.context.address;
		let original = vm.original_storage(address, index);
		let current = vm.storage(address, index);

		log::trace!(target: "eei", "sstore {:?}[{:?}] {:?} -> {:?} (original {:?})", address, index, current, new, original);

		self.gas.record_sstore(original, current, new, &self.config)?;
		vm.set_storage(address, index, new);

		#[cfg(feature = "tracing")]
		eei_runtime::tracing::emit(eei_runtime::tracing::Event::SStore { address, index, value: new });

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn require_not_static_traps_only_when_static() {
		assert_eq!(require_not_static(false), Ok(()));
		assert_eq!(require_not_static(true), Err(ExitError::StaticModeViolation));
	}

	#[test]
	fn selfdestruct_snapshot_round_trips() {
		let code = Rc::new(Vec::new());
		let context = Context { address: H160::zero(), caller: H160::zero(), apparent_value: U256::zero() };
		let mut frame = FrameState::new(
			code,
			context,
			H160::zero(),
			Account::default(),
			1_000_000,
			U256::zero(),
			0,
			false,
			Rc::new(Config::istanbul()),
		);
		frame.selfdestruct.insert(H160::repeat_byte(1));
		let snapshot = frame.snapshot_selfdestruct();
		frame.selfdestruct.insert(H160::repeat_byte(2));
		frame.restore_selfdestruct(snapshot);
		assert_eq!(frame.selfdestruct.len(), 1);
	}
}
