//! The host surface a running frame calls back into.
//!
//! This is deliberately narrower than a full interpreter's handler trait:
//! the EEI does not decode opcodes, read block or chain metadata, or know
//! about EIP-2929 access lists, EIP-4844 blobs or EIP-1153 transient
//! storage — those are the surrounding VM's concern. What remains is
//! exactly the state manager and storage reader capabilities named in the
//! external interfaces, plus one re-entry point for nested calls.
//!
//! Nested calls are synchronous: `run_call`/`run_create` return a
//! [`CallResult`] directly rather than handing back an interrupt the
//! caller must later resolve. A single-threaded, non-suspending frame
//! has no use for a continuation it would only immediately resume.

use alloc::vec::Vec;
use eei_core::ExitReason;
use primitive_types::{H160, H256, U256};

use crate::context::{CallScheme, Context, CreateScheme};

/// The subset of account state the EEI reads and writes directly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
	pub balance: U256,
	pub nonce: U256,
	pub code_hash: H256,
}

/// Gas, value and addressing for a nested `CALL`/`CALLCODE`/`DELEGATECALL`/`STATICCALL`.
#[derive(Clone, Debug)]
pub struct CallOptions {
	pub scheme: CallScheme,
	pub context: Context,
	pub code_address: H160,
	pub input: Vec<u8>,
	pub gas_limit: u64,
	pub is_static: bool,
	pub value_transfer: Option<(H160, H160, U256)>,
}

/// Gas, value and addressing for a nested `CREATE`/`CREATE2`.
#[derive(Clone, Debug)]
pub struct CreateOptions {
	pub scheme: CreateScheme,
	pub caller: H160,
	pub address: H160,
	pub value: U256,
	pub init_code: Vec<u8>,
	pub gas_limit: u64,
}

/// What a nested frame reports back to its orchestrator once it has run to
/// completion.
#[derive(Clone, Debug)]
pub struct CallResult {
	pub reason: ExitReason,
	pub gas_used: u64,
	pub gas_refund: u64,
	pub return_data: Vec<u8>,
	pub logs: Vec<Log>,
	/// Set for `CREATE`/`CREATE2` on success.
	pub created_address: Option<H160>,
}

#[derive(Clone, Debug)]
pub struct Log {
	pub address: H160,
	pub topics: Vec<H256>,
	pub data: Vec<u8>,
}

/// State manager, storage reader and call re-entry point, as seen from
/// inside one executing frame.
#[auto_impl::auto_impl(&mut, Box)]
pub trait Vm {
	/// `getAccount`.
	fn account(&self, address: H160) -> Account;
	/// `putAccount`.
	fn set_account(&mut self, address: H160, account: Account);

	/// `getContractStorage`: the slot's `current` value.
	fn storage(&self, address: H160, index: H256) -> H256;
	/// The slot's `original` value, i.e. its value at the start of the
	/// transaction. Guaranteed equal to `storage` on first access within
	/// the transaction.
	fn original_storage(&self, address: H160, index: H256) -> H256;
	/// `putContractStorage`.
	fn set_storage(&mut self, address: H160, index: H256, value: H256);

	/// Whether an address currently has any code, non-zero balance or
	/// non-zero nonce (used for CREATE collision checks and "empty
	/// account" rules).
	fn exists(&self, address: H160) -> bool;
	fn code(&self, address: H160) -> Vec<u8>;
	fn code_hash(&self, address: H160) -> H256;

	/// Append a log record to the transaction's log list.
	fn log(&mut self, log: Log);
	/// Mark `address` for deletion at the end of the transaction, with its
	/// balance transferred to `target`.
	fn mark_delete(&mut self, address: H160, target: H160);

	/// Open a checkpoint; every state mutation after this call is
	/// rolled back by a matching `revert`, or made permanent by `commit`.
	fn checkpoint(&mut self);
	/// Discard the most recent checkpoint, keeping its mutations.
	fn commit(&mut self);
	/// Roll back every mutation since the most recent checkpoint.
	fn revert(&mut self);

	/// Drive a nested message call to completion.
	fn run_call(&mut self, options: CallOptions) -> CallResult;
	/// Drive a nested contract creation to completion.
	fn run_create(&mut self, options: CreateOptions) -> CallResult;
}
