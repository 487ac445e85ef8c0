//! A small hand-written mock host, in the shape of the teacher's own
//! `tests/mock.rs` backend: a `BTreeMap`-backed account/storage store with
//! no trie, no snapshotting beyond what a test needs, and scriptable
//! nested-call results so the orchestrator's gating and integration logic
//! can be exercised without a real interpreter underneath it.

use std::cell::Cell;
use std::collections::BTreeMap;

use eei::{Account, CallOptions, CallResult, CreateOptions, Log, Vm};
use primitive_types::{H160, H256, U256};

#[derive(Default)]
pub struct MockVm {
	pub accounts: BTreeMap<H160, Account>,
    pub code: BTreeMap<H160, Vec<u8>>,
	pub storage: BTreeMap<(H160, H256), H256>,
	pub original: BTreeMap<(H160, H256), H256>,
	pub deleted: Vec<(H160, H160)>,
	pub logs: Vec<Log>,
	/// What the next `run_call`/`run_create` should report back, regardless
	/// of what was actually requested. `None` behaves like a plain STOP.
	pub scripted_result: Option<CallResult>,
	pub call_count: Cell<u32>,
}

impl MockVm {
	pub fn set_balance(&mut self, address: H160, balance: U256) {
		self.accounts.entry(address).or_default().balance = balance;
	}

	pub fn set_original(&mut self, address: H160, index: H256, value: H256) {
		self.original.insert((address, index), value);
		self.storage.insert((address, index), value);
	}
}

fn stopped() -> CallResult {
	CallResult {
		reason: eei::ExitReason::Succeed(eei::ExitSucceed::Stopped),
		gas_used: 0,
		gas_refund: 0,
		return_data: Vec::new(),
		logs: Vec::new(),
		created_address: None,
	}
}

impl Vm for MockVm {
	fn account(&self, address: H160) -> Account {
		self.accounts.get(&address).cloned().unwrap_or_default()
	}

	fn set_account(&mut self, address: H160, account: Account) {
		self.accounts.insert(address, account);
	}

	fn storage(&self, address: H160, index: H256) -> H256 {
		self.storage.get(&(address, index)).copied().unwrap_or_default()
	}

	fn original_storage(&self, address: H160, index: H256) -> H256 {
		self.original.get(&(address, index)).copied().unwrap_or_default()
	}

	fn set_storage(&mut self, address: H160, index: H256, value: H256) {
		self.storage.insert((address, index), value);
	}

	fn exists(&self, address: H160) -> bool {
		self.accounts.contains_key(&address)
	}

	fn code(&self, address: H160) -> Vec<u8> {
		self.code.get(&address).cloned().unwrap_or_default()
	}

	fn code_hash(&self, address: H160) -> H256 {
		self.accounts.get(&address).map(|a| a.code_hash).unwrap_or_default()
	}

	fn log(&mut self, log: Log) {
		self.logs.push(log);
	}

	fn mark_delete(&mut self, address: H160, target: H160) {
		self.deleted.push((address, target));
	}

	fn checkpoint(&mut self) {}
	fn commit(&mut self) {}
	fn revert(&mut self) {}

	fn run_call(&mut self, _options: CallOptions) -> CallResult {
		self.call_count.set(self.call_count.get() + 1);
		self.scripted_result.clone().unwrap_or_else(stopped)
	}

	fn run_create(&mut self, _options: CreateOptions) -> CallResult {
		self.call_count.set(self.call_count.get() + 1);
		self.scripted_result.clone().unwrap_or_else(stopped)
	}
}
