//! Cross-component scenarios exercised end to end against [`MockVm`], the
//! way the teacher pack's own integration tests run against its hand-written
//! `tests/mock.rs` backend rather than a mocking-framework macro.

mod mock;

use eei::{
	dispatch_call, dispatch_create, require_not_static, Account, CallRequest, CallScheme, Config, Context, CreateRequest,
	ExitError, FrameState, Hardfork, Vm,
};
use mock::MockVm;
use primitive_types::{H160, H256, U256};
use std::rc::Rc;

fn frame(config: Config, gas_limit: u64, depth: usize, is_static: bool) -> FrameState {
	FrameState::new(
		Rc::new(Vec::new()),
		Context { address: H160::repeat_byte(1), caller: H160::repeat_byte(2), apparent_value: U256::zero() },
		H160::repeat_byte(2),
		Account::default(),
		gas_limit,
		U256::zero(),
		depth,
		is_static,
		Rc::new(config),
	)
}

#[test]
fn memory_expansion_single_word_costs_three() {
	let mut f = frame(Config::istanbul(), 1_000_000, 0, false);
	f.expand_memory(U256::zero(), U256::from(32)).unwrap();
	assert_eq!(f.gas.gas_left(), 1_000_000 - 3);
}

#[test]
fn memory_expansion_quadratic_growth_matches_yellow_paper_example() {
	// 1024 words: linear 1024*3 = 3072, quadratic 1024^2/512 = 2048.
	let mut f = frame(Config::istanbul(), 10_000_000, 0, false);
	f.expand_memory(U256::zero(), U256::from(32 * 1024)).unwrap();
	assert_eq!(f.gas.gas_left(), 10_000_000 - 5120);
}

#[test]
fn sstore_noop_constantinople_charges_200_and_leaves_refund_unchanged() {
	let mut vm = MockVm::default();
	let address = H160::repeat_byte(1);
	let index = H256::repeat_byte(9);
	vm.set_original(address, index, H256::from_low_u64_be(1));

	let mut f = frame(Config::constantinople(), 1_000_000, 0, false);
	f.context.address = address;
	f.sstore(&mut vm, index, H256::from_low_u64_be(1)).unwrap();

	assert_eq!(f.gas.gas_left(), 1_000_000 - 200);
	assert_eq!(f.gas.gas_refund(), 0);
}

#[test]
fn sstore_reset_to_original_constantinople_matches_eip1283_table() {
	let mut vm = MockVm::default();
	let address = H160::repeat_byte(1);
	let index = H256::repeat_byte(9);
	vm.set_original(address, index, H256::zero());
	vm.storage.insert((address, index), H256::from_low_u64_be(7));

	let mut f = frame(Config::constantinople(), 1_000_000, 0, false);
	f.context.address = address;
	f.sstore(&mut vm, index, H256::zero()).unwrap();

	assert_eq!(f.gas.gas_left(), 1_000_000 - 200);
	assert_eq!(f.gas.gas_refund(), 19800);
}

#[test]
fn sstore_reset_to_original_istanbul_matches_eip2200_table() {
	let mut vm = MockVm::default();
	let address = H160::repeat_byte(1);
	let index = H256::repeat_byte(9);
	vm.set_original(address, index, H256::zero());
	vm.storage.insert((address, index), H256::from_low_u64_be(7));

	let mut f = frame(Config::istanbul(), 1_000_000, 0, false);
	f.context.address = address;
	f.sstore(&mut vm, index, H256::zero()).unwrap();

	assert_eq!(f.gas.gas_left(), 1_000_000 - 800);
	assert_eq!(f.gas.gas_refund(), 19200);
}

#[test]
fn sstore_traps_before_charging_in_a_static_frame() {
	let mut vm = MockVm::default();
	let address = H160::repeat_byte(1);
	let index = H256::repeat_byte(9);
	vm.set_original(address, index, H256::zero());

	let mut f = frame(Config::istanbul(), 1_000_000, 0, true);
	f.context.address = address;
	let result = f.sstore(&mut vm, index, H256::from_low_u64_be(1));

	assert_eq!(result, Err(ExitError::StaticModeViolation));
	assert_eq!(f.gas.gas_left(), 1_000_000);
	assert_eq!(vm.storage(address, index), H256::zero());
}

#[test]
fn call_forwards_at_most_the_1_64_allowance() {
	let mut vm = MockVm::default();
	let mut f = frame(Config::istanbul(), 6400, 0, false);

	let request = CallRequest {
		scheme: CallScheme::Call,
		code_address: H160::repeat_byte(5),
		input: Vec::new(),
		value: U256::zero(),
		gas_limit: Some(u64::max_value()),
		out_offset: U256::zero(),
		out_length: U256::zero(),
	};
	dispatch_call(&mut f, &mut vm, request).unwrap();

	// Nothing was actually used (scripted STOP), so the only change to
	// gasLeft is the memory-expansion charge for the (empty) output window,
	// which is zero; the forwarded amount itself was never deducted up
	// front, only accounted for via `gas_used` on return.
	assert_eq!(vm.call_count.get(), 1);
}

#[test]
fn call_beyond_depth_limit_never_reaches_the_host() {
	let mut vm = MockVm::default();
	let config = Config { stack_limit: 2, ..Config::istanbul() };
	let mut f = frame(config, 1_000_000, 2, false);

	let request = CallRequest {
		scheme: CallScheme::Call,
		code_address: H160::repeat_byte(5),
		input: Vec::new(),
		value: U256::zero(),
		gas_limit: None,
		out_offset: U256::zero(),
		out_length: U256::zero(),
	};
	let pushed = dispatch_call(&mut f, &mut vm, request).unwrap();

	assert_eq!(pushed, U256::zero());
	assert_eq!(vm.call_count.get(), 0);
}

#[test]
fn create_reverting_nested_frame_rolls_back_the_nonce_bump() {
	let mut vm = MockVm::default();
	let caller = H160::repeat_byte(2);
	vm.set_balance(caller, U256::from(1_000_000));
	vm.accounts.entry(caller).or_default().nonce = U256::from(5);
	vm.scripted_result = Some(eei::CallResult {
		reason: eei::ExitReason::Revert(eei::ExitRevert::Reverted),
		gas_used: 100,
		gas_refund: 0,
		return_data: vec![0xde, 0xad],
		logs: Vec::new(),
		created_address: None,
	});

	let mut f = frame(Config::istanbul(), 1_000_000, 0, false);
	f.context.address = caller;

	let request = CreateRequest { value: U256::zero(), init_code: vec![0x60, 0x00], gas_limit: None, salt: None };
	let pushed = dispatch_create(&mut f, &mut vm, request).unwrap();

	assert_eq!(pushed, U256::zero());
	assert_eq!(vm.account(caller).nonce, U256::from(5));
	assert_eq!(f.last_returned, vec![0xde, 0xad]);
}

#[test]
fn require_not_static_is_a_pure_gate() {
	assert_eq!(require_not_static(false), Ok(()));
	assert_eq!(require_not_static(true), Err(ExitError::StaticModeViolation));
}

#[test]
fn hardfork_config_lookup_matches_named_constructors() {
	assert_eq!(Config::for_hardfork(Hardfork::Istanbul), Config::istanbul());
	assert_eq!(Config::for_hardfork(Hardfork::Constantinople), Config::constantinople());
}
