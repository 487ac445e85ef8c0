//! Construction, gating, dispatch and result integration of sub-calls.
//!
//! Nested frames are driven by plain synchronous recursion: each function
//! here makes one direct call into `vm.run_call`/`vm.run_create` and
//! integrates the result before returning. There is no interrupt type to
//! resolve later and no continuation threaded through the host -- a
//! single-threaded, non-suspending frame has no use for one. The parent's
//! `FrameState` is never borrowed across the nested call (`vm.run_call`
//! takes ownership of everything it needs up front), which is what keeps
//! this recursive shape borrow-check cleanly instead of needing the
//! source's callback/interrupt machinery.

use alloc::vec::Vec;
use core::cmp::min;
use eei_core::ExitReason;
use eei_runtime::{Account, CallOptions, CallResult, CallScheme, Context, CreateOptions, CreateScheme, Vm};
use primitive_types::{H160, H256, U256};
use sha3::{Digest, Keccak256};

use crate::frame::FrameState;

/// A message call as requested by `CALL`/`CALLCODE`/`DELEGATECALL`/`STATICCALL`.
pub struct CallRequest {
	pub scheme: CallScheme,
	pub code_address: H160,
	pub input: Vec<u8>,
	pub value: U256,
	pub gas_limit: Option<u64>,
	pub out_offset: U256,
	pub out_length: U256,
}

/// A contract creation as requested by `CREATE`/`CREATE2`.
pub struct CreateRequest {
	pub value: U256,
	pub init_code: Vec<u8>,
	pub gas_limit: Option<u64>,
	pub salt: Option<H256>,
}

/// `keccak256(0xff ++ sender ++ salt ++ keccak256(initCode))[12..]`.
pub fn create2_address(sender: H160, salt: H256, init_code: &[u8]) -> H160 {
	let init_code_hash = Keccak256::digest(init_code);
	let mut hasher = Keccak256::new();
	hasher.update([0xff]);
	hasher.update(sender.as_bytes());
	hasher.update(salt.as_bytes());
	hasher.update(init_code_hash);
	H160::from_slice(&hasher.finalize()[12..])
}

/// Pushes onto `frame.stack` are the caller's responsibility: these
/// functions return the value that belongs on top of the stack afterward
/// (`0`/`1` for calls, `0`/address for creates), not push it themselves,
/// since stack management belongs to the external opcode dispatcher.
pub fn dispatch_call(frame: &mut FrameState, vm: &mut dyn Vm, request: CallRequest) -> Result<U256, ExitReason> {
	frame.expand_memory(request.out_offset, request.out_length)?;
	frame.last_returned = Vec::new();

	let allowance = frame.gas.allowance();
	let requested = request.gas_limit.unwrap_or_else(|| frame.gas.gas_left());
	let mut gas_limit = min(requested, allowance);
	let carries_value = !request.value.is_zero();
	if !request.scheme.is_delegate() && carries_value {
		gas_limit = gas_limit.saturating_add(frame.config.call_stipend);
	}

	if frame.depth + 1 >= frame.config.stack_limit {
		log::debug!(target: "eei", "call to {:?} rejected: depth {} at limit {}", request.code_address, frame.depth, frame.config.stack_limit);
		return Ok(U256::zero());
	}

	let caller = frame.context.address;
	if !request.scheme.is_delegate() && carries_value && vm.account(caller).balance < request.value {
		log::debug!(target: "eei", "call to {:?} rejected: caller {:?} balance below {:?}", request.code_address, caller, request.value);
		return Ok(U256::zero());
	}

	log::trace!(target: "eei", "dispatching {:?} to {:?} with gas_limit {}", request.scheme, request.code_address, gas_limit);

	#[cfg(feature = "tracing")]
	eei_runtime::tracing::emit(eei_runtime::tracing::Event::Call { code_address: request.code_address, gas_limit });

	let snapshot = frame.snapshot_selfdestruct();

	let (call_context, value_transfer) = if request.scheme.is_delegate() {
		(frame.context.clone(), None)
	} else {
		let context = Context { address: request.code_address, caller, apparent_value: request.value };
		let transfer = carries_value.then(|| (caller, request.code_address, request.value));
		(context, transfer)
	};

	let options = CallOptions {
		scheme: request.scheme,
		context: call_context,
		code_address: request.code_address,
		input: request.input,
		gas_limit,
		is_static: frame.is_static || request.scheme.is_static(),
		value_transfer,
	};

	let result = vm.run_call(options);
	integrate_call_result(frame, result, request.out_offset, request.out_length, snapshot)
}

pub fn dispatch_create(frame: &mut FrameState, vm: &mut dyn Vm, request: CreateRequest) -> Result<U256, ExitReason> {
	frame.last_returned = Vec::new();

	let allowance = frame.gas.allowance();
	let requested = request.gas_limit.unwrap_or_else(|| frame.gas.gas_left());
	let gas_limit = min(requested, allowance);

	if frame.depth + 1 >= frame.config.stack_limit {
		log::debug!(target: "eei", "create rejected: depth {} at limit {}", frame.depth, frame.config.stack_limit);
		return Ok(U256::zero());
	}

	let caller = frame.context.address;
	if vm.account(caller).balance < request.value {
		log::debug!(target: "eei", "create rejected: caller {:?} balance below {:?}", caller, request.value);
		return Ok(U256::zero());
	}

	let caller_account = vm.account(caller);

	// Legacy CREATE addressing (keccak256(rlp(sender, nonce))) is owned by
	// the state manager, which already tracks the nonce and the RLP codec
	// this crate does not depend on; `CreateOptions::address` is zero and
	// the host fills in the real address in `CallResult::created_address`.
	// CREATE2 addressing is pure function of inputs already in hand, so it
	// is computed here and passed through.
	let (scheme, address) = match request.salt {
		Some(salt) => {
			let code_hash = H256::from_slice(&Keccak256::digest(&request.init_code));
			let address = create2_address(caller, salt, &request.init_code);
			(CreateScheme::Create2 { caller, code_hash, salt }, address)
		}
		None => (CreateScheme::Legacy { caller }, H160::zero()),
	};

	if request.salt.is_some() && (vm.exists(address) || !vm.code(address).is_empty()) {
		return Ok(U256::zero());
	}

	run_create_at(frame, vm, request, caller, caller_account, scheme, address)
}

fn run_create_at(
	frame: &mut FrameState,
	vm: &mut dyn Vm,
	request: CreateRequest,
	caller: H160,
	caller_account: Account,
	scheme: CreateScheme,
	address: H160,
) -> Result<U256, ExitReason> {
	if frame.config.create_increase_nonce {
		let mut with_nonce = caller_account.clone();
		with_nonce.nonce = with_nonce.nonce.saturating_add(U256::one());
		vm.set_account(caller, with_nonce);
	}

	let snapshot = frame.snapshot_selfdestruct();

	let options = CreateOptions {
		scheme,
		caller,
		address,
		value: request.value,
		init_code: request.init_code,
		gas_limit: min(frame.gas.gas_left(), frame.gas.allowance()),
	};

	let result = vm.run_create(options);
	integrate_create_result(frame, vm, result, caller, caller_account, snapshot)
}

fn integrate_call_result(
	frame: &mut FrameState,
	result: CallResult,
	out_offset: U256,
	out_length: U256,
	snapshot: alloc::collections::BTreeSet<H160>,
) -> Result<U256, ExitReason> {
	frame.gas.charge(result.gas_used).ok();

	#[cfg(feature = "tracing")]
	eei_runtime::tracing::emit(eei_runtime::tracing::Event::CallResult {
		reason: result.reason.clone(),
		gas_used: result.gas_used,
	});

	let out_offset_usize = eei_core::to_usize_or_trap(out_offset)?;
	let out_length_usize = eei_core::to_usize_or_trap(out_length)?;

	match &result.reason {
		ExitReason::Succeed(_) => {
			frame.last_returned = result.return_data.clone();
			frame.absorb_success(result.logs, result.gas_refund, 0);
			frame
				.memory
				.store(out_offset_usize, &result.return_data, 0, out_length_usize)?;
			Ok(U256::one())
		}
		ExitReason::Revert(_) => {
			frame.last_returned = result.return_data.clone();
			frame
				.memory
				.store(out_offset_usize, &result.return_data, 0, out_length_usize)?;
			frame.restore_selfdestruct(snapshot);
			Ok(U256::zero())
		}
		ExitReason::Error(_) => {
			frame.restore_selfdestruct(snapshot);
			Ok(U256::zero())
		}
		ExitReason::Fatal(fatal) => Err(fatal.clone().into()),
	}
}

fn integrate_create_result(
	frame: &mut FrameState,
	vm: &mut dyn Vm,
	result: CallResult,
	caller: H160,
	caller_account: Account,
	snapshot: alloc::collections::BTreeSet<H160>,
) -> Result<U256, ExitReason> {
	frame.gas.charge(result.gas_used).ok();

	#[cfg(feature = "tracing")]
	eei_runtime::tracing::emit(eei_runtime::tracing::Event::CallResult {
		reason: result.reason.clone(),
		gas_used: result.gas_used,
	});

	match &result.reason {
		ExitReason::Succeed(_) => {
			frame.absorb_success(result.logs, result.gas_refund, 0);
			// An address occupies the low 20 bytes of the 256-bit word it
			// is pushed as, matching how `ADDRESS`/`CALLER` are read back.
			let created = result
				.created_address
				.map(|address| U256::from_big_endian(address.as_bytes()))
				.unwrap_or_default();
			Ok(created)
		}
		ExitReason::Revert(_) => {
			frame.last_returned = result.return_data.clone();
			frame.restore_selfdestruct(snapshot);
			vm.set_account(caller, caller_account);
			Ok(U256::zero())
		}
		ExitReason::Error(_) => {
			frame.restore_selfdestruct(snapshot);
			vm.set_account(caller, caller_account);
			Ok(U256::zero())
		}
		ExitReason::Fatal(fatal) => Err(fatal.clone().into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn create2_address_matches_known_vector() {
		// EIP-1014 example 1.
		let sender = H160::from_slice(&hex::decode("0000000000000000000000000000000000000000").unwrap());
		let salt = H256::zero();
		let init_code: &[u8] = &[];
		let address = create2_address(sender, salt, init_code);
		assert_eq!(
			address,
			H160::from_slice(&hex::decode("e33c0c7f7df4809055c3eba6c09cfe4baf1bd9e0").unwrap())
		);
	}
}
