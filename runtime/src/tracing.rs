//! Feature-gated structural event hook.
//!
//! Modeled on the same ambient, thread-local-like pattern
//! (`environmental::environmental!`) the rest of the gas-metering pack
//! uses: an embedding host registers a listener for the duration of a
//! call, and every crate in the workspace can emit into it without taking
//! a hard dependency on any particular tracing or metrics framework.

use eei_core::ExitReason;
use primitive_types::{H160, H256};

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Clone)]
pub enum Event {
	/// A nested call or create was dispatched.
	Call { code_address: H160, gas_limit: u64 },
	/// A nested call or create returned.
	CallResult { reason: ExitReason, gas_used: u64 },
	/// `SLOAD`.
	SLoad { address: H160, index: H256, value: H256 },
	/// `SSTORE`.
	SStore { address: H160, index: H256, value: H256 },
}

/// Emit `event` to whatever listener is currently registered via [`using`],
/// if any. A no-op when nothing is listening.
pub fn emit(event: Event) {
	listener::with(|l| l.event(event.clone()));
}

/// Run `f` with `new` registered as the active listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
