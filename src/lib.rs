//! Execution Environment Interface core for an Ethereum Virtual Machine:
//! gas accounting, memory expansion costing, the SSTORE gas/refund state
//! machine, and CALL/CREATE orchestration.
//!
//! This crate combines three narrower ones the way `rust-evm`'s own
//! top-level executor combines `evm-core`, `evm-gasometer` and
//! `evm-runtime`: [`eei_core`] has no notion of gas, [`eei_runtime`] names
//! the host surface (the [`Vm`] trait) and hardfork [`Config`] but does not
//! charge for anything, and [`eei_gasometer`] charges for memory and
//! storage but does not know how to build or tear down a frame. [`FrameState`]
//! and the orchestration functions in [`orchestrator`] are where the three
//! meet: the pieces that only make sense once gas, memory and the host are
//! all in scope together.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod frame;
mod orchestrator;

pub use eei_core::*;
pub use eei_gasometer::{memory as memory_gas, sstore_outcome, StorageOutcome};
pub use eei_runtime::{Account, CallOptions, CallResult, CallScheme, Config, Context, CreateOptions, CreateScheme, Hardfork, Log, Vm};

pub use crate::frame::{require_not_static, FrameState};
pub use crate::orchestrator::{create2_address, dispatch_call, dispatch_create, CallRequest, CreateRequest};

/// Structural event hooks a host can register to observe gas charges,
/// memory growth, storage writes and nested-call dispatch without this
/// crate depending on any particular metrics or logging backend.
#[cfg(feature = "tracing")]
pub mod tracing {
	/// Gas-level events: cost charged, refund adjusted, memory expanded,
	/// an SSTORE branch's cost/refund outcome.
	pub mod gas {
		pub use eei_gasometer::tracing::*;
	}
	/// Frame-level events: nested call dispatch and completion, storage
	/// reads and writes by value.
	pub use eei_runtime::tracing::*;
}
