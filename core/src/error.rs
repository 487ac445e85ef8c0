//! The trap channel: the single structured abort mechanism through which an
//! EEI operation unwinds a frame. See `TrapChannel` in the design.
//!
//! A frame's dispatcher receives an [`ExitReason`] and converts it to a
//! frame-result record: [`ExitReason::Revert`] preserves `gasLeft`, every
//! other reason sets it to zero. [`ExitFatal`] must never be caught by a
//! single frame — it aborts the whole transaction (see `INTERNAL_ERROR` in
//! the error-handling design).

#[cfg(feature = "with-codec")]
use scale_codec::{Decode, Encode};
#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Why a frame stopped running.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(Encode, Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum ExitReason {
	/// Frame exited normally.
	Succeed(ExitSucceed),
	/// Frame exited via the `REVERT` opcode: remaining gas is preserved and
	/// the returned bytes are propagated to the caller.
	Revert(ExitRevert),
	/// Frame exited with a recoverable error: remaining gas is consumed.
	Error(ExitError),
	/// Frame exited with an error that is not recoverable by a single
	/// frame. Must abort the entire transaction.
	Fatal(ExitFatal),
}

impl ExitReason {
	/// `true` for `Succeed` and `Revert`: the nested frame's side effects on
	/// its own subtree are retained (committed for `Succeed`, but the
	/// attempt itself did not trap).
	pub fn is_succeed(&self) -> bool {
		matches!(self, ExitReason::Succeed(_))
	}

	/// `true` when a frame's remaining gas must be preserved rather than
	/// zeroed: only `Succeed` and `Revert` qualify.
	pub fn preserves_gas(&self) -> bool {
		matches!(self, ExitReason::Succeed(_) | ExitReason::Revert(_))
	}
}

/// Successful frame exit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(Encode, Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum ExitSucceed {
	/// Machine ran to the end of its code without an explicit `RETURN`.
	Stopped,
	/// Machine halted via `RETURN`.
	Returned,
	/// Machine halted via `SELFDESTRUCT`.
	Suicided,
}

impl From<ExitSucceed> for ExitReason {
	fn from(exit: ExitSucceed) -> ExitReason {
		ExitReason::Succeed(exit)
	}
}

/// Explicit `REVERT`. Carries no payload itself — the returned bytes travel
/// alongside the reason, not inside it, so that non-revert exits need not
/// pay for an unused field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(Encode, Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum ExitRevert {
	/// `REVERT`.
	Reverted,
}

impl From<ExitRevert> for ExitReason {
	fn from(exit: ExitRevert) -> ExitReason {
		ExitReason::Revert(exit)
	}
}

/// A recoverable per-frame trap. Consumes the frame's remaining gas.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(Encode, Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum ExitError {
	/// Popped an empty operand stack.
	StackUnderflow,
	/// Pushed past the 1024-deep operand stack limit.
	StackOverflow,
	/// `JUMP`/`JUMPI` target is not a valid `JUMPDEST`.
	InvalidJump,
	/// A memory or calldata range was requested that cannot be satisfied.
	InvalidRange,
	/// Gas would go negative.
	OutOfGas,
	/// A `CALL*` attempted to transfer more value than the caller's balance.
	OutOfFund,
	/// Call depth would reach or exceed the 1024 frame limit.
	CallTooDeep,
	/// `CREATE`/`CREATE2` target address already has code or a non-zero nonce.
	CreateCollision,
	/// Deployed code exceeds the configured contract size limit.
	CreateContractLimit,
	/// A state-mutating operation was attempted inside a static (`STATICCALL`) frame.
	StaticModeViolation,
	/// Opcode decoding failed. The EEI does not decode opcodes itself; this
	/// variant exists only so the dispatcher's decode errors can flow
	/// through the same trap channel as EEI-originated traps.
	InvalidCode(u8),
	/// Catch-all for implementer-specific recoverable errors.
	Other(&'static str),
}

impl From<ExitError> for ExitReason {
	fn from(exit: ExitError) -> ExitReason {
		ExitReason::Error(exit)
	}
}

/// An error that cannot be handled by a single frame's dispatcher: the
/// surrounding state manager or the host is broken, not the running
/// bytecode. Maps to `INTERNAL_ERROR` in the error-handling design and
/// must propagate past every frame boundary to abort the transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-codec", derive(Encode, Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub enum ExitFatal {
	/// The state manager or storage reader returned an error while
	/// servicing a read or write.
	StorageFailure,
	/// A call/create interrupt was dropped without being resolved by the
	/// host. Indicates a bug in the embedding VM, not in the bytecode.
	UnhandledInterrupt,
	/// Catch-all for implementer-specific unrecoverable errors.
	Other(&'static str),
}

impl From<ExitFatal> for ExitReason {
	fn from(exit: ExitFatal) -> ExitReason {
		ExitReason::Fatal(exit)
	}
}
