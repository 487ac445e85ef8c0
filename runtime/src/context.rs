//! The addressing scheme a nested frame is built with, and the context it
//! runs under.

use primitive_types::{H160, H256, U256};

/// How a `CREATE`/`CREATE2` target address is derived.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CreateScheme {
	/// `CREATE`: `keccak256(rlp(sender, nonce))[12..]`, computed by the
	/// state manager, not by this crate.
	Legacy { caller: H160 },
	/// `CREATE2`: `keccak256(0xff ++ sender ++ salt ++ keccak256(initCode))[12..]`.
	Create2 { caller: H160, code_hash: H256, salt: H256 },
	/// A pre-determined address, used by embedders that assign contract
	/// addresses outside of the standard schemes (e.g. genesis accounts).
	Fixed(H160),
}

impl CreateScheme {
	pub fn caller(&self) -> Option<H160> {
		match self {
			CreateScheme::Legacy { caller } | CreateScheme::Create2 { caller, .. } => Some(*caller),
			CreateScheme::Fixed(_) => None,
		}
	}
}

/// Which of the four message-call opcodes produced a nested frame.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CallScheme {
	Call,
	CallCode,
	DelegateCall,
	StaticCall,
}

impl CallScheme {
	/// `DELEGATECALL` keeps the caller's address and does not transfer value.
	pub fn is_delegate(&self) -> bool {
		matches!(self, CallScheme::DelegateCall)
	}

	/// `STATICCALL` forbids state mutation in the nested frame, independent
	/// of whether the frame itself also inherited a static ancestor.
	pub fn is_static(&self) -> bool {
		matches!(self, CallScheme::StaticCall)
	}
}

/// The address, caller and value a frame observes via `ADDRESS`, `CALLER`
/// and `CALLVALUE`. Distinct from `FrameState`: a `DELEGATECALL` runs
/// someone else's code but keeps its caller's `Context`.
#[derive(Clone, Debug)]
pub struct Context {
	pub address: H160,
	pub caller: H160,
	pub apparent_value: U256,
}
