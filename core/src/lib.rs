//! Shared primitives for the Execution Environment Interface: the operand
//! stack, the linear memory buffer, the jump destination table, EVM-flavored
//! big-integer arithmetic, and the trap channel every other EEI crate
//! propagates errors through.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bigint;
mod error;
mod memory;
mod stack;
mod valids;

pub use crate::bigint::{ceil_div, checked_add, checked_mul, end_offset, floor_div, floor_mod, to_usize_or_trap};
pub use crate::error::{ExitError, ExitFatal, ExitRevert, ExitReason, ExitSucceed};
pub use crate::memory::{Memory, WORD_SIZE};
pub use crate::stack::Stack;
pub use crate::valids::JumpTable;
