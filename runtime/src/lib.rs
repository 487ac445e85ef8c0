//! Hardfork configuration, call context and host interface: the pieces of
//! the Execution Environment Interface that describe *what a frame runs
//! against* rather than what it does while running.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod context;
#[cfg(feature = "tracing")]
pub mod tracing;
mod vm;

pub use eei_core::*;

pub use crate::config::{Config, Hardfork};
pub use crate::context::{CallScheme, Context, CreateScheme};
pub use crate::vm::{Account, CallOptions, CallResult, CreateOptions, Log, Vm};
