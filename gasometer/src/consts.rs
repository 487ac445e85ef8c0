//! Gas constants that are not themselves hardfork-configurable. Everything
//! that does vary by hardfork (SSTORE base costs, memory coefficients,
//! call stipend) lives on [`eei_runtime::Config`] instead.

/// EIP-150: a nested call may forward at most `gasLeft - gasLeft/64`.
pub const CALL_FORWARD_DIVISOR: u64 = 64;
