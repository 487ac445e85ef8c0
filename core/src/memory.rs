//! The raw byte buffer backing a frame's linear memory.
//!
//! This type knows nothing about gas: it only ever grows, it zero-fills on
//! growth, and it always rounds its size up to a whole number of 32-byte
//! words, matching the EVM's addressing model. Charging for that growth is
//! a separate concern, computed from the same word count by the gas meter
//! before `resize_words` is called.

use crate::ExitError;
use alloc::vec::Vec;
use primitive_types::U256;

/// One EVM machine word, in bytes.
pub const WORD_SIZE: usize = 32;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
	data: Vec<u8>,
	limit: usize,
}

impl Memory {
	/// An empty buffer that refuses to grow past `limit` bytes.
	pub fn new(limit: usize) -> Self {
		Self { data: Vec::new(), limit }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	#[inline]
	pub fn limit(&self) -> usize {
		self.limit
	}

	#[inline]
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Number of whole 32-byte words currently allocated.
	pub fn word_count(&self) -> usize {
		self.data.len() / WORD_SIZE
	}

	/// Grow the buffer, if necessary, so it covers at least `word_count`
	/// whole words, zero-filling the new tail. Shrinking is never
	/// performed: memory only ever expands within a frame.
	pub fn resize_words(&mut self, word_count: usize) -> Result<(), ExitError> {
		let new_len = word_count
			.checked_mul(WORD_SIZE)
			.ok_or(ExitError::InvalidRange)?;
		if new_len > self.limit {
			return Err(ExitError::InvalidRange);
		}
		if new_len > self.data.len() {
			self.data.resize(new_len, 0);
		}
		Ok(())
	}

	/// Smallest word count that covers `[offset, offset + length)`.
	pub fn required_word_count(offset: U256, length: U256) -> Result<usize, ExitError> {
		if length.is_zero() {
			return Ok(0);
		}
		let end = crate::bigint::end_offset(offset, length)?;
		Ok((end + WORD_SIZE - 1) / WORD_SIZE)
	}

	/// Read `size` bytes starting at `offset`, zero-padding any tail that
	/// falls past the end of the allocated buffer. Never grows the buffer;
	/// callers must have already paid for and performed the expansion.
	pub fn get(&self, offset: usize, size: usize) -> Vec<u8> {
		let mut out = Vec::with_capacity(size);
		for i in offset..offset + size {
			out.push(self.data.get(i).copied().unwrap_or(0));
		}
		out
	}

	/// Overwrite `[offset, offset + value.len())` with `value`. The caller
	/// is responsible for having grown the buffer to fit first.
	pub fn set(&mut self, offset: usize, value: &[u8]) -> Result<(), ExitError> {
		if offset.checked_add(value.len()).map(|end| end > self.data.len()).unwrap_or(true) {
			return Err(ExitError::InvalidRange);
		}
		self.data[offset..offset + value.len()].copy_from_slice(value);
		Ok(())
	}

	/// Copy up to `length` bytes from `source[source_offset..]` into
	/// `self[offset..]`. If `source` is empty the destination window is
	/// left untouched entirely -- whatever is already there (ordinarily
	/// zeros freshly introduced by expansion) survives. Otherwise any
	/// portion of the window not covered by the copy, including all of it
	/// when `source_offset` is past the end of `source`, is zero-filled.
	/// The caller must have already grown the destination to fit.
	pub fn store(
		&mut self,
		offset: usize,
		source: &[u8],
		source_offset: usize,
		length: usize,
	) -> Result<(), ExitError> {
		if source.is_empty() {
			return Ok(());
		}
		let copy_len = source.len().saturating_sub(source_offset).min(length);
		let mut buffer = Vec::with_capacity(length);
		buffer.extend_from_slice(&source[source_offset..source_offset + copy_len]);
		buffer.resize(length, 0);
		self.set(offset, &buffer)
	}
}
