//! Address resolution
//!
//! Addresses are plain signed integers. They are never rejected: every
//! address is folded into `[0, len)` by floored modulo, so the memory behaves
//! as a ring in both directions.

/// Logical machine address (may be negative or far out of range)
pub type Address = i64;

/// A displaced address. Any `Address` plus any `i64` fits, so slot offsets
/// and displacements never wrap before the address is folded.
pub type WideAddress = i128;

/// Fold `address` into a buffer index in `[0, len)`.
///
/// The result is the non-negative residue of `address` modulo `len`, i.e. the
/// same index obtained by repeatedly adding `len` while the address is
/// negative and subtracting it while the address is `>= len`.
///
/// `len` must be non-zero. `Memory` guarantees this for every buffer the
/// executor sees.
#[inline]
pub fn resolve(len: usize, address: Address) -> usize {
    resolve_wide(len, address as WideAddress)
}

/// [`resolve`] for a displaced address
#[inline]
pub fn resolve_wide(len: usize, address: WideAddress) -> usize {
    debug_assert!(len > 0, "resolve on an empty buffer");
    address.rem_euclid(len as WideAddress) as usize
}

/// Displace `base` by `delta` in the logical address space. Exact for every input.
#[inline]
pub const fn offset(base: Address, delta: i64) -> WideAddress {
    base as WideAddress + delta as WideAddress
}
