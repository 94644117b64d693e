//! Capacity-aware polynomial string hash.

/// Multiplier of the rolling hash.
pub const PRIME: u64 = 31;

/// Maps `key` to a bucket index in `[0, capacity)`.
///
/// Polynomial rolling hash over the key's UTF-16 code units: the
/// accumulator starts at zero and each step computes
/// `(31 * acc + unit) % capacity`. Characters outside the Basic
/// Multilingual Plane contribute both halves of their surrogate pair, so
/// indices agree with any implementation that hashes UTF-16 strings.
/// Reducing inside the loop keeps the accumulator below `capacity`, so the
/// result is reproducible for any integer width as long as the intermediate
/// product fits; it is computed in `u128` here, which always holds.
///
/// The index depends on `capacity`, so the same key generally lands in a
/// different bucket after a resize.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[inline]
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    assert!(capacity > 0, "bucket_index: capacity must be positive");
    let cap = capacity as u128;
    let acc = key.encode_utf16().fold(0u128, |acc, unit| {
        (u128::from(PRIME) * acc + u128::from(unit)) % cap
    });
    // acc < capacity, so the narrowing is lossless.
    acc as usize
}
