//! Hash-to-offset mapping for the membership filter
//!
//! One hash function, salted k times: probe `i` hashes the input with a single
//! trailing byte equal to `i` and reduces the result modulo the bit count.
//! This gives k well-spread offsets without k independent hash families.
//!
//! The mapping is a pure function of (input, k, m), so every process sharing
//! a bit array derives the same offsets for the same value.

use std::io::Cursor;

use crate::error::FilterError;

/// Largest usable probe count. The salt is one byte, so 256 distinct values.
pub const MAX_PROBES: usize = 256;

/// Hash an element with MurmurHash3 (x64, 128-bit, seed 0), keeping the lower
/// 64 bits.
pub fn murmur_hash(element: &[u8]) -> u64 {
    let mut cursor = Cursor::new(element);
    let hash = murmur3::murmur3_x64_128(&mut cursor, 0).unwrap_or(0);
    hash as u64
}

/// Compute the probe offsets for `element`.
///
/// Returns exactly `probes` offsets, each in `[0, bits)`, in probe order.
///
/// # Errors
/// - `ZeroBits` if `bits == 0`
/// - `InvalidProbeCount` if `probes` is 0 or larger than [`MAX_PROBES`]
pub fn probe_locations(element: &[u8], probes: usize, bits: u64) -> Result<Vec<u64>, FilterError> {
    if bits == 0 {
        return Err(FilterError::ZeroBits);
    }
    validate_probe_count(probes)?;

    let mut salted = Vec::with_capacity(element.len() + 1);
    salted.extend_from_slice(element);

    let locations = (0..probes)
        .map(|i| {
            // i < MAX_PROBES, so the cast is lossless
            salted.push(i as u8);
            let offset = murmur_hash(&salted) % bits;
            salted.pop();
            offset
        })
        .collect();

    Ok(locations)
}

pub(crate) fn validate_probe_count(probes: usize) -> Result<(), FilterError> {
    if probes == 0 || probes > MAX_PROBES {
        return Err(FilterError::InvalidProbeCount {
            probes,
            max: MAX_PROBES,
        });
    }
    Ok(())
}
