//! Filter sizing math
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal probes
//!
//! With the default k = 14, sizing the array at m = 20n keeps the false
//! positive rate near 6.7e-5.

use std::f64::consts::LN_2;

use super::hash_functions::MAX_PROBES;

/// Default number of probes per element.
pub const DEFAULT_PROBES: usize = 14;

/// Bits per expected element used by [`recommended_bits`].
pub const BITS_PER_ELEMENT: u64 = 20;

/// Filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the array (m)
    pub bits: u64,
    /// Number of probes (k)
    pub probes: usize,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn false_positive_rate(bits: u64, elements: u64, probes: usize) -> f64 {
    if bits == 0 {
        return 1.0;
    }
    let exponent = -(probes as f64) * (elements as f64) / (bits as f64);
    (1.0 - exponent.exp()).powi(probes as i32)
}

/// Bits to allocate for `expected_elements` at the default probe count.
pub fn recommended_bits(expected_elements: u64) -> u64 {
    expected_elements.saturating_mul(BITS_PER_ELEMENT).max(1)
}

/// Calculate optimal (m, k) for `elements` entries at `target_fpr`.
pub fn optimal_parameters(elements: u64, target_fpr: f64) -> FilterParams {
    if elements == 0 {
        return FilterParams {
            bits: 1,
            probes: 1,
            expected_fpr: 1.0,
        };
    }

    let n = elements as f64;
    let bits = ((-n * target_fpr.ln()) / (LN_2 * LN_2)).ceil().max(1.0) as u64;
    let probes = ((bits as f64 / n) * LN_2).round() as usize;
    let probes = probes.clamp(1, MAX_PROBES);

    FilterParams {
        bits,
        probes,
        expected_fpr: false_positive_rate(bits, elements, probes),
    }
}
