//! Numeric helpers shared by the descriptors.

/// Divides `num` by `den`, returning `0.0` when the denominator is zero.
#[inline]
pub(crate) fn div_or_zero(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Counts circular 0/1 transitions in an 8-bit pattern.
#[inline]
pub(crate) fn circular_transitions(code: u8) -> u32 {
    (code ^ code.rotate_right(1)).count_ones()
}

#[cfg(test)]
mod tests {
    use super::{circular_transitions, div_or_zero};

    #[test]
    fn div_or_zero_guards_zero_denominator() {
        assert_eq!(div_or_zero(3.0, 0.0), 0.0);
        assert!((div_or_zero(3.0, 4.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn circular_transitions_counts_uniform_patterns() {
        assert_eq!(circular_transitions(0b0000_0000), 0);
        assert_eq!(circular_transitions(0b1111_1111), 0);
        assert_eq!(circular_transitions(0b0001_1100), 2);
        assert_eq!(circular_transitions(0b1000_0001), 2);
        assert_eq!(circular_transitions(0b0101_0101), 8);
    }
}
