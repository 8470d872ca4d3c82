//! Bounds for the number formatters.
//!
//! Numbers are printed by `itoa` (integers, minimal decimal with an
//! optional leading `-`) and `ryu` (doubles, shortest round-trip decimal).
//! Both format into a stack buffer and return a token whose length is
//! bounded independently of the output chunk size, which is what lets the
//! engine stage an overflowing number in one fixed scratch slot instead of
//! restarting the formatter.

/// Upper bound on the byte length of any formatted number.
///
/// `itoa` needs at most 20 bytes for `i64::MIN` / `u64::MAX`; `ryu` needs
/// at most 24 for an `f64`. The engine's scratch area is sized
/// `MAX_NUMBER_CHARS + 1`.
pub const MAX_NUMBER_CHARS: usize = 28;

#[cfg(test)]
mod tests {
    use super::MAX_NUMBER_CHARS;

    #[test]
    fn integer_extremes_fit_the_bound() {
        let mut fmt = itoa::Buffer::new();
        assert_eq!(fmt.format(i64::MIN), "-9223372036854775808");
        assert!(fmt.format(i64::MIN).len() <= MAX_NUMBER_CHARS);
        assert_eq!(fmt.format(u64::MAX), "18446744073709551615");
        assert!(fmt.format(u64::MAX).len() <= MAX_NUMBER_CHARS);
    }

    #[test]
    fn double_extremes_fit_the_bound() {
        let mut fmt = ryu::Buffer::new();
        // The longest shortest-round-trip rendering of an f64.
        assert_eq!(fmt.format(-2.2250738585072014e-308).len(), 24);
        assert!(fmt.format(f64::MAX).len() <= MAX_NUMBER_CHARS);
        assert!(fmt.format(f64::MIN_POSITIVE).len() <= MAX_NUMBER_CHARS);
    }
}
