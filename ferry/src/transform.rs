//! The parity rule deciding how many times a record is written.

/// Returns how many times `value` must appear in the output: twice when even,
/// once when odd.
///
/// Parity is mathematical parity on signed integers, so `-4` and `0` are even
/// while `-3` is odd.
pub fn emit_count(value: i64) -> usize {
    if value % 2 == 0 { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_values_are_emitted_twice() {
        assert_eq!(emit_count(2), 2);
        assert_eq!(emit_count(0), 2);
        assert_eq!(emit_count(-4), 2);
        assert_eq!(emit_count(i64::MIN), 2);
    }

    #[test]
    fn odd_values_are_emitted_once() {
        assert_eq!(emit_count(1), 1);
        assert_eq!(emit_count(-3), 1);
        assert_eq!(emit_count(i64::MAX), 1);
    }
}
