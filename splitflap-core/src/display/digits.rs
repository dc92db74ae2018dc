//! Counter formatting

use core::fmt::Write;

use heapless::String;

/// Widest display whose modulus still fits in a `u32`
pub const MAX_DIGITS: usize = 9;

/// Format `value` zero-padded to `width` digits
///
/// Values that need more digits wrap around like an odometer, keeping
/// only the last `width` digits. The width is capped at `N` and at
/// [`MAX_DIGITS`].
pub fn format_digits<const N: usize>(value: u32, width: usize) -> String<N> {
    let width = width.min(N).min(MAX_DIGITS);
    let mut out = String::new();
    if width == 0 {
        return out;
    }

    let wrapped = value % 10u32.pow(width as u32);
    // Cannot overflow: width <= N
    let _ = write!(out, "{:0width$}", wrapped, width = width);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_digits::<4>(0, 2).as_str(), "00");
        assert_eq!(format_digits::<4>(7, 2).as_str(), "07");
        assert_eq!(format_digits::<4>(42, 2).as_str(), "42");
        assert_eq!(format_digits::<4>(5, 4).as_str(), "0005");
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(format_digits::<4>(100, 2).as_str(), "00");
        assert_eq!(format_digits::<4>(1234, 2).as_str(), "34");
        assert_eq!(format_digits::<16>(u32::MAX, 9).as_str(), "294967295");
    }

    #[test]
    fn test_width_capped() {
        assert_eq!(format_digits::<2>(123, 5).as_str(), "23");
        assert_eq!(format_digits::<4>(9, 0).as_str(), "");
    }
}
