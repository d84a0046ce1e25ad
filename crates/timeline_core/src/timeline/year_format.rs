//! Years-before-present label formatting.
//!
//! Large values are grouped by myriad (万, 10^4) and hundred-million
//! (億, 10^8) units, the way Japanese renders large numbers.

use crate::model::event::YearNumber;

const OKU: YearNumber = 100_000_000;
const MAN: YearNumber = 10_000;

/// Suffix every formatted label ends with ("years ago").
pub const YEARS_AGO_SUFFIX: &str = "年前";

/// Formats a years-before-present value as a display label.
///
/// ```
/// use timeline_core::format_year;
///
/// assert_eq!(format_year(60_000), "6万年前");
/// assert_eq!(format_year(4_600_000_000), "46億年前");
/// assert_eq!(format_year(123_456_789), "1億2345万6789年前");
/// ```
pub fn format_year(years: YearNumber) -> String {
    if years >= OKU {
        let oku = years / OKU;
        let remainder = years % OKU;
        if remainder == 0 {
            return format!("{oku}億{YEARS_AGO_SUFFIX}");
        }
        if remainder < MAN {
            return format!("{oku}億{remainder}{YEARS_AGO_SUFFIX}");
        }
        let man = remainder / MAN;
        let rest = remainder % MAN;
        if rest == 0 {
            format!("{oku}億{man}万{YEARS_AGO_SUFFIX}")
        } else {
            format!("{oku}億{man}万{rest}{YEARS_AGO_SUFFIX}")
        }
    } else if years >= MAN {
        let man = years / MAN;
        let rest = years % MAN;
        if rest == 0 {
            format!("{man}万{YEARS_AGO_SUFFIX}")
        } else {
            format!("{man}万{rest}{YEARS_AGO_SUFFIX}")
        }
    } else {
        format!("{years}{YEARS_AGO_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_year, YEARS_AGO_SUFFIX};

    #[test]
    fn below_one_myriad_is_plain() {
        assert_eq!(format_year(0), "0年前");
        assert_eq!(format_year(9_999), "9999年前");
    }

    #[test]
    fn myriad_range_with_and_without_remainder() {
        assert_eq!(format_year(10_000), "1万年前");
        assert_eq!(format_year(60_000), "6万年前");
        assert_eq!(format_year(12_345), "1万2345年前");
        assert_eq!(format_year(99_999_999), "9999万9999年前");
    }

    #[test]
    fn hundred_million_range_decomposes_remainder() {
        assert_eq!(format_year(100_000_000), "1億年前");
        assert_eq!(format_year(4_600_000_000), "46億年前");
        assert_eq!(format_year(4_600_010_000), "46億1万年前");
        assert_eq!(format_year(4_600_012_345), "46億1万2345年前");
    }

    #[test]
    fn small_remainder_under_hundred_million_skips_myriad_unit() {
        // Remainder below 10^4 is appended directly after the 億 unit.
        assert_eq!(format_year(100_000_005), "1億5年前");
        assert_eq!(format_year(300_009_999), "3億9999年前");
    }

    #[test]
    fn every_label_ends_with_suffix() {
        for value in [0, 1, 9_999, 10_000, 10_001, 99_999_999, 100_000_000, u64::MAX] {
            let label = format_year(value);
            assert!(!label.is_empty());
            assert!(label.ends_with(YEARS_AGO_SUFFIX), "{label}");
        }
    }
}
