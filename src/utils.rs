//! Gregorian calendar helpers.
//!
//! Day counting follows Cassio Neri and Lorenz Schneider's paper,
//! [Euclidean affine functions and their application to calendar
//! algorithms][eaf-calendar-algorithms], with the rata die shifted far
//! enough that every supported year maps to a positive computational year.
//!
//! [eaf-calendar-algorithms]: https://onlinelibrary.wiley.com/doi/full/10.1002/spe.3172

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;
const SHIFT_CONSTANT: i64 = 5_368_710;

/// Returns the number of days since 1970-01-01 for a proleptic Gregorian date.
pub(crate) const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let shift = SHIFT_CONSTANT * DAYS_IN_A_400Y_CYCLE + EPOCH_COMPUTATIONAL_RATA_DIE;
    let (comp_year, comp_month, comp_day, century) = rata_die_first_equations(year, month, day);
    let y_star = 1461 * comp_year / 4 - century + century / 4;
    let m_star = (979 * comp_month - 2919) / 32;
    (y_star as i64 + m_star + comp_day) - shift
}

// Returns Y, M, D, C
const fn rata_die_first_equations(year: i32, month: u8, day: u8) -> (u64, i64, i64, u64) {
    let j = (month <= 2) as i64;
    let computational_year = (year as i64 + 400 * SHIFT_CONSTANT) - j;
    let computation_month = month as i64 + 12 * j;
    let computation_day = day as i64 - 1;
    (
        computational_year as u64,
        computation_month,
        computation_day,
        computational_year as u64 / 100,
    )
}

/// Returns the Gregorian year containing the given epoch day.
#[cfg(feature = "tzdb")]
pub(crate) fn epoch_days_to_year(epoch_days: i64) -> i32 {
    let mut year = 1970 + (epoch_days * 400).div_euclid(DAYS_IN_A_400Y_CYCLE);
    while epoch_days_from_gregorian_date(year as i32, 1, 1) > epoch_days {
        year -= 1;
    }
    while epoch_days_from_gregorian_date(year as i32 + 1, 1, 1) <= epoch_days {
        year += 1;
    }
    year as i32
}

/// Day of the week for an epoch day, with Sunday as 0.
#[cfg(feature = "tzdb")]
pub(crate) const fn epoch_days_to_day_of_week(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}

#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_from_dates() {
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(epoch_days_from_gregorian_date(2000, 3, 1), 11_017);
        assert_eq!(epoch_days_from_gregorian_date(1969, 12, 31), -1);
        assert_eq!(epoch_days_from_gregorian_date(2021, 3, 15), 18_701);
    }

    #[test]
    #[cfg(feature = "tzdb")]
    fn epoch_days_round_trip_years() {
        for year in [-271_821, -1, 0, 1, 1582, 1969, 1970, 2000, 2024, 275_760] {
            let first = epoch_days_from_gregorian_date(year, 1, 1);
            assert_eq!(epoch_days_to_year(first), year);
            assert_eq!(epoch_days_to_year(first - 1), year - 1);
            assert_eq!(
                epoch_days_to_year(epoch_days_from_gregorian_date(year, 12, 31)),
                year
            );
        }
    }

    #[test]
    #[cfg(feature = "tzdb")]
    fn day_of_week() {
        // 2024-03-10 was a Sunday.
        let days = epoch_days_from_gregorian_date(2024, 3, 10);
        assert_eq!(epoch_days_to_day_of_week(days), 0);
        assert_eq!(epoch_days_to_day_of_week(0), 4);
        assert_eq!(epoch_days_to_day_of_week(-1), 3);
    }

    #[test]
    fn days_in_month() {
        assert_eq!(iso_days_in_month(2024, 2), 29);
        assert_eq!(iso_days_in_month(1900, 2), 28);
        assert_eq!(iso_days_in_month(2000, 2), 29);
        assert_eq!(iso_days_in_month(2023, 4), 30);
        assert_eq!(iso_days_in_month(2023, 13), 0);
    }
}
