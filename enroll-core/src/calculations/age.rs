//! Applicant age from date of birth.

use chrono::NaiveDate;

/// Whole years elapsed between `date_of_birth` and `today`, floored.
///
/// Birthdays that have not yet occurred this year do not count. A date
/// of birth in the future yields 0 rather than an error; the validator
/// separately rejects such input.
pub fn age_on(
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> u32 {
    today.years_since(date_of_birth).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_floors_before_birthday() {
        let dob = date(1990, 6, 15);

        assert_eq!(age_on(dob, date(2026, 6, 14)), 35);
        assert_eq!(age_on(dob, date(2026, 6, 15)), 36);
        assert_eq!(age_on(dob, date(2026, 6, 16)), 36);
    }

    #[test]
    fn eighteenth_birthday_is_the_boundary() {
        let dob = date(2008, 3, 1);

        assert_eq!(age_on(dob, date(2026, 2, 28)), 17);
        assert_eq!(age_on(dob, date(2026, 3, 1)), 18);
    }

    #[test]
    fn future_dob_is_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2026, 1, 1)), 0);
    }

    #[test]
    fn same_day_is_zero() {
        let day = date(2026, 8, 23);
        assert_eq!(age_on(day, day), 0);
    }
}
