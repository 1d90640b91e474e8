//! Label formatting for the digital readout.

use chrono::NaiveDateTime;

/// 24-hour clock with seconds, e.g. `09:07:03`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Day first, dot separated, e.g. `05.01.2024`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn time_label(time: &NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn date_label(time: &NaiveDateTime) -> String {
    time.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn labels_are_zero_padded() {
        let t = at(2024, 1, 5, 9, 7, 3);
        assert_eq!(time_label(&t), "09:07:03");
        assert_eq!(date_label(&t), "05.01.2024");
    }

    #[test]
    fn time_label_uses_24_hour_clock() {
        let t = at(2023, 12, 31, 23, 59, 59);
        assert_eq!(time_label(&t), "23:59:59");
        assert_eq!(date_label(&t), "31.12.2023");
    }

    #[test]
    fn midnight_is_all_zeros() {
        assert_eq!(time_label(&at(2024, 2, 29, 0, 0, 0)), "00:00:00");
    }
}
