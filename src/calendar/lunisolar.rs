//! Lunar calendar backed by the `chinese-lunisolar-calendar` tables
//!
//! Covers solar years 1901-2100. Leap months are reported with a negative
//! month number.

use chinese_lunisolar_calendar::{LunisolarDate, SolarDate};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

use super::{LunarCalendar, LunarDate};
use crate::error::{Result, SignalError};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseLunisolar;

impl ChineseLunisolar {
    pub fn new() -> Self {
        Self
    }
}

impl LunarCalendar for ChineseLunisolar {
    fn lunar_date(&self, date: NaiveDate) -> Result<LunarDate> {
        let invalid = |reason: &str| {
            warn!(%date, reason, "Lunar conversion failed");
            SignalError::InvalidCalendarInput {
                date,
                reason: reason.to_string(),
            }
        };

        let year = u16::try_from(date.year()).map_err(|_| invalid("year out of range"))?;
        let solar = SolarDate::from_ymd(year, date.month() as u8, date.day() as u8)
            .map_err(|_| invalid("solar date out of range"))?;
        let lunisolar = LunisolarDate::from_solar_date(solar)
            .map_err(|_| invalid("date outside supported lunisolar range"))?;

        let lunar_month = lunisolar.to_lunar_month();
        let month = i32::from(lunar_month.to_u8());

        Ok(LunarDate {
            month: if lunar_month.is_leap_month() { -month } else { month },
            day: u32::from(lunisolar.to_lunar_day().to_u8()),
        })
    }
}
