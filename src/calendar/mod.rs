//! Lunar calendar input transform
//!
//! The signal is derived from the traditional lunar month and day of a solar
//! date plus a two-hour time slot. Conversion itself is delegated to a
//! [`LunarCalendar`] implementation; [`ChineseLunisolar`] is the default.

pub mod lunisolar;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, error};

use crate::error::{Result, SignalError};

pub use lunisolar::ChineseLunisolar;

/// Solar date used to verify the calendar collaborator at startup
/// (Chinese New Year 2024, lunar 1/1).
const PROBE_DATE: (i32, u32, u32) = (2024, 2, 10);

/// Lunar month and day for a solar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// Lunar month 1-12, negative when the month is a leap month
    pub month: i32,
    /// Lunar day of month, 1-based
    pub day: u32,
}

impl LunarDate {
    pub fn is_leap_month(&self) -> bool {
        self.month < 0
    }
}

/// Solar to lunar date conversion
pub trait LunarCalendar: Send + Sync {
    /// Resolve the lunar month and day for `date`.
    ///
    /// Fails with [`SignalError::InvalidCalendarInput`] when the date is
    /// outside the range the calendar supports.
    fn lunar_date(&self, date: NaiveDate) -> Result<LunarDate>;
}

/// Calendar coordinates of a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMoment {
    pub lunar_month: i32,
    pub lunar_day: u32,
    /// Two-hour slot, 1-12
    pub hour_slot: u32,
}

impl CalendarMoment {
    pub fn resolve(calendar: &dyn LunarCalendar, timestamp: NaiveDateTime) -> Result<Self> {
        let lunar = calendar.lunar_date(timestamp.date())?;
        Ok(Self {
            lunar_month: lunar.month,
            lunar_day: lunar.day,
            hour_slot: hour_slot(timestamp.hour()),
        })
    }
}

/// Map a local hour (0-23) to its traditional two-hour slot (1-12).
///
/// Slot 1 spans 23:00-00:59. The `> 12` reset cannot trigger for hours in
/// 1..=22 but still applies to out-of-range input.
pub fn hour_slot(hour: u32) -> u32 {
    if hour == 23 || hour == 0 {
        return 1;
    }
    let slot = (hour + 1) / 2 + 1;
    if slot > 12 {
        1
    } else {
        slot
    }
}

/// Verify the calendar collaborator resolves a known date correctly.
pub fn probe(calendar: &dyn LunarCalendar) -> Result<()> {
    let (year, month, day) = PROBE_DATE;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SignalError::CalendarUnavailable("invalid probe date".to_string()))?;

    let lunar = calendar.lunar_date(date).map_err(|e| {
        error!(error = %e, "Lunar calendar probe failed");
        SignalError::CalendarUnavailable(e.to_string())
    })?;

    if lunar != (LunarDate { month: 1, day: 1 }) {
        error!(?lunar, %date, "Lunar calendar probe returned unexpected date");
        return Err(SignalError::CalendarUnavailable(format!(
            "{} resolved to lunar {}/{}, expected 1/1",
            date, lunar.month, lunar.day
        )));
    }

    debug!(%date, "Lunar calendar probe passed");
    Ok(())
}
