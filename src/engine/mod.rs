//! Signal engine - deterministic time to six-god state derivation
//!
//! The state is picked by chaining three indices modulo six:
//! lunar month, then lunar day, then the two-hour slot. The engine holds no
//! mutable state and can be shared freely across request handlers.

pub mod profile;

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::calendar::{CalendarMoment, LunarCalendar};
use crate::error::Result;

pub use profile::{profile_for, Element, EnergyType, EntropyClass, SignalProfile, SixGod};

const CYCLE: i64 = 6;

/// Intermediate 0-based positions in the six-state cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateIndices {
    pub month: usize,
    pub day: usize,
    pub hour: usize,
}

impl StateIndices {
    /// Chain the month, day and hour-slot offsets. Leap months count as
    /// their plain month number.
    pub fn from_moment(moment: &CalendarMoment) -> Self {
        let m = i64::from(moment.lunar_month.unsigned_abs());
        let d = i64::from(moment.lunar_day);
        let h = i64::from(moment.hour_slot);

        let month = (m - 1).rem_euclid(CYCLE);
        let day = (month + (d - 1)).rem_euclid(CYCLE);
        let hour = (day + (h - 1)).rem_euclid(CYCLE);

        Self {
            month: month as usize,
            day: day as usize,
            hour: hour as usize,
        }
    }
}

#[derive(Clone)]
pub struct SignalEngine {
    calendar: Arc<dyn LunarCalendar>,
}

impl SignalEngine {
    pub fn new(calendar: Arc<dyn LunarCalendar>) -> Self {
        Self { calendar }
    }

    pub fn moment(&self, timestamp: NaiveDateTime) -> Result<CalendarMoment> {
        CalendarMoment::resolve(self.calendar.as_ref(), timestamp)
    }

    /// Compute the state for a local timestamp.
    ///
    /// Returns the state and the raw hour slot, which callers reuse for the
    /// fingerprint.
    pub fn calculate_state(&self, timestamp: NaiveDateTime) -> Result<(SixGod, u32)> {
        let moment = self.moment(timestamp)?;
        let god = state_for_moment(&moment)?;
        Ok((god, moment.hour_slot))
    }

    pub fn get_profile(god: SixGod) -> &'static SignalProfile {
        profile_for(god)
    }
}

pub fn state_for_moment(moment: &CalendarMoment) -> Result<SixGod> {
    SixGod::from_index(StateIndices::from_moment(moment).hour)
}
