//! Signal response assembly
//!
//! Wraps a single [`SignalEngine`] evaluation into the response agents
//! consume: the state block, meta information (stability window, next change,
//! fingerprint) and directives copied from the state's profile.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::engine::{Element, EnergyType, EntropyClass, SignalEngine, SixGod};
use crate::error::{Result, SignalError};

/// How long a computed state is considered valid
pub const STABILITY_WINDOW: &str = "120m";

const STATE_CHANGE_HOURS: i64 = 2;
const HASH_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBlock {
    pub six_god: SixGod,
    pub element: Element,
    pub energy_type: EnergyType,
    pub conflict_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaBlock {
    pub entropy_class: EntropyClass,
    pub stability_window: String,
    pub next_state_change: String,
    pub hash: String,
    pub reproducible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectivesBlock {
    pub tone: String,
    pub temperature_modifier: f64,
    pub risk_aversion: f64,
}

/// Full signal for one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResponse {
    pub signal: SignalBlock,
    pub meta: MetaBlock,
    pub agent_directives: DirectivesBlock,
}

impl SignalResponse {
    /// Evaluate the engine at `now` and build the response.
    pub fn compute(engine: &SignalEngine, now: NaiveDateTime) -> Result<Self> {
        let (god, h_idx) = engine.calculate_state(now)?;
        let profile = SignalEngine::get_profile(god);

        let next_change = now
            .checked_add_signed(Duration::hours(STATE_CHANGE_HOURS))
            .ok_or_else(|| SignalError::InvalidTimestamp(format!("{} is out of range", now)))?;
        let hash = fingerprint(now.year(), now.month(), now.day(), h_idx);

        tracing::debug!(six_god = %god, h_idx, hash = %hash, "Computed signal");

        Ok(Self {
            signal: SignalBlock {
                six_god: god,
                element: profile.element,
                energy_type: profile.energy_type,
                conflict_level: profile.conflict_level,
            },
            meta: MetaBlock {
                entropy_class: profile.entropy_class,
                stability_window: STABILITY_WINDOW.to_string(),
                next_state_change: iso_format(next_change),
                hash,
                reproducible: true,
            },
            agent_directives: DirectivesBlock {
                tone: profile.tone.to_string(),
                temperature_modifier: profile.temperature_modifier,
                risk_aversion: profile.risk_aversion,
            },
        })
    }
}

/// Short display fingerprint of a date and hour slot.
///
/// MD5 of the unpadded decimal concatenation `{year}{month}{day}{h_idx}`,
/// truncated to 8 hex chars. Not an integrity check.
pub fn fingerprint(year: i32, month: u32, day: u32, h_idx: u32) -> String {
    let key = format!("{}{}{}{}", year, month, day, h_idx);
    let mut hasher = Md5::new();
    hasher.update(key.as_bytes());
    let mut hash = hex::encode(hasher.finalize());
    hash.truncate(HASH_LEN);
    hash
}

/// ISO-8601 without offset; fractional seconds only when non-zero
pub fn iso_format(ts: NaiveDateTime) -> String {
    let base = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = ts.nanosecond() / 1_000;
    if micros == 0 {
        base
    } else {
        format!("{}.{:06}", base, micros)
    }
}

/// Parse a caller-supplied timestamp.
///
/// RFC 3339 input keeps the wall-clock fields of its own offset; naive input
/// is taken as-is.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| SignalError::InvalidTimestamp(format!("{:?}: {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{LunarCalendar, LunarDate};
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct Fixed(LunarDate);

    impl LunarCalendar for Fixed {
        fn lunar_date(&self, _date: NaiveDate) -> Result<LunarDate> {
            Ok(self.0)
        }
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_fingerprint_vectors() {
        // md5("20242106")
        assert_eq!(fingerprint(2024, 2, 10, 6), "f638538d");
        // md5("20242101")
        assert_eq!(fingerprint(2024, 2, 10, 1), "e73dc21b");
        // md5("202421012")
        assert_eq!(fingerprint(2024, 2, 10, 12), "fa8c7e7c");
    }

    #[test]
    fn test_fingerprint_shape() {
        let hash = fingerprint(2031, 11, 3, 9);
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(hash, fingerprint(2031, 11, 3, 9));
        assert_ne!(hash, fingerprint(2031, 11, 3, 10));
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(iso_format(ts(2024, 2, 10, 12, 0, 0)), "2024-02-10T12:00:00");

        let with_micros = ts(2024, 2, 10, 12, 0, 5)
            .with_nanosecond(123_456_000)
            .unwrap();
        assert_eq!(iso_format(with_micros), "2024-02-10T12:00:05.123456");
    }

    #[test]
    fn test_compute_response() {
        let engine = SignalEngine::new(Arc::new(Fixed(LunarDate { month: 1, day: 1 })));
        let response = SignalResponse::compute(&engine, ts(2024, 2, 10, 10, 0, 0)).unwrap();

        assert_eq!(response.signal.six_god, SixGod::KongWang);
        assert_eq!(response.signal.element, Element::Earth);
        assert_eq!(response.signal.energy_type, EnergyType::NullState);
        assert_eq!(response.signal.conflict_level, 0.1);

        assert_eq!(response.meta.entropy_class, EntropyClass::HighVolatility);
        assert_eq!(response.meta.stability_window, "120m");
        assert_eq!(response.meta.next_state_change, "2024-02-10T12:00:00");
        assert_eq!(response.meta.hash, "f638538d");
        assert!(response.meta.reproducible);

        assert_eq!(response.agent_directives.tone, "REFLECTIVE");
        assert_eq!(response.agent_directives.temperature_modifier, 0.0);
        assert_eq!(response.agent_directives.risk_aversion, 0.0);
    }

    #[test]
    fn test_next_change_crosses_midnight() {
        let engine = SignalEngine::new(Arc::new(Fixed(LunarDate { month: 3, day: 9 })));
        let response = SignalResponse::compute(&engine, ts(2024, 12, 31, 23, 30, 0)).unwrap();
        assert_eq!(response.meta.next_state_change, "2025-01-01T01:30:00");
        assert_eq!(response.meta.hash, fingerprint(2024, 12, 31, 1));
    }

    #[test]
    fn test_stable_within_slot() {
        let engine = SignalEngine::new(Arc::new(Fixed(LunarDate { month: 7, day: 3 })));
        let a = SignalResponse::compute(&engine, ts(2024, 8, 6, 13, 0, 0)).unwrap();
        let b = SignalResponse::compute(&engine, ts(2024, 8, 6, 14, 59, 59)).unwrap();

        assert_eq!(a.signal, b.signal);
        assert_eq!(a.agent_directives, b.agent_directives);
        assert_eq!(a.meta.hash, b.meta.hash);
        assert_ne!(a.meta.next_state_change, b.meta.next_state_change);
    }

    #[test]
    fn test_serialized_shape() {
        let engine = SignalEngine::new(Arc::new(Fixed(LunarDate { month: 1, day: 1 })));
        let response = SignalResponse::compute(&engine, ts(2024, 2, 10, 0, 0, 0)).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["signal"]["six_god"], "DA_AN");
        assert_eq!(json["signal"]["element"], "WOOD");
        assert_eq!(json["signal"]["energy_type"], "STABLE");
        assert_eq!(json["meta"]["entropy_class"], "LOW_VOLATILITY");
        assert_eq!(json["meta"]["reproducible"], true);
        assert_eq!(json["agent_directives"]["tone"], "CALM");
        assert_eq!(json["agent_directives"]["temperature_modifier"], -0.1);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2024-02-10T10:00:00").unwrap(),
            ts(2024, 2, 10, 10, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2024-02-10 10:00:00.5").unwrap(),
            ts(2024, 2, 10, 10, 0, 0).with_nanosecond(500_000_000).unwrap()
        );
        // Wall-clock fields of the given offset are kept
        assert_eq!(
            parse_timestamp("2024-02-10T10:00:00+08:00").unwrap(),
            ts(2024, 2, 10, 10, 0, 0)
        );
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(SignalError::InvalidTimestamp(_))
        ));
    }
}
