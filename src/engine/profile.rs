//! Six-god states and their constant attribute profiles

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// The six symbolic states, in cycle order.
///
/// The order is the lookup order for the state index; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SixGod {
    DaAn,
    LiuLian,
    SuXi,
    ChiKou,
    XiaoJi,
    KongWang,
}

impl SixGod {
    pub const ALL: [SixGod; 6] = [
        SixGod::DaAn,
        SixGod::LiuLian,
        SixGod::SuXi,
        SixGod::ChiKou,
        SixGod::XiaoJi,
        SixGod::KongWang,
    ];

    /// State at a 0-based position in the cycle
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SignalError::InvalidState(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SixGod::DaAn => "DA_AN",
            SixGod::LiuLian => "LIU_LIAN",
            SixGod::SuXi => "SU_XI",
            SixGod::ChiKou => "CHI_KOU",
            SixGod::XiaoJi => "XIAO_JI",
            SixGod::KongWang => "KONG_WANG",
        }
    }
}

impl std::fmt::Display for SixGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Wood,
    Earth,
    Fire,
    Metal,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyType {
    Stable,
    Flow,
    Competitive,
    NullState,
}

/// Volatility tier exposed to agents as a risk signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntropyClass {
    LowVolatility,
    MediumVolatility,
    HighVolatility,
}

/// Static attributes attached to a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalProfile {
    pub element: Element,
    pub energy_type: EnergyType,
    pub entropy_class: EntropyClass,
    /// 0.0-1.0
    pub conflict_level: f64,
    pub tone: &'static str,
    pub temperature_modifier: f64,
    /// 0.0-1.0
    pub risk_aversion: f64,
}

// Rows follow `SixGod::ALL` order.
const PROFILES: [SignalProfile; 6] = [
    SignalProfile {
        element: Element::Wood,
        energy_type: EnergyType::Stable,
        entropy_class: EntropyClass::LowVolatility,
        conflict_level: 0.1,
        tone: "CALM",
        temperature_modifier: -0.1,
        risk_aversion: 0.2,
    },
    SignalProfile {
        element: Element::Earth,
        energy_type: EnergyType::Stable,
        entropy_class: EntropyClass::LowVolatility,
        conflict_level: 0.2,
        tone: "PATIENT",
        temperature_modifier: -0.2,
        risk_aversion: 0.1,
    },
    SignalProfile {
        element: Element::Fire,
        energy_type: EnergyType::Flow,
        entropy_class: EntropyClass::MediumVolatility,
        conflict_level: 0.3,
        tone: "ENTHUSIASTIC",
        temperature_modifier: 0.2,
        risk_aversion: 0.6,
    },
    SignalProfile {
        element: Element::Metal,
        energy_type: EnergyType::Competitive,
        entropy_class: EntropyClass::HighVolatility,
        conflict_level: 0.85,
        tone: "DEFENSIVE",
        temperature_modifier: 0.1,
        risk_aversion: 0.9,
    },
    SignalProfile {
        element: Element::Water,
        energy_type: EnergyType::Flow,
        entropy_class: EntropyClass::MediumVolatility,
        conflict_level: 0.15,
        tone: "DIPLOMATIC",
        temperature_modifier: 0.3,
        risk_aversion: 0.5,
    },
    SignalProfile {
        element: Element::Earth,
        energy_type: EnergyType::NullState,
        entropy_class: EntropyClass::HighVolatility,
        conflict_level: 0.1,
        tone: "REFLECTIVE",
        temperature_modifier: 0.0,
        risk_aversion: 0.0,
    },
];

/// Profile row for a state
pub fn profile_for(god: SixGod) -> &'static SignalProfile {
    match god {
        SixGod::DaAn => &PROFILES[0],
        SixGod::LiuLian => &PROFILES[1],
        SixGod::SuXi => &PROFILES[2],
        SixGod::ChiKou => &PROFILES[3],
        SixGod::XiaoJi => &PROFILES[4],
        SixGod::KongWang => &PROFILES[5],
    }
}
