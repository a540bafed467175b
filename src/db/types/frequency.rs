use core::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How often a schedule publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "biweekly")]
    Biweekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

impl Frequency {
    /// Minimum hours that must have elapsed since the last execution before
    /// the schedule may fire again. Slightly below the nominal interval to
    /// tolerate invocation jitter (a daily run at 09:00 must not be blocked
    /// because yesterday's run happened at 09:04).
    pub fn min_hours_elapsed(&self) -> i64 {
        match self {
            Frequency::Daily => 23,
            Frequency::Weekly => 156,   // 24 * 6.5
            Frequency::Biweekly => 312, // 24 * 13
            Frequency::Monthly => 696,  // 24 * 29
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
