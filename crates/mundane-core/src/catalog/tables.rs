use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Number of weekday slots in a schedule (0 = Sunday .. 6 = Saturday).
pub const DAYS_PER_WEEK: u8 = 7;

/// Protocol name -> ordered exercise ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolTable {
    protocols: BTreeMap<String, Vec<String>>,
}

impl ProtocolTable {
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.protocols.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.protocols.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.protocols
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    pub fn insert(&mut self, name: impl Into<String>, ids: Vec<String>) {
        self.protocols.insert(name.into(), ids);
    }
}

/// Weekday index -> protocol name.
///
/// Serialized with string keys `"0"` .. `"6"`; any other key is rejected
/// while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Schedule {
    days: BTreeMap<u8, String>,
}

impl Schedule {
    pub fn protocol_for(&self, weekday: u8) -> Option<&str> {
        self.days.get(&weekday).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.days.iter().map(|(day, name)| (*day, name.as_str()))
    }

    /// Assign a protocol to a weekday. Indices outside 0..=6 are rejected.
    pub fn assign(&mut self, weekday: u8, protocol: impl Into<String>) -> Result<(), ConfigError> {
        if weekday >= DAYS_PER_WEEK {
            return Err(ConfigError::InvalidWeekdayKey(weekday.to_string()));
        }
        self.days.insert(weekday, protocol.into());
        Ok(())
    }
}

impl TryFrom<BTreeMap<String, String>> for Schedule {
    type Error = ConfigError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut schedule = Schedule::default();
        for (key, protocol) in raw {
            let weekday = key
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidWeekdayKey(key.clone()))?;
            if weekday >= DAYS_PER_WEEK {
                return Err(ConfigError::InvalidWeekdayKey(key));
            }
            schedule.days.insert(weekday, protocol);
        }
        Ok(schedule)
    }
}

impl From<Schedule> for BTreeMap<String, String> {
    fn from(schedule: Schedule) -> Self {
        schedule
            .days
            .into_iter()
            .map(|(day, name)| (day.to_string(), name))
            .collect()
    }
}
