use crate::error::ParseStatusError;
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Local wall-clock time without an offset, e.g. `2025-04-12T09:30:01.123456`.
pub type Timestamp = chrono::NaiveDateTime;

pub(crate) fn now() -> Timestamp {
    // At most six fractional digits, like the files the tool has always written
    chrono::Local::now().naive_local().trunc_subsecs(6)
}

#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: u64,
    description: String,
    status: Status,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Task {
    /// Creates a `todo` task whose creation and update times are both `now`.
    pub fn new(id: u64, description: String) -> Self {
        let timestamp = now();
        Self {
            id,
            description,
            status: Status::Todo,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
        self.touch();
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers like `{:<12}` apply
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
