use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::wire::deserialize_timestamp;

/// An academic quarter as listed by `/academicqtr`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quarter {
    #[serde(rename = "academicQtrKeyId")]
    pub id: i64,
    #[serde(rename = "activeQtrBeginDttm", deserialize_with = "deserialize_timestamp")]
    pub begin: NaiveDateTime,
    #[serde(rename = "activeQtrEndDttm", deserialize_with = "deserialize_timestamp")]
    pub end: NaiveDateTime,
    #[serde(rename = "activeInd")]
    pub active_ind: String,
    pub appl_yr: String,
    pub appl_qtr: String,
    /// Not sent by the service; set when the response is mapped.
    #[serde(skip)]
    pub is_current: bool,
}

impl Quarter {
    /// True only strictly inside the active window.
    pub fn is_current_at(&self, now: NaiveDateTime) -> bool {
        self.begin < now && now < self.end
    }
}
