use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Security,
    Transaction,
    Account,
    Bill,
}

/// A notification shown on the dashboard's alerts tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub read: bool,
}

pub fn unread_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| !a.read).count()
}
