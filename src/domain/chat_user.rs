use chrono::{DateTime, Utc};

/// Registered conversation identity: a private chat or a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatUser {
    /// Best available name for a greeting.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}
