//! Script Context - Entities

use serde::{Deserialize, Serialize};

/// 单条规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub title: String,
    pub body: String,
}

impl RuleEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    /// 朗读文本: "{title} {body}"
    pub fn spoken_line(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
