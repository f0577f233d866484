//! Script Context - 规则脚本上下文
//!
//! 职责:
//! - 规则条目（标题 + 正文）
//! - 拼接为合成输入文本
//! - 内置游戏规则

mod aggregate;
mod content;
mod entities;
mod errors;

pub use aggregate::Script;
pub use content::builtin_rules;
pub use entities::RuleEntry;
pub use errors::ScriptError;
