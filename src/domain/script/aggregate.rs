//! Script Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{builtin_rules, RuleEntry, ScriptError};

/// Script 聚合根
///
/// 不变量:
/// - 至少包含一条规则
/// - 每条规则的标题或正文非空
/// - 创建后不可修改
///
/// 只能经由 `new` / `builtin` / `from_toml_str` 构建，不实现 Deserialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    rules: Vec<RuleEntry>,
}

/// TOML 文件格式: `[[rules]] title = "..." body = "..."`
#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

impl Script {
    pub fn new(rules: Vec<RuleEntry>) -> Result<Self, ScriptError> {
        if rules.is_empty() {
            return Err(ScriptError::Empty);
        }
        if let Some(index) = rules.iter().position(RuleEntry::is_blank) {
            return Err(ScriptError::BlankEntry(index));
        }
        Ok(Self { rules })
    }

    /// 内置游戏规则
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile =
            toml::from_str(source).map_err(|e| ScriptError::ParseError(e.to_string()))?;
        Self::new(file.rules)
    }

    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    /// 合成输入文本：每条规则一行
    pub fn full_text(&self) -> String {
        self.rules
            .iter()
            .map(RuleEntry::spoken_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_script() {
        let script = Script::builtin();
        assert_eq!(script.rules().len(), 6);
        assert_eq!(script.rules()[0].title, "أولاً:");
        assert_eq!(script.rules()[5].title, "الفائز:");
    }

    #[test]
    fn test_full_text_joins_lines() {
        let script = Script::new(vec![
            RuleEntry::new("First:", "roll the dice."),
            RuleEntry::new("Second:", "move."),
        ])
        .unwrap();

        assert_eq!(script.full_text(), "First: roll the dice.\nSecond: move.");
    }

    #[test]
    fn test_builtin_full_text_starts_with_first_rule() {
        let text = Script::builtin().full_text();
        assert!(text.starts_with("أولاً: يبدأ جميع اللاعبين"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_empty_script_rejected() {
        assert_eq!(Script::new(vec![]), Err(ScriptError::Empty));
    }

    #[test]
    fn test_blank_entry_rejected() {
        let result = Script::new(vec![
            RuleEntry::new("First:", "roll."),
            RuleEntry::new(" ", ""),
        ]);
        assert_eq!(result, Err(ScriptError::BlankEntry(1)));
    }

    #[test]
    fn test_from_toml() {
        let source = r#"
[[rules]]
title = "One:"
body = "Start on the first square."

[[rules]]
title = "Winner:"
body = "Most tokens wins."
"#;
        let script = Script::from_toml_str(source).unwrap();
        assert_eq!(script.rules().len(), 2);
        assert_eq!(script.rules()[1].body, "Most tokens wins.");
    }

    #[test]
    fn test_from_toml_blank_entry_rejected() {
        let source = r#"
[[rules]]
title = " "
body = ""
"#;
        assert_eq!(
            Script::from_toml_str(source),
            Err(ScriptError::BlankEntry(0))
        );
    }

    #[test]
    fn test_serializes_rules() {
        let json = serde_json::to_value(Script::builtin()).unwrap();
        assert_eq!(json["rules"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["rules"][0]["title"], "أولاً:");
    }

    #[test]
    fn test_from_toml_without_rules() {
        assert_eq!(Script::from_toml_str(""), Err(ScriptError::Empty));
        assert!(matches!(
            Script::from_toml_str("rules = 3"),
            Err(ScriptError::ParseError(_))
        ));
    }
}
