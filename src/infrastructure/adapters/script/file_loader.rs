//! File Script Loader
//!
//! `script.path` 未设置时返回内置规则，否则读取 TOML 文件

use std::path::Path;
use tokio::fs;

use crate::config::ScriptConfig;
use crate::domain::script::{Script, ScriptError};

/// 按配置加载规则脚本
pub async fn load_script(config: &ScriptConfig) -> Result<Script, ScriptError> {
    match &config.path {
        Some(path) => load_from_file(path).await,
        None => {
            tracing::debug!("Using built-in script");
            Ok(Script::builtin())
        }
    }
}

async fn load_from_file(path: &Path) -> Result<Script, ScriptError> {
    let source = fs::read_to_string(path)
        .await
        .map_err(|e| ScriptError::FileReadError(format!("{}: {}", path.display(), e)))?;

    let script = Script::from_toml_str(&source)?;
    tracing::info!(
        path = %path.display(),
        rules = script.rules().len(),
        "Script loaded from file"
    );
    Ok(script)
}
