//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 凭证回退使用的环境变量
pub const API_KEY_ENV: &str = "API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `RULECAST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `RULECAST_SERVER__PORT=8080`
/// - `RULECAST_TTS__API_KEY=...`
/// - `RULECAST_AUDIO__BACKEND=simulated`
///
/// `tts.api_key` 未设置时读取 `API_KEY`；缺少凭证不会导致加载失败，
/// 而是在每次合成时报告配置错误。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5070)?
        .set_default("tts.provider", "gemini")?
        .set_default("tts.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("tts.model", "gemini-2.5-flash-preview-tts")?
        .set_default("tts.voice", "Kore")?
        .set_default("tts.style_prompt", "Say with a calm and clear tone: ")?
        .set_default("tts.timeout_secs", 0)?
        .set_default("audio.backend", "device")?
        .set_default("audio.sample_rate", 24000)?
        .set_default("audio.channels", 1)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: RULECAST_TTS__MODEL=gemini-2.5-pro-preview-tts
    builder = builder.add_source(
        Environment::with_prefix("RULECAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_api_key_fallback(&mut app_config, std::env::var(API_KEY_ENV).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 未显式配置凭证时使用回退值
fn apply_api_key_fallback(config: &mut AppConfig, fallback: Option<String>) {
    if config.tts.has_api_key() {
        return;
    }
    config.tts.api_key = fallback.filter(|k| !k.trim().is_empty());
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model cannot be empty".to_string(),
        ));
    }

    if config.tts.voice.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS voice cannot be empty".to_string(),
        ));
    }

    if config.audio.sample_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Audio sample rate cannot be 0".to_string(),
        ));
    }

    if !(1..=2).contains(&config.audio.channels) {
        return Err(ConfigError::ValidationError(format!(
            "Audio channels must be 1 or 2, got {}",
            config.audio.channels
        )));
    }

    // Gemini 只返回单声道 PCM
    if config.tts.provider == TtsProvider::Gemini && config.audio.channels != 1 {
        return Err(ConfigError::ValidationError(format!(
            "Gemini returns mono audio, audio.channels must be 1, got {}",
            config.audio.channels
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    tracing::info!("TTS Base URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {}", config.tts.model);
    tracing::info!("TTS Voice: {}", config.tts.voice);
    tracing::info!(
        "TTS API Key: {}",
        if config.tts.has_api_key() { "<set>" } else { "<missing>" }
    );
    if config.tts.timeout_secs > 0 {
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    }
    tracing::info!("Audio Backend: {:?}", config.audio.backend);
    tracing::info!(
        "Audio Format: {} Hz, {} channel(s)",
        config.audio.sample_rate,
        config.audio.channels
    );
    match &config.script.path {
        Some(path) => tracing::info!("Script: {}", path.display()),
        None => tracing::info!("Script: built-in"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.tts.model = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_channels() {
        let mut config = AppConfig::default();
        config.audio.channels = 0;
        assert!(validate_config(&config).is_err());

        config.audio.channels = 6;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_stereo_only_with_fake_provider() {
        let mut config = AppConfig::default();
        config.audio.channels = 2;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        config.tts.provider = TtsProvider::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_api_key_is_not_a_load_error() {
        let mut config = AppConfig::default();
        apply_api_key_fallback(&mut config, None);
        assert!(config.tts.api_key.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_api_key_fallback() {
        let mut config = AppConfig::default();
        apply_api_key_fallback(&mut config, Some("from-env".to_string()));
        assert_eq!(config.tts.api_key.as_deref(), Some("from-env"));

        // 显式配置优先
        let mut config = AppConfig::default();
        config.tts.api_key = Some("explicit".to_string());
        apply_api_key_fallback(&mut config, Some("from-env".to_string()));
        assert_eq!(config.tts.api_key.as_deref(), Some("explicit"));

        // 空白回退值视为未设置
        let mut config = AppConfig::default();
        apply_api_key_fallback(&mut config, Some(" ".to_string()));
        assert!(config.tts.api_key.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[tts]
provider = "fake"
voice = "Puck"

[audio]
backend = "simulated"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.tts.voice, "Puck");
        assert_eq!(config.tts.provider, crate::config::TtsProvider::Fake);
        assert_eq!(config.tts.model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.audio.backend, crate::config::AudioBackend::Simulated);
        assert_eq!(config.audio.sample_rate, 24000);
    }
}
