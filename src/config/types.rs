//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音频输出配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 规则脚本配置
    #[serde(default)]
    pub script: ScriptConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语音合成提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProvider {
    /// Gemini generateContent 接口
    #[default]
    Gemini,
    /// 本地提示音，不访问网络
    Fake,
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,

    /// Gemini API 基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 语音合成模型
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// 预置音色名称
    #[serde(default = "default_tts_voice")]
    pub voice: String,

    /// 拼接在文本前的语气提示
    #[serde(default = "default_style_prompt")]
    pub style_prompt: String,

    /// API Key，未设置时回退到 `API_KEY` 环境变量
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时时间（秒），0 表示不设超时
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_tts_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_tts_voice() -> String {
    "Kore".to_string()
}

fn default_style_prompt() -> String {
    "Say with a calm and clear tone: ".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            base_url: default_tts_base_url(),
            model: default_tts_model(),
            voice: default_tts_voice(),
            style_prompt: default_style_prompt(),
            api_key: None,
            timeout_secs: 0,
        }
    }
}

impl TtsConfig {
    /// 是否已配置凭证（不暴露具体值）
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

/// 音频输出后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioBackend {
    /// 系统默认输出设备
    #[default]
    Device,
    /// 无声模拟播放（按音频时长计时）
    Simulated,
}

/// 音频输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default)]
    pub backend: AudioBackend,

    /// 合成负载的 PCM 采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 声道数，Gemini 只返回单声道，2 仅用于 fake 提供方
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_sample_rate() -> u32 {
    24000
}

fn default_channels() -> u16 {
    1 // 单声道
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            backend: AudioBackend::default(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

/// 规则脚本配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptConfig {
    /// 规则 TOML 文件路径，未设置时使用内置规则
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.tts.provider, TtsProvider::Gemini);
        assert_eq!(config.tts.model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.tts.voice, "Kore");
        assert_eq!(config.tts.timeout_secs, 0);
        assert_eq!(config.audio.sample_rate, 24000);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.audio.backend, AudioBackend::Device);
        assert!(config.script.path.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:5070");
    }

    #[test]
    fn test_has_api_key() {
        let mut config = TtsConfig::default();
        assert!(!config.has_api_key());

        config.api_key = Some("   ".to_string());
        assert!(!config.has_api_key());

        config.api_key = Some("secret".to_string());
        assert!(config.has_api_key());
    }
}
