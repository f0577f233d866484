//! Rulecast - 游戏规则语音播报服务
//!
//! 启动流程: 配置 → 日志 → 规则脚本 → 适配器 → 播放控制器 → HTTP 服务

use std::sync::Arc;

use rulecast::application::{AudioOutputPort, PlaybackController, SpeechSynthesizerPort};
use rulecast::config::{
    load_config, print_config, AppConfig, AudioBackend, LogConfig, TtsProvider,
};
use rulecast::infrastructure::adapters::{
    load_script, FakeTtsClient, GeminiTtsClient, GeminiTtsClientConfig, PcmDecoder,
    RodioAudioOutput, SimulatedAudioOutput,
};
use rulecast::infrastructure::events::EventPublisher;
use rulecast::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Rulecast - 游戏规则语音播报");
    print_config(&config);

    let script = load_script(&config.script).await?;

    let synthesizer = build_synthesizer(&config)?;
    let decoder = Arc::new(PcmDecoder::new(
        config.audio.sample_rate,
        config.audio.channels,
    ));
    let output: Arc<dyn AudioOutputPort> = match config.audio.backend {
        AudioBackend::Device => Arc::new(RodioAudioOutput::new()),
        AudioBackend::Simulated => Arc::new(SimulatedAudioOutput::new()),
    };

    // 创建事件发布器
    let event_publisher = EventPublisher::new().arc();

    let controller = PlaybackController::new(
        script.full_text(),
        synthesizer,
        decoder,
        output,
        event_publisher.clone(),
    )
    .arc();

    let state = AppState::new(controller.clone(), script, event_publisher);
    let server = HttpServer::new(config.server.addr(), state);

    // 启动服务器（带优雅关闭）
    let result = server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await;

    // 不让音频在进程退出前继续播放
    controller.stop();

    result?;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于配置中的级别
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},rulecast={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_synthesizer(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechSynthesizerPort>> {
    let synthesizer: Arc<dyn SpeechSynthesizerPort> = match config.tts.provider {
        TtsProvider::Gemini => {
            if !config.tts.has_api_key() {
                tracing::warn!("API key is not configured; playback requests will fail");
            }
            Arc::new(GeminiTtsClient::new(GeminiTtsClientConfig::from(&config.tts))?)
        }
        TtsProvider::Fake => {
            tracing::warn!("Using offline fake synthesizer");
            Arc::new(FakeTtsClient::for_format(
                config.audio.sample_rate,
                config.audio.channels,
            ))
        }
    };
    Ok(synthesizer)
}
