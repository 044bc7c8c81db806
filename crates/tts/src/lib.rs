#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod request;
mod server;
mod types;
mod upstream;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

pub use error::{Result, TtsError};
pub use server::{Server, TtsServerBuilder};
pub use types::{
    AUDIO_DURATION_HEADER, AUDIO_FORMAT_HEADER, MAX_TEXT_CHARS, OutputFormat, SpeechAudio, StreamingAudio,
    SynthesisRequest, TtsRequest, VoiceId,
};
pub use upstream::AudioStream;
use request::ExtractJson;

/// Build the TTS server from configuration
pub fn build_server(config: &oratr_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/tts", post(synthesize))
        .route("/tts-stream", post(synthesize_stream))
}

/// Handle buffered speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractJson(request): ExtractJson<types::TtsRequest>,
) -> Result<axum::response::Response> {
    let audio = server.synthesize(request).await?;

    tracing::debug!("buffered synthesis complete");

    Ok(audio.into_response())
}

/// Handle streaming speech synthesis requests
async fn synthesize_stream(
    State(server): State<Arc<Server>>,
    ExtractJson(request): ExtractJson<types::TtsRequest>,
) -> Result<axum::response::Response> {
    let streaming = server.synthesize_stream(request).await?;

    tracing::debug!("streaming relay established");

    Ok(streaming.into_response())
}
