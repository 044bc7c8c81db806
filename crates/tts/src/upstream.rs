use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use oratr_config::UpstreamConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    error::TtsError,
    http_client::build_client,
    types::{OutputFormat, SpeechAudio, SynthesisRequest, VoiceId},
};

const SYNTHESIZE_PATH: &str = "synthesis/text-to-speech";
const STREAM_PATH: &str = "synthesis/text-to-speech/stream";

/// Duration header set by the synthesis API on buffered responses
const UPSTREAM_DURATION_HEADER: &str = "x-uplift-ai-audio-duration";

/// Client for the Uplift synthesis API
pub struct UpliftClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    timeout: Duration,
}

/// Wire payload for both synthesis endpoints
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpliftPayload<'a> {
    voice_id: VoiceId,
    text: &'a str,
    output_format: OutputFormat,
}

impl<'a> From<&'a SynthesisRequest> for UpliftPayload<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            voice_id: request.voice_id,
            text: &request.text,
            output_format: request.output_format,
        }
    }
}

impl UpliftClient {
    /// Build a client from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `TtsError::Config` if the HTTP client cannot be constructed
    pub fn new(config: &UpstreamConfig) -> crate::error::Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Synthesize text to speech, buffering the full audio payload
    ///
    /// A single upstream POST with no retry. Non-2xx responses are relayed
    /// as-is via `TtsError::UpstreamStatus`.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> crate::error::Result<SpeechAudio> {
        let url = format!("{}/{SYNTHESIZE_PATH}", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(self.api_key.expose_secret())
            .json(&UpliftPayload::from(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("upstream request failed: {e}");
                TtsError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(%status, "upstream returned error");
            return Err(TtsError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let duration = response
            .headers()
            .get(UPSTREAM_DURATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read upstream response body: {e}");
            TtsError::Connection(format!("failed to read upstream response body: {e}"))
        })?;

        tracing::debug!(bytes = audio.len(), "buffered synthesis complete");

        Ok(SpeechAudio {
            audio,
            media_type: request.output_format.media_type(),
            duration,
        })
    }

    /// Synthesize text to speech, returning a live byte stream
    ///
    /// The stream is finite and non-restartable; it terminates when upstream
    /// closes the connection or errors mid-stream. No per-request timeout is
    /// applied so long streams can drain fully.
    pub async fn synthesize_stream(&self, request: &SynthesisRequest) -> crate::error::Result<AudioStream> {
        let url = format!("{}/{STREAM_PATH}", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&UpliftPayload::from(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("upstream stream request failed: {e}");
                TtsError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(%status, "upstream returned error");
            return Err(TtsError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let chunks = response.bytes_stream().map_err(|e| {
            // Headers are already relayed by now; the caller sees a
            // truncated body rather than a status change.
            tracing::warn!("upstream stream interrupted: {e}");
            TtsError::Connection(format!("upstream stream interrupted: {e}"))
        });

        Ok(AudioStream::new(chunks))
    }
}

/// Lazy sequence of audio chunks sourced from the upstream connection
///
/// Chunks are yielded in arrival order with no additional buffering.
/// Dropping the stream closes the upstream connection, so a caller
/// disconnect releases the upstream resource.
pub struct AudioStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, TtsError>> + Send>>,
}

impl AudioStream {
    pub(crate) fn new(stream: impl Stream<Item = Result<Bytes, TtsError>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl Stream for AudioStream {
    type Item = Result<Bytes, TtsError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
