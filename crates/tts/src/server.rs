use crate::{
    error::TtsError,
    types::{OutputFormat, RequestDefaults, SpeechAudio, StreamingAudio, SynthesisRequest, TtsRequest, VoiceId},
    upstream::UpliftClient,
};

/// TTS server holding the upstream client and request defaults
///
/// Stateless across requests; every call is a single linear pipeline with
/// one retry-free upstream request.
pub struct Server {
    client: UpliftClient,
    defaults: RequestDefaults,
}

impl Server {
    /// Synthesize text to speech, buffering the full payload
    pub async fn synthesize(&self, request: TtsRequest) -> crate::error::Result<SpeechAudio> {
        let request = SynthesisRequest::resolve(request, &self.defaults)?;

        tracing::debug!(
            voice = request.voice_id.as_str(),
            format = request.output_format.as_str(),
            chars = request.text.chars().count(),
            "buffered synthesis request"
        );

        self.client.synthesize(&request).await
    }

    /// Synthesize text to speech as a live chunked relay
    pub async fn synthesize_stream(&self, request: TtsRequest) -> crate::error::Result<StreamingAudio> {
        let request = SynthesisRequest::resolve(request, &self.defaults)?;

        tracing::debug!(
            voice = request.voice_id.as_str(),
            format = request.output_format.as_str(),
            chars = request.text.chars().count(),
            "streaming synthesis request"
        );

        let stream = self.client.synthesize_stream(&request).await?;

        Ok(StreamingAudio {
            format: request.output_format,
            stream,
        })
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a oratr_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a oratr_config::Config) -> Self {
        Self { config }
    }

    /// Build the server, validating configured default tokens
    ///
    /// # Errors
    ///
    /// Returns `TtsError::Config` for unrecognized default voice or format
    /// tokens, or if the HTTP client cannot be constructed
    pub fn build(self) -> crate::error::Result<Server> {
        let upstream = &self.config.upstream;
        let mut defaults = RequestDefaults::default();

        if let Some(token) = &upstream.default_voice {
            defaults.voice_id = VoiceId::parse(token)
                .ok_or_else(|| TtsError::Config(format!("unrecognized default voice `{token}`")))?;
        }

        if let Some(token) = &upstream.default_format {
            defaults.output_format = OutputFormat::parse(token)
                .ok_or_else(|| TtsError::Config(format!("unrecognized default output format `{token}`")))?;
        }

        defaults.text = upstream.default_text.clone();

        tracing::debug!(
            voice = defaults.voice_id.as_str(),
            format = defaults.output_format.as_str(),
            "TTS server initialized"
        );

        Ok(Server {
            client: UpliftClient::new(upstream)?,
            defaults,
        })
    }
}
