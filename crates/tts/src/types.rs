use axum::body::Body;
use axum::response::Response;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::TtsError;
use crate::upstream::AudioStream;

/// Maximum text length in Unicode scalar values
pub const MAX_TEXT_CHARS: usize = 2500;

/// Response header carrying the audio duration reported by upstream
pub const AUDIO_DURATION_HEADER: &str = "X-Audio-Duration";

/// Response header carrying the requested output format token
pub const AUDIO_FORMAT_HEADER: &str = "X-Audio-Format";

/// Voices exposed by the Uplift synthesis API
///
/// The wire form, inbound and upstream, is the raw voice id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceId {
    #[serde(rename = "v_kwmp7zxt")]
    GenZ,
    #[serde(rename = "v_yypgzenx")]
    DadaJee,
    #[serde(rename = "v_30s70t3a")]
    NostalgicNews,
}

impl VoiceId {
    /// All recognized voices
    pub const ALL: [Self; 3] = [Self::GenZ, Self::DadaJee, Self::NostalgicNews];

    /// The raw voice id sent to the synthesis API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenZ => "v_kwmp7zxt",
            Self::DadaJee => "v_yypgzenx",
            Self::NostalgicNews => "v_30s70t3a",
        }
    }

    /// Parse a raw voice id token
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|voice| voice.as_str() == token)
    }
}

/// Output formats accepted by the synthesis API
///
/// The wire tokens encode family, sample rate, and bit depth or bitrate;
/// everything is 22050 Hz except µ-law at 8 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "WAV_22050_16")]
    WavPcm16,
    #[serde(rename = "WAV_22050_32")]
    WavFloat32,
    #[serde(rename = "MP3_22050_32")]
    Mp3Kbps32,
    #[serde(rename = "MP3_22050_64")]
    Mp3Kbps64,
    #[serde(rename = "MP3_22050_128")]
    Mp3Kbps128,
    #[serde(rename = "OGG_22050_16")]
    OggKbps16,
    #[serde(rename = "ULAW_8000_8")]
    Ulaw8k,
}

impl OutputFormat {
    /// All recognized formats
    pub const ALL: [Self; 7] = [
        Self::WavPcm16,
        Self::WavFloat32,
        Self::Mp3Kbps32,
        Self::Mp3Kbps64,
        Self::Mp3Kbps128,
        Self::OggKbps16,
        Self::Ulaw8k,
    ];

    /// The raw format token sent to the synthesis API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WavPcm16 => "WAV_22050_16",
            Self::WavFloat32 => "WAV_22050_32",
            Self::Mp3Kbps32 => "MP3_22050_32",
            Self::Mp3Kbps64 => "MP3_22050_64",
            Self::Mp3Kbps128 => "MP3_22050_128",
            Self::OggKbps16 => "OGG_22050_16",
            Self::Ulaw8k => "ULAW_8000_8",
        }
    }

    /// Parse a raw format token
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == token)
    }

    /// Response media type for this format's family
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::WavPcm16 | Self::WavFloat32 => "audio/wav",
            Self::Mp3Kbps32 | Self::Mp3Kbps64 | Self::Mp3Kbps128 => "audio/mpeg",
            Self::OggKbps16 => "audio/ogg",
            Self::Ulaw8k => "audio/basic",
        }
    }
}

/// Inbound synthesis request
///
/// All fields are optional; omitted fields take configured defaults.
/// Unrecognized voice or format tokens are rejected during deserialization,
/// never silently substituted.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<VoiceId>,
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
}

/// Defaults applied to requests with omitted fields
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub voice_id: VoiceId,
    pub output_format: OutputFormat,
    /// Text used when a request omits `text`; `None` makes text required
    pub text: Option<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            voice_id: VoiceId::NostalgicNews,
            output_format: OutputFormat::Mp3Kbps128,
            text: None,
        }
    }
}

/// Fully resolved synthesis request, immutable for the rest of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: VoiceId,
    pub output_format: OutputFormat,
}

impl SynthesisRequest {
    /// Resolve an inbound request against configured defaults
    ///
    /// Pure; no side effects.
    ///
    /// # Errors
    ///
    /// Returns `TtsError::Validation` if text is missing with no configured
    /// default, empty, or longer than [`MAX_TEXT_CHARS`] scalar values
    pub fn resolve(request: TtsRequest, defaults: &RequestDefaults) -> crate::error::Result<Self> {
        let text = match request.text {
            Some(text) => text,
            None => defaults
                .text
                .clone()
                .ok_or_else(|| TtsError::Validation("text is required".to_string()))?,
        };

        if text.is_empty() {
            return Err(TtsError::Validation("text must not be empty".to_string()));
        }

        let length = text.chars().count();
        if length > MAX_TEXT_CHARS {
            return Err(TtsError::Validation(format!(
                "text exceeds the maximum length of {MAX_TEXT_CHARS} characters (got {length})"
            )));
        }

        Ok(Self {
            text,
            voice_id: request.voice_id.unwrap_or(defaults.voice_id),
            output_format: request.output_format.unwrap_or(defaults.output_format),
        })
    }
}

/// Fully buffered audio payload from the upstream
pub struct SpeechAudio {
    /// Opaque audio bytes, relayed verbatim
    pub audio: Bytes,
    /// Media type derived from the requested output format
    pub media_type: &'static str,
    /// Duration reported by upstream, when present
    pub duration: Option<String>,
}

impl SpeechAudio {
    /// Convert the buffered audio into an axum HTTP response
    pub fn into_response(self) -> Response {
        let duration = self.duration.unwrap_or_else(|| "unknown".to_string());

        Response::builder()
            .header(http::header::CONTENT_TYPE, self.media_type)
            .header(AUDIO_DURATION_HEADER, duration)
            .body(Body::from(self.audio))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::empty())
                    .expect("empty response must build")
            })
    }
}

/// Live audio relay from the upstream streaming endpoint
pub struct StreamingAudio {
    /// Requested output format, echoed in the response headers
    pub format: OutputFormat,
    /// Chunked byte stream from upstream
    pub stream: AudioStream,
}

impl StreamingAudio {
    /// Convert the live relay into a chunked axum HTTP response
    ///
    /// Chunks are forwarded in arrival order. A mid-stream upstream failure
    /// after this point truncates the body; the status line is already gone.
    pub fn into_response(self) -> Response {
        Response::builder()
            .header(http::header::CONTENT_TYPE, self.format.media_type())
            .header(http::header::TRANSFER_ENCODING, "chunked")
            .header(AUDIO_FORMAT_HEADER, self.format.as_str())
            .body(Body::from_stream(self.stream))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::empty())
                    .expect("empty response must build")
            })
    }
}
