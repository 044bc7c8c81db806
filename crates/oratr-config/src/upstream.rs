use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Synthesis upstream configuration
///
/// The `api_key` is normally supplied via `{{ env.UPLIFT_AI_API_KEY }}` in the
/// config file; a missing variable fails configuration load at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Bearer credential for the synthesis provider
    pub api_key: SecretString,
    /// Base URL of the synthesis API
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Voice token applied when a request omits `voice_id`
    #[serde(default)]
    pub default_voice: Option<String>,
    /// Output format token applied when a request omits `output_format`
    #[serde(default)]
    pub default_format: Option<String>,
    /// Text synthesized when a request omits `text`
    ///
    /// When unset, requests without text are rejected.
    #[serde(default)]
    pub default_text: Option<String>,
    /// Timeout for buffered upstream calls, in seconds
    ///
    /// Streaming calls are only bounded by the connect timeout, since a
    /// long-running audio stream must not be cut off mid-relay.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> Url {
    Url::parse("https://api.upliftai.org/v1").expect("default base URL must parse")
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    120
}
