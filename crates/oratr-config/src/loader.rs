use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream credential is empty or the upstream
    /// timeout is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream.api_key.expose_secret().is_empty() {
            anyhow::bail!("upstream.api_key must not be empty");
        }

        if self.upstream.timeout_seconds == 0 {
            anyhow::bail!("upstream.timeout_seconds must be greater than 0");
        }

        // tower-http rejects this combination when the layer is applied
        if let Some(ref cors) = self.server.cors
            && cors.credentials
            && matches!(cors.origins, crate::cors::AnyOrArray::Any)
        {
            anyhow::bail!("server.cors.credentials requires an explicit origins list, not \"*\"");
        }

        Ok(())
    }
}
