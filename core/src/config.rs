use anyhow::{Context, Result};
use tracing::{info, warn};

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

// Netlify dev server, used when the deployment has no public URL yet
pub const DEFAULT_SITE_URL: &str = "https://localhost:8888";

/// Built once at start-up and handed to [`crate::Estimator::new`].
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    pub api_key: Option<String>,
    pub site_url: String,
    pub api_base: String,
}

impl EstimatorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            site_url: DEFAULT_SITE_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    // A missing key is not fatal; the upstream rejects the call instead.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = non_empty_var("OPENROUTER_API_KEY")?;
        if api_key.is_none() {
            warn!("OPENROUTER_API_KEY is not set; upstream calls will be rejected");
        }

        let site_url = non_empty_var("URL")?.unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let api_base =
            non_empty_var("OPENROUTER_API_BASE")?.unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        info!("Estimator configured. Upstream: {}, referer: {}", api_base, site_url);
        Ok(Self {
            api_key,
            site_url,
            api_base,
        })
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

fn non_empty_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(v) if v.is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid unicode", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let config = EstimatorConfig::new("k").with_api_base("http://127.0.0.1:9000/v1/");
        assert_eq!(config.completions_url(), "http://127.0.0.1:9000/v1/chat/completions");
    }

    #[test]
    fn defaults_point_at_openrouter() {
        let config = EstimatorConfig::new("k");
        assert_eq!(config.completions_url(), "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(config.site_url, "https://localhost:8888");
    }
}
