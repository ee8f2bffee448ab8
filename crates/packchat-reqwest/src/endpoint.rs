//! Remote endpoints and the base URL each one is resolved against.

use std::fmt;

use url::Url;

use crate::config::{
    API_URL_ENV, DEFAULT_OPENAI_BASE_URL, LLM_API_URL_ENV, OPENAI_BASE_URL_ENV, ReqwestConfig,
};

/// A remote operation the client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST {API_URL}/login`
    Login,
    /// `GET {API_URL}/packman/list_packs`
    ListPacks,
    /// `POST {LLM_API_URL}/deepquery`
    DeepQuery,
    /// `POST {OPENAI_BASE_URL}/chat/completions`
    ChatCompletions,
}

impl Endpoint {
    /// Path appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::ListPacks => "packman/list_packs",
            Self::DeepQuery => "deepquery",
            Self::ChatCompletions => "chat/completions",
        }
    }

    /// Environment variable holding the base URL.
    pub fn base_var(self) -> &'static str {
        match self {
            Self::Login | Self::ListPacks => API_URL_ENV,
            Self::DeepQuery => LLM_API_URL_ENV,
            Self::ChatCompletions => OPENAI_BASE_URL_ENV,
        }
    }

    fn default_base(self) -> Option<&'static str> {
        match self {
            Self::ChatCompletions => Some(DEFAULT_OPENAI_BASE_URL),
            _ => None,
        }
    }

    fn base_override(self, config: &ReqwestConfig) -> Option<&str> {
        match self {
            Self::Login | Self::ListPacks => config.api_url.as_deref(),
            Self::DeepQuery => config.llm_api_url.as_deref(),
            Self::ChatCompletions => config.openai_base_url.as_deref(),
        }
    }

    /// Resolves the full URL: configured override first, then the
    /// environment (read now, not cached), then the built-in default.
    pub fn resolve(self, config: &ReqwestConfig) -> packchat_core::Result<Url> {
        let from_env = std::env::var(self.base_var()).ok();
        self.resolve_with(self.base_override(config), from_env.as_deref())
    }

    pub(crate) fn resolve_with(
        self,
        base_override: Option<&str>,
        from_env: Option<&str>,
    ) -> packchat_core::Result<Url> {
        let base = [base_override, from_env, self.default_base()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|base| !base.is_empty())
            .ok_or_else(|| {
                packchat_core::Error::configuration()
                    .with_message(format!("{} is not set", self.base_var()))
                    .with_context(format!("endpoint: {self}"))
            })?;

        let joined = format!("{}/{}", base.trim_end_matches('/'), self.path());
        Url::parse(&joined).map_err(|err| {
            packchat_core::Error::configuration()
                .with_message(format!("Invalid {} value", self.base_var()))
                .with_source(err)
                .with_context(format!("url: {joined}"))
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use packchat_core::ErrorKind;

    use super::*;

    #[test]
    fn test_override_wins_over_env() {
        let url = Endpoint::Login
            .resolve_with(Some("http://override:1"), Some("http://env:2"))
            .unwrap();
        assert_eq!(url.as_str(), "http://override:1/login");
    }

    #[test]
    fn test_env_and_trailing_slash() {
        let url = Endpoint::ListPacks
            .resolve_with(None, Some("http://api.local/v1/"))
            .unwrap();
        assert_eq!(url.as_str(), "http://api.local/v1/packman/list_packs");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let url = Endpoint::DeepQuery
            .resolve_with(Some("  "), Some("http://llm.local"))
            .unwrap();
        assert_eq!(url.as_str(), "http://llm.local/deepquery");
    }

    #[test]
    fn test_missing_base_is_configuration_error() {
        let error = Endpoint::DeepQuery.resolve_with(None, None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().contains("LLM_API_URL"));
    }

    #[test]
    fn test_openai_has_default() {
        let url = Endpoint::ChatCompletions.resolve_with(None, None).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_invalid_base() {
        let error = Endpoint::Login.resolve_with(Some("not a url"), None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
