//! Configuration loading and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mirror_core::scoring::ScoringConfig;
use mirror_core::summary::DEFAULT_SUMMARY_MODEL;
use mirror_core::traits::SummaryProvider;

use crate::anthropic::AnthropicProvider;
use crate::gemini::GeminiProvider;

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mirror.toml";

/// Configuration for a single summary provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Anthropic {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, base_url) = match self {
            ProviderConfig::Gemini { base_url, .. } => ("Gemini", base_url),
            ProviderConfig::Anthropic { base_url, .. } => ("Anthropic", base_url),
        };
        f.debug_struct(name)
            .field("api_key", &"***")
            .field("base_url", base_url)
            .finish()
    }
}

impl ProviderConfig {
    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::Gemini { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                api_key
            }
        }
    }

    fn api_key_mut(&mut self) -> &mut String {
        match self {
            ProviderConfig::Gemini { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                api_key
            }
        }
    }
}

/// Configuration problems that callers may want to tell apart.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("provider '{0}' is not configured")]
    UnknownProvider(String),

    #[error("provider '{0}' has an empty API key")]
    MissingApiKey(String),
}

/// Top-level archetype mirror configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used for AI summaries.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model used for AI summaries.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Directory holding the reference JSON documents. Embedded data is
    /// used when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    DEFAULT_SUMMARY_MODEL.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./mirror-reports")
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            data_dir: None,
            output_dir: default_output_dir(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
        },
        ProviderConfig::Anthropic { api_key, base_url } => ProviderConfig::Anthropic {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mirror.toml` in the current directory
/// 2. `~/.config/mirror/config.toml`
///
/// Environment variable overrides: `MIRROR_GEMINI_KEY`, `MIRROR_ANTHROPIC_KEY`.
pub fn load_config() -> Result<MirrorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MirrorConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(ConfigError::NotFound(p.to_path_buf()).into()),
        None => {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            if local.exists() {
                Some(local)
            } else {
                global_config_path().filter(|p| p.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MirrorConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MirrorConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

fn apply_env_overrides(config: &mut MirrorConfig) {
    if let Ok(key) = std::env::var("MIRROR_GEMINI_KEY") {
        *config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            })
            .api_key_mut() = key;
    }

    if let Ok(key) = std::env::var("MIRROR_ANTHROPIC_KEY") {
        *config
            .providers
            .entry("anthropic".into())
            .or_insert(ProviderConfig::Anthropic {
                api_key: String::new(),
                base_url: None,
            })
            .api_key_mut() = key;
    }
}

/// `~/.config/mirror/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("mirror")
            .join("config.toml")
    })
}

/// Create a provider instance from its configuration.
pub fn create_provider(name: &str, config: &ProviderConfig) -> Result<Box<dyn SummaryProvider>> {
    if config.api_key().trim().is_empty() {
        return Err(ConfigError::MissingApiKey(name.to_string()).into());
    }
    match config {
        ProviderConfig::Gemini { api_key, base_url } => {
            Ok(Box::new(GeminiProvider::new(api_key, base_url.clone())?))
        }
        ProviderConfig::Anthropic { api_key, base_url } => {
            Ok(Box::new(AnthropicProvider::new(api_key, base_url.clone())?))
        }
    }
}

/// Build the default summary provider, or `None` when the summary feature
/// is not configured.
pub fn summary_provider(config: &MirrorConfig) -> Option<Box<dyn SummaryProvider>> {
    let name = &config.default_provider;
    let Some(provider_config) = config.providers.get(name) else {
        tracing::warn!("{}", ConfigError::UnknownProvider(name.clone()));
        return None;
    };
    match create_provider(name, provider_config) {
        Ok(provider) => Some(provider),
        Err(e) => {
            tracing::warn!("AI summary disabled: {e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MIRROR_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MIRROR_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MIRROR_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_MIRROR_UNSET_VAR_XYZ}"), "");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_MIRROR_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_MIRROR_SELF_REF", "a${_MIRROR_SELF_REF}b");
        assert_eq!(
            resolve_env_vars("key=${_MIRROR_SELF_REF}!"),
            "key=a${_MIRROR_SELF_REF}b!"
        );
        assert_eq!(
            resolve_env_vars("${_MIRROR_SELF_REF}${_MIRROR_SELF_REF}"),
            "a${_MIRROR_SELF_REF}ba${_MIRROR_SELF_REF}b"
        );
        std::env::remove_var("_MIRROR_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = MirrorConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.default_model, "gemini-2.5-flash-lite");
        assert_eq!(config.output_dir, PathBuf::from("./mirror-reports"));
        assert!(config.data_dir.is_none());
        assert_eq!(config.scoring.fallback_primary, "pleaser");
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
default_provider = "anthropic"
default_model = "claude-haiku-4-5-20251001"
data_dir = "./data"

[providers.gemini]
type = "gemini"
api_key = "g-test"

[providers.anthropic]
type = "anthropic"
api_key = "sk-test"
base_url = "http://localhost:9999"

[scoring]
fallback_primary = "rebel"
fallback_secondary = "joker"
"#;
        let config: MirrorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert!(matches!(
            config.providers.get("anthropic"),
            Some(ProviderConfig::Anthropic { base_url: Some(_), .. })
        ));
        assert_eq!(config.data_dir, Some(PathBuf::from("./data")));
        assert_eq!(config.scoring.fallback_primary, "rebel");
        assert_eq!(config.scoring.fallback_secondary, "joker");
    }

    #[test]
    fn debug_masks_api_key() {
        let config = ProviderConfig::Gemini {
            api_key: "super-secret".into(),
            base_url: None,
        };
        let shown = format!("{config:?}");
        assert!(shown.contains("***"));
        assert!(!shown.contains("super-secret"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "default_provider = \"gemini\"\n\n[providers.gemini]\ntype = \"gemini\"\napi_key = \"${_MIRROR_CFG_KEY}\"\n",
        )
        .unwrap();
        std::env::set_var("_MIRROR_CFG_KEY", "from-env");

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.providers["gemini"].api_key(), "from-env");
        std::env::remove_var("_MIRROR_CFG_KEY");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn empty_key_cannot_create_provider() {
        let config = ProviderConfig::Gemini {
            api_key: "  ".into(),
            base_url: None,
        };
        let err = create_provider("gemini", &config).err().unwrap();
        assert!(err.to_string().contains("empty API key"));
    }

    #[test]
    fn summary_provider_follows_default() {
        let mut config = MirrorConfig::default();
        assert!(summary_provider(&config).is_none());

        config.providers.insert(
            "gemini".into(),
            ProviderConfig::Gemini {
                api_key: "key".into(),
                base_url: None,
            },
        );
        let provider = summary_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");

        config.default_provider = "anthropic".into();
        assert!(summary_provider(&config).is_none());
    }
}
