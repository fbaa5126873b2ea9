//! Generator configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::traits::QuestionGenerator;

use crate::ollama::{self, OllamaGenerator};
use crate::openai::{self, OpenAiGenerator};
use crate::retry::RetryingGenerator;
use crate::template::TemplateGenerator;

/// Name of the built-in offline generator, always available.
pub const TEMPLATE_GENERATOR: &str = "template";

/// Configuration for a single question generator.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratorConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default = "default_openai_model")]
        model: String,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
    Template {},
}

impl GeneratorConfig {
    /// Backend kind, as written in the `type` key.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorConfig::OpenAI { .. } => "openai",
            GeneratorConfig::Ollama { .. } => "ollama",
            GeneratorConfig::Template {} => "template",
        }
    }

    /// Model name, for backends that have one.
    pub fn model(&self) -> Option<&str> {
        match self {
            GeneratorConfig::OpenAI { model, .. } | GeneratorConfig::Ollama { model, .. } => {
                Some(model)
            }
            GeneratorConfig::Template {} => None,
        }
    }

    /// Endpoint, for backends that have one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GeneratorConfig::OpenAI { base_url, .. } => {
                Some(base_url.as_deref().unwrap_or(openai::DEFAULT_BASE_URL))
            }
            GeneratorConfig::Ollama { base_url, .. } => Some(base_url),
            GeneratorConfig::Template {} => None,
        }
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorConfig::OpenAI {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            GeneratorConfig::Ollama { base_url, model } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            GeneratorConfig::Template {} => f.debug_struct("Template").finish(),
        }
    }
}

fn default_ollama_url() -> String {
    ollama::DEFAULT_BASE_URL.to_string()
}
fn default_ollama_model() -> String {
    ollama::DEFAULT_MODEL.to_string()
}
fn default_openai_model() -> String {
    openai::DEFAULT_MODEL.to_string()
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Generator configurations keyed by name.
    #[serde(default)]
    pub generators: HashMap<String, GeneratorConfig>,
    /// Generator used when none is named on the command line.
    #[serde(default = "default_generator")]
    pub default_generator: String,
    /// Sampling temperature for chat generators.
    #[serde(default)]
    pub temperature: f64,
    /// Token limit for a single generated question.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Max retries on transient generator errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Output directory for quiz files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Gazetteer used to annotate plain-text input.
    #[serde(default)]
    pub gazetteer: Option<PathBuf>,
}

fn default_generator() -> String {
    TEMPLATE_GENERATOR.to_string()
}
fn default_max_tokens() -> u32 {
    128
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizforge-output")
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            generators: HashMap::new(),
            default_generator: default_generator(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            output_dir: default_output_dir(),
            gazetteer: None,
        }
    }
}

impl QuizforgeConfig {
    /// Look up a generator by name. `template` resolves even when unconfigured.
    pub fn generator(&self, name: &str) -> Option<GeneratorConfig> {
        self.generators.get(name).cloned().or_else(|| {
            (name == TEMPLATE_GENERATOR).then_some(GeneratorConfig::Template {})
        })
    }

    /// Configured generator names, sorted, including the built-in template.
    pub fn generator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.generators.keys().cloned().collect();
        if !self.generators.contains_key(TEMPLATE_GENERATOR) {
            names.push(TEMPLATE_GENERATOR.to_string());
        }
        names.sort();
        names
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        from = start + value.len();
    }
    result
}

fn resolve_generator_config(config: &GeneratorConfig) -> GeneratorConfig {
    match config {
        GeneratorConfig::OpenAI {
            api_key,
            base_url,
            model,
        } => GeneratorConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: resolve_env_vars(model),
        },
        GeneratorConfig::Ollama { base_url, model } => GeneratorConfig::Ollama {
            base_url: resolve_env_vars(base_url),
            model: resolve_env_vars(model),
        },
        GeneratorConfig::Template {} => GeneratorConfig::Template {},
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// `QUIZFORGE_OPENAI_KEY` overrides the key of the `openai` generator.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    if let Ok(key) = std::env::var("QUIZFORGE_OPENAI_KEY") {
        apply_openai_key(&mut config, key);
    }

    Ok(config)
}

/// Parse a config string and resolve `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<QuizforgeConfig> {
    let mut config: QuizforgeConfig = toml::from_str(content)?;
    config.generators = config
        .generators
        .iter()
        .map(|(k, v)| (k.clone(), resolve_generator_config(v)))
        .collect();
    Ok(config)
}

fn apply_openai_key(config: &mut QuizforgeConfig, key: String) {
    let entry = config
        .generators
        .entry("openai".into())
        .or_insert(GeneratorConfig::OpenAI {
            api_key: String::new(),
            base_url: None,
            model: default_openai_model(),
        });
    if let GeneratorConfig::OpenAI { api_key, .. } = entry {
        *api_key = key;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Build the named generator.
///
/// Network-backed generators are wrapped in a [`RetryingGenerator`] using the
/// configured retry budget.
pub fn create_generator(name: &str, config: &QuizforgeConfig) -> Result<Arc<dyn QuestionGenerator>> {
    let Some(generator_config) = config.generator(name) else {
        anyhow::bail!(
            "unknown generator '{name}'. Configured: {}",
            config.generator_names().join(", ")
        );
    };
    tracing::debug!(generator = name, config = ?generator_config, "creating generator");

    let backend: Arc<dyn QuestionGenerator> = match generator_config {
        GeneratorConfig::Template {} => return Ok(Arc::new(TemplateGenerator::new())),
        GeneratorConfig::OpenAI {
            api_key,
            base_url,
            model,
        } => {
            if api_key.is_empty() {
                anyhow::bail!(
                    "generator '{name}' has no API key. Set api_key or QUIZFORGE_OPENAI_KEY"
                );
            }
            Arc::new(
                OpenAiGenerator::new(&api_key, base_url, &model)?
                    .with_sampling(config.temperature, config.max_tokens),
            )
        }
        GeneratorConfig::Ollama { base_url, model } => Arc::new(
            OllamaGenerator::new(&base_url, &model)?.with_temperature(config.temperature),
        ),
    };

    Ok(Arc::new(RetryingGenerator::new(
        backend,
        config.max_retries,
        Duration::from_millis(config.retry_delay_ms),
    )))
}
