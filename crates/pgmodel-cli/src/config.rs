use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_dir: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config_dir = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let raw = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "invalid config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self { config_dir, file })
    }

    pub fn resolve_path(&self, p: impl AsRef<Path>) -> PathBuf {
        let p = p.as_ref();
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.config_dir.join(p)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: String,

    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

/// One `[[models]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Source file, relative to the config file.
    pub source: String,
    /// Module path the generated file imports the structs from.
    pub module: String,
    /// Generated file, relative to the config file.
    pub output: String,
    pub prefix: Option<String>,
    pub table: String,
    pub model: String,
    #[serde(default)]
    pub queries: Vec<String>,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        for m in &mut self.models {
            m.source = expand_env_vars(&m.source)?;
            m.module = expand_env_vars(&m.module)?;
            m.output = expand_env_vars(&m.output)?;
            m.table = expand_env_vars(&m.table)?;
            if let Some(prefix) = m.prefix.as_mut() {
                *prefix = expand_env_vars(prefix)?;
            }
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }

        if self.models.is_empty() {
            anyhow::bail!("at least one [[models]] entry is required");
        }

        let mut outputs = HashSet::<&str>::new();
        for m in &self.models {
            if m.model.trim().is_empty() {
                anyhow::bail!("models.model must not be empty");
            }
            for (key, value) in [
                ("source", &m.source),
                ("module", &m.module),
                ("output", &m.output),
                ("table", &m.table),
            ] {
                if value.trim().is_empty() {
                    anyhow::bail!("models.{key} must not be empty (model: {})", m.model);
                }
            }
            if !outputs.insert(m.output.as_str()) {
                anyhow::bail!("duplicate models.output: {}", m.output);
            }
        }

        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}}}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
