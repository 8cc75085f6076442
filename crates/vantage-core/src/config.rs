use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine-wide tunables shared by the rule engine, the refactor engine, and
/// the server binary. Loaded the way the teacher platform loads its own
/// `AppConfig`: defaults, overridden by environment variables, overridden by
/// an optional TOML file, then validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub rule_timeout_ms: u64,
    pub max_suggestions_per_violation: usize,
    pub enable_auto_fix: bool,
    pub min_confidence_for_auto_fix: u8,
    pub dev_mode: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rule_timeout_ms: 5000,
            max_suggestions_per_violation: 3,
            enable_auto_fix: false,
            min_confidence_for_auto_fix: 80,
            dev_mode: false,
        }
    }
}

impl EngineSettings {
    /// `Self::default()` → env vars → optional TOML file → `validate()`.
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = Self::default();
        settings.apply_env();
        if let Some(path) = Self::config_file_path() {
            settings.apply_file(&path)?;
        }
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("VANTAGE_RULE_TIMEOUT_MS") {
            if let Ok(parsed) = v.parse() {
                self.rule_timeout_ms = parsed;
            }
        }
        if let Ok(v) = std::env::var("VANTAGE_MAX_SUGGESTIONS_PER_VIOLATION") {
            if let Ok(parsed) = v.parse() {
                self.max_suggestions_per_violation = parsed;
            }
        }
        if let Ok(v) = std::env::var("VANTAGE_ENABLE_AUTO_FIX") {
            self.enable_auto_fix = v.eq_ignore_ascii_case("true") || v == "1";
        }
        if let Ok(v) = std::env::var("VANTAGE_MIN_CONFIDENCE_FOR_AUTO_FIX") {
            if let Ok(parsed) = v.parse() {
                self.min_confidence_for_auto_fix = parsed;
            }
        }
        if let Ok(v) = std::env::var("VANTAGE_DEV_MODE") {
            self.dev_mode = v.eq_ignore_ascii_case("true") || v == "1";
        }
    }

    fn config_file_path() -> Option<std::path::PathBuf> {
        if let Ok(path) = std::env::var("VANTAGE_CONFIG_FILE") {
            return Some(std::path::PathBuf::from(path));
        }
        for candidate in ["./config/default.toml", "./vantage.toml"] {
            if Path::new(candidate).exists() {
                return Some(std::path::PathBuf::from(candidate));
            }
        }
        None
    }

    fn apply_file(&mut self, path: &Path) -> anyhow::Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let contents = std::fs::read_to_string(path)?;
        let from_file: PartialEngineSettings = toml::from_str(&contents)?;
        from_file.merge_into(self);
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.rule_timeout_ms == 0 {
            anyhow::bail!("rule_timeout_ms must be greater than zero");
        }
        if self.max_suggestions_per_violation == 0 {
            anyhow::bail!("max_suggestions_per_violation must be greater than zero");
        }
        if self.min_confidence_for_auto_fix > 100 {
            anyhow::bail!("min_confidence_for_auto_fix must be between 0 and 100");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialEngineSettings {
    rule_timeout_ms: Option<u64>,
    max_suggestions_per_violation: Option<usize>,
    enable_auto_fix: Option<bool>,
    min_confidence_for_auto_fix: Option<u8>,
    dev_mode: Option<bool>,
}

impl PartialEngineSettings {
    fn merge_into(self, target: &mut EngineSettings) {
        if let Some(v) = self.rule_timeout_ms {
            target.rule_timeout_ms = v;
        }
        if let Some(v) = self.max_suggestions_per_violation {
            target.max_suggestions_per_violation = v;
        }
        if let Some(v) = self.enable_auto_fix {
            target.enable_auto_fix = v;
        }
        if let Some(v) = self.min_confidence_for_auto_fix {
            target.min_confidence_for_auto_fix = v;
        }
        if let Some(v) = self.dev_mode {
            target.dev_mode = v;
        }
    }
}
