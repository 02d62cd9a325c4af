use serde::{Deserialize, Serialize};

use crate::composite::{Resolver, CLUSTER_SPREAD, FINAL_DOUBLE_SHIFT, INITIAL_DOUBLE_SHIFT};
use crate::layout::MARGIN;

/// Hangul-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libstroke_core::Config` (flattened via serde)
/// - The syllable block margin
/// - Offsets used to assemble doubled consonants and final clusters
/// - The size of the per-character guide cache
///
/// # Example
///
/// ```rust
/// use libhangul::HangulConfig;
///
/// let config = HangulConfig::default();
/// assert_eq!(config.margin, 0.08);
/// let base = config.into_base();
/// assert_eq!(base.snap_tolerance, 16.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HangulConfig {
    /// Base configuration fields (tolerances, difficulty, matcher)
    #[serde(flatten)]
    pub base: libstroke_core::Config,

    /// Inset of the slot boxes from each edge of the syllable block
    pub margin: f64,

    /// Horizontal offset of each copy of a doubled initial (ㄲ ㄸ ㅃ ㅆ ㅉ)
    pub initial_double_shift: f64,

    /// Horizontal offset of each copy of a doubled final (ㄲ ㅆ)
    pub final_double_shift: f64,

    /// Spacing between the two letters of a final cluster (ㄳ ㄺ ...)
    pub cluster_spread: f64,

    /// Maximum number of characters kept in the guide cache
    pub max_cache_size: usize,
}

impl Default for HangulConfig {
    fn default() -> Self {
        Self {
            base: libstroke_core::Config::default(),
            margin: MARGIN,
            initial_double_shift: INITIAL_DOUBLE_SHIFT,
            final_double_shift: FINAL_DOUBLE_SHIFT,
            cluster_spread: CLUSTER_SPREAD,
            max_cache_size: 256,
        }
    }
}

impl HangulConfig {
    /// Convert this hangul config into the base config
    pub fn into_base(self) -> libstroke_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libstroke_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libstroke_core::Config {
        &mut self.base
    }

    /// Glyph resolver using the configured offsets
    pub fn resolver(&self) -> Resolver {
        Resolver {
            initial_double_shift: self.initial_double_shift,
            final_double_shift: self.final_double_shift,
            cluster_spread: self.cluster_spread,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libstroke_core::Difficulty;

    #[test]
    fn flattened_toml_reads_base_and_hangul_fields() {
        let cfg = HangulConfig::from_toml_str(
            "difficulty = \"strict\"\nmargin = 0.1\nmax_cache_size = 8\n",
        )
        .unwrap();
        assert_eq!(cfg.base.difficulty, Difficulty::Strict);
        assert_eq!(cfg.margin, 0.1);
        assert_eq!(cfg.max_cache_size, 8);
        assert_eq!(cfg.final_double_shift, FINAL_DOUBLE_SHIFT);
        assert_eq!(cfg.base.done_threshold, 0.86);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hangul.toml");
        let mut cfg = HangulConfig::default();
        cfg.margin = 0.1;
        cfg.base.difficulty = Difficulty::Strict;
        cfg.save_toml(&path).unwrap();
        assert_eq!(HangulConfig::load_toml(&path).unwrap(), cfg);
    }

    #[test]
    fn resolver_uses_configured_offsets() {
        let mut cfg = HangulConfig::default();
        cfg.cluster_spread = 0.3;
        assert_eq!(cfg.resolver().cluster_spread, 0.3);
        assert_eq!(cfg.resolver().initial_double_shift, INITIAL_DOUBLE_SHIFT);
    }
}
