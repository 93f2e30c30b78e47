//! Configuration system for the pipeline model.
//!
//! This module defines the configuration structures used to parameterize the
//! decode and writeback stages. It provides:
//! 1. **Defaults:** Reset PC, enabled extensions and data memory size.
//! 2. **Structures:** Hierarchical config for general, ISA and memory settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every section is optional; missing fields fall back to the defaults. The
//! extension defaults follow the `m-extension` and `zicsr` Cargo features.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::RESET_PC;
use crate::common::error::ConfigError;

/// Default configuration constants for the model.
mod defaults {
    /// Data memory size in bytes (64 KiB).
    pub const MEMORY_SIZE: usize = 64 * 1024;

    /// Multiply/divide follows the build-time feature.
    pub const M_EXTENSION: bool = cfg!(feature = "m-extension");

    /// CSR support follows the build-time feature.
    pub const ZICSR: bool = cfg!(feature = "zicsr");
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rv32hls_core::config::Config;
///
/// let json = r#"{
///     "general": { "reset_pc": 4092 },
///     "isa": { "m_extension": false },
///     "memory": { "size_bytes": 4096 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.reset_pc, 4092);
/// assert!(!config.isa.m_extension);
/// assert_eq!(config.memory.size_bytes, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General model settings
    pub general: GeneralConfig,
    /// Enabled instruction-set extensions
    pub isa: IsaConfig,
    /// Data memory configuration
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`ConfigError::Parse`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`ConfigError::Io`] / [`ConfigError::Parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General model settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// PC the decode stage holds before the first instruction arrives.
    /// The first fetched PC must be `reset_pc + 4`.
    #[serde(default = "GeneralConfig::default_reset_pc")]
    pub reset_pc: u32,
}

impl GeneralConfig {
    /// Returns the default pre-start program counter.
    const fn default_reset_pc() -> u32 {
        RESET_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reset_pc: Self::default_reset_pc(),
        }
    }
}

/// Optional extensions understood by the decoder.
///
/// A disabled extension turns its instructions into
/// [`DecodeError::UnimplementedFeature`](crate::common::error::DecodeError::UnimplementedFeature).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct IsaConfig {
    /// MUL, MULH, MULHSU, MULHU, DIV, DIVU, REM, REMU
    #[serde(default = "IsaConfig::default_m_extension")]
    pub m_extension: bool,

    /// CSRRW, CSRRS, CSRRC, CSRRWI, CSRRSI, CSRRCI, ECALL, EBREAK
    #[serde(default = "IsaConfig::default_zicsr")]
    pub zicsr: bool,
}

impl IsaConfig {
    /// Returns the build-time default for the M extension.
    const fn default_m_extension() -> bool {
        defaults::M_EXTENSION
    }

    /// Returns the build-time default for Zicsr.
    const fn default_zicsr() -> bool {
        defaults::ZICSR
    }
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            m_extension: Self::default_m_extension(),
            zicsr: Self::default_zicsr(),
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Size of the flat data memory in bytes (rounded down to whole words)
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default data memory size.
    const fn default_size_bytes() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: Self::default_size_bytes(),
        }
    }
}
