//! Zentrale Konfiguration des Light Editors.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Toggle-Standardwerte ────────────────────────────────────────────

/// Emissions-Stärke beim Einschalten ohne Backup.
pub const DEFAULT_EMISSION_STRENGTH: f32 = 1.0;
/// Emissions-Farbe beim Einschalten ohne Backup (RGBA: Weiß).
pub const DEFAULT_EMISSION_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Background-Stärke der World beim Einschalten ohne Backup.
pub const DEFAULT_ENVIRONMENT_STRENGTH: f32 = 1.0;

/// Dateiname der Optionen-Datei neben der Binary.
pub const CONFIG_FILE_NAME: &str = "light_editor.toml";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `light_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineOptions {
    // ── Toggles ─────────────────────────────────────────────────
    /// Emissions-Stärke beim Einschalten ohne Backup
    pub default_emission_strength: f32,
    /// Emissions-Farbe beim Einschalten ohne Backup (RGBA)
    pub default_emission_color: [f32; 4],
    /// Background-Stärke beim Einschalten ohne Backup
    pub default_environment_strength: f32,

    // ── Discovery ───────────────────────────────────────────────
    /// Emissive-Index cachen
    pub emissive_cache_enabled: bool,

    // ── Filter ──────────────────────────────────────────────────
    /// Filter-Text ohne Beachtung der Groß-/Kleinschreibung anwenden
    pub filter_case_insensitive: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_emission_strength: DEFAULT_EMISSION_STRENGTH,
            default_emission_color: DEFAULT_EMISSION_COLOR,
            default_environment_strength: DEFAULT_ENVIRONMENT_STRENGTH,
            emissive_cache_enabled: true,
            filter_case_insensitive: true,
        }
    }
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("light-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Emissions-Farbe als Vektor.
    pub fn emission_color(&self) -> glam::Vec4 {
        glam::Vec4::from_array(self.default_emission_color)
    }
}
