use crate::orders::{Taxonomy, default_color_synonyms, default_size_orders, normalize_color};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::Path};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub docx: DocxConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyConfig {
    /// Replaces the built-in size orders entirely when present.
    pub size_orders: Option<BTreeMap<String, Vec<String>>>,
    /// Merged over the built-in synonyms; keys are matched case-insensitively.
    #[serde(default)]
    pub color_synonyms: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size_pt")]
    pub font_size_pt: f64,
    #[serde(default = "default_table_font_size_pt")]
    pub table_font_size_pt: f64,
    #[serde(default = "default_margin_in")]
    pub margin_in: f64,
    #[serde(default = "default_page_width_in")]
    pub page_width_in: f64,
}

fn default_font() -> String {
    "Calibri".to_string()
}

fn default_font_size_pt() -> f64 {
    10.0
}

fn default_table_font_size_pt() -> f64 {
    9.0
}

fn default_margin_in() -> f64 {
    0.2
}

fn default_page_width_in() -> f64 {
    8.5
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            font_size_pt: default_font_size_pt(),
            table_font_size_pt: default_table_font_size_pt(),
            margin_in: default_margin_in(),
            page_width_in: default_page_width_in(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("color synonym {synonym:?} -> {target:?} is not stable: {target:?} normalizes to {resolves_to:?}")]
    UnstableColorSynonym {
        synonym: String,
        target: String,
        resolves_to: String,
    },

    #[error("size order for category {0:?} is empty")]
    EmptySizeOrder(String),

    #[error("docx layout: {0}")]
    InvalidDocxLayout(String),
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` when given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// The immutable taxonomy the pipeline and report builder run against.
    pub fn taxonomy(&self) -> Taxonomy {
        let size_orders = self
            .taxonomy
            .size_orders
            .clone()
            .unwrap_or_else(default_size_orders);
        let mut color_synonyms = default_color_synonyms();
        for (k, v) in &self.taxonomy.color_synonyms {
            color_synonyms.insert(k.trim().to_lowercase(), v.trim().to_string());
        }
        Taxonomy::new(size_orders, color_synonyms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let taxonomy = self.taxonomy();

        if let Some(orders) = &self.taxonomy.size_orders {
            if let Some((cat, _)) = orders.iter().find(|(_, sizes)| sizes.is_empty()) {
                return Err(ConfigError::EmptySizeOrder(cat.clone()));
            }
        }

        // Every synonym target must normalize to itself.
        for (synonym, target) in taxonomy.color_synonyms() {
            let resolves_to = normalize_color(target, &taxonomy);
            if resolves_to != target {
                return Err(ConfigError::UnstableColorSynonym {
                    synonym: synonym.to_string(),
                    target: target.to_string(),
                    resolves_to,
                });
            }
        }

        let d = &self.docx;
        if d.font_size_pt <= 0.0 || d.table_font_size_pt <= 0.0 {
            return Err(ConfigError::InvalidDocxLayout(
                "font sizes must be positive".to_string(),
            ));
        }
        if d.margin_in < 0.0 || d.page_width_in <= 2.0 * d.margin_in {
            return Err(ConfigError::InvalidDocxLayout(format!(
                "page width {}in leaves no room inside {}in margins",
                d.page_width_in, d.margin_in
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = write_config("");
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.docx.font, "Calibri");
        assert_eq!(cfg.taxonomy(), Taxonomy::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let file = write_config(
            r#"
[taxonomy.size_orders]
"Hoodie" = ["s", "m", "l"]

[taxonomy.color_synonyms]
"Navy Blue" = "Navy"

[docx]
font = "Arial"
margin_in = 0.5
"#,
        );
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.docx.font, "Arial");
        assert_eq!(cfg.docx.margin_in, 0.5);
        assert_eq!(cfg.docx.page_width_in, 8.5);

        let tax = cfg.taxonomy();
        assert_eq!(tax.size_rank("Hoodie", "L"), 2);
        // size_orders replaces the built-in table
        assert!(tax.size_order("Short Sleeve").is_none());
        // color synonyms extend it
        assert_eq!(tax.color_synonym("navy blue"), Some("Navy"));
        assert_eq!(tax.color_synonym("light pink"), Some("Pink"));
    }

    #[test]
    fn test_rejects_unstable_synonym() {
        // "Pink Sand" would itself be remapped to "Sand"
        let file = write_config(
            r#"
[taxonomy.color_synonyms]
"rose" = "Pink Sand"
"pink sand" = "Sand"
"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("not stable"), "{err}");
    }

    #[test]
    fn test_rejects_lowercase_target() {
        let file = write_config("[taxonomy.color_synonyms]\n\"ivory\" = \"cream\"\n");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_rejects_empty_size_order() {
        let file = write_config("[taxonomy.size_orders]\n\"Hoodie\" = []\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Hoodie"), "{err}");
    }

    #[test]
    fn test_rejects_margins_wider_than_page() {
        let file = write_config("[docx]\nmargin_in = 5.0\n");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::load("/nonexistent/order_report.toml").is_err());
        assert!(Config::load_or_default(None).is_ok());
    }
}
