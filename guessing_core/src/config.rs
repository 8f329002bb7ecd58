//! Engine configuration and the attribute-family table.

use entity_catalog::AttributeRef;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Namespace of the predicates in the default family table.
pub const DEFAULT_NAMESPACE: &str = "https://pokemonkg.org/ontology#";

/// Placeholder replaced by the value label in question templates.
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// One attribute the selector may ask about, and how to phrase it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFamily {
    pub attribute: AttributeRef,

    /// Question text, with `{label}` standing for the value's label.
    pub template: String,

    /// For inverse attributes: only subjects of this type count as values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<String>,
}

impl AttributeFamily {
    /// A family over an attribute read directly off the entity.
    pub fn direct(predicate: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            attribute: AttributeRef::direct(predicate),
            template: template.into(),
            subject_type: None,
        }
    }

    /// A family over a relation traversed in reverse, restricted to subjects of `subject_type`.
    pub fn inverse(
        predicate: impl Into<String>,
        subject_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            attribute: AttributeRef::inverse(predicate),
            template: template.into(),
            subject_type: Some(subject_type.into()),
        }
    }

    /// Question text for a value label.
    pub fn render(&self, label: &str) -> String {
        self.template.replace(LABEL_PLACEHOLDER, label)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.template.contains(LABEL_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "template for {} has no {LABEL_PLACEHOLDER} placeholder",
                self.attribute
            )));
        }
        match (self.attribute.is_inverse(), &self.subject_type) {
            (true, None) => Err(ConfigError::Invalid(format!(
                "inverse family {} needs a subject_type",
                self.attribute
            ))),
            (false, Some(_)) => Err(ConfigError::Invalid(format!(
                "subject_type is only meaningful for inverse families, not {}",
                self.attribute
            ))),
            _ => Ok(()),
        }
    }
}

/// Settings for the question selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Maximum number of distinct values fetched per family.
    pub value_limit: usize,

    /// The chosen question is drawn uniformly from this many best-ranked candidates.
    pub top_k: usize,

    /// Category decorations stripped from the front of value labels.
    pub label_prefixes: Vec<String>,

    /// Attribute families, in the order they are queried.
    pub families: Vec<AttributeFamily>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let ns = |local: &str| format!("{DEFAULT_NAMESPACE}{local}");
        Self {
            value_limit: 40,
            top_k: 4,
            label_prefixes: [
                "PokéType:",
                "PokeType:",
                "Type:",
                "EggGroup:",
                "Egg group:",
                "Shape:",
                "Colour:",
                "Color:",
                "Habitat:",
                "Location:",
                "Generation:",
                "Pokédex:",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            families: vec![
                AttributeFamily::direct(ns("hasType"), "Is it {label} type?"),
                AttributeFamily::direct(ns("hasColour"), "Is it {label} color?"),
                AttributeFamily::direct(ns("hasShape"), "Is it {label} shape?"),
                AttributeFamily::direct(ns("inEggGroup"), "Is it in the {label} egg group?"),
                AttributeFamily::direct(ns("foundIn"), "Is it found in {label}?"),
                AttributeFamily::inverse(
                    ns("featuresSpecies"),
                    ns("Generation"),
                    "Is it from {label}?",
                ),
            ],
        }
    }
}

impl SelectorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.value_limit == 0 {
            return Err(ConfigError::Invalid("selector.value_limit must be at least 1".into()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("selector.top_k must be at least 1".into()));
        }
        self.families.iter().try_for_each(AttributeFamily::validate)
    }
}

/// Settings for the game engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Remaining-candidate count at or below which the engine starts guessing.
    pub guess_threshold: u64,

    /// Cap on the candidates returned by `list_candidates`.
    pub candidate_list_limit: usize,

    pub selector: SelectorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guess_threshold: 2,
            candidate_list_limit: 1000,
            selector: SelectorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selector.validate()
    }
}
