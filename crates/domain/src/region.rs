//! Region: a geographical reference entity with per-language names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{RefHubError, ValidationError};
use crate::id::RegionId;
use crate::language::Iso3Language;
use crate::time::{self, Timestamp};

/// Properties a region listing may be sorted by.
pub const SORTABLE_PROPERTIES: &[&str] = &["name", "created", "modified", "isActive"];

/// Name of a region in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTranslation {
    pub iso3_language: Iso3Language,
    pub name: String,
    pub is_default: bool,
}

/// A geographical reference region (e.g. "Western Europe").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub translations: Vec<RegionTranslation>,
    pub is_active: bool,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl Region {
    /// Create a builder for constructing a [`Region`].
    #[must_use]
    pub fn builder() -> RegionBuilder {
        RegionBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::Validation`] when `name` is empty, a translation
    /// name is empty, a language appears twice, or more than one translation
    /// is flagged as default.
    pub fn validate(&self) -> Result<(), RefHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let mut seen = HashSet::new();
        let mut defaults = 0;
        for trl in &self.translations {
            if trl.name.trim().is_empty() {
                return Err(
                    ValidationError::EmptyTranslationName(trl.iso3_language.to_string()).into(),
                );
            }
            if !seen.insert(&trl.iso3_language) {
                return Err(
                    ValidationError::DuplicateTranslation(trl.iso3_language.to_string()).into(),
                );
            }
            if trl.is_default {
                defaults += 1;
            }
        }
        if defaults > 1 {
            return Err(ValidationError::MultipleDefaultTranslations.into());
        }

        Ok(())
    }

    /// Resolve the name to display for `language`.
    ///
    /// Falls back to the default translation, then to the canonical name.
    #[must_use]
    pub fn name_in(&self, language: Option<&Iso3Language>) -> &str {
        language
            .and_then(|lang| self.translations.iter().find(|t| &t.iso3_language == lang))
            .or_else(|| self.translations.iter().find(|t| t.is_default))
            .map_or(self.name.as_str(), |t| t.name.as_str())
    }

    /// Whether the canonical name or a translation contains `filter`,
    /// ignoring case. Translations are restricted to `language` when given.
    #[must_use]
    pub fn matches(&self, filter: &str, language: Option<&Iso3Language>) -> bool {
        let needle = filter.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.translations
            .iter()
            .filter(|t| language.is_none_or(|lang| &t.iso3_language == lang))
            .any(|t| t.name.to_lowercase().contains(&needle))
    }
}

/// Step-by-step builder for [`Region`].
#[derive(Debug, Default)]
pub struct RegionBuilder {
    id: Option<RegionId>,
    name: Option<String>,
    translations: Vec<RegionTranslation>,
    is_active: Option<bool>,
    created: Option<Timestamp>,
    modified: Option<Timestamp>,
}

impl RegionBuilder {
    #[must_use]
    pub fn id(mut self, id: RegionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn translation(
        mut self,
        iso3_language: Iso3Language,
        name: impl Into<String>,
        is_default: bool,
    ) -> Self {
        self.translations.push(RegionTranslation {
            iso3_language,
            name: name.into(),
            is_default,
        });
        self
    }

    #[must_use]
    pub fn translations(mut self, translations: Vec<RegionTranslation>) -> Self {
        self.translations = translations;
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn created(mut self, created: Timestamp) -> Self {
        self.created = Some(created);
        self
    }

    #[must_use]
    pub fn modified(mut self, modified: Timestamp) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Consume the builder, validate, and return a [`Region`].
    ///
    /// A missing id is generated, `is_active` defaults to `true`, and missing
    /// timestamps default to now.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::Validation`] if any invariant fails.
    pub fn build(self) -> Result<Region, RefHubError> {
        let now = time::now();
        let created = self.created.unwrap_or(now);
        let region = Region {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            translations: self.translations,
            is_active: self.is_active.unwrap_or(true),
            created,
            modified: self.modified.unwrap_or(created),
        };
        region.validate()?;
        Ok(region)
    }
}
