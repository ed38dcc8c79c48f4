//! User settings passed explicitly to every aggregated call.

use miqat_types::{Locale, MiqatError, ModelVariant, NotificationTimeOption};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Hijri adjustment is clamped to this many days either way.
pub const MAX_HIJRI_ADJUSTMENT: i64 = 30;
/// Bound enforced by [`SettingsBuilder::strict_adjustment`].
pub const STRICT_HIJRI_ADJUSTMENT: i64 = 2;

/// One reminder the user has configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub option: NotificationTimeOption,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl NotificationPreference {
    pub fn enabled(option: NotificationTimeOption) -> Self {
        Self { option, enabled: true }
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub locale: Locale,
    /// Hijri day offset. Clamped to [-30, 30].
    pub hijri_adjustment: i64,
    /// Reject out-of-range coordinates with `InvalidCoordinate`.
    pub validate_coordinates: bool,
    pub model: ModelVariant,
    pub notifications: Vec<NotificationPreference>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            hijri_adjustment: 0,
            validate_coordinates: true,
            model: ModelVariant::default(),
            notifications: Vec::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn hijri_adjustment(mut self, adjustment: i64) -> Self {
        self.hijri_adjustment = adjustment.clamp(-MAX_HIJRI_ADJUSTMENT, MAX_HIJRI_ADJUSTMENT);
        self
    }

    pub fn validate_coordinates(mut self, validate: bool) -> Self {
        self.validate_coordinates = validate;
        self
    }

    pub fn model(mut self, model: ModelVariant) -> Self {
        self.model = model;
        self
    }

    pub fn add_notification(mut self, option: NotificationTimeOption) -> Self {
        self.notifications.push(NotificationPreference::enabled(option));
        self
    }

    /// Parses settings saved by [`Settings::to_json`]. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` on malformed JSON, or for a stored
    /// reminder with no time or an offset beyond one day.
    pub fn from_json(json: &str) -> Result<Self, MiqatError> {
        let parsed: Self = serde_json::from_str(json)
            .map_err(|e| MiqatError::invalid_config(format!("Malformed settings: {e}")))?;
        for pref in &parsed.notifications {
            pref.option.validate()?;
        }
        let adjustment = parsed.hijri_adjustment;
        Ok(parsed.hijri_adjustment(adjustment))
    }

    /// # Errors
    /// Returns `InvalidConfiguration` if serialization fails.
    pub fn to_json(&self) -> Result<String, MiqatError> {
        serde_json::to_string(self)
            .map_err(|e| MiqatError::invalid_config(format!("Cannot serialize settings: {e}")))
    }

    /// Enabled reminder options, in configured order.
    pub fn enabled_notifications(&self) -> impl Iterator<Item = &NotificationTimeOption> {
        self.notifications.iter().filter(|p| p.enabled).map(|p| &p.option)
    }
}

/// Builder with validation for `Settings`.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    locale: Option<Locale>,
    hijri_adjustment: Option<i64>,
    validate_coordinates: Option<bool>,
    model: Option<ModelVariant>,
    notifications: Vec<NotificationPreference>,
    strict_adjustment: bool,
}

impl SettingsBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn locale(mut self, locale: Locale) -> Self { self.locale = Some(locale); self }
    pub fn hijri_adjustment(mut self, adjustment: i64) -> Self { self.hijri_adjustment = Some(adjustment); self }
    pub fn validate_coordinates(mut self, validate: bool) -> Self { self.validate_coordinates = Some(validate); self }
    pub fn model(mut self, model: ModelVariant) -> Self { self.model = Some(model); self }
    pub fn notification(mut self, pref: NotificationPreference) -> Self { self.notifications.push(pref); self }

    /// Enables strict adjustment bounds [-2, 2].
    pub fn strict_adjustment(mut self, strict: bool) -> Self { self.strict_adjustment = strict; self }

    /// Builds and validates.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for an adjustment outside strict bounds,
    /// a duplicate notification id, an option with no time configured, or an
    /// offset beyond one day.
    pub fn build(self) -> Result<Settings, MiqatError> {
        let adjustment = self.hijri_adjustment.unwrap_or(0);

        if self.strict_adjustment && adjustment.abs() > STRICT_HIJRI_ADJUSTMENT {
            return Err(MiqatError::invalid_config(format!(
                "Adjustment {adjustment} outside strict bounds [-2, 2]"
            )));
        }

        let mut seen = HashSet::new();
        for pref in &self.notifications {
            if !seen.insert(pref.option.id.as_str()) {
                return Err(MiqatError::invalid_config(format!(
                    "Duplicate notification id '{}'",
                    pref.option.id
                )));
            }
            pref.option.validate()?;
        }

        Ok(Settings {
            locale: self.locale.unwrap_or_default(),
            hijri_adjustment: adjustment.clamp(-MAX_HIJRI_ADJUSTMENT, MAX_HIJRI_ADJUSTMENT),
            validate_coordinates: self.validate_coordinates.unwrap_or(true),
            model: self.model.unwrap_or_default(),
            notifications: self.notifications,
        })
    }
}
