// src/pattern.rs
// Catalog of win patterns and the user's enable/disable preferences.

use serde::{Deserialize, Serialize};

use crate::error::BingoError;
use crate::lines::{LineLength, Orientation};
use crate::logging::{log_info, log_warning};
use crate::store::PreferenceStore;

pub const PATTERNS_STORAGE_KEY: &str = "bingo_winning_patterns";

pub const FOUR_CORNERS_ID: &str = "4_corners";
pub const TERCO_ID: &str = "terco";
pub const QUINA_ID: &str = "quina";
pub const FULL_CARD_ID: &str = "full_card";

/// Evaluation rule behind a pattern id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    FourCorners,
    Third,
    Quina,
    FullCard,
    Unknown,
}

impl PatternKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            FOUR_CORNERS_ID => PatternKind::FourCorners,
            TERCO_ID => PatternKind::Third,
            QUINA_ID => PatternKind::Quina,
            FULL_CARD_ID => PatternKind::FullCard,
            _ => PatternKind::Unknown,
        }
    }

    /// Line length checked by the line patterns.
    pub fn line_length(&self) -> Option<LineLength> {
        match self {
            PatternKind::Third => Some(LineLength::Three),
            PatternKind::Quina => Some(LineLength::Five),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPattern {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// Simple patterns are a single fixed shape; composite ones carry
/// independently toggleable orientation variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternVariant {
    Simple,
    Composite(Vec<SubPattern>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PatternRecord", into = "PatternRecord")]
pub struct PatternDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub variant: PatternVariant,
}

// Stored shape: `subPatterns` is present only for composite patterns
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatternRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_patterns: Option<Vec<SubPattern>>,
}

impl From<PatternRecord> for PatternDefinition {
    fn from(record: PatternRecord) -> Self {
        PatternDefinition {
            id: record.id,
            name: record.name,
            description: record.description,
            enabled: record.enabled,
            variant: match record.sub_patterns {
                Some(subs) => PatternVariant::Composite(subs),
                None => PatternVariant::Simple,
            },
        }
    }
}

impl From<PatternDefinition> for PatternRecord {
    fn from(pattern: PatternDefinition) -> Self {
        PatternRecord {
            id: pattern.id,
            name: pattern.name,
            description: pattern.description,
            enabled: pattern.enabled,
            sub_patterns: match pattern.variant {
                PatternVariant::Simple => None,
                PatternVariant::Composite(subs) => Some(subs),
            },
        }
    }
}

impl PatternDefinition {
    pub fn simple(id: &str, name: &str, description: &str) -> Self {
        PatternDefinition {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            enabled: true,
            variant: PatternVariant::Simple,
        }
    }

    /// Composite pattern with one enabled sub-pattern per orientation,
    /// identified as `<id>_<orientation>`.
    pub fn with_orientations(id: &str, name: &str, description: &str) -> Self {
        let subs = Orientation::ALL
            .into_iter()
            .map(|o| SubPattern {
                id: sub_pattern_id(id, o),
                name: capitalize(o.as_str()),
                enabled: true,
            })
            .collect();
        PatternDefinition {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            enabled: true,
            variant: PatternVariant::Composite(subs),
        }
    }

    pub fn kind(&self) -> PatternKind {
        PatternKind::from_id(&self.id)
    }

    pub fn sub_patterns(&self) -> &[SubPattern] {
        match &self.variant {
            PatternVariant::Simple => &[],
            PatternVariant::Composite(subs) => subs.as_slice(),
        }
    }

    pub fn sub_pattern(&self, sub_id: &str) -> Option<&SubPattern> {
        self.sub_patterns().iter().find(|s| s.id == sub_id)
    }

    /// Whether the orientation variant of this pattern is switched on.
    /// Missing sub-patterns count as disabled.
    pub fn orientation_enabled(&self, orientation: Orientation) -> bool {
        self.sub_pattern(&sub_pattern_id(&self.id, orientation))
            .is_some_and(|s| s.enabled)
    }
}

pub fn sub_pattern_id(pattern_id: &str, orientation: Orientation) -> String {
    format!("{pattern_id}_{}", orientation.as_str())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn default_catalog() -> Vec<PatternDefinition> {
    vec![
        PatternDefinition::simple(FOUR_CORNERS_ID, "Four Corners", "Mark the four corner numbers of the card."),
        PatternDefinition::with_orientations(TERCO_ID, "Terço", "Mark 3 numbers in a line."),
        PatternDefinition::with_orientations(QUINA_ID, "Quina", "Mark 5 numbers in a line."),
        PatternDefinition::simple(FULL_CARD_ID, "Full Card", "Mark all 24 numbers of the card."),
    ]
}

/// Overlays persisted preferences on the default catalog.
///
/// The result always follows the defaults: one entry per default pattern, in
/// default order, with default names and descriptions. Only enabled flags are
/// taken from `persisted`, for patterns and sub-patterns it knows about.
/// Entries unknown to the defaults are dropped.
pub fn merge_catalog(defaults: &[PatternDefinition], persisted: Option<&[PatternDefinition]>) -> Vec<PatternDefinition> {
    let Some(persisted) = persisted else {
        return defaults.to_vec();
    };

    defaults
        .iter()
        .map(|default| {
            let Some(found) = persisted.iter().find(|p| p.id == default.id) else {
                return default.clone();
            };

            let variant = match &default.variant {
                PatternVariant::Simple => PatternVariant::Simple,
                PatternVariant::Composite(default_subs) => PatternVariant::Composite(
                    default_subs
                        .iter()
                        .map(|sub| SubPattern {
                            enabled: found.sub_pattern(&sub.id).map_or(sub.enabled, |s| s.enabled),
                            ..sub.clone()
                        })
                        .collect(),
                ),
            };

            PatternDefinition {
                enabled: found.enabled,
                variant,
                ..default.clone()
            }
        })
        .collect()
}

pub fn parse_catalog(blob: &str) -> Result<Vec<PatternDefinition>, BingoError> {
    serde_json::from_str(blob).map_err(|e| BingoError::UnparseablePersistedCatalog { reason: e.to_string() })
}

/// Default catalog merged with whatever the store holds. A missing or
/// unreadable blob yields the defaults.
pub fn load_catalog<S: PreferenceStore + ?Sized>(store: &S) -> Vec<PatternDefinition> {
    let defaults = default_catalog();
    let blob = match store.get(PATTERNS_STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return defaults,
        Err(e) => {
            log_warning(&format!("Could not read winning patterns: {e}. Using defaults."));
            return defaults;
        }
    };

    match parse_catalog(&blob) {
        Ok(persisted) => merge_catalog(&defaults, Some(persisted.as_slice())),
        Err(e) => {
            log_warning(&format!("{e}. Using defaults."));
            defaults
        }
    }
}

pub fn save_catalog<S: PreferenceStore + ?Sized>(store: &mut S, catalog: &[PatternDefinition]) -> Result<(), BingoError> {
    store.set(PATTERNS_STORAGE_KEY, &serde_json::to_string(catalog)?)
}

pub fn reset_catalog<S: PreferenceStore + ?Sized>(store: &mut S) -> Result<Vec<PatternDefinition>, BingoError> {
    let defaults = default_catalog();
    save_catalog(store, &defaults)?;
    log_info("Winning patterns restored to defaults");
    Ok(defaults)
}

/// Returns false when no pattern has the given id.
pub fn set_pattern_enabled(catalog: &mut [PatternDefinition], id: &str, enabled: bool) -> bool {
    match catalog.iter_mut().find(|p| p.id == id) {
        Some(pattern) => {
            pattern.enabled = enabled;
            true
        }
        None => false,
    }
}

/// Returns false when the pattern or its sub-pattern does not exist.
pub fn set_sub_pattern_enabled(catalog: &mut [PatternDefinition], pattern_id: &str, sub_id: &str, enabled: bool) -> bool {
    let Some(pattern) = catalog.iter_mut().find(|p| p.id == pattern_id) else {
        return false;
    };
    let PatternVariant::Composite(subs) = &mut pattern.variant else {
        return false;
    };
    match subs.iter_mut().find(|s| s.id == sub_id) {
        Some(sub) => {
            sub.enabled = enabled;
            true
        }
        None => false,
    }
}

/// Toggles a pattern or a sub-pattern by id, searching sub-pattern ids of
/// every composite pattern when no top-level pattern matches.
pub fn set_enabled_by_id(catalog: &mut [PatternDefinition], id: &str, enabled: bool) -> bool {
    if set_pattern_enabled(catalog, id, enabled) {
        return true;
    }
    let owner = catalog
        .iter()
        .find(|p| p.sub_pattern(id).is_some())
        .map(|p| p.id.clone());
    match owner {
        Some(pattern_id) => set_sub_pattern_enabled(catalog, &pattern_id, id, enabled),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn find<'a>(catalog: &'a [PatternDefinition], id: &str) -> &'a PatternDefinition {
        catalog.iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["4_corners", "terco", "quina", "full_card"]);
        assert!(catalog.iter().all(|p| p.enabled));

        assert_eq!(find(&catalog, FOUR_CORNERS_ID).variant, PatternVariant::Simple);
        assert_eq!(find(&catalog, FULL_CARD_ID).variant, PatternVariant::Simple);

        let quina = find(&catalog, QUINA_ID);
        let sub_ids: Vec<&str> = quina.sub_patterns().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(sub_ids, vec!["quina_horizontal", "quina_vertical", "quina_diagonal"]);
        assert!(quina.sub_patterns().iter().all(|s| s.enabled));
        assert_eq!(quina.sub_patterns()[0].name, "Horizontal");
    }

    #[test]
    fn test_pattern_kind() {
        assert_eq!(PatternKind::from_id("4_corners"), PatternKind::FourCorners);
        assert_eq!(PatternKind::from_id("terco"), PatternKind::Third);
        assert_eq!(PatternKind::from_id("x_pattern"), PatternKind::Unknown);
        assert_eq!(PatternKind::Quina.line_length(), Some(LineLength::Five));
        assert_eq!(PatternKind::FullCard.line_length(), None);
    }

    #[test]
    fn test_serialization_shape() {
        let catalog = default_catalog();
        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json[0].get("subPatterns").is_none());
        assert_eq!(json[1]["subPatterns"][0]["id"], "terco_horizontal");
        assert_eq!(json[3]["id"], "full_card");

        let parsed = parse_catalog(&json.to_string()).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_merge_without_persisted_returns_defaults() {
        let defaults = default_catalog();
        assert_eq!(merge_catalog(&defaults, None), defaults);
    }

    #[test]
    fn test_merge_adds_missing_patterns() {
        let defaults = default_catalog();
        let mut persisted: Vec<PatternDefinition> = defaults
            .iter()
            .filter(|p| p.id != FULL_CARD_ID)
            .cloned()
            .collect();
        set_pattern_enabled(&mut persisted, FOUR_CORNERS_ID, false);

        let merged = merge_catalog(&defaults, Some(persisted.as_slice()));
        assert_eq!(merged.len(), 4);
        assert!(find(&merged, FULL_CARD_ID).enabled);
        assert!(!find(&merged, FOUR_CORNERS_ID).enabled);
    }

    #[test]
    fn test_merge_sub_patterns() {
        let defaults = default_catalog();
        // Persisted before the diagonal variant existed, with vertical switched off
        let blob = r#"[
            {"id":"quina","name":"Quina","description":"old","enabled":true,
             "subPatterns":[
                {"id":"quina_horizontal","name":"Horizontal","enabled":true},
                {"id":"quina_vertical","name":"Vertical","enabled":false}
             ]},
            {"id":"retired_pattern","name":"Old","description":"","enabled":true}
        ]"#;
        let persisted = parse_catalog(blob).unwrap();
        let merged = merge_catalog(&defaults, Some(persisted.as_slice()));

        let quina = find(&merged, QUINA_ID);
        assert!(quina.orientation_enabled(Orientation::Horizontal));
        assert!(!quina.orientation_enabled(Orientation::Vertical));
        assert!(quina.orientation_enabled(Orientation::Diagonal));
        assert_eq!(quina.description, "Mark 5 numbers in a line.");
        assert!(merged.iter().all(|p| p.id != "retired_pattern"));
    }

    #[test]
    fn test_merge_simple_persisted_as_composite_default() {
        let defaults = default_catalog();
        let persisted = vec![PatternDefinition {
            enabled: false,
            ..PatternDefinition::simple(TERCO_ID, "Terço", "")
        }];
        let merged = merge_catalog(&defaults, Some(persisted.as_slice()));
        let terco = find(&merged, TERCO_ID);
        assert!(!terco.enabled);
        assert_eq!(terco.sub_patterns().len(), 3);
        assert!(terco.sub_patterns().iter().all(|s| s.enabled));
    }

    #[test]
    fn test_toggles() {
        let mut catalog = default_catalog();
        assert!(set_sub_pattern_enabled(&mut catalog, QUINA_ID, "quina_vertical", false));
        assert!(!find(&catalog, QUINA_ID).orientation_enabled(Orientation::Vertical));

        assert!(!set_sub_pattern_enabled(&mut catalog, FULL_CARD_ID, "full_card_horizontal", false));
        assert!(!set_pattern_enabled(&mut catalog, "missing", false));

        assert!(set_enabled_by_id(&mut catalog, "terco_diagonal", false));
        assert!(!find(&catalog, TERCO_ID).orientation_enabled(Orientation::Diagonal));
        assert!(set_enabled_by_id(&mut catalog, FULL_CARD_ID, false));
        assert!(!find(&catalog, FULL_CARD_ID).enabled);
        assert!(!set_enabled_by_id(&mut catalog, "nothing_here", true));
    }

    #[test]
    fn test_load_and_save_catalog() {
        let mut store = MemoryStore::new();
        assert_eq!(load_catalog(&store), default_catalog());

        let mut catalog = default_catalog();
        set_pattern_enabled(&mut catalog, TERCO_ID, false);
        save_catalog(&mut store, &catalog).unwrap();
        assert!(!find(&load_catalog(&store), TERCO_ID).enabled);

        let restored = reset_catalog(&mut store).unwrap();
        assert_eq!(restored, default_catalog());
        assert_eq!(load_catalog(&store), default_catalog());
    }

    #[test]
    fn test_unparseable_catalog_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(PATTERNS_STORAGE_KEY, "{ definitely not a catalog").unwrap();
        assert_eq!(load_catalog(&store), default_catalog());

        assert!(matches!(
            parse_catalog("42"),
            Err(BingoError::UnparseablePersistedCatalog { .. })
        ));
    }
}
