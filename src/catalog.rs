//! Endpoint catalog - the ordered list of Oura endpoints the explorer can fetch

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Parameter shape of an endpoint.
///
/// The variant alone decides which input controls are shown and which query
/// parameters are sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamSchema {
    /// No parameters at all
    #[default]
    None,
    /// `start_date` / `end_date`, calendar dates
    DateRange,
    /// `start_datetime` / `end_datetime`, UTC timestamps
    DatetimeRange,
    /// Reserved for parameters with a fixed value. Shows no control and
    /// sends nothing.
    Fixed,
}

impl ParamSchema {
    pub fn as_str(&self) -> &str {
        match self {
            ParamSchema::None => "None",
            ParamSchema::DateRange => "Date range",
            ParamSchema::DatetimeRange => "Datetime range",
            ParamSchema::Fixed => "Fixed",
        }
    }
}

/// A single remote endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub params: ParamSchema,
}

impl EndpointDescriptor {
    pub fn new(label: impl Into<String>, path: impl Into<String>, params: ParamSchema) -> Self {
        EndpointDescriptor {
            label: label.into(),
            path: path.into(),
            params,
        }
    }
}

/// Oura v2 `usercollection` endpoints, in menu order
const BUILTIN_ENDPOINTS: &[(&str, &str, ParamSchema)] = &[
    ("Personal Info", "/personal_info", ParamSchema::None),
    ("Daily Activity", "/daily_activity", ParamSchema::DateRange),
    ("Daily Sleep", "/daily_sleep", ParamSchema::DateRange),
    ("Daily Readiness", "/daily_readiness", ParamSchema::DateRange),
    ("Daily Cardiovascular Age", "/daily_cardiovascular_age", ParamSchema::DateRange),
    ("Daily Resilience", "/daily_resilience", ParamSchema::DateRange),
    ("Daily SpO2", "/daily_spo2", ParamSchema::DateRange),
    ("Daily Stress", "/daily_stress", ParamSchema::DateRange),
    ("Enhanced Tag", "/enhanced_tag", ParamSchema::DateRange),
    ("Heartrate", "/heartrate", ParamSchema::DatetimeRange),
    ("Rest Mode Period", "/rest_mode_period", ParamSchema::DateRange),
    ("Ring Configuration", "/ring_configuration", ParamSchema::None),
    ("Session", "/session", ParamSchema::DateRange),
    ("Sleep", "/sleep", ParamSchema::DateRange),
    ("Sleep Time", "/sleep_time", ParamSchema::DateRange),
    ("Tag", "/tag", ParamSchema::DateRange),
    ("VO2max", "/vo2max", ParamSchema::DateRange),
    ("Workout", "/workout", ParamSchema::DateRange),
];

/// Immutable, ordered set of endpoint descriptors with unique labels
#[derive(Clone, Debug)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointDescriptor>,
}

impl EndpointCatalog {
    /// Build a catalog, rejecting empty lists and duplicate labels
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self, CatalogError> {
        if endpoints.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for endpoint in &endpoints {
            if !seen.insert(endpoint.label.as_str()) {
                return Err(CatalogError::DuplicateLabel(endpoint.label.clone()));
            }
        }

        Ok(EndpointCatalog { endpoints })
    }

    /// The catalog shipped with the explorer
    pub fn builtin() -> Self {
        EndpointCatalog {
            endpoints: BUILTIN_ENDPOINTS
                .iter()
                .map(|(label, path, params)| EndpointDescriptor::new(*label, *path, *params))
                .collect(),
        }
    }

    /// Parse a YAML list of descriptors
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let endpoints: Vec<EndpointDescriptor> = serde_yaml::from_str(content)?;
        Self::new(endpoints)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn list(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn get(&self, index: usize) -> Result<&EndpointDescriptor, CatalogError> {
        self.endpoints.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.endpoints.len(),
        })
    }

    /// Look up an endpoint by its display label
    pub fn find(&self, label: &str) -> Option<(usize, &EndpointDescriptor)> {
        self.endpoints
            .iter()
            .enumerate()
            .find(|(_, ep)| ep.label == label)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = EndpointCatalog::builtin();
        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.list()[0].label, "Personal Info");
        assert_eq!(catalog.list()[17].label, "Workout");

        // Builtin list must satisfy the same rules as a loaded one
        assert!(EndpointCatalog::new(catalog.list().to_vec()).is_ok());
    }

    #[test]
    fn test_builtin_param_shapes() {
        let catalog = EndpointCatalog::builtin();
        let shape = |label: &str| catalog.find(label).map(|(_, ep)| ep.params);

        assert_eq!(shape("Personal Info"), Some(ParamSchema::None));
        assert_eq!(shape("Ring Configuration"), Some(ParamSchema::None));
        assert_eq!(shape("Heartrate"), Some(ParamSchema::DatetimeRange));
        assert_eq!(shape("Daily Activity"), Some(ParamSchema::DateRange));
        assert_eq!(shape("Nope"), None);
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = EndpointCatalog::builtin();
        assert_eq!(catalog.get(9).unwrap().path, "/heartrate");
        assert!(matches!(
            catalog.get(18),
            Err(CatalogError::IndexOutOfRange { index: 18, len: 18 })
        ));
    }

    #[test]
    fn test_parse_yaml_catalog() {
        let yaml = r#"
- label: Sleep
  path: /sleep
  params: date_range
- label: Heartrate
  path: /heartrate
  params: datetime_range
- label: Me
  path: /personal_info
"#;
        let catalog = EndpointCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.list()[1].params, ParamSchema::DatetimeRange);
        assert_eq!(catalog.list()[2].params, ParamSchema::None);
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let yaml = r#"
- label: Sleep
  path: /sleep
- label: Sleep
  path: /sleep_time
"#;
        assert!(matches!(
            EndpointCatalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateLabel(label)) if label == "Sleep"
        ));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(EndpointCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "- label: Tag\n  path: /tag\n  params: date_range\n").unwrap();

        let catalog = EndpointCatalog::load(&path).unwrap();
        assert_eq!(catalog.get(0).unwrap().label, "Tag");
    }
}
