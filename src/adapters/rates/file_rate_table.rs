//! Rate table loaded from a JSON or YAML file at start-up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::pricing::PricingTables;
use crate::ports::{RateTableError, RateTableProvider};

/// Serves a table read once from disk. The format is chosen by extension.
#[derive(Debug, Clone)]
pub struct FileRateTableProvider {
    path: PathBuf,
    tables: Arc<PricingTables>,
}

impl FileRateTableProvider {
    /// Reads, parses and validates the table at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RateTableError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let format = TableFormat::from_path(path)?;
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RateTableError::io(&shown, e.to_string()))?;
        let tables = format.parse(&raw).map_err(|reason| RateTableError::parse(&shown, reason))?;
        tables.validate()?;

        tracing::info!(
            path = %shown,
            disciplines = tables.pricing_base.len(),
            "Loaded rate table"
        );

        Ok(Self {
            path: path.to_path_buf(),
            tables: Arc::new(tables),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateTableProvider for FileRateTableProvider {
    fn tables(&self) -> Result<Arc<PricingTables>, RateTableError> {
        Ok(Arc::clone(&self.tables))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Json,
    Yaml,
}

impl TableFormat {
    fn from_path(path: &Path) -> Result<Self, RateTableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(RateTableError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn parse(self, raw: &str) -> Result<PricingTables, String> {
        match self {
            Self::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{Discipline, TableValidationError};
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_table_matching_defaults() {
        let json = serde_json::to_string_pretty(PricingTables::defaults()).unwrap();
        let file = write_temp(".json", &json);

        let provider = FileRateTableProvider::load(file.path()).unwrap();

        assert_eq!(&*provider.tables().unwrap(), PricingTables::defaults());
        assert_eq!(provider.path(), file.path());
    }

    #[test]
    fn loads_yaml_table_matching_defaults() {
        let yaml = serde_yaml::to_string(PricingTables::defaults()).unwrap();
        let file = write_temp(".yaml", &yaml);

        let provider = FileRateTableProvider::load(file.path()).unwrap();

        assert_eq!(&*provider.tables().unwrap(), PricingTables::defaults());
    }

    #[test]
    fn missing_engagement_fee_uses_default() {
        let mut value = serde_json::to_value(PricingTables::defaults()).unwrap();
        value.as_object_mut().unwrap().remove("engagementActivationFee");
        let file = write_temp(".json", &value.to_string());

        let tables = FileRateTableProvider::load(file.path()).unwrap().tables().unwrap();

        assert_eq!(tables.engagement_activation_fee, 26_800_000.0);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".toml", "");
        assert!(matches!(
            FileRateTableProvider::load(file.path()),
            Err(RateTableError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match FileRateTableProvider::load(&path) {
            Err(RateTableError::Io { path: shown, .. }) => {
                assert_eq!(shown, path.display().to_string())
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn reports_malformed_contents() {
        let file = write_temp(".json", "{ not json");
        assert!(matches!(
            FileRateTableProvider::load(file.path()),
            Err(RateTableError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_table_missing_a_discipline() {
        let mut tables = PricingTables::defaults().clone();
        tables.pricing_base.retain(|row| row.discipline != Discipline::Landscape);
        let file = write_temp(".json", &serde_json::to_string(&tables).unwrap());

        match FileRateTableProvider::load(file.path()) {
            Err(RateTableError::Invalid(TableValidationError::MissingDiscipline(d))) => {
                assert_eq!(d, Discipline::Landscape)
            }
            other => panic!("Expected MissingDiscipline, got {:?}", other),
        }
    }
}
