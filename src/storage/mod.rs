// src/storage/mod.rs
use crate::extractors::DrawRecord;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn records_path(&self, date: &str) -> PathBuf {
        self.base_dir.join(format!("4dmoon_{}.json", date))
    }

    /// True when records for this draw date were already saved. Used as the
    /// duplicate-date check: an existing file means the date was scraped.
    pub fn records_exist(&self, date: &str) -> bool {
        self.records_path(date).exists()
    }

    /// Saves the extracted records for one date as a pretty-printed JSON array.
    pub fn save_records(
        &self,
        date: &str,
        records: &[DrawRecord],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.records_path(date);

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} records to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves the raw page and reduced line stream next to the JSON output,
    /// for troubleshooting extraction misses.
    pub fn save_debug_page(
        &self,
        date: &str,
        html: &str,
        lines: &[String],
    ) -> Result<(), StorageError> {
        let html_path = self.base_dir.join(format!("4dmoon_{}.html", date));
        fs::write(&html_path, html).map_err(StorageError::IoError)?;

        let lines_path = self.base_dir.join(format!("4dmoon_{}.lines.txt", date));
        fs::write(&lines_path, lines.join("\n")).map_err(StorageError::IoError)?;

        tracing::info!("Saved debug page to {}", html_path.display());
        Ok(())
    }
}

/// Loads a newline-separated list of `YYYY-MM-DD` dates, skipping blanks.
/// Order is preserved.
pub fn load_dates_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, StorageError> {
    let content = fs::read_to_string(path).map_err(StorageError::IoError)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Rewrites a dates file keeping only `dates_to_keep`, in their given order.
/// Writes a temp file first and renames it over the original.
pub fn rewrite_dates_file<P: AsRef<Path>>(
    path: P,
    dates_to_keep: &[String],
) -> Result<(), StorageError> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");

    let mut content = dates_to_keep.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(&tmp_path, content).map_err(StorageError::IoError)?;
    fs::rename(&tmp_path, path).map_err(StorageError::IoError)?;

    Ok(())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "fourd_scraper_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_record() -> DrawRecord {
        DrawRecord {
            title: "Magnum 4D".to_string(),
            draw: "(Sun) 18-Jan-2026 #123/26".to_string(),
            first: Some("0123".to_string()),
            second: Some("5678".to_string()),
            third: None,
            special: vec!["1111".to_string()],
            consolation: vec![],
            raw: vec!["1st Prize  2nd Prize  3rd Prize".to_string()],
        }
    }

    #[test]
    fn save_then_exists_roundtrip() {
        let dir = temp_dir("save");
        let storage = StorageManager::new(&dir).unwrap();

        assert!(!storage.records_exist("2026-01-18"));
        let path = storage.save_records("2026-01-18", &[sample_record()]).unwrap();
        assert!(storage.records_exist("2026-01-18"));

        // Leading zeros survive the JSON round trip as strings.
        let json = fs::read_to_string(path).unwrap();
        assert!(json.contains("\"first\": \"0123\""));
        assert!(json.contains("\"third\": null"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn dates_file_roundtrip_preserves_order() {
        let dir = temp_dir("dates");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("draw-date.txt");
        fs::write(&path, "2026-01-18\n\n2026-01-19\n2026-01-20\n").unwrap();

        let dates = load_dates_file(&path).unwrap();
        assert_eq!(dates, vec!["2026-01-18", "2026-01-19", "2026-01-20"]);

        let keep = vec!["2026-01-19".to_string()];
        rewrite_dates_file(&path, &keep).unwrap();
        assert_eq!(load_dates_file(&path).unwrap(), keep);

        fs::remove_dir_all(dir).unwrap();
    }
}
