//! Persisted configuration records.
//!
//! Two JSON files travel with the tool: the grid boundary record written by
//! the external boundary editor (`grid_config.json`) and the style record
//! (`styles_config.json`, the serde form of [`StyleConfig`]). Both are saved
//! through the same temp-and-rename path the document writer uses.

use std::fs;
use std::path::Path;

use schemalink_core::{Grid, GridBoundaries, StyleConfig};
use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Grid boundary record as the boundary editor produces it: sorted boundary
/// lines in page points, plus the page and zoom the editor was showing when
/// the lines were drawn (kept so the editor can restore its view, ignored
/// here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    pub column_lines: Vec<f64>,
    pub row_lines: Vec<f64>,
    pub page_width: f64,
    pub page_height: f64,
    #[serde(default)]
    pub page_num: usize,
    #[serde(default = "default_zoom")]
    pub zoom_factor: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl GridRecord {
    pub fn load(path: &Path) -> Result<Self, LinkError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| LinkError::Config(format!("grid record {}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<(), LinkError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LinkError::Config(format!("grid record: {e}")))?;
        write_atomic(path, json.as_bytes())
    }

    /// Validated exact grid from this record.
    pub fn to_grid(&self) -> Result<Grid, LinkError> {
        let mut columns = self.column_lines.clone();
        let mut rows = self.row_lines.clone();
        columns.sort_by(|a, b| a.total_cmp(b));
        rows.sort_by(|a, b| a.total_cmp(b));
        Ok(Grid::Exact(GridBoundaries::new(
            columns,
            rows,
            self.page_width,
            self.page_height,
        )?))
    }
}

/// Load a style record, or the defaults when `path` is absent.
pub fn load_style_config(path: &Path) -> Result<StyleConfig, LinkError> {
    if !path.exists() {
        return Ok(StyleConfig::default());
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| LinkError::Config(format!("style record {}: {e}", path.display())))
}

pub fn save_style_config(config: &StyleConfig, path: &Path) -> Result<(), LinkError> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| LinkError::Config(format!("style record: {e}")))?;
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LinkError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid_config.json");
        let record = GridRecord {
            column_lines: vec![0.0, 100.0, 200.0],
            row_lines: vec![0.0, 150.0, 300.0],
            page_width: 612.0,
            page_height: 792.0,
            page_num: 1,
            zoom_factor: 1.5,
        };
        record.save(&path).unwrap();
        assert_eq!(GridRecord::load(&path).unwrap(), record);
    }

    #[test]
    fn record_without_editor_state_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid_config.json");
        fs::write(
            &path,
            r#"{"column_lines": [0, 100], "row_lines": [0, 50],
                "page_width": 612, "page_height": 792}"#,
        )
        .unwrap();
        let record = GridRecord::load(&path).unwrap();
        assert_eq!(record.page_num, 0);
        assert_eq!(record.zoom_factor, 1.0);
    }

    #[test]
    fn unsorted_lines_still_make_a_grid() {
        let record = GridRecord {
            column_lines: vec![200.0, 0.0, 100.0],
            row_lines: vec![300.0, 0.0],
            page_width: 612.0,
            page_height: 792.0,
            page_num: 0,
            zoom_factor: 1.0,
        };
        let grid = record.to_grid().unwrap();
        let cell = grid.cell(0, 0);
        assert_eq!((cell.x0, cell.x1), (0.0, 100.0));
    }

    #[test]
    fn degenerate_record_is_rejected() {
        let record = GridRecord {
            column_lines: vec![50.0],
            row_lines: vec![0.0, 100.0],
            page_width: 612.0,
            page_height: 792.0,
            page_num: 0,
            zoom_factor: 1.0,
        };
        assert!(matches!(record.to_grid(), Err(LinkError::Grid(_))));
    }

    #[test]
    fn missing_style_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_style_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, StyleConfig::default());
    }

    #[test]
    fn style_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles_config.json");
        let config = StyleConfig {
            line_width: 5,
            ..StyleConfig::default()
        };
        save_style_config(&config, &path).unwrap();
        assert_eq!(load_style_config(&path).unwrap(), config);
    }
}
