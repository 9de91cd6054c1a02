use super::Sheet;
use crate::error::{Result, SheetError};
use crate::storage::{parse_sheet, parse_sheet_content, write_sheet, write_sheet_content};
use std::path::{Path, PathBuf};

impl Sheet {
    /// Open `path` if it exists, otherwise start an empty `rows x cols` sheet
    /// bound to that path.
    ///
    /// An existing file brings its own dimensions; `rows` and `cols` are only
    /// checked for a new sheet.
    pub fn with_file(path: Option<PathBuf>, rows: usize, cols: usize) -> Result<Self> {
        if let Some(p) = &path
            && p.exists()
        {
            let mut sheet = Sheet::default();
            sheet.load_file(p)?;
            return Ok(sheet);
        }

        let mut sheet = Sheet::new(rows, cols)?;
        sheet.file_path = path;
        Ok(sheet)
    }

    /// Serialize the sheet contents to the text format.
    pub fn serialize(&self) -> String {
        write_sheet_content(self)
    }

    /// Build an evaluated sheet from the text format.
    pub fn deserialize(content: &str) -> Result<Sheet> {
        parse_sheet_content(content)
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(SheetError::NoFilePath);
        };

        write_sheet(&path, self)?;
        self.modified = false;
        tracing::info!(path = %path.display(), cells = self.occupied_count(), "sheet saved");
        Ok(path)
    }

    /// Save to `path` and make it the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }

    /// Load from file, replacing the grid (and its dimensions).
    ///
    /// The load is transactional: on error the current sheet is unchanged.
    /// The sheet-wide precision is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let loaded = parse_sheet(path)?;

        self.rows = loaded.rows;
        self.cols = loaded.cols;
        self.cells = loaded.cells;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;

        tracing::info!(
            path = %path.display(),
            rows = self.rows,
            columns = self.cols,
            cells = self.occupied_count(),
            "sheet loaded"
        );
        Ok(())
    }
}
