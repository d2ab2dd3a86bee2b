use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Ordered, finite, restartable sequence of text lines, one per source paragraph.
pub trait LineSource {
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Plain-text rendering of an application stored on disk.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TextFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for TextFile {
    fn read_lines(&self) -> Result<Vec<String>> {
        let bytes = std::fs::read(&self.path).map_err(|source| ExtractError::InputUnavailable {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| ExtractError::InvalidEncoding {
            path: self.path.clone(),
        })?;
        Ok(split_lines(&text))
    }
}

impl LineSource for str {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(split_lines(self))
    }
}

impl LineSource for String {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(split_lines(self))
    }
}

impl LineSource for [String] {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

impl LineSource for Vec<String> {
    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
