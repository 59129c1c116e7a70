//! The exported artifact: `{"posts": [...]}` under a timestamped file name.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::app::Result;
use crate::domain::Post;

pub const MEDIA_TYPE: &str = "application/json";
pub const FILE_SUFFIX: &str = "-posts.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub posts: Vec<Post>,
}

impl ExportDocument {
    /// Keep the first `count` collected posts, in delivery order.
    pub fn from_collected(mut posts: Vec<Post>, count: usize) -> Self {
        posts.truncate(count);
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the document into `dir` and return the full path.
    pub fn save(&self, dir: &Path, at: DateTime<Local>, pretty: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name(at));
        fs::write(&path, self.to_json(pretty)?)?;
        Ok(path)
    }
}

/// `<YYYYMMDDHHMMSS>-posts.json`
pub fn file_name(at: DateTime<Local>) -> String {
    format!("{}{}", at.format("%Y%m%d%H%M%S"), FILE_SUFFIX)
}
