//! Folder entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teamdrive_core::types::{FolderId, TeamId};

/// Sentinel name carried by every tenant's root folder.
pub const ROOT_FOLDER_NAME: &str = "root";

/// Folder kind. Exactly one `Root` folder exists per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "folder_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FolderType {
    /// The tenant's top-level folder.
    Root,
    /// Any folder created under another folder.
    Default,
}

impl FolderType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FolderType {
    type Err = teamdrive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "default" => Ok(Self::Default),
            _ => Err(teamdrive_core::AppError::validation(format!(
                "Invalid folder type: '{s}'. Expected one of: root, default"
            ))),
        }
    }
}

/// One ancestor in a folder's materialized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPathEntry {
    /// Ancestor folder id.
    pub id: FolderId,
    /// Ancestor display name at the time the descendant was created.
    pub name: String,
}

impl FolderPathEntry {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A folder in a team's virtual filesystem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Folder identifier, generated before insertion.
    pub id: FolderId,
    /// Owning team.
    pub team_id: TeamId,
    /// Display name (`"root"` for the root folder).
    pub name: String,
    /// Root or default.
    pub folder_type: FolderType,
    /// Every ancestor from the team root down to the parent, root first.
    /// The root folder stores a single entry naming itself.
    #[sqlx(json)]
    pub path: Vec<FolderPathEntry>,
    /// Immediate parent (`None` for the root folder).
    pub parent_folder: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last modified.
    pub last_modified_time: DateTime<Utc>,
}

impl Folder {
    /// Build the root folder record for a team.
    pub fn new_root(id: FolderId, team_id: TeamId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            team_id,
            name: ROOT_FOLDER_NAME.to_string(),
            folder_type: FolderType::Root,
            path: vec![FolderPathEntry::new(id, ROOT_FOLDER_NAME)],
            parent_folder: None,
            created_at: now,
            last_modified_time: now,
        }
    }

    /// Check if this is the team's root folder.
    pub fn is_root(&self) -> bool {
        self.folder_type == FolderType::Root
    }

    /// Stored path entries that are strict ancestors of this folder.
    pub fn ancestors(&self) -> &[FolderPathEntry] {
        if self.is_root() { &[] } else { &self.path[..] }
    }

    /// Depth in the tree (0 for the root).
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Ancestor names from the root down to the parent.
    pub fn ancestor_names(&self) -> impl Iterator<Item = &str> {
        self.ancestors().iter().map(|entry| entry.name.as_str())
    }
}
