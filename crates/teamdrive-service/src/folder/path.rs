//! Materialized path construction.
//!
//! A folder's path holds `(id, name)` for every ancestor, root first,
//! excluding the folder itself. The root is the exception and stores
//! `[(id, "root")]`. A file's path holds plain names: every
//! ancestor folder, the containing folder, then the file's own name.

use teamdrive_entity::folder::{Folder, FolderPathEntry};

/// Path of a new folder created under `parent`.
///
/// A child of the root gets `[(root.id, "root")]`.
pub fn extend_folder_path(parent: &Folder) -> Vec<FolderPathEntry> {
    let ancestors = parent.ancestors();
    let mut path = Vec::with_capacity(ancestors.len() + 1);
    path.extend_from_slice(ancestors);
    path.push(FolderPathEntry::new(parent.id, parent.name.as_str()));
    path
}

/// Names from the root down to and including `folder`.
///
/// For the root folder this is just its sentinel name, so file paths are
/// never empty.
pub fn folder_lineage(folder: &Folder) -> Vec<String> {
    folder
        .ancestor_names()
        .chain(std::iter::once(folder.name.as_str()))
        .map(str::to_string)
        .collect()
}

/// Path of a new file: the lineage of its folder plus its display name.
pub fn extend_file_path(lineage: Vec<String>, display_name: &str) -> Vec<String> {
    let mut path = lineage;
    path.push(display_name.to_string());
    path
}

/// Replace the last element (the file's own name) and nothing else.
pub fn rename_in_path(path: &[String], new_name: &str) -> Vec<String> {
    let mut renamed = path.to_vec();
    match renamed.last_mut() {
        Some(last) => *last = new_name.to_string(),
        None => renamed.push(new_name.to_string()),
    }
    renamed
}
