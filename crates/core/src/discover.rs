use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::extract::supported_extension;

pub const CONFIG_FILE: &str = "input.json";
pub const DOCS_DIR: &str = "docs";
pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    pub name: String,
    pub root: PathBuf,
}

impl CollectionDescriptor {
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }
}

/// Returns the collections under `base`: every immediate subdirectory that
/// carries a config file, sorted by name.
pub fn discover_collections(base: &Path) -> Result<Vec<CollectionDescriptor>> {
    let mut collections = Vec::new();
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() || !path.join(CONFIG_FILE).is_file() {
            continue;
        }
        collections.push(CollectionDescriptor {
            name: entry.file_name().to_string_lossy().into_owned(),
            root: path,
        });
    }
    collections.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(collections)
}

/// Lists a collection's documents sorted by file name, so processing order
/// never depends on directory enumeration order.
pub fn list_documents(docs_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(docs_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.into_path();
        if path.is_file() && supported_extension(&path) {
            documents.push(path);
        }
    }
    documents.sort_by_key(|path| path.file_name().map(|n| n.to_os_string()));
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::tempdir;

    #[test]
    fn finds_only_configured_directories_sorted() {
        let dir = tempdir().unwrap();
        for name in ["zoo", "archive", "plain"] {
            create_dir_all(dir.path().join(name)).unwrap();
        }
        write(dir.path().join("zoo").join(CONFIG_FILE), "{}").unwrap();
        write(dir.path().join("archive").join(CONFIG_FILE), "{}").unwrap();
        write(dir.path().join("stray.json"), "{}").unwrap();

        let collections = discover_collections(dir.path()).unwrap();
        let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["archive", "zoo"]);
        assert_eq!(
            collections[0].config_path(),
            dir.path().join("archive").join(CONFIG_FILE)
        );
    }

    #[test]
    fn documents_come_back_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let docs = dir.path().join(DOCS_DIR);
        create_dir_all(&docs).unwrap();
        for name in ["b.txt", "a.pdf", "notes.docx", "c.md"] {
            write(docs.join(name), "x").unwrap();
        }
        create_dir_all(docs.join("nested")).unwrap();

        let documents = list_documents(&docs).unwrap();
        let names: Vec<String> = documents
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c.md"]);
    }
}
