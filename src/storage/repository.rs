use super::rst::parse_pep;
use crate::{
    config::PepsConfig,
    error::{PepsError, Result},
    lint::number_from_filename,
    model::{AuthorOverrides, Pep},
};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;

static SOURCE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^pep-\d{4}\.rst$").expect("valid source file regex"));

/// PEP sources on disk and the directory generated files go to.
pub struct PepRepository {
    source_path: PathBuf,
    output_path: PathBuf,
}

impl PepRepository {
    pub fn new(config: &PepsConfig, project_root: &Path) -> Self {
        Self::with_paths(
            config.source_path(project_root),
            config.output_path(project_root),
        )
    }

    pub fn with_paths(source_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            source_path,
            output_path,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Every `pep-NNNN.rst` in the source directory, sorted by name.
    pub fn list_sources(&self) -> Result<Vec<PathBuf>> {
        if !self.source_path.is_dir() {
            return Err(PepsError::Storage(format!(
                "PEP source directory not found: {}",
                self.source_path.display()
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.source_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| SOURCE_FILE_PATTERN.is_match(name))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Parse every source except PEP 0, stopping at the first bad one.
    pub fn load_all(&self, overrides: &AuthorOverrides) -> Result<Vec<Pep>> {
        let mut peps = Vec::new();
        for path in self.list_sources()? {
            if number_from_filename(&path) == Some(0) {
                continue;
            }
            tracing::debug!(path = %path.display(), "Parsing PEP");
            let content = fs::read_to_string(&path)?;
            peps.push(parse_pep(&path, &content, overrides)?);
        }
        peps.sort_by_key(|pep| pep.number);
        Ok(peps)
    }

    /// Write `content` to `relative` under the output directory, creating
    /// parent directories as needed.
    pub fn write_output(&self, relative: &Path, content: &str) -> Result<PathBuf> {
        let target = self.output_path.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&target, content)?;
        tracing::info!(path = %target.display(), "Wrote");
        Ok(target)
    }
}

/// Read `AUTHOR_OVERRIDES.csv`. A missing file means no overrides.
pub fn load_author_overrides(path: &Path) -> Result<AuthorOverrides> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Author overrides file not found");
        return Ok(AuthorOverrides::default());
    }
    let file = fs::File::open(path)?;
    let overrides = AuthorOverrides::from_reader(file)?;
    tracing::debug!(count = overrides.len(), "Loaded author overrides");
    Ok(overrides)
}

/// Replace `target_path` through a temp file in the same directory.
pub fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| PepsError::Storage("Target path has no parent directory".to_string()))?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| PepsError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| PepsError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| PepsError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| PepsError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pep_source(number: u32, title: &str) -> String {
        format!(
            "PEP: {}\nTitle: {}\nAuthor: Barry Warsaw <barry@python.org>\nStatus: Draft\nType: Standards Track\nCreated: 01-Jan-2020\n\nBody.\n",
            number, title
        )
    }

    fn setup_repo() -> (PepRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("peps");
        fs::create_dir_all(&source).unwrap();
        let repo = PepRepository::with_paths(source, temp_dir.path().join("build"));
        (repo, temp_dir)
    }

    #[test]
    fn test_list_sources_filters_and_sorts() {
        let (repo, _tmp) = setup_repo();
        for name in ["pep-0012.rst", "pep-0001.rst", "pep-0000.rst"] {
            fs::write(repo.source_path().join(name), "").unwrap();
        }
        for name in ["pep-12.rst", "README.rst", "pep-0003.txt"] {
            fs::write(repo.source_path().join(name), "").unwrap();
        }

        let names: Vec<String> = repo
            .list_sources()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["pep-0000.rst", "pep-0001.rst", "pep-0012.rst"]);
    }

    #[test]
    fn test_list_sources_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let repo = PepRepository::with_paths(tmp.path().join("nope"), tmp.path().join("build"));
        assert!(matches!(repo.list_sources(), Err(PepsError::Storage(_))));
    }

    #[test]
    fn test_load_all_skips_pep_zero() {
        let (repo, _tmp) = setup_repo();
        fs::write(repo.source_path().join("pep-0000.rst"), "not a pep").unwrap();
        fs::write(repo.source_path().join("pep-0012.rst"), pep_source(12, "Twelve")).unwrap();
        fs::write(repo.source_path().join("pep-0001.rst"), pep_source(1, "One")).unwrap();

        let peps = repo.load_all(&AuthorOverrides::default()).unwrap();
        let numbers: Vec<u32> = peps.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 12]);
    }

    #[test]
    fn test_load_all_fails_fast() {
        let (repo, _tmp) = setup_repo();
        fs::write(repo.source_path().join("pep-0001.rst"), pep_source(2, "Wrong")).unwrap();
        let err = repo.load_all(&AuthorOverrides::default()).unwrap_err();
        assert!(matches!(err, PepsError::Pep(ref e) if e.number == Some(2)));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let (repo, _tmp) = setup_repo();
        let path = repo
            .write_output(Path::new("topic/typing.rst"), "content")
            .unwrap();
        assert_eq!(path, repo.output_path().join("topic/typing.rst"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");

        repo.write_output(Path::new("topic/typing.rst"), "replaced")
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_load_author_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("AUTHOR_OVERRIDES.csv");
        assert!(load_author_overrides(&path).unwrap().is_empty());

        fs::write(
            &path,
            "Overridden Name,Surname First,Name Reference\nAahz,Aahz,Aahz\n",
        )
        .unwrap();
        let overrides = load_author_overrides(&path).unwrap();
        assert_eq!(overrides.len(), 1);
        assert!(overrides.get("Aahz").is_some());
    }
}
