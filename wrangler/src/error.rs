use definitions::{DayKey, SnpKey};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WrangleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GWAS directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("{what} does not exist: {}", .path.display())]
    FileNotFound { what: &'static str, path: PathBuf },
    #[error("malformed row in {} at line {line}: {message}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("result file name {0} does not have four dot-separated fields")]
    MalformedFileName(String),
    #[error("column {column} is missing in {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("SNP {snp} has no value on day {day}")]
    MissingSnp { day: DayKey, snp: SnpKey },
}

pub type Result<T> = std::result::Result<T, WrangleError>;

/// `idx` is the zero-based index from `lines().enumerate()`.
pub(crate) fn malformed(path: &Path, idx: usize, message: String) -> WrangleError {
    WrangleError::MalformedRow {
        path: path.to_path_buf(),
        line: idx + 1,
        message,
    }
}

pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(WrangleError::DirectoryNotFound(path.to_path_buf()))
    }
}

pub fn require_file(path: &Path, what: &'static str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        let path = path.to_path_buf();
        Err(WrangleError::FileNotFound { what, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn messages() {
        let err = WrangleError::DirectoryNotFound(PathBuf::from("gwas"));
        assert_eq!(err.to_string(), "GWAS directory does not exist: gwas");
        let err = malformed(Path::new("a.tsv"), 2, "too short".to_string());
        assert_eq!(err.to_string(), "malformed row in a.tsv at line 3: too short");
        let err = WrangleError::MissingSnp {
            day: DayKey::new("day", "3"),
            snp: SnpKey::new("Chr1", "55"),
        };
        assert_eq!(err.to_string(), "SNP Chr1.55 has no value on day day.3");
    }
    #[test]
    fn missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(require_dir(dir.path()).is_ok());
        let absent = dir.path().join("absent");
        assert!(matches!(
            require_dir(&absent),
            Err(WrangleError::DirectoryNotFound(_))
        ));
        assert!(matches!(
            require_file(&absent, "Genotypes table"),
            Err(WrangleError::FileNotFound { .. })
        ));
    }
}
