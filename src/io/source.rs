use std::{convert::Infallible, fmt, fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};

/// Where a dataset's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// Read the whole dataset into memory.
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => fs::read(path)
                .with_context(|| format!("[io::source] Failed to read {}", path.display())),
            Self::Url(url) => fetch_url(url),
        }
    }
}

#[cfg(feature = "download")]
fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("[io::source] GET {url} failed"))?
        .error_for_status()
        .with_context(|| format!("[io::source] GET {url} returned an error status"))?;

    let bytes = response.bytes()
        .with_context(|| format!("[io::source] Failed to read response body from {url}"))?;

    Ok(bytes.to_vec())
}

#[cfg(not(feature = "download"))]
fn fetch_url(url: &str) -> Result<Vec<u8>> {
    anyhow::bail!("[io::source] Cannot fetch {url}: built without the `download` feature")
}

impl FromStr for DatasetSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::Path(PathBuf::from(s))
        })
    }
}

impl From<PathBuf> for DatasetSource {
    fn from(path: PathBuf) -> Self { Self::Path(path) }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::DatasetSource;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            "https://example.org/stops.topo.json".parse::<DatasetSource>().unwrap(),
            DatasetSource::Url("https://example.org/stops.topo.json".into()),
        );
        assert_eq!(
            "data/stops.topo.json".parse::<DatasetSource>().unwrap(),
            DatasetSource::Path(PathBuf::from("data/stops.topo.json")),
        );
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = DatasetSource::Path(PathBuf::from("/nonexistent/stops.json")).fetch().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/stops.json"));
    }

    #[test]
    fn reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, b"{}").unwrap();
        assert_eq!(DatasetSource::from(path).fetch().unwrap(), b"{}");
    }
}
