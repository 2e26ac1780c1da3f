//! Where an env file lives

use std::path::{Path, PathBuf};

/// A file location: either one path, or ordered segments joined with the
/// platform's path rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Segments(Vec<PathBuf>),
}

impl Location {
    /// Build a location from path segments
    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        Location::Segments(segments.into_iter().map(Into::into).collect())
    }

    /// Resolve to a single path.
    ///
    /// A single path is returned as given. Segments are pushed in order, so
    /// an absolute segment replaces everything before it. No normalization
    /// is performed. An empty segment list resolves to the empty path.
    pub fn resolve(&self) -> PathBuf {
        match self {
            Location::Path(path) => path.clone(),
            Location::Segments(segments) => {
                let mut path = PathBuf::new();
                for segment in segments {
                    path.push(segment);
                }
                path
            }
        }
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::Path(PathBuf::from(path))
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Location::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Path(path)
    }
}

impl From<&PathBuf> for Location {
    fn from(path: &PathBuf) -> Self {
        Location::Path(path.clone())
    }
}

impl<S: Into<PathBuf>> From<Vec<S>> for Location {
    fn from(segments: Vec<S>) -> Self {
        Location::segments(segments)
    }
}

impl<S: Into<PathBuf> + Clone> From<&[S]> for Location {
    fn from(segments: &[S]) -> Self {
        Location::segments(segments.iter().cloned())
    }
}

impl<S: Into<PathBuf>, const N: usize> From<[S; N]> for Location {
    fn from(segments: [S; N]) -> Self {
        Location::segments(segments)
    }
}
