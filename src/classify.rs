//! Classification of resolved paths by suffix and containing directory.

use std::fmt;
use std::path::Path;

/// What kind of file a path holds, judged by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// C or C++ source or header (`.c`, `.cpp`, `.h`, `.hpp`).
    SourceCode,
    /// Protocol buffer definition (`.proto`).
    Proto,
    /// Anything else; never listed in a manifest.
    None,
}

/// Which conventional module subdirectory a path lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Under `<module>/include`.
    Include,
    /// Under `<module>/src`.
    Src,
    /// Under `<module>/test`.
    Test,
    /// Under none of the above.
    None,
}

const SOURCE_SUFFIXES: [&str; 4] = [".cpp", ".h", ".hpp", ".c"];
const PROTO_SUFFIXES: [&str; 1] = [".proto"];

impl FileType {
    /// Manifest list stem for this type, or `None` for unlisted files.
    #[must_use]
    pub fn list_stem(self) -> Option<&'static str> {
        match self {
            Self::SourceCode => Some("SOURCE"),
            Self::Proto => Some("PROTO"),
            Self::None => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SourceCode => "source-code",
            Self::Proto => "proto",
            Self::None => "none",
        })
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Include => "include",
            Self::Src => "src",
            Self::Test => "test",
            Self::None => "none",
        })
    }
}

/// A resolved path together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord<'a> {
    /// Absolute path of the file.
    pub path: &'a Path,
    /// Suffix-based type.
    pub file_type: FileType,
    /// Directory-based role.
    pub role: FileRole,
}

impl<'a> FileRecord<'a> {
    /// Classifies `path` as a member of the module at `module_dir`.
    #[must_use]
    pub fn new(path: &'a Path, module_dir: &Path) -> Self {
        Self { path, file_type: classify_type(path), role: classify_role(path, module_dir) }
    }
}

/// Classifies a path by its suffix.
#[must_use]
pub fn classify_type(path: &Path) -> FileType {
    let name = path.to_string_lossy();
    if SOURCE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        FileType::SourceCode
    } else if PROTO_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        FileType::Proto
    } else {
        FileType::None
    }
}

/// Classifies a path by which of `include/`, `src/` or `test/` under
/// `module_dir` contains it, checked in that order.
#[must_use]
pub fn classify_role(path: &Path, module_dir: &Path) -> FileRole {
    [("include", FileRole::Include), ("src", FileRole::Src), ("test", FileRole::Test)]
        .into_iter()
        .find(|(dir, _)| path.starts_with(module_dir.join(dir)))
        .map_or(FileRole::None, |(_, role)| role)
}
