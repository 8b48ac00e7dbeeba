use std::path::Path;

/// Archive container format, resolved once from the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip`, unpacked in-process.
    Zip,
    /// `.lha`, unpacked by the external `lha` tool.
    Lha,
    /// Anything else; carries the lower-cased extension.
    Unsupported(String),
}

impl ArchiveFormat {
    /// Classifies `path` by its extension, case-insensitively. Contents are
    /// never sniffed.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "zip" => Self::Zip,
            "lha" => Self::Lha,
            _ => Self::Unsupported(extension),
        }
    }

    /// Short display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Zip => "zip",
            Self::Lha => "lha",
            Self::Unsupported(extension) => extension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(ArchiveFormat::from_path(Path::new("a/ACID-50A.ZIP")), ArchiveFormat::Zip);
        assert_eq!(ArchiveFormat::from_path(Path::new("mimic85.Lha")), ArchiveFormat::Lha);
    }

    #[test]
    fn test_from_path_unknown_extensions() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("pack.rar")),
            ArchiveFormat::Unsupported("rar".to_string())
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("pack.lzh")),
            ArchiveFormat::Unsupported("lzh".to_string())
        );
        assert_eq!(
            ArchiveFormat::from_path(Path::new("README")),
            ArchiveFormat::Unsupported(String::new())
        );
    }
}
