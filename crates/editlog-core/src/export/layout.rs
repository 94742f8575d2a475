//! Where export files go

use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// Folder name used when no workspace root is known
pub const UNKNOWN_WORKSPACE: &str = "unknown";

/// Base name of the first workspace root, whitespace runs replaced by `-`
pub fn workspace_folder_name(roots: &[PathBuf]) -> String {
    let name = roots
        .first()
        .and_then(|root| root.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN_WORKSPACE.to_string());

    sanitize_folder_name(&name)
}

fn sanitize_folder_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// `<dataset_root>/<folder>/<YYYYMMDD-HHMMSS-mmm>.json` for the instant `at`
pub fn output_path<Tz: TimeZone>(dataset_root: &Path, folder: &str, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let file_name = format!("{}.json", at.format("%Y%m%d-%H%M%S-%3f"));
    dataset_root.join(folder).join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_folder_name_from_first_root() {
        let roots = vec![PathBuf::from("/home/me/My  Cool\tApp"), PathBuf::from("/other")];
        assert_eq!(workspace_folder_name(&roots), "My-Cool-App");

        let roots = vec![PathBuf::from("/home/me/side project")];
        assert_eq!(workspace_folder_name(&roots), "side-project");
    }

    #[test]
    fn test_folder_name_without_roots() {
        assert_eq!(workspace_folder_name(&[]), "unknown");
        assert_eq!(workspace_folder_name(&[PathBuf::from("/")]), "unknown");
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(sanitize_folder_name(" a \t b "), "-a-b-");
    }

    #[test]
    fn test_output_path_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap()
            + chrono::Duration::milliseconds(45);
        let path = output_path(Path::new("dataset"), "proj", &at);
        assert_eq!(path, PathBuf::from("dataset/proj/20240307-090502-045.json"));
    }

    #[test]
    fn test_output_path_uses_given_offset() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = Utc
            .with_ymd_and_hms(2024, 12, 31, 20, 0, 0)
            .unwrap()
            .with_timezone(&tokyo);
        let path = output_path(Path::new("/d"), "w", &at);
        assert_eq!(path, PathBuf::from("/d/w/20250101-050000-000.json"));
    }
}
