//! Post source discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Lists the Markdown files directly inside `dir`, sorted by filename for a
/// deterministic run. A missing directory is simply an empty post set.
pub fn list_markdown_posts(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.to_lowercase().ends_with(".md"))
        })
        .collect();
    files.sort();
    files
}

/// The slug is the filename with its `.md` extension dropped.
pub fn slug_from_filename(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let stem = if name.to_lowercase().ends_with(".md") {
        &name[..name.len() - 3]
    } else {
        name
    };
    stem.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_only_markdown_files_sorted() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("b.md"), "b").unwrap();
        fs::write(temp.path().join("a.MD"), "a").unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/c.md"), "c").unwrap();

        let files = list_markdown_posts(temp.path());
        let names: Vec<String> = files.iter().map(|p| slug_from_filename(p)).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn missing_directory_yields_no_posts() {
        assert!(list_markdown_posts(Path::new("/nonexistent/posts")).is_empty());
    }

    #[test]
    fn slug_drops_the_extension_case_insensitively() {
        assert_eq!(slug_from_filename(Path::new("hello-world.md")), "hello-world");
        assert_eq!(slug_from_filename(Path::new("UPPER.MD")), "UPPER");
    }
}
