//! Output path resolution

use std::path::{Path, PathBuf};

/// `<lowercased font name>.<extension>`
pub fn default_file_name(font_name: &str, extension: &str) -> String {
    format!("{}.{}", font_name.to_lowercase(), extension)
}

/// Decide where the generated header goes.
///
/// An existing directory gets the default file name inside it, any other
/// path is used as-is, and no destination means the default file name in the
/// current directory.
pub fn resolve_output_path(destination: Option<&Path>, font_name: &str, extension: &str) -> PathBuf {
    match destination {
        Some(dir) if dir.is_dir() => dir.join(default_file_name(font_name, extension)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(font_name, extension)),
    }
}
