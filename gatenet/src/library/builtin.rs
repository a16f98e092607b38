//! Built-in and External Gate Libraries
//!
//! The `basic` library is compiled into the crate. Additional libraries can
//! be dropped into a directory as JSON files and loaded without recompiling.

use std::path::Path;

use super::GateLibrary;

const EMBEDDED_BASIC: &str = include_str!("../../data/gate_libraries/basic.json");

/// The embedded `basic` cell library.
///
/// Falls back to an empty library (with a warning) should the embedded
/// document ever fail to parse.
pub fn basic_library() -> GateLibrary {
    match GateLibrary::from_json_str(EMBEDDED_BASIC) {
        Ok(library) => library,
        Err(e) => {
            tracing::warn!("Failed to parse embedded gate library: {}", e);
            GateLibrary::new("basic")
        }
    }
}

/// Load every `*.json` library in a directory.
/// Returns both the libraries that loaded and a message per file that did not.
pub fn load_libraries_from_directory(dir: &Path) -> (Vec<GateLibrary>, Vec<String>) {
    let mut libraries = Vec::new();
    let mut errors = Vec::new();

    if !dir.is_dir() {
        return (libraries, errors);
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("Failed to read directory {:?}: {}", dir, e));
            return (libraries, errors);
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();

    for path in paths {
        match GateLibrary::load_from_file(&path) {
            Ok(library) => {
                tracing::info!(
                    "Loaded gate library '{}' ({} types) from {:?}",
                    library.name(),
                    library.len(),
                    path.file_name()
                );
                libraries.push(library);
            }
            Err(e) => {
                let error_msg = format!("Failed to load {:?}: {}", path.file_name(), e);
                tracing::warn!("{}", error_msg);
                errors.push(error_msg);
            }
        }
    }

    (libraries, errors)
}
