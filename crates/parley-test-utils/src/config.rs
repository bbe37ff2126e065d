use std::fs;
use std::path::Path;

/// Write JSON5 contents to a path, creating parent directories if needed.
pub fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(path, contents).expect("write config");
}
