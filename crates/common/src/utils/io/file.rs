use std::{
    env,
    fs::File,
    io::{Read, Write},
    path::Path,
};

use eyre::Result;

/// Shorten `path` relative to the current working directory, for display.
///
/// ```no_run
/// use deltascope_common::utils::io::file::short_path;
///
/// let path = "/some/long/path/that/is/cwd/report.json";
/// let short_path = short_path(path);
/// assert_eq!(short_path, "./report.json");
/// ```
pub fn short_path(path: &str) -> String {
    match env::current_dir() {
        Ok(dir) => match dir.to_str() {
            Some(dir) if !dir.is_empty() && dir != "/" => path.replacen(dir, ".", 1),
            _ => path.to_owned(),
        },
        Err(_) => path.to_owned(),
    }
}

/// Write `contents` to `path_str`, creating any missing parent directories.
///
/// ```no_run
/// use deltascope_common::utils::io::file::write_file;
///
/// let result = write_file("/tmp/report.json", "[]");
/// ```
pub fn write_file(path_str: &str, contents: &str) -> Result<()> {
    let path = Path::new(path_str);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;

    Ok(())
}

/// Read the contents of the file at `path`.
pub fn read_file(path: &str) -> Result<String> {
    let mut file = File::open(Path::new(path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Delete a file or directory tree. Missing paths count as deleted.
pub fn delete_path(path: &str) -> bool {
    let path = Path::new(path);
    if !path.exists() {
        return true;
    }

    if path.is_dir() {
        std::fs::remove_dir_all(path).is_ok()
    } else {
        std::fs::remove_file(path).is_ok()
    }
}
