//! Module resolution for `import "name"`. Three-step search order:
//! `./name.mylang`, then `<package_root>/name.mylang`, then the first
//! `name-<version>.mylang` found in the package root.
use std::fs;
use std::path::PathBuf;

use log::{debug, trace};

use crate::interpreter::RuntimeError;
use crate::lexer::Position;

/// `~/.mylang/packages`, falling back to `./.mylang/packages` if the home
/// directory cannot be determined.
pub fn package_root() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mylang")
        .join("packages")
}

pub fn resolve_module(name: &str, position: &Position) -> Result<PathBuf, RuntimeError> {
    let local = PathBuf::from(format!("./{name}.mylang"));
    if local.is_file() {
        trace!("resolved module '{name}' to local file '{}'", local.display());
        return Ok(local);
    }

    let package_root = package_root();

    let packaged = package_root.join(format!("{name}.mylang"));
    if packaged.is_file() {
        trace!("resolved module '{name}' to package file '{}'", packaged.display());
        return Ok(packaged);
    }

    let prefix = format!("{name}-");
    if let Ok(entries) = fs::read_dir(&package_root) {
        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with(&prefix) && file_name.ends_with(".mylang") {
                debug!("resolved module '{name}' to versioned file '{file_name}'");
                return Ok(entry.path());
            }
        }
    }

    Err(RuntimeError::new(
        position.clone(),
        format!(
            "could not resolve module '{name}' (searched ./{name}.mylang, {root}/{name}.mylang, {root}/{name}-<version>.mylang)",
            root = package_root.display()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir() -> PathBuf {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("mylang-loader-test-{}-{id}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pos() -> Position {
        Position::new(std::rc::Rc::from("<test>"), 1, 1)
    }

    #[test]
    fn test_resolve_local_module_before_package_root() {
        let dir = scratch_dir();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(&dir).unwrap();

        fs::write(dir.join("lib.mylang"), "k = 1;").unwrap();
        let resolved = resolve_module("lib", &pos()).unwrap();

        std::env::set_current_dir(previous).unwrap();
        assert_eq!(resolved, PathBuf::from("./lib.mylang"));
    }

    #[test]
    fn test_resolve_missing_module_errors() {
        let dir = scratch_dir();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(&dir).unwrap();

        let err = resolve_module("does-not-exist", &pos()).unwrap_err();

        std::env::set_current_dir(previous).unwrap();
        assert!(err.message.contains("does-not-exist"));
    }
}
