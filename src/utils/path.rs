use std::path::{Path, PathBuf};

/// Where a configured file lives: `~` and `~/…` are taken from the home
/// directory, other relative paths from `base` (the config directory).
pub fn resolve_in(base: &Path, path: &str) -> PathBuf {
    let home = dirs::home_dir();
    let p = match (path.strip_prefix('~'), home) {
        (Some(""), Some(h)) => h,
        (Some(rest), Some(h)) if rest.starts_with('/') => h.join(&rest[1..]),
        _ => PathBuf::from(path),
    };
    if p.is_absolute() { p } else { base.join(p) }
}
