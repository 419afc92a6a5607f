use std::path::PathBuf;

/// Resolve the default store root: `$XDG_CONFIG_HOME/forge`, falling back to
/// `$HOME/.config/forge`, falling back to the current directory.
pub fn default_store_root() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("forge")
}
