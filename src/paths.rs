use std::path::PathBuf;

/// Retourne le repertoire de donnees centralise cross-platform.
/// Linux: ~/.config/codeleap-feed/
/// macOS: ~/Library/Application Support/codeleap-feed/
/// Windows: %APPDATA%/codeleap-feed/
pub fn data_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("codeleap-feed")
}

/// Chemin du profil local (username en cache): {data_dir}/profile.json
pub fn profile_path() -> PathBuf {
    data_dir().join("profile.json")
}

/// Chemin de la session du fournisseur d'identite: {data_dir}/session.json
pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

/// Chemin du fichier de configuration: {data_dir}/config.json
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Chemin du log client: {data_dir}/client.log
pub fn log_path() -> PathBuf {
    data_dir().join("client.log")
}
