//! `.l10n.json` の読み込み

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    L10nSettings,
};

/// ワークスペースルートに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".l10n.json";

/// ワークスペースルートの `.l10n.json` を読み込む
///
/// ファイルが無い場合は `Ok(None)`。読み込み・パースに失敗した場合は
/// どのファイルで失敗したかをエラーに含める
///
/// # Errors
/// - `ConfigError::IoError`: ファイルはあるが読めない (ディレクトリ、権限など)
/// - `ConfigError::ParseError`: JSON として不正、または型が合わない
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<L10nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {:?}", config_path);
            return Ok(None);
        }
        Err(source) => {
            tracing::warn!("Failed to read {:?}: {}", config_path, source);
            return Err(ConfigError::IoError { path: config_path, source });
        }
    };

    tracing::debug!("Loading configuration from: {:?}", config_path);
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::ParseError { path: config_path, source })
}
