//! CLI 错误类型

use std::io;
use std::path::PathBuf;

use las_core::LasError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// 输入文件无法读取
    #[error("cannot read '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 配置文件无法读取或不是合法的 JSON
    #[error("invalid config '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Parse(#[from] LasError),

    #[error("cannot serialize document: {0}")]
    Output(#[from] serde_json::Error),
}
