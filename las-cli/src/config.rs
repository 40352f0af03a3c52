//! CLI 配置
//!
//! 从 JSON 文件读取 `LasConfig`，再用命令行参数覆盖

use std::path::Path;

use las_config::{LasConfig, LogLevel};

use crate::error::CliError;

/// 读取配置文件；未指定时使用默认值
pub fn load(path: Option<&Path>) -> Result<LasConfig, CliError> {
    let Some(path) = path else {
        return Ok(LasConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    from_json(&content).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 解析 JSON 配置，缺失字段取默认值
pub fn from_json(content: &str) -> Result<LasConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// `--log-level` 覆盖全局级别，各阶段单独设置的级别保留
pub fn apply_log_level(config: &mut LasConfig, level: Option<LogLevel>) {
    if let Some(level) = level {
        config.log.global = level;
    }
}

/// clap 的级别解析器
pub fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(s).ok_or_else(|| {
        format!("unknown log level '{s}' (expected silent, error, warn, info, debug or trace)")
    })
}
