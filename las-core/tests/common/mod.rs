//! 测试辅助工具
//!
//! 提供样例文件读取、日志初始化和解析辅助函数

#![allow(dead_code)]

use std::path::PathBuf;

use las_core::{Document, ErrorKind, LasError};

/// 样例文件路径
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("samples")
        .join(name)
}

/// 初始化测试日志（可重复调用）
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// 解析样例文件
pub fn parse_sample(name: &str) -> Document {
    init_test_logger();
    let file = std::fs::File::open(sample_path(name)).expect("sample file should exist");
    las_core::parse(file).expect("sample should parse")
}

/// 解析字符串，期望成功
pub fn parse_ok(input: &str) -> Document {
    init_test_logger();
    match las_core::parse_str(input) {
        Ok(doc) => doc,
        Err(e) => panic!("expected {input:?} to parse, got: {e}"),
    }
}

/// 解析字符串，期望失败
pub fn parse_err(input: &str) -> LasError {
    init_test_logger();
    match las_core::parse_str(input) {
        Ok(doc) => panic!("expected {input:?} to fail, got: {doc:?}"),
        Err(e) => e,
    }
}

/// 断言错误类型与 1-based 行号
pub fn assert_error_at(input: &str, kind: ErrorKind, line: usize) {
    let err = parse_err(input);
    assert_eq!(err.kind(), kind, "unexpected error: {err}");
    assert_eq!(err.line(), Some(line), "unexpected location: {err}");
}
