//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示、源码上下文打印和文档摘要。

use std::fmt::Write as _;

use las_core::{CharReader, Document, LasError};

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &LasError, source: &str) {
    eprintln!("error: {e}");

    if let (Some(line), Some(column)) = (e.line(), e.column()) {
        eprint!("{}", source_context(source, line, column));
    }
}

/// 按字符流的规则解码源码，保证摘录中的列号与错误位置一致
pub fn decode_source(bytes: &[u8]) -> String {
    let mut reader = CharReader::new(bytes);
    let mut out = String::with_capacity(bytes.len());
    while let Ok(Some(c)) = reader.next() {
        out.push(c);
    }
    out
}

/// 渲染错误行及其上下文，`^` 指向 1-based 列
pub fn source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = String::new();

    if error_line == 0 || error_line > lines.len() {
        return out;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(lines.len());
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let _ = writeln!(out, "{separator}|--");
    for line_idx in start_line..=end_line {
        let _ = writeln!(out, "{line_idx:>width$} | {}", lines[line_idx - 1]);
        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            let _ = writeln!(out, "{:width$} | {marker}^", "");
        }
    }
    let _ = writeln!(out, "{separator}|--");
    out
}

/// 版本、换行模式、各段行数与数据行数
pub fn summary(doc: &Document) -> String {
    let mut out = String::new();
    let version = match doc.version() {
        "" => "(none)",
        v => v,
    };
    let _ = writeln!(out, "version: {version}");
    let _ = writeln!(out, "wrapped: {}", doc.is_wrapped());
    let _ = writeln!(out, "sections:");
    for section in doc.sections() {
        let _ = writeln!(out, "  {} ({} lines)", section.name, section.lines.len());
    }
    let _ = writeln!(out, "rows: {}", doc.logs().len());
    out
}

pub fn print_summary(doc: &Document) {
    print!("{}", summary(doc));
}
