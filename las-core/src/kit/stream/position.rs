//! 源位置追踪
//!
//! LAS 的错误信息按 "line N : position M" 报告：
//! - line: 内部 0-based，显示时 +1
//! - column: 当前行已消费的字符数（读到行首字符后为 1）
//! - byte_offset: 0-based，UTF-8 字节偏移

use std::fmt;

use serde::Serialize;

/// 源位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourcePosition {
    /// 行号，0-based
    pub line: usize,
    /// 行内已消费字符数，遇到 `\n` 归零
    pub column: usize,
    /// 字节偏移，0-based
    pub byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// 文件起始位置
    pub fn start() -> Self {
        Self::default()
    }

    /// 前进一个字符
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.byte_offset += c.len_utf8();
    }

    /// 人类可读的行号（1-based）
    pub fn display_line(&self) -> usize {
        self.line + 1
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} : position {}", self.display_line(), self.column)
    }
}
