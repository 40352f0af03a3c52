//! Token 定义

use serde::Serialize;

use crate::kit::stream::SourcePosition;

/// 词法单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// 输入结束，总是最后一个 token
    EndOfInput,
    /// `#` 开头的注释行（值包含 `#`）
    Comment,
    /// 非日志段的段头，值为段名
    Section,
    /// `~A` 段头（空值）或一行原始日志数据
    SectionLogs,
    Mnemonic,
    Units,
    Data,
    Description,
}

/// 词法单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// 原始文本（未 trim）
    pub value: String,
    /// 文本起点：所在行与首字符的 0-based 列
    pub position: SourcePosition,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// 输入结束标记
    pub fn end_of_input(position: SourcePosition) -> Self {
        Self::new(TokenKind::EndOfInput, String::new(), position)
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}
