//! 解析错误类型
//!
//! 所有结构性违规都是致命的：解析立即中止，不返回部分文档。

use std::fmt;

use thiserror::Error;

use crate::kit::stream::{SourcePosition, StreamError};

/// Result alias used across the crate
pub type LasResult<T> = Result<T, LasError>;

/// The four required sections of a LAS 2.0 file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredSection {
    Version,
    Well,
    Curve,
    AsciiLog,
}

impl RequiredSection {
    /// Classify a section letter (the character after `~`)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'V' => Some(RequiredSection::Version),
            'W' => Some(RequiredSection::Well),
            'C' => Some(RequiredSection::Curve),
            'A' => Some(RequiredSection::AsciiLog),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            RequiredSection::Version => 'V',
            RequiredSection::Well => 'W',
            RequiredSection::Curve => 'C',
            RequiredSection::AsciiLog => 'A',
        }
    }
}

impl fmt::Display for RequiredSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.letter())
    }
}

/// LAS 解析错误
#[derive(Debug, Error)]
pub enum LasError {
    /// 文件首字符既不是 `~` 也不是 `#`
    #[error("invalid las file : unrecognized first character {} : {position}", describe(.found))]
    MalformedEntry {
        found: Option<char>,
        position: SourcePosition,
    },

    /// `~` 不在行首
    #[error("invalid las file section : tilde not first character on line : {position}")]
    MisplacedSectionMarker { position: SourcePosition },

    /// 必需段重复出现
    #[error("invalid las file : expected 1 got {occurrences} of section {section} : {position}")]
    DuplicateRequiredSection {
        section: RequiredSection,
        occurrences: usize,
        position: SourcePosition,
    },

    /// `~A` 段之后出现新段或注释
    #[error("invalid las file : log section must be last section in file : found {found:?} : {position}")]
    DataAfterLogSection {
        found: char,
        position: SourcePosition,
    },

    /// 底层字节源读取失败
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Fieldless mirror of [`LasError`] for matching on the kind alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedEntry,
    MisplacedSectionMarker,
    DuplicateRequiredSection,
    DataAfterLogSection,
    Stream,
}

impl LasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LasError::MalformedEntry { .. } => ErrorKind::MalformedEntry,
            LasError::MisplacedSectionMarker { .. } => ErrorKind::MisplacedSectionMarker,
            LasError::DuplicateRequiredSection { .. } => ErrorKind::DuplicateRequiredSection,
            LasError::DataAfterLogSection { .. } => ErrorKind::DataAfterLogSection,
            LasError::Stream(_) => ErrorKind::Stream,
        }
    }

    /// 错误位置（I/O 错误没有字符位置）
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            LasError::MalformedEntry { position, .. }
            | LasError::MisplacedSectionMarker { position }
            | LasError::DuplicateRequiredSection { position, .. }
            | LasError::DataAfterLogSection { position, .. } => Some(*position),
            LasError::Stream(_) => None,
        }
    }

    /// 获取行号（1-based）
    pub fn line(&self) -> Option<usize> {
        self.position().map(|p| p.display_line())
    }

    /// 获取列号（行内已消费字符数，即出错字符的 1-based 列）
    pub fn column(&self) -> Option<usize> {
        self.position().map(|p| p.column)
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_section_letters() {
        for letter in ['V', 'W', 'C', 'A'] {
            let section = RequiredSection::from_letter(letter).unwrap();
            assert_eq!(section.letter(), letter);
        }
        assert_eq!(RequiredSection::from_letter('P'), None);
        assert_eq!(RequiredSection::Curve.to_string(), "~C");
    }

    #[test]
    fn test_error_kind_and_location() {
        let err = LasError::MisplacedSectionMarker {
            position: SourcePosition::new(1, 2, 10),
        };
        assert_eq!(err.kind(), ErrorKind::MisplacedSectionMarker);
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(2));
    }

    #[test]
    fn test_error_display() {
        let err = LasError::DuplicateRequiredSection {
            section: RequiredSection::Well,
            occurrences: 2,
            position: SourcePosition::new(7, 2, 80),
        };
        assert_eq!(
            err.to_string(),
            "invalid las file : expected 1 got 2 of section ~W : line 8 : position 2"
        );

        let err = LasError::MalformedEntry {
            found: None,
            position: SourcePosition::start(),
        };
        assert!(err.to_string().contains("end of input"));
    }
}
