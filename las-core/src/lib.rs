//! LAS Core - LAS 2.0 well-log parser
//!
//! Character stream, lexer state machine, parser, and document model.
//! Only reads from the supplied `io::Read`; no terminal output.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod document;
pub mod error;
pub mod kit;
pub mod lexer;
pub mod parser;

use std::io::Read;

// Re-export common types
pub use document::{Document, Line, LogData, Section, SectionName};
pub use error::{ErrorKind, LasError, LasResult, RequiredSection};
pub use kit::stream::{CharReader, SourcePosition, StreamError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

// Re-export config types from las-config
pub use las_config::{self, LasConfig};

/// 使用默认配置解析
pub fn parse<R: Read>(reader: R) -> LasResult<Document> {
    Parser::new(Lexer::new(reader)).parse()
}

/// 按配置解析（读缓冲容量、队列容量）
pub fn parse_with_config<R: Read>(reader: R, config: &LasConfig) -> LasResult<Document> {
    Parser::new(Lexer::with_config(reader, config)).parse()
}

pub fn parse_str(input: &str) -> LasResult<Document> {
    parse(input.as_bytes())
}
