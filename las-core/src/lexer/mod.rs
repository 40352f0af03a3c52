//! LAS 词法分析
//!
//! 手写有限状态机：字符流 → Token 队列 → 解析器。
//! 状态见 [`state::State`]，缓冲区与队列见 [`Lexer`]。

#[allow(clippy::module_inception)]
pub mod lexer;
pub mod state;
pub mod token;

pub use lexer::{Lexer, SectionCounts};
pub use state::State;
pub use token::{Token, TokenKind};
