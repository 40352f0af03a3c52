//! Lexer 主体：缓冲区、段计数与 token 队列
//!
//! 拉取模型：解析器调用 [`Lexer::next_token`]，Lexer 只在队列为空时驱动状态机，
//! 并最多提前产出 `queue_capacity` 个 token。
//!
//! ```rust,ignore
//! use las_core::lexer::Lexer;
//!
//! let mut lexer = Lexer::new("~V\nVERS. 2.0 :VERSION\n".as_bytes());
//! while let Some(token) = lexer.next() {
//!     println!("{:?}", token?);
//! }
//! ```

use std::collections::VecDeque;
use std::io::Read;
use std::iter::FusedIterator;
use std::mem;

use las_config::{LasConfig, LexerConfig};
use tracing::trace;

use super::state::State;
use super::token::{Token, TokenKind};
use crate::error::{LasError, LasResult, RequiredSection};
use crate::kit::stream::{CharReader, SourcePosition};

/// 每个必需段的出现次数（单次解析内有效）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SectionCounts {
    pub version: usize,
    pub well: usize,
    pub curve: usize,
    pub ascii_log: usize,
}

impl SectionCounts {
    fn slot(&mut self, section: RequiredSection) -> &mut usize {
        match section {
            RequiredSection::Version => &mut self.version,
            RequiredSection::Well => &mut self.well,
            RequiredSection::Curve => &mut self.curve,
            RequiredSection::AsciiLog => &mut self.ascii_log,
        }
    }

    /// 记录一次出现；已出现过则返回 `DuplicateRequiredSection`
    pub fn record(&mut self, section: RequiredSection, position: SourcePosition) -> LasResult<()> {
        let count = self.slot(section);
        if *count >= 1 {
            return Err(LasError::DuplicateRequiredSection {
                section,
                occurrences: *count + 1,
                position,
            });
        }
        *count += 1;
        Ok(())
    }
}

/// LAS 词法分析器
pub struct Lexer<R> {
    pub(super) reader: CharReader<R>,
    pub(super) state: State,
    /// 最近一次消费的字符（`None` 表示 EOF）
    pub(super) current: Option<char>,
    /// 自上次 emit 以来消费的文本
    pub(super) buffer: String,
    /// 当前行已见的 `.` 数量
    pub(super) dots: usize,
    pub(super) counts: SectionCounts,
    queue: VecDeque<Token>,
    queue_capacity: usize,
    token_start: SourcePosition,
    pending_error: Option<LasError>,
    finished: bool,
}

impl<R: Read> Lexer<R> {
    /// 使用默认配置创建 Lexer
    pub fn new(source: R) -> Self {
        Self::from_reader(CharReader::new(source), &LexerConfig::default())
    }

    /// 按配置创建 Lexer（读缓冲容量、队列容量）
    pub fn with_config(source: R, config: &LasConfig) -> Self {
        let reader = CharReader::with_capacity(config.reader.buffer_capacity, source);
        Self::from_reader(reader, &config.lexer)
    }

    /// 包装已有的字符流
    pub fn from_reader(reader: CharReader<R>, config: &LexerConfig) -> Self {
        let queue_capacity = config.queue_capacity.max(1);
        trace!(target: "las::lexer", queue_capacity, "Creating new Lexer");
        Self {
            reader,
            state: State::Entry,
            current: None,
            buffer: String::new(),
            dots: 0,
            counts: SectionCounts::default(),
            queue: VecDeque::with_capacity(queue_capacity + 3),
            queue_capacity,
            token_start: SourcePosition::start(),
            pending_error: None,
            finished: false,
        }
    }

    /// 获取下一个 Token
    ///
    /// 队列中的 token 总是先于状态机后续发现的错误交付。
    /// 出错或到达 EOF 之后，后续调用返回 `EndOfInput`。
    pub fn next_token(&mut self) -> LasResult<Token> {
        if self.queue.is_empty() {
            self.fill();
        }
        if let Some(token) = self.queue.pop_front() {
            return Ok(token);
        }
        if let Some(error) = self.pending_error.take() {
            return Err(error);
        }
        Ok(Token::end_of_input(self.reader.source_position()))
    }

    /// 当前位置
    pub fn position(&self) -> SourcePosition {
        self.reader.source_position()
    }

    /// 必需段计数快照
    pub fn section_counts(&self) -> SectionCounts {
        self.counts
    }

    /// 驱动状态机直到队列达到容量或进入终态
    fn fill(&mut self) {
        while self.queue.len() < self.queue_capacity && self.state != State::Done {
            match self.transition(self.state) {
                Ok(next) => self.state = next,
                Err(error) => {
                    self.pending_error = Some(error);
                    self.state = State::Done;
                }
            }
        }
    }

    /// 消费一个字符并追加到缓冲区
    pub(super) fn step(&mut self) -> LasResult<Option<char>> {
        let c = self.reader.next()?;
        self.current = c;
        if let Some(c) = c {
            self.buffer.push(c);
            match c {
                '\n' => self.dots = 0,
                '.' => self.dots += 1,
                _ => {}
            }
        }
        Ok(c)
    }

    /// 持续消费，直到读到 `targets` 中的字符或 EOF
    pub(super) fn advance_until(&mut self, targets: &[char]) -> LasResult<Option<char>> {
        loop {
            match self.step()? {
                Some(c) if !targets.contains(&c) => continue,
                other => return Ok(other),
            }
        }
    }

    /// 当前字符是否为行尾（`\n` 或 EOF）
    pub(super) fn at_line_end(&self) -> bool {
        matches!(self.current, None | Some('\n'))
    }

    /// 把流推进到当前行行尾
    pub(super) fn finish_line(&mut self) -> LasResult<()> {
        if !self.at_line_end() {
            self.advance_until(&['\n'])?;
        }
        Ok(())
    }

    /// 把缓冲区打包为 token 放入队列
    pub(super) fn emit(&mut self, kind: TokenKind) {
        let token = Token::new(kind, mem::take(&mut self.buffer), self.token_start);
        trace!(
            target: "las::lexer",
            kind = ?token.kind,
            value = %token.value,
            line = token.position.display_line(),
            column = token.position.column,
            "Produced token"
        );
        self.queue.push_back(token);
        self.token_start = self.reader.source_position();
    }

    /// 依次产出空值 token（字段缺失时补齐一行）
    pub(super) fn emit_empty(&mut self, kinds: &[TokenKind]) {
        for &kind in kinds {
            self.emit(kind);
        }
    }

    /// 丢弃缓冲区内容
    pub(super) fn discard(&mut self) {
        self.buffer.clear();
        self.token_start = self.reader.source_position();
    }

    /// 用给定文本替换缓冲区
    pub(super) fn overwrite(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// 删除缓冲区最后一个字符
    pub(super) fn truncate(&mut self) {
        self.buffer.pop();
    }

    /// 删除结尾分隔符；EOF 时没有分隔符入缓冲区
    pub(super) fn truncate_delimiter(&mut self) {
        if self.current.is_some() {
            self.truncate();
        }
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = LasResult<Token>;

    /// 产出 token 直到 `EndOfInput`（包含）或第一个错误
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.is_end(),
            Err(_) => true,
        };
        Some(result)
    }
}

impl<R: Read> FusedIterator for Lexer<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_section_counts_reject_second_occurrence() {
        let mut counts = SectionCounts::default();
        let pos = SourcePosition::new(4, 2, 40);
        counts.record(RequiredSection::Curve, pos).unwrap();
        counts.record(RequiredSection::Well, pos).unwrap();

        let err = counts.record(RequiredSection::Curve, pos).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateRequiredSection);
        assert!(matches!(
            err,
            LasError::DuplicateRequiredSection {
                section: RequiredSection::Curve,
                occurrences: 2,
                ..
            }
        ));
        assert_eq!(counts.curve, 1);
    }

    #[test]
    fn test_buffer_operations() {
        let mut lexer = Lexer::new("ab.c".as_bytes());
        assert_eq!(lexer.advance_until(&['.']).unwrap(), Some('.'));
        assert_eq!(lexer.buffer, "ab.");
        assert_eq!(lexer.dots, 1);

        lexer.truncate();
        assert_eq!(lexer.buffer, "ab");

        lexer.overwrite("Version Information");
        lexer.emit(TokenKind::Section);
        assert!(lexer.buffer.is_empty());
        assert_eq!(lexer.queue.pop_front().unwrap().value, "Version Information");
    }

    #[test]
    fn test_advance_until_stops_at_eof() {
        let mut lexer = Lexer::new("abc".as_bytes());
        assert_eq!(lexer.advance_until(&[':']).unwrap(), None);
        assert_eq!(lexer.buffer, "abc");
        assert!(lexer.at_line_end());

        // EOF 时没有分隔符可删
        lexer.truncate_delimiter();
        assert_eq!(lexer.buffer, "abc");
    }

    #[test]
    fn test_dots_reset_on_newline() {
        let mut lexer = Lexer::new("a.b.\nc".as_bytes());
        lexer.advance_until(&['\n']).unwrap();
        assert_eq!(lexer.dots, 0);
        lexer.step().unwrap();
        assert_eq!(lexer.dots, 0);
    }

    #[test]
    fn test_counts_and_position_after_drain() {
        let mut lexer = Lexer::new("~V\n~W\n~P\n~A\n1 2\n".as_bytes());
        while !lexer.next_token().unwrap().is_end() {}
        assert_eq!(
            lexer.section_counts(),
            SectionCounts {
                version: 1,
                well: 1,
                curve: 0,
                ascii_log: 1,
            }
        );
        assert_eq!(lexer.position().line, 5);
        assert_eq!(lexer.position().column, 0);
    }

    #[test]
    fn test_queue_capacity_one() {
        let config = LexerConfig { queue_capacity: 0 };
        let reader = CharReader::new("~C\nDEPT.M :D\n".as_bytes());
        let lexer = Lexer::from_reader(reader, &config);
        let kinds: Vec<TokenKind> = lexer.map(|t| t.unwrap().kind).collect();
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[0], TokenKind::Section);
        assert_eq!(kinds[5], TokenKind::EndOfInput);
    }
}
