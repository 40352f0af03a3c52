//! 状态函数
//!
//! 每个状态对应一个处理函数，函数读取字符、可能 emit token，并返回下一个状态。
//! `transition` 是唯一的分发点，状态集合是封闭的。

use std::io::Read;

use tracing::warn;

use super::lexer::Lexer;
use super::token::TokenKind;
use crate::document::SectionName;
use crate::error::{LasError, LasResult, RequiredSection};

/// 状态机状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// 文件首字符
    Entry,
    /// 刚读到 `~`
    Section,
    /// 行边界分发
    Next,
    Comment,
    Mnemonic,
    Units,
    Data,
    Description,
    /// `~A` 之后的原始数据行
    LogsDataLine,
    /// 终态，不再产出 token
    Done,
}

impl<R: Read> Lexer<R> {
    /// 执行一个状态，返回下一个状态
    pub(super) fn transition(&mut self, state: State) -> LasResult<State> {
        match state {
            State::Entry => self.lex_entry(),
            State::Section => self.lex_section(),
            State::Next => self.lex_next(),
            State::Comment => self.lex_comment(),
            State::Mnemonic => self.lex_mnemonic(),
            State::Units => self.lex_units(),
            State::Data => self.lex_data(),
            State::Description => self.lex_description(),
            State::LogsDataLine => self.lex_logs_data_line(),
            State::Done => Ok(State::Done),
        }
    }

    /// 合法文件必须以段头或注释开始
    fn lex_entry(&mut self) -> LasResult<State> {
        match self.step()? {
            Some('~') => Ok(State::Section),
            Some('#') => Ok(State::Comment),
            found => {
                let position = self.reader.source_position();
                warn!(target: "las::lexer", ?found, %position, "Unrecognized first character");
                Err(LasError::MalformedEntry { found, position })
            }
        }
    }

    fn lex_section(&mut self) -> LasResult<State> {
        if self.reader.position() != 1 {
            let position = self.reader.source_position();
            warn!(target: "las::lexer", %position, "Tilde not first character on line");
            return Err(LasError::MisplacedSectionMarker { position });
        }

        let letter = self.step()?;
        if let Some(section) = letter.and_then(RequiredSection::from_letter) {
            let position = self.reader.source_position();
            self.counts.record(section, position).inspect_err(|_| {
                warn!(target: "las::lexer", %section, %position, "Duplicate required section");
            })?;
        }

        self.finish_line()?;

        if letter == Some('A') {
            // `~A` 行的剩余部分只是段标记，不是数据
            self.discard();
            self.emit(TokenKind::SectionLogs);
            return Ok(State::LogsDataLine);
        }

        match letter.and_then(SectionName::from_letter) {
            Some(name) => self.overwrite(name.as_str()),
            None => {
                // 自定义段：整行文本（去掉 `~`）即段名
                self.truncate_delimiter();
                let captured = self.buffer.strip_prefix('~').unwrap_or(&self.buffer).to_owned();
                self.overwrite(&captured);
            }
        }
        self.emit(TokenKind::Section);
        Ok(State::Next)
    }

    fn lex_next(&mut self) -> LasResult<State> {
        self.finish_line()?;
        self.discard();

        loop {
            match self.step()? {
                None => {
                    self.emit(TokenKind::EndOfInput);
                    return Ok(State::Done);
                }
                Some('#') => return Ok(State::Comment),
                Some('~') => return Ok(State::Section),
                Some('\n') => self.discard(),
                Some(_) => return Ok(State::Mnemonic),
            }
        }
    }

    fn lex_comment(&mut self) -> LasResult<State> {
        self.finish_line()?;
        self.truncate_delimiter();
        self.emit(TokenKind::Comment);
        Ok(State::Next)
    }

    /// 助记符只以行内第一个 `.` 结束
    fn lex_mnemonic(&mut self) -> LasResult<State> {
        let found = match self.current {
            Some('.') => self.current,
            _ => self.advance_until(&['.', '~', '\n'])?,
        };

        match found {
            Some('.') if self.dots == 1 => {
                self.truncate();
                self.emit(TokenKind::Mnemonic);
                Ok(State::Units)
            }
            // 行中的 `~`，由 Section 状态报告位置错误
            Some('~') => Ok(State::Section),
            _ => {
                self.truncate_delimiter();
                if self.buffer.trim().is_empty() {
                    self.discard();
                    return Ok(State::Next);
                }
                self.emit(TokenKind::Mnemonic);
                self.emit_empty(&[TokenKind::Units, TokenKind::Data, TokenKind::Description]);
                Ok(State::Next)
            }
        }
    }

    fn lex_units(&mut self) -> LasResult<State> {
        match self.advance_until(&[' ', '\n'])? {
            Some(' ') => {
                self.truncate();
                self.emit(TokenKind::Units);
                Ok(State::Data)
            }
            _ => {
                self.truncate_delimiter();
                self.emit(TokenKind::Units);
                self.emit_empty(&[TokenKind::Data, TokenKind::Description]);
                Ok(State::Next)
            }
        }
    }

    fn lex_data(&mut self) -> LasResult<State> {
        match self.advance_until(&[':', '\n'])? {
            Some(':') => {
                self.truncate();
                self.emit(TokenKind::Data);
                Ok(State::Description)
            }
            _ => {
                self.truncate_delimiter();
                self.emit(TokenKind::Data);
                self.emit_empty(&[TokenKind::Description]);
                Ok(State::Next)
            }
        }
    }

    fn lex_description(&mut self) -> LasResult<State> {
        self.advance_until(&['\n'])?;
        self.truncate_delimiter();
        self.emit(TokenKind::Description);
        Ok(State::Next)
    }

    /// `~A` 必须是最后一段：之后出现 `~` 或 `#` 均为致命错误
    fn lex_logs_data_line(&mut self) -> LasResult<State> {
        self.discard();

        match self.step()? {
            None => {
                self.emit(TokenKind::EndOfInput);
                Ok(State::Done)
            }
            Some(found @ ('~' | '#')) => {
                if found == '~' && self.reader.peek()? == Some('A') {
                    self.step()?;
                    let position = self.reader.source_position();
                    self.counts.record(RequiredSection::AsciiLog, position)?;
                }
                let position = self.reader.source_position();
                warn!(target: "las::lexer", ?found, %position, "Data after log section");
                Err(LasError::DataAfterLogSection { found, position })
            }
            Some(_) => {
                self.finish_line()?;
                self.truncate_delimiter();
                self.emit(TokenKind::SectionLogs);
                Ok(State::LogsDataLine)
            }
        }
    }
}
