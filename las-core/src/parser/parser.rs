//! 文档组装器
//!
//! 按顺序消费 token，维护“当前段”和“当前行”两个游标。除了 Lexer 报告的结构错误，
//! 这里不做任何校验。

use std::io::Read;

use tracing::{debug, warn};

use crate::document::{Document, Line, Section};
use crate::error::LasResult;
use crate::lexer::{Lexer, Token, TokenKind};

pub struct Parser<R> {
    lexer: Lexer<R>,
    document: Document,
    section: Option<Section>,
    line: Option<Line>,
    in_logs: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexer,
            document: Document::default(),
            section: None,
            line: None,
            in_logs: false,
        }
    }

    /// 消费全部 token 并返回文档；任何错误都中止解析
    pub fn parse(mut self) -> LasResult<Document> {
        debug!(target: "las::parser", "Parse started");

        loop {
            let token = self.lexer.next_token()?;
            if token.is_end() {
                break;
            }
            self.accept(token);
        }

        self.flush_line();
        self.flush_section();

        debug!(
            target: "las::parser",
            sections = self.document.sections().len(),
            rows = self.document.logs().len(),
            comments = self.document.comments().len(),
            "Parse finished"
        );
        Ok(self.document)
    }

    fn accept(&mut self, token: Token) {
        let value = token.value.trim();
        match token.kind {
            TokenKind::Section => {
                self.flush_line();
                self.flush_section();
                self.section = Some(Section::new(value));
            }
            TokenKind::SectionLogs if !self.in_logs => {
                self.flush_line();
                self.flush_section();
                self.in_logs = true;
            }
            TokenKind::SectionLogs => {
                self.document.logs_mut().push_raw(value);
            }
            TokenKind::Mnemonic => {
                self.flush_line();
                self.line = Some(Line {
                    mnemonic: value.to_owned(),
                    ..Line::default()
                });
            }
            TokenKind::Units => {
                if let Some(line) = self.line.as_mut() {
                    line.units = value.to_owned();
                }
            }
            TokenKind::Data => {
                if let Some(line) = self.line.as_mut() {
                    line.data = value.to_owned();
                }
            }
            TokenKind::Description => {
                if let Some(line) = self.line.as_mut() {
                    line.description = value.to_owned();
                }
                self.flush_line();
            }
            TokenKind::Comment => match self.section.as_mut() {
                Some(section) => section.comments.push(value.to_owned()),
                None => self.document.push_comment(value.to_owned()),
            },
            TokenKind::EndOfInput => {}
        }
    }

    /// 把待定行追加到当前段
    fn flush_line(&mut self) {
        let Some(line) = self.line.take() else {
            return;
        };
        match self.section.as_mut() {
            Some(section) => section.lines.push(line),
            None => {
                warn!(
                    target: "las::parser",
                    mnemonic = %line.mnemonic,
                    "Header line outside of any section dropped"
                );
            }
        }
    }

    fn flush_section(&mut self) {
        if let Some(section) = self.section.take() {
            debug!(
                target: "las::parser",
                name = %section.name,
                lines = section.lines.len(),
                "Section complete"
            );
            self.document.push_section(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(input: &str) -> LasResult<Document> {
        Parser::new(Lexer::new(input.as_bytes())).parse()
    }

    #[test]
    fn test_header_lines_assembled() {
        let doc = parse("~V\nVERS.  2.0 : CWLS\nWRAP. NO : ONE LINE\n").unwrap();
        let version = doc.version_information().unwrap();
        assert_eq!(version.lines.len(), 2);
        assert_eq!(version.lines[0], Line::new("VERS", "", "2.0", "CWLS"));
    }

    #[test]
    fn test_comments_routed_by_section() {
        let doc = parse("# leading\n~W\n# inside\nSTRT.M 10.0 :START\n").unwrap();
        assert_eq!(doc.comments(), ["# leading"]);
        let well = doc.well_information().unwrap();
        assert_eq!(well.comments, ["# inside"]);
        assert_eq!(well.lines[0].mnemonic, "STRT");
    }

    #[test]
    fn test_line_without_section_dropped() {
        let doc = parse("# only a comment\nDEPT.M :DEPTH\n~C\n").unwrap();
        assert_eq!(doc.sections().len(), 1);
        assert!(doc.curve_information().unwrap().lines.is_empty());
    }

    #[test]
    fn test_log_section_flushes_open_section() {
        let doc = parse("~C\nDEPT.M :DEPTH\n~A\n1 2\n\n3 4").unwrap();
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.curve_information().unwrap().lines.len(), 1);
        assert_eq!(doc.logs().rows, [["1", "2"], ["3", "4"]]);
    }

    #[test]
    fn test_error_aborts_parse() {
        let err = parse("~V\n~V\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateRequiredSection);
    }
}
