//! 字符流
//!
//! 将字节源（`io::Read`）解码为 Unicode 字符流。
//! 支持单字符预读、行列追踪；非法 UTF-8 以替换字符代替并记录警告。

use std::io::{self, BufRead, BufReader, Read};

use tracing::warn;

use super::position::SourcePosition;

/// 字符流错误
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("I/O error at byte offset {offset}: {source}")]
    Io {
        offset: usize,
        #[source]
        source: io::Error,
    },
}

/// 字符流读取器
///
/// 最多预读一个字符。到达 EOF 后 `next`/`peek` 持续返回 `Ok(None)`。
pub struct CharReader<R> {
    /// 底层字节缓冲
    inner: BufReader<R>,
    /// 预读的字符（`Some(None)` 表示已预读到 EOF）
    lookahead: Option<Option<char>>,
    /// 当前位置
    position: SourcePosition,
}

impl<R: Read> CharReader<R> {
    /// 创建新的字符流（默认缓冲容量）
    pub fn new(source: R) -> Self {
        Self::with_capacity(las_config::ReaderConfig::default().buffer_capacity, source)
    }

    /// 创建指定缓冲容量的字符流
    pub fn with_capacity(capacity: usize, source: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), source),
            lookahead: None,
            position: SourcePosition::start(),
        }
    }

    /// 读取并消费一个字符
    pub fn next(&mut self) -> Result<Option<char>, StreamError> {
        let c = match self.lookahead.take() {
            Some(c) => c,
            None => self.decode()?,
        };
        if let Some(c) = c {
            self.position.advance(c);
        }
        Ok(c)
    }

    /// 预读下一个字符（不消费）
    pub fn peek(&mut self) -> Result<Option<char>, StreamError> {
        if let Some(c) = self.lookahead {
            return Ok(c);
        }
        let c = self.decode()?;
        self.lookahead = Some(c);
        Ok(c)
    }

    /// 当前行号，0-based
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 当前行内位置，0-based，遇到 `\n` 归零
    pub fn position(&self) -> usize {
        self.position.column
    }

    /// 当前位置快照
    pub fn source_position(&self) -> SourcePosition {
        self.position
    }

    /// 从底层读取一个完整的 UTF-8 序列
    fn decode(&mut self) -> Result<Option<char>, StreamError> {
        let lead = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let seq_len = match utf8_sequence_length(lead) {
            Some(len) => len,
            None => {
                warn!(
                    target: "las::reader",
                    byte = lead,
                    position = %self.position,
                    "Invalid UTF-8 lead byte"
                );
                return Ok(Some(replacement_char()));
            }
        };

        // 只消费合法的后续字节，其余字节留给下一次 decode
        let mut bytes = [lead, 0, 0, 0];
        for (i, slot) in bytes.iter_mut().enumerate().take(seq_len).skip(1) {
            match self.peek_byte()? {
                Some(byte @ 0x80..=0xBF) => {
                    self.inner.consume(1);
                    *slot = byte;
                }
                next => {
                    warn!(
                        target: "las::reader",
                        lead,
                        expected = seq_len,
                        got = i,
                        next = ?next,
                        position = %self.position,
                        "Truncated UTF-8 sequence"
                    );
                    return Ok(Some(replacement_char()));
                }
            }
        }

        match std::str::from_utf8(&bytes[..seq_len]) {
            Ok(s) => Ok(Some(s.chars().next().unwrap_or_else(replacement_char))),
            Err(e) => {
                warn!(
                    target: "las::reader",
                    bytes = ?&bytes[..seq_len],
                    error = %e,
                    position = %self.position,
                    "UTF-8 decode error"
                );
                Ok(Some(replacement_char()))
            }
        }
    }

    /// 查看下一个字节但不消费
    fn peek_byte(&mut self) -> Result<Option<u8>, StreamError> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(StreamError::Io {
                        offset: self.position.byte_offset,
                        source,
                    })
                }
            }
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(StreamError::Io {
                        offset: self.position.byte_offset,
                        source,
                    })
                }
            }
        }
    }
}

/// 获取UTF-8序列长度
fn utf8_sequence_length(lead_byte: u8) -> Option<usize> {
    match lead_byte {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Unicode替换字符
fn replacement_char() -> char {
    '\u{FFFD}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &[u8]) -> CharReader<&[u8]> {
        CharReader::new(input)
    }

    #[test]
    fn test_reader_ascii() {
        let mut r = reader(b"abc");
        assert_eq!(r.next().unwrap(), Some('a'));
        assert_eq!(r.next().unwrap(), Some('b'));
        assert_eq!(r.next().unwrap(), Some('c'));
        assert_eq!(r.next().unwrap(), None);
        assert_eq!(r.next().unwrap(), None);
    }

    #[test]
    fn test_reader_peek_does_not_advance() {
        let mut r = reader(b"~V");
        assert_eq!(r.peek().unwrap(), Some('~'));
        assert_eq!(r.peek().unwrap(), Some('~'));
        assert_eq!(r.position(), 0);
        assert_eq!(r.next().unwrap(), Some('~'));
        assert_eq!(r.position(), 1);
        assert_eq!(r.peek().unwrap(), Some('V'));
        assert_eq!(r.next().unwrap(), Some('V'));
        assert_eq!(r.peek().unwrap(), None);
    }

    #[test]
    fn test_reader_line_tracking() {
        let mut r = reader(b"ab\ncd");
        r.next().unwrap();
        r.next().unwrap();
        assert_eq!((r.line(), r.position()), (0, 2));

        r.next().unwrap(); // '\n'
        assert_eq!((r.line(), r.position()), (1, 0));

        r.next().unwrap(); // 'c'
        assert_eq!((r.line(), r.position()), (1, 1));
        assert_eq!(r.source_position().byte_offset, 4);
    }

    #[test]
    fn test_reader_multibyte() {
        let mut r = reader("°F µs".as_bytes());
        assert_eq!(r.next().unwrap(), Some('°'));
        assert_eq!(r.next().unwrap(), Some('F'));
        assert_eq!(r.next().unwrap(), Some(' '));
        assert_eq!(r.next().unwrap(), Some('µ'));
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn test_reader_small_buffer() {
        // 多字节序列跨越缓冲区边界
        let mut r = CharReader::with_capacity(1, "中文".as_bytes());
        assert_eq!(r.next().unwrap(), Some('中'));
        assert_eq!(r.next().unwrap(), Some('文'));
        assert_eq!(r.next().unwrap(), None);
    }

    #[test]
    fn test_reader_invalid_utf8() {
        let mut r = reader(&[0x80, b'a']);
        assert_eq!(r.next().unwrap(), Some('\u{FFFD}'));
        assert_eq!(r.next().unwrap(), Some('a'));
    }

    #[test]
    fn test_reader_truncated_utf8_at_eof() {
        let mut r = reader(&[b'a', 0xF0, 0x9F]);
        assert_eq!(r.next().unwrap(), Some('a'));
        assert_eq!(r.next().unwrap(), Some('\u{FFFD}'));
        assert_eq!(r.next().unwrap(), None);
    }

    #[test]
    fn test_reader_latin1_byte_keeps_newline() {
        let mut r = reader(&[b'f', 0xE9, b'\n', b'~', b'C']);
        assert_eq!(r.next().unwrap(), Some('f'));
        assert_eq!(r.next().unwrap(), Some('\u{FFFD}'));
        assert_eq!(r.next().unwrap(), Some('\n'));
        assert_eq!(r.line(), 1);
        assert_eq!(r.next().unwrap(), Some('~'));
        assert_eq!(r.next().unwrap(), Some('C'));
        assert_eq!(r.next().unwrap(), None);
    }

    #[test]
    fn test_reader_bad_continuation_left_unread() {
        // 四字节序列在第三个字节处中断，`#` 不被吞掉
        let mut r = CharReader::with_capacity(1, &[0xF0, 0x9F, b'#', 0xC3, b'~'][..]);
        assert_eq!(r.next().unwrap(), Some('\u{FFFD}'));
        assert_eq!(r.peek().unwrap(), Some('#'));
        assert_eq!(r.next().unwrap(), Some('#'));
        assert_eq!(r.next().unwrap(), Some('\u{FFFD}'));
        assert_eq!(r.next().unwrap(), Some('~'));
        assert_eq!(r.next().unwrap(), None);
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_reader_io_error() {
        let mut r = CharReader::new(FailingSource);
        let err = r.next().unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }
}
