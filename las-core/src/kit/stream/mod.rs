//! 字符流层：字节源 → Unicode 字符，附带行列追踪

pub mod position;
pub mod reader;

pub use position::SourcePosition;
pub use reader::{CharReader, StreamError};
