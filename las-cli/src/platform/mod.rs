pub mod cli;

pub use cli::{decode_source, print_error_with_source, print_summary};
