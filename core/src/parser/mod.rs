pub mod error;
pub mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};
