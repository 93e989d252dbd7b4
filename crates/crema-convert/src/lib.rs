#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod error;
mod import;
mod legacy;
mod lexer;
mod number;
mod parser;
mod tcl;
mod token;

pub use error::ConvertError;
pub use import::import;
pub use legacy::{convert_json, convert_legacy, detect_schema, Schema};
pub use number::{number_or_zero, parse_prefix};
pub use parser::{parse_pairs, parse_script, Arg, Command, Script};
pub use tcl::{convert_tcl, convert_tcl_with_report, TclConversion, TclLayout, TclReport};
pub use token::Span;
