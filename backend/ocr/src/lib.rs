//! Optical Character Recognition for ocrname.
//!
//! Talks JSON-RPC over stdio to an external OCR executable and picks the
//! line used as the image's title.

pub mod client;
pub mod exec;
pub mod request;
pub mod response;
pub mod select;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

pub use client::{OcrClient, OcrOptions};
pub use exec::{exec_with_stdin, ExecResult};
pub use request::{JsonRpcRequest, OcrParams};
pub use response::{decode_output, parse_response};
pub use select::{select_title, tallest_line};
