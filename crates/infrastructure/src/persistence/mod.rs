//! File-based request loading.

mod request_file;

pub use request_file::{RequestFile, RequestFileError, RequestFileLoader, RequestFormat};
