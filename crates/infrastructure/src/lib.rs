//! Varsub Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus request file loading.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{
    InMemoryEnvironment, PathStyle, PlatformPathNormalizer, ProcessEnvironment,
    ShellCommandExecutor, StaticWorkspaceFolders,
};
pub use persistence::{RequestFile, RequestFileError, RequestFileLoader, RequestFormat};
pub use serialization::{SerializationError, from_json, to_json_stable};
