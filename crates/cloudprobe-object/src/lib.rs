#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;

pub use client::{ObjectClient, ObjectEntry};
pub use config::ObjectConfig;
pub use error::{ObjectError, ObjectResult};

/// Tracing target for object-listing operations.
pub const TRACING_TARGET: &str = "cloudprobe_object";
