//! # class-file-analyzer
//!
//! Reads compiled Java class files (loose, inside JARs, or in a directory) and
//! reports their superclass, interfaces and every field/method reference in the
//! constant pool, optionally narrowed by substring filters.
//!
//! ## Architecture
//!
//! - **cursor**: Bounds-checked big-endian reader
//! - **constant_pool**: Constant pool entries and their decoder
//! - **class_file**: Header parsing (magic, version, pool, this/super, interfaces)
//! - **resolve**: Index → class/field/method name resolution, field descriptor decoding
//! - **model**: `ClassDescriptor` and the field/method reference types
//! - **filter**: Target/class/method substring selection
//! - **version**: Class file versions and Java release names
//! - **source**: Class files, JAR entries and directory listings as byte sources
//! - **analyze**: Parse → filter → emit over inputs, with per-entry failure isolation
//! - **render**: Text and JSON reports
//! - **cli** / **config**: Command line surface and the resolved run configuration

pub mod analyze;
pub mod class_file;
pub mod cli;
pub mod config;
pub mod constant_pool;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod model;
pub mod render;
pub mod resolve;
pub mod source;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use class_file::parse_class;
pub use error::ClassFileError;
pub use model::ClassDescriptor;
