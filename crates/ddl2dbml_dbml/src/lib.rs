//! Turns a parsed schema into DBML text.
//!
//! The mapper translates MySQL-specific pieces (data types, index methods,
//! referential actions) into their DBML spellings, and the generator renders
//! Project, Table, and Ref blocks from them.

pub mod generator;
pub mod mapper;

pub use generator::generate;
