//! jshop Core - Shared domain helpers.
//!
//! This crate provides the pure pieces of the catalog domain used by the
//! server and its tests:
//!
//! - [`keys`] - natural-key validation (slugs, codes, labels)
//! - [`paging`] - page-parameter clamping and page-count arithmetic
//! - [`sort`] - lot sort modes and their wire representation
//!
//! The core crate contains only types and functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used
//! anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod keys;
pub mod paging;
pub mod sort;

pub use keys::{
    ALL_CATEGORY_CODE, KeyError, validate_code, validate_label, validate_name, validate_slug,
};
pub use paging::{PageParams, page_count};
pub use sort::LotSort;
