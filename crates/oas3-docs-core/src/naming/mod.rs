//! The single slug implementation shared by every producer and consumer of
//! operation identifiers.
//!
//! The sidebar, the operation locator and route parsing all derive slugs
//! through [`operation_slug`]; nothing else in the crate builds one.

pub mod identity;
pub mod slug;


pub use identity::{IdentitySource, identity_source, operation_slug};
pub use slug::{SlugOptions, decamelize, slugify, slugify_with};
