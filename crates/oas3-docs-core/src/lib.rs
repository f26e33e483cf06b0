//! Schema resolution and parameter normalization for interactive OpenAPI documentation.
//!
//! The crate takes a raw, possibly malformed and possibly self-referential OpenAPI
//! document and derives everything a documentation renderer needs from it: fully
//! resolved schemas, classified parameters, stable operation slugs, a tag-grouped
//! sidebar and per-field validation rules.
//!
//! Every derived view is a pure function of the loaded document. The only fatal
//! error is a document that lacks the minimal OpenAPI shape; everything else
//! degrades to placeholders and is reported as a [`Diagnostic`].
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_docs_core::ApiReference;
//!
//! # fn example() -> Result<(), oas3_docs_core::DocumentError> {
//! let raw = std::fs::read_to_string("openapi.json").expect("readable spec");
//! let reference = ApiReference::from_json_str(&raw)?;
//!
//! for collection in reference.sidebar() {
//!   for group in &collection.requests {
//!     for item in &group.items {
//!       let operation = reference.find_by_route(&item.route);
//!       println!("{} -> {:?}", item.name, operation.map(|op| op.path));
//!     }
//!   }
//! }
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod field;
pub mod locator;
pub mod naming;
pub mod normalizer;
pub mod parameters;
pub mod reference;
pub mod resolver;
pub mod responses;
pub mod schema;
pub mod sidebar;
pub mod validation;

#[cfg(test)]
mod tests;

pub use composite::{BranchSelection, combine_all_of, flatten_all_of, select_branch};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use document::{HttpMethod, OpenApiDocument, Operation};
pub use error::{DocumentError, UnsupportedFieldType};
pub use field::{FieldKind, NumericKind};
pub use locator::{EnhancedOperation, OperationEntry, OperationRegistry, RouteKey, find_by_route, find_by_slug};
pub use naming::{SlugOptions, operation_slug, slugify, slugify_with};
pub use normalizer::{Normalizer, normalize};
pub use parameters::{
  ClassifiedParameters, ParameterClassifier, ParameterLocation, ParameterObject, classify, extract_body_params,
};
pub use reference::{ApiReference, OperationView};
pub use resolver::{RefCache, RefTrail, Resolver, resolve};
pub use responses::{ResponseContent, ResponseView, normalize_responses};
pub use schema::{CombineKind, ObjectOrRef, Reference, SchemaObject, SchemaOrRef, SchemaType};
pub use sidebar::{SidebarCollection, SidebarRequest, SidebarRequestItem, build_sidebar};
pub use validation::{Issue, Rule, RuleKind, ValidationContract, derive_rules};
