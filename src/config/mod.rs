//! Highlight configuration: default span style, text metrics and color palette.
//!
//! Configurations are JSON documents. A built-in default ships with the crate and is
//! installed as a gpui global by [`crate::init`].

mod schema;
pub use schema::*;

mod deserializers;

mod ext;
pub use ext::*;
