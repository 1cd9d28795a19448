//! dynvar - A dynamically typed value for Rust
//!
//! # Overview
//!
//! [`Value`] holds exactly one of a closed set of kinds: plain data,
//! containers, a deep-copied nested reference, a type-erased object, or one
//! of four pointer flavors that keep their ownership rules. Common uses:
//!
//! - Loosely structured documents built at runtime
//! - Heterogeneous containers mixing data and handles
//! - Passing owned or shared resources through untyped plumbing
//!
//! # Quick Start
//!
//! ```
//! use dynvar::{Value, ops::range};
//!
//! let mut doc: Value = [("name", Value::text("sample"))].into_iter().collect();
//! doc.set_key("items", range(0, 6, 2).unwrap()).unwrap();
//! assert_eq!(doc.to_string(), r#"{ "items": [ 0 2 4 ] "name": "sample" }"#);
//!
//! // Copies are deep.
//! let copy = doc.clone();
//! doc.get_key_mut("items").unwrap().push(Value::int(6)).unwrap();
//! assert_eq!(copy.get_key("items").unwrap().len().unwrap(), 3);
//! ```
//!
//! # Ownership
//!
//! Pointer-like inputs are routed into the kind matching their ownership:
//!
//! ```
//! use std::rc::Rc;
//! use dynvar::Value;
//!
//! let shared = Rc::new(String::from("config"));
//! let v = Value::shared_from(&shared);
//! assert_eq!(Rc::strong_count(&shared), 2);
//!
//! let owned = Value::exclusive(Box::new(42u32));
//! // An exclusive owner cannot be duplicated: its copy is null.
//! assert_eq!(owned.clone().to_string(), "ExclusiveRef(nullptr)");
//! # drop(v);
//! ```

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{ReportConfig, render_error, render_error_to};

// Re-export public API from dynvar_core
pub use dynvar_core::{
    CopyContext, Error, Kind, Mapping, Object, Pointer, RenderConfig, Rendered, Result, Sequence,
    Value, deep_copy, kind_of,
};
pub use dynvar_core::{adapter, copy, kind, ops, render};
