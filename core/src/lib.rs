//! A dynamically typed value.
//!
//! [`Value`] is a closed tagged union over plain data (`Int`, `Float`,
//! `Text`), containers (`Sequence`, `Mapping`), a deep-copied nested
//! reference (`Boxed`), a type-erased payload (`Object`) and four pointer
//! flavors with distinct ownership (`RawRef`, `SharedRef`, `ExclusiveRef`,
//! `WeakRef`).
//!
//! ```
//! use dynvar_core::{Value, ops::range};
//!
//! let mut table: Value = [("name", Value::text("dynvar"))].into_iter().collect();
//! table.set_key("numbers", range(0, 3, 1).unwrap()).unwrap();
//! assert_eq!(table.to_string(), r#"{ "name": "dynvar" "numbers": [ 0 1 2 ] }"#);
//!
//! let copy = table.clone();
//! table.get_key_mut("numbers").unwrap().push(Value::int(3)).unwrap();
//! assert_eq!(copy.get_key("numbers").unwrap().len().unwrap(), 3);
//! ```
//!
//! The value is single-threaded: it is neither `Send` nor `Sync`.

#![deny(unsafe_code)]

pub mod adapter;
pub mod copy;
pub mod error;
pub mod kind;
pub mod object;
pub mod ops;
pub mod render;
pub mod value;

pub use copy::{CopyContext, deep_copy};
pub use error::{Error, Result};
pub use kind::{Kind, kind_of};
pub use object::Object;
pub use render::{RenderConfig, Rendered};
pub use value::{Mapping, Pointer, Sequence, Value};

#[cfg(test)]
mod copy_test;
