//! Kind-dependent deep copy.
//!
//! Both `Clone::clone` and `Clone::clone_from` on [`Value`] go through
//! [`deep_copy`]. The policy per kind:
//!
//! | Kind           | Copy                                                  |
//! |----------------|-------------------------------------------------------|
//! | Int/Float/Text | by value                                              |
//! | Sequence       | every element, recursively                            |
//! | Mapping        | every entry, recursively                              |
//! | Boxed          | a new pointer holding a deep copy of the pointee      |
//! | Object         | deep copy if the payload is a [`Pointer`], else the   |
//! |                | object's own clone function, else an empty object    |
//! | RawRef         | the address                                           |
//! | SharedRef      | the handle (share count goes up)                      |
//! | ExclusiveRef   | always a null exclusive reference                     |
//! | WeakRef        | the handle (still observing the same allocation)      |
//!
//! The ExclusiveRef rule cascades: an exclusive reference nested anywhere in
//! a container is null in the copy.
//!
//! Boxed pointers are tracked by address for the duration of one copy, so a
//! pointer reached twice is copied once and the copy shares it the same way.
//! Cycles therefore terminate and produce an isomorphic cycle.
//!
//! A boxed pointee that is mutably borrowed while being copied cannot be
//! read; its copy is a null Boxed pointer (or an empty Object when it sat
//! behind an Object) and a `warn` event is emitted.
//!
//! # Example
//!
//! ```
//! use dynvar_core::Value;
//!
//! let original = Value::sequence(vec![Value::int(1), Value::int(2)]);
//! let mut copy = original.clone();
//! copy.push(Value::int(3)).unwrap();
//! assert_eq!(original.len().unwrap(), 2);
//! ```

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use crate::{
    object::Object,
    value::{Pointer, Value},
};

/// Deep-copy a single value.
pub fn deep_copy(value: &Value) -> Value {
    CopyContext::new().copy(value)
}

/// Copy state shared across one or more roots.
///
/// Copying several values through the same context keeps pointers that are
/// shared between them shared between the copies.
#[derive(Debug, Default)]
pub struct CopyContext {
    copied: HashMap<*const RefCell<Value>, Pointer>,
}

impl CopyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct boxed pointers copied so far.
    pub fn pointers_copied(&self) -> usize {
        self.copied.len()
    }

    pub fn copy(&mut self, value: &Value) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Int(v) => Value::Int(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Text(s) => Value::Text(s.clone()),
            Value::Sequence(seq) => Value::Sequence(seq.iter().map(|e| self.copy(e)).collect()),
            Value::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(key, v)| (key.clone(), self.copy(v)))
                    .collect(),
            ),
            Value::Boxed(ptr) => Value::Boxed(ptr.as_ref().and_then(|p| self.copy_pointer(p))),
            Value::Object(obj) => Value::Object(self.copy_object(obj)),
            Value::RawRef(ptr) => Value::RawRef(*ptr),
            Value::SharedRef(rc) => Value::SharedRef(Rc::clone(rc)),
            Value::ExclusiveRef(owned) => {
                if owned.is_some() {
                    tracing::debug!("Exclusive reference copied as null");
                }
                Value::ExclusiveRef(None)
            }
            Value::WeakRef(weak) => Value::WeakRef(Weak::clone(weak)),
        }
    }

    fn copy_pointer(&mut self, ptr: &Pointer) -> Option<Pointer> {
        let key = Rc::as_ptr(ptr);
        if let Some(existing) = self.copied.get(&key) {
            tracing::trace!(?key, "Reusing already copied pointer");
            return Some(Rc::clone(existing));
        }
        let Ok(source) = ptr.try_borrow() else {
            tracing::warn!(?key, "Boxed pointee is mutably borrowed; copied as null");
            return None;
        };

        // Register the destination before descending so that a path leading
        // back to `ptr` resolves to it.
        let copy = Rc::new(RefCell::new(Value::Null));
        self.copied.insert(key, Rc::clone(&copy));
        let pointee = self.copy(&source);
        *copy.borrow_mut() = pointee;
        Some(copy)
    }

    fn copy_object(&mut self, obj: &Object) -> Object {
        match obj.payload().and_then(|p| p.downcast_ref::<Pointer>()) {
            Some(ptr) => self.copy_pointer(ptr).map_or_else(Object::empty, Object::new),
            None => obj.shallow_copy(),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        deep_copy(self)
    }

    fn clone_from(&mut self, source: &Self) {
        *self = deep_copy(source);
    }
}
