//! Type-erased payloads for user-defined data.
//!
//! An [`Object`] owns a `Box<dyn Any>` and remembers the name of the type it
//! was built from. The payload is recovered with a type-checked downcast.
//!
//! Whether an object can be copied is decided when it is built:
//! [`Object::new`] captures a clone function for `T: Clone`, while
//! [`Object::opaque`] accepts any `T` and copies to an empty object.

use core::any::{Any, type_name};
use core::fmt;

use crate::error::{Error, Result};

type CloneFn = fn(&dyn Any) -> Option<Box<dyn Any>>;

fn clone_payload<T: Any + Clone>(payload: &dyn Any) -> Option<Box<dyn Any>> {
    payload
        .downcast_ref::<T>()
        .map(|value| Box::new(value.clone()) as Box<dyn Any>)
}

pub struct Object {
    payload: Option<Box<dyn Any>>,
    type_name: &'static str,
    clone_fn: Option<CloneFn>,
}

impl Object {
    /// Wrap a copyable value.
    pub fn new<T: Any + Clone>(value: T) -> Self {
        Self {
            payload: Some(Box::new(value)),
            type_name: type_name::<T>(),
            clone_fn: Some(clone_payload::<T>),
        }
    }

    /// Wrap a value that cannot be copied. Copies of the object are empty.
    pub fn opaque<T: Any>(value: T) -> Self {
        Self {
            payload: Some(Box::new(value)),
            type_name: type_name::<T>(),
            clone_fn: None,
        }
    }

    /// An object with no payload.
    pub fn empty() -> Self {
        Self {
            payload: None,
            type_name: "",
            clone_fn: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Whether copying this object preserves its payload.
    pub fn is_copyable(&self) -> bool {
        self.payload.is_some() && self.clone_fn.is_some()
    }

    /// The recorded name of the payload's type, or `None` if empty.
    pub fn type_name(&self) -> Option<&'static str> {
        self.payload.as_ref().map(|_| self.type_name)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload().is_some_and(|p| p.is::<T>())
    }

    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        let found = self.type_name();
        self.payload()
            .and_then(|p| p.downcast_ref::<T>())
            .ok_or(Error::DowncastFailed {
                expected: type_name::<T>(),
                found,
            })
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Result<&mut T> {
        let found = self.type_name();
        self.payload
            .as_deref_mut()
            .and_then(|p| p.downcast_mut::<T>())
            .ok_or(Error::DowncastFailed {
                expected: type_name::<T>(),
                found,
            })
    }

    /// Move the payload out, leaving the object empty.
    ///
    /// On a type mismatch the object is left unchanged.
    pub fn take<T: Any>(&mut self) -> Result<T> {
        let err = Error::DowncastFailed {
            expected: type_name::<T>(),
            found: self.type_name(),
        };
        let payload = self.payload.take().ok_or_else(|| err.clone())?;
        match payload.downcast::<T>() {
            Ok(value) => {
                *self = Object::empty();
                Ok(*value)
            }
            Err(payload) => {
                self.payload = Some(payload);
                Err(err)
            }
        }
    }

    pub(crate) fn payload(&self) -> Option<&dyn Any> {
        self.payload.as_deref()
    }

    /// Copy using the clone function captured at construction. Objects
    /// without one copy to [`Object::empty`].
    pub(crate) fn shallow_copy(&self) -> Object {
        let copied = match (self.payload(), self.clone_fn) {
            (Some(payload), Some(clone_fn)) => clone_fn(payload),
            _ => None,
        };
        match copied {
            Some(payload) => Object {
                payload: Some(payload),
                type_name: self.type_name,
                clone_fn: self.clone_fn,
            },
            None => {
                if self.payload.is_some() {
                    tracing::debug!(type_name = self.type_name, "Opaque object copied as empty");
                }
                Object::empty()
            }
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "Object({name})"),
            None => write!(f, "Object(empty)"),
        }
    }
}
