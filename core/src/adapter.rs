//! Ownership adapter: factories that route pointer-like inputs into the
//! pointer-bearing kinds of [`Value`].
//!
//! | Input           | Kind                      |
//! |-----------------|---------------------------|
//! | `Rc<T>`         | [`Value::SharedRef`]      |
//! | `Box<T>`        | [`Value::ExclusiveRef`]   |
//! | `&Weak<T>`      | [`Value::WeakRef`]        |
//! | `*const T`      | [`Value::RawRef`]         |
//!
//! Pointee data is never copied here; only the ownership wrapper changes and
//! the concrete type is erased to `dyn Any`.

use core::any::{Any, type_name};
use std::rc::{Rc, Weak};

use crate::{
    error::{Error, Result},
    kind::Kind,
    value::Value,
};

/// A weak handle that has never observed a live allocation.
pub(crate) fn expired_weak() -> Weak<dyn Any> {
    Weak::<()>::new()
}

fn downcast_failed<T: Any>() -> Error {
    Error::DowncastFailed {
        expected: type_name::<T>(),
        found: None,
    }
}

impl Value {
    /// Take over a shared allocation. The share count is unchanged.
    pub fn shared<T: Any>(ptr: Rc<T>) -> Self {
        let erased: Rc<dyn Any> = ptr;
        Value::SharedRef(erased)
    }

    /// Share an allocation the caller keeps. The share count goes up by one.
    pub fn shared_from<T: Any>(ptr: &Rc<T>) -> Self {
        Self::shared(Rc::clone(ptr))
    }

    /// Take exclusive ownership of `owned`.
    ///
    /// Copies of the resulting value hold a null exclusive reference.
    pub fn exclusive<T: Any>(owned: Box<T>) -> Self {
        let erased: Box<dyn Any> = owned;
        Value::ExclusiveRef(Some(erased))
    }

    /// A null exclusive reference.
    pub fn null_exclusive() -> Self {
        Value::ExclusiveRef(None)
    }

    /// Observe the allocation behind `weak` without extending its lifetime.
    ///
    /// The allocation is resolved now: if it is already gone, the value holds
    /// an expired weak handle.
    pub fn weak<T: Any>(weak: &Weak<T>) -> Self {
        match weak.upgrade() {
            Some(strong) => {
                let erased: Rc<dyn Any> = strong;
                Value::WeakRef(Rc::downgrade(&erased))
            }
            None => {
                tracing::debug!(
                    type_name = type_name::<T>(),
                    "Weak reference adapted after its allocation was released"
                );
                Value::WeakRef(expired_weak())
            }
        }
    }

    /// Store a raw address verbatim. The value takes no part in its lifetime.
    ///
    /// Wide pointers (slices, trait objects) keep only their address.
    pub fn raw<T: ?Sized>(ptr: *const T) -> Self {
        Value::RawRef(ptr.cast_mut().cast::<()>())
    }

    pub fn raw_mut<T: ?Sized>(ptr: *mut T) -> Self {
        Value::RawRef(ptr.cast::<()>())
    }

    // ============================================================================
    // Resolution
    // ============================================================================

    /// Resolve a weak reference to a live shared handle, or `None` if expired.
    pub fn upgrade_weak(&self) -> Result<Option<Rc<dyn Any>>> {
        Ok(self.weak_handle()?.upgrade())
    }

    pub fn is_expired(&self) -> Result<bool> {
        Ok(self.weak_handle()?.strong_count() == 0)
    }

    /// Resolve a weak reference and downcast the live allocation.
    pub fn upgrade_weak_as<T: Any>(&self) -> Result<Option<Rc<T>>> {
        match self.weak_handle()?.upgrade() {
            Some(strong) => strong.downcast::<T>().map(Some).map_err(|_| downcast_failed::<T>()),
            None => Ok(None),
        }
    }

    /// Downcast the shared allocation. The share count goes up by one.
    pub fn shared_downcast<T: Any>(&self) -> Result<Rc<T>> {
        self.as_shared_ref()?
            .downcast::<T>()
            .map_err(|_| downcast_failed::<T>())
    }

    pub fn exclusive_downcast_ref<T: Any>(&self) -> Result<&T> {
        self.as_exclusive_ref()?
            .and_then(|owned| owned.downcast_ref::<T>())
            .ok_or_else(downcast_failed::<T>)
    }

    pub fn exclusive_downcast_mut<T: Any>(&mut self) -> Result<&mut T> {
        self.as_exclusive_ref_mut()?
            .as_deref_mut()
            .and_then(|owned| owned.downcast_mut::<T>())
            .ok_or_else(downcast_failed::<T>)
    }

    /// Move the exclusively owned pointee out, leaving a null exclusive
    /// reference. On a type mismatch the value is left unchanged.
    pub fn take_exclusive<T: Any>(&mut self) -> Result<Box<T>> {
        let slot = self.as_exclusive_ref_mut()?;
        if !slot.as_deref().is_some_and(|owned| owned.is::<T>()) {
            return Err(downcast_failed::<T>());
        }
        slot.take()
            .ok_or_else(downcast_failed::<T>)?
            .downcast::<T>()
            .map_err(|_| downcast_failed::<T>())
    }

    fn weak_handle(&self) -> Result<&Weak<dyn Any>> {
        match self {
            Value::WeakRef(weak) => Ok(weak),
            _ => Err(Error::TypeMismatch {
                expected: Kind::WeakRef,
                found: self.kind(),
            }),
        }
    }
}
