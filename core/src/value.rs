use core::any::Any;
use core::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{
    error::{Error, Result},
    kind::Kind,
    object::Object,
};

/// Ordered, owning, resizable list of values.
pub type Sequence = Vec<Value>;

/// Unordered, owning, string-keyed collection of values.
pub type Mapping = hashbrown::HashMap<String, Value>;

/// Shared, interior-mutable reference to a nested value.
pub type Pointer = Rc<RefCell<Value>>;

/// A dynamically typed value.
///
/// Exactly one variant is active at a time. Assigning a value of another kind
/// drops the previous payload entirely.
///
/// Copying (`clone`) is kind-dependent, see [`crate::copy`]. Moving is a
/// plain Rust move; [`Value::take`] moves out and leaves [`Value::Null`].
///
/// # Example
///
/// ```
/// use dynvar_core::Value;
///
/// let mut v = Value::sequence(vec![Value::int(1), Value::text("two")]);
/// v.push(Value::float(3.0)).unwrap();
/// assert_eq!(v.len().unwrap(), 3);
/// assert_eq!(v.to_string(), r#"[ 1 "two" 3 ]"#);
/// ```
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Sequence),
    Mapping(Mapping),
    /// `None` is a null pointer.
    Boxed(Option<Pointer>),
    Object(Object),
    RawRef(*mut ()),
    SharedRef(Rc<dyn Any>),
    /// `None` is a null exclusive reference, which is also what a copy holds.
    ExclusiveRef(Option<Box<dyn Any>>),
    WeakRef(Weak<dyn Any>),
}

static_assertions::assert_impl_all!(Value: Clone, Default, core::fmt::Debug, core::fmt::Display);
static_assertions::assert_not_impl_any!(Value: Send, Sync);

impl Value {
    // ============================================================================
    // Boxing constructors
    // ============================================================================

    pub fn null() -> Self {
        Value::Null
    }

    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn sequence(elements: Sequence) -> Self {
        Value::Sequence(elements)
    }

    pub fn mapping(entries: Mapping) -> Self {
        Value::Mapping(entries)
    }

    /// Move `value` into a new [`Pointer`].
    pub fn boxed(value: Value) -> Self {
        Value::Boxed(Some(Rc::new(RefCell::new(value))))
    }

    /// Reference an existing [`Pointer`]. The pointee is not copied.
    pub fn from_pointer(pointer: Pointer) -> Self {
        Value::Boxed(Some(pointer))
    }

    pub fn null_pointer() -> Self {
        Value::Boxed(None)
    }

    /// Wrap any copyable value as an [`Object`].
    ///
    /// This is the fallback for native types that have no variant of their
    /// own. Use [`Value::opaque`] for types that are not `Clone`.
    pub fn object<T: Any + Clone>(value: T) -> Self {
        Value::Object(Object::new(value))
    }

    /// Wrap a non-copyable value as an [`Object`]. Copies hold an empty object.
    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Object(Object::opaque(value))
    }

    /// Move the value out, leaving [`Value::Null`] behind.
    pub fn take(&mut self) -> Value {
        core::mem::take(self)
    }

    // ============================================================================
    // Kind queries
    // ============================================================================

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::Text,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
            Value::Boxed(_) => Kind::Boxed,
            Value::Object(_) => Kind::Object,
            Value::RawRef(_) => Kind::RawRef,
            Value::SharedRef(_) => Kind::SharedRef,
            Value::ExclusiveRef(_) => Kind::ExclusiveRef,
            Value::WeakRef(_) => Kind::WeakRef,
        }
    }

    /// Human-readable name of the active kind (`"Null"` for [`Value::Null`]).
    pub fn type_of(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn is_boxed(&self) -> bool {
        matches!(self, Value::Boxed(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_raw_ref(&self) -> bool {
        matches!(self, Value::RawRef(_))
    }

    pub fn is_shared_ref(&self) -> bool {
        matches!(self, Value::SharedRef(_))
    }

    pub fn is_exclusive_ref(&self) -> bool {
        matches!(self, Value::ExclusiveRef(_))
    }

    pub fn is_weak_ref(&self) -> bool {
        matches!(self, Value::WeakRef(_))
    }

    // ============================================================================
    // Typed accessors
    // ============================================================================
    //
    // Each accessor fails with `Error::TypeMismatch` when another kind is
    // active and never modifies the value.

    fn mismatch(&self, expected: Kind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            _ => Err(self.mismatch(Kind::Int)),
        }
    }

    pub fn as_int_mut(&mut self) -> Result<&mut i64> {
        match self {
            Value::Int(v) => Ok(v),
            other => Err(other.mismatch(Kind::Int)),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(v) => Ok(*v),
            _ => Err(self.mismatch(Kind::Float)),
        }
    }

    pub fn as_float_mut(&mut self) -> Result<&mut f64> {
        match self {
            Value::Float(v) => Ok(v),
            other => Err(other.mismatch(Kind::Float)),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s.as_str()),
            _ => Err(self.mismatch(Kind::Text)),
        }
    }

    pub fn as_text_mut(&mut self) -> Result<&mut String> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch(Kind::Text)),
        }
    }

    pub fn as_sequence(&self) -> Result<&Sequence> {
        match self {
            Value::Sequence(seq) => Ok(seq),
            _ => Err(self.mismatch(Kind::Sequence)),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Result<&mut Sequence> {
        match self {
            Value::Sequence(seq) => Ok(seq),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }

    pub fn as_mapping(&self) -> Result<&Mapping> {
        match self {
            Value::Mapping(map) => Ok(map),
            _ => Err(self.mismatch(Kind::Mapping)),
        }
    }

    pub fn as_mapping_mut(&mut self) -> Result<&mut Mapping> {
        match self {
            Value::Mapping(map) => Ok(map),
            other => Err(other.mismatch(Kind::Mapping)),
        }
    }

    /// The boxed pointer; `Ok(None)` for a null pointer.
    pub fn as_pointer(&self) -> Result<Option<&Pointer>> {
        match self {
            Value::Boxed(ptr) => Ok(ptr.as_ref()),
            _ => Err(self.mismatch(Kind::Boxed)),
        }
    }

    pub fn as_pointer_mut(&mut self) -> Result<&mut Option<Pointer>> {
        match self {
            Value::Boxed(ptr) => Ok(ptr),
            other => Err(other.mismatch(Kind::Boxed)),
        }
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(other.mismatch(Kind::Object)),
        }
    }

    pub fn as_raw_ref(&self) -> Result<*mut ()> {
        match self {
            Value::RawRef(ptr) => Ok(*ptr),
            _ => Err(self.mismatch(Kind::RawRef)),
        }
    }

    /// A new handle to the shared allocation (the share count goes up).
    pub fn as_shared_ref(&self) -> Result<Rc<dyn Any>> {
        match self {
            Value::SharedRef(rc) => Ok(Rc::clone(rc)),
            _ => Err(self.mismatch(Kind::SharedRef)),
        }
    }

    pub fn as_exclusive_ref(&self) -> Result<Option<&dyn Any>> {
        match self {
            Value::ExclusiveRef(owned) => Ok(owned.as_deref()),
            _ => Err(self.mismatch(Kind::ExclusiveRef)),
        }
    }

    pub fn as_exclusive_ref_mut(&mut self) -> Result<&mut Option<Box<dyn Any>>> {
        match self {
            Value::ExclusiveRef(owned) => Ok(owned),
            other => Err(other.mismatch(Kind::ExclusiveRef)),
        }
    }

    pub fn as_weak_ref(&self) -> Result<Weak<dyn Any>> {
        match self {
            Value::WeakRef(weak) => Ok(Weak::clone(weak)),
            _ => Err(self.mismatch(Kind::WeakRef)),
        }
    }
}

// ============================================================================
// Conversions from native types
// ============================================================================

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Sequence> for Value {
    fn from(value: Sequence) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<Pointer> for Value {
    fn from(value: Pointer) -> Self {
        Value::Boxed(Some(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ============================================================================
// Equality
// ============================================================================

/// Structural for data kinds, identity for pointer kinds and objects.
///
/// Boxed pointers compare equal when they are the same pointer or their
/// pointees are equal. A pair of pointers met again while it is still being
/// compared counts as equal, so isomorphic cyclic graphs compare equal. A
/// pointee that is mutably borrowed only equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_eq(self, other, &mut Vec::new())
    }
}

type CellPair = (*const RefCell<Value>, *const RefCell<Value>);

fn values_eq(a: &Value, b: &Value, comparing: &mut Vec<CellPair>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Sequence(a), Value::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_eq(x, y, comparing))
        }
        (Value::Mapping(a), Value::Mapping(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_eq(x, y, comparing)))
        }
        (Value::Boxed(a), Value::Boxed(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => pointers_eq(a, b, comparing),
            _ => false,
        },
        (Value::Object(a), Value::Object(b)) => match (a.payload(), b.payload()) {
            (None, None) => true,
            (Some(a), Some(b)) => core::ptr::addr_eq(a, b),
            _ => false,
        },
        (Value::RawRef(a), Value::RawRef(b)) => a == b,
        (Value::SharedRef(a), Value::SharedRef(b)) => Rc::ptr_eq(a, b),
        (Value::ExclusiveRef(a), Value::ExclusiveRef(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => core::ptr::addr_eq(&**a, &**b),
            _ => false,
        },
        (Value::WeakRef(a), Value::WeakRef(b)) => Weak::ptr_eq(a, b),
        _ => false,
    }
}

fn pointers_eq(a: &Pointer, b: &Pointer, comparing: &mut Vec<CellPair>) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
    if comparing.contains(&pair) {
        return true;
    }
    let (Ok(x), Ok(y)) = (a.try_borrow(), b.try_borrow()) else {
        return false;
    };

    comparing.push(pair);
    let equal = values_eq(&x, &y, comparing);
    comparing.pop();
    equal
}
