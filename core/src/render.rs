//! Textual rendering of values.
//!
//! ```text
//! Null                      Null
//! Int / Float               42 / 3.5
//! Text                      "hello"
//! Sequence                  [ 1 2 3 ]
//! Mapping                   { "a": 1 "b": 2 }
//! Boxed                     Pointer(<pointee>) | Pointer(nullptr)
//! Object                    Object(<type name>) | Object(empty)
//! RawRef                    RawRef(0x...) | RawRef(nullptr)
//! SharedRef                 SharedRef(<pointee>) | SharedRef(0x...)
//! ExclusiveRef              ExclusiveRef(0x...) | ExclusiveRef(nullptr)
//! WeakRef                   WeakRef(<pointee>) | WeakRef(0x...) | WeakRef(expired)
//! ```
//!
//! Shared and weak pointees are rendered when they are a `Value` or a
//! `RefCell<Value>`; any other pointee is shown by address.
//!
//! A pointee that is already being rendered further up the same path is
//! shown as `...`, so a cyclic Boxed graph renders as `Pointer(...)` at the
//! point where it closes. Acyclic values always render in full unless
//! [`RenderConfig::max_depth`] is set.

use core::any::Any;
use core::cell::RefCell;
use core::fmt;

use crate::value::Value;

/// Rendering options.
///
/// ```
/// use dynvar_core::{RenderConfig, Value};
///
/// let v: Value = [("b", Value::int(2)), ("a", Value::int(1))].into_iter().collect();
/// let config = RenderConfig {
///     sort_keys: true,
///     ..Default::default()
/// };
/// assert_eq!(v.render(config), r#"{ "a": 1 "b": 2 }"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Render Mapping entries in key order instead of hash order.
    pub sort_keys: bool,
    /// Include the recorded type name of Object payloads.
    pub show_object_type: bool,
    /// Nesting depth past which values render as `...`. `None` renders
    /// everything.
    pub max_depth: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sort_keys: true,
            show_object_type: true,
            max_depth: None,
        }
    }
}

/// A value paired with a [`RenderConfig`], ready for `{}` formatting.
pub struct Rendered<'a> {
    value: &'a Value,
    config: RenderConfig,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer::new(self.config, false).value(f, self.value, 0)
    }
}

impl Value {
    pub fn display(&self, config: RenderConfig) -> Rendered<'_> {
        Rendered {
            value: self,
            config,
        }
    }

    pub fn render(&self, config: RenderConfig) -> String {
        self.display(config).to_string()
    }
}

/// Renders with [`RenderConfig::default`] (keys sorted).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer::new(RenderConfig::default(), false).value(f, self, 0)
    }
}

/// Same layout as `Display`, with floats always showing a fractional part
/// and text escaped.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer::new(RenderConfig::default(), true).value(f, self, 0)
    }
}

struct Writer {
    config: RenderConfig,
    debug: bool,
    /// Cells currently being rendered, outermost first.
    visiting: Vec<*const RefCell<Value>>,
}

impl Writer {
    fn new(config: RenderConfig, debug: bool) -> Self {
        Self {
            config,
            debug,
            visiting: Vec::new(),
        }
    }

    fn value(&mut self, f: &mut fmt::Formatter<'_>, value: &Value, depth: usize) -> fmt::Result {
        if self.config.max_depth.is_some_and(|max| depth > max) {
            return f.write_str("...");
        }

        match value {
            Value::Null => f.write_str("Null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) if self.debug => write!(f, "{v:?}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) if self.debug => write!(f, "{s:?}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Sequence(seq) => {
                f.write_str("[ ")?;
                for elem in seq {
                    self.value(f, elem, depth + 1)?;
                    f.write_str(" ")?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                if self.config.sort_keys {
                    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                }
                f.write_str("{ ")?;
                for (key, v) in entries {
                    if self.debug {
                        write!(f, "{key:?}: ")?;
                    } else {
                        write!(f, "\"{key}\": ")?;
                    }
                    self.value(f, v, depth + 1)?;
                    f.write_str(" ")?;
                }
                f.write_str("}")
            }
            Value::Boxed(None) => f.write_str("Pointer(nullptr)"),
            Value::Boxed(Some(ptr)) => {
                f.write_str("Pointer(")?;
                self.cell(f, ptr, depth)?;
                f.write_str(")")
            }
            Value::Object(obj) => match obj.type_name() {
                Some(name) if self.config.show_object_type => write!(f, "Object({name})"),
                Some(_) => f.write_str("Object(opaque)"),
                None => f.write_str("Object(empty)"),
            },
            Value::RawRef(ptr) if ptr.is_null() => f.write_str("RawRef(nullptr)"),
            Value::RawRef(ptr) => write!(f, "RawRef({:p})", *ptr),
            Value::SharedRef(rc) => {
                f.write_str("SharedRef(")?;
                self.any(f, &**rc, depth)?;
                f.write_str(")")
            }
            Value::ExclusiveRef(None) => f.write_str("ExclusiveRef(nullptr)"),
            Value::ExclusiveRef(Some(owned)) => {
                write!(f, "ExclusiveRef({:p})", address(&**owned))
            }
            Value::WeakRef(weak) => match weak.upgrade() {
                Some(rc) => {
                    f.write_str("WeakRef(")?;
                    self.any(f, &*rc, depth)?;
                    f.write_str(")")
                }
                None => f.write_str("WeakRef(expired)"),
            },
        }
    }

    fn cell(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        cell: &RefCell<Value>,
        depth: usize,
    ) -> fmt::Result {
        let key: *const RefCell<Value> = cell;
        if self.visiting.contains(&key) {
            return f.write_str("...");
        }
        let Ok(pointee) = cell.try_borrow() else {
            return f.write_str("<borrowed>");
        };

        self.visiting.push(key);
        let result = self.value(f, &pointee, depth + 1);
        self.visiting.pop();
        result
    }

    fn any(&mut self, f: &mut fmt::Formatter<'_>, pointee: &dyn Any, depth: usize) -> fmt::Result {
        if let Some(value) = pointee.downcast_ref::<Value>() {
            self.value(f, value, depth + 1)
        } else if let Some(cell) = pointee.downcast_ref::<RefCell<Value>>() {
            self.cell(f, cell, depth)
        } else {
            write!(f, "{:p}", address(pointee))
        }
    }
}

fn address(pointee: &dyn Any) -> *const () {
    (pointee as *const dyn Any).cast()
}
