//! Sequence and Mapping operations: length, element access, `range`, `slice`.
//!
//! Operations that only make sense for one container kind fail with
//! [`Error::InvalidOperation`] on any other kind. Failing calls never modify
//! their input.

use crate::{
    error::{Error, Result},
    value::Value,
};

const ZERO_STEP: Error = Error::InvalidArgument("step cannot be zero");

impl Value {
    fn unsupported(&self, op: &'static str) -> Error {
        Error::InvalidOperation {
            op,
            found: self.kind(),
        }
    }

    /// Element count of a Sequence or entry count of a Mapping.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Sequence(seq) => Ok(seq.len()),
            Value::Mapping(map) => Ok(map.len()),
            other => Err(other.unsupported("len")),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    // ============================================================================
    // Sequence
    // ============================================================================

    pub fn get_index(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Sequence(seq) => seq.get(index).ok_or(Error::IndexOutOfRange {
                index,
                len: seq.len(),
            }),
            other => Err(other.unsupported("get_index")),
        }
    }

    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut Value> {
        match self {
            Value::Sequence(seq) => {
                let len = seq.len();
                seq.get_mut(index)
                    .ok_or(Error::IndexOutOfRange { index, len })
            }
            other => Err(other.unsupported("get_index_mut")),
        }
    }

    /// Write `value` at `index`, first growing the Sequence with `Null`
    /// padding if `index` is past the end.
    ///
    /// ```
    /// use dynvar_core::Value;
    ///
    /// let mut v = Value::sequence(vec![Value::int(1)]);
    /// v.set_index(3, Value::int(4)).unwrap();
    /// assert_eq!(v.to_string(), "[ 1 Null Null 4 ]");
    /// ```
    pub fn set_index(&mut self, index: usize, value: Value) -> Result<()> {
        let seq = match self {
            Value::Sequence(seq) => seq,
            other => return Err(other.unsupported("set_index")),
        };
        if index >= seq.len() {
            let new_len = index
                .checked_add(1)
                .ok_or(Error::InvalidArgument("index too large"))?;
            seq.try_reserve(new_len - seq.len())
                .map_err(|_| Error::InvalidArgument("index too large"))?;
            tracing::trace!(from = seq.len(), to = new_len, "Growing sequence");
            seq.resize_with(new_len, Value::default);
        }
        seq[index] = value;
        Ok(())
    }

    /// Append `value` to a Sequence.
    pub fn push(&mut self, value: Value) -> Result<()> {
        match self {
            Value::Sequence(seq) => {
                seq.push(value);
                Ok(())
            }
            other => Err(other.unsupported("push")),
        }
    }

    // ============================================================================
    // Mapping
    // ============================================================================

    pub fn get_key(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Mapping(map) => map
                .get(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_owned())),
            other => Err(other.unsupported("get_key")),
        }
    }

    pub fn get_key_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Mapping(map) => map
                .get_mut(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_owned())),
            other => Err(other.unsupported("get_key_mut")),
        }
    }

    /// Insert or overwrite the entry for `key`.
    pub fn set_key(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        match self {
            Value::Mapping(map) => {
                map.insert(key.into(), value);
                Ok(())
            }
            other => Err(other.unsupported("set_key")),
        }
    }
}

/// Same as [`Value::len`].
pub fn len(value: &Value) -> Result<usize> {
    value.len()
}

/// `start, start + step, ...` while `< end` (positive step) or `> end`
/// (negative step). Stops instead of overflowing.
fn walk(start: i64, end: i64, step: i64) -> impl Iterator<Item = i64> {
    core::iter::successors(Some(start), move |i| i.checked_add(step))
        .take_while(move |&i| if step > 0 { i < end } else { i > end })
}

/// A Sequence of Ints following the stepped walk from `start` towards `end`.
///
/// ```
/// use dynvar_core::ops::range;
///
/// assert_eq!(range(0, 10, 2).unwrap().to_string(), "[ 0 2 4 6 8 ]");
/// assert_eq!(range(10, 0, -3).unwrap().to_string(), "[ 10 7 4 1 ]");
/// assert!(range(0, 10, 0).is_err());
/// ```
pub fn range(start: i64, end: i64, step: i64) -> Result<Value> {
    if step == 0 {
        return Err(ZERO_STEP);
    }
    Ok(walk(start, end, step).map(Value::Int).collect())
}

/// `range(0, end, 1)`.
pub fn range_to(end: i64) -> Result<Value> {
    range(0, end, 1)
}

/// First point of the walk that is not below `0` (positive step) or not at
/// or above `len` (negative step).
fn first_in_bounds(start: i64, step: i64, len: i64) -> Option<i64> {
    let (start, step, len) = (i128::from(start), i128::from(step), i128::from(len));
    let first = if step > 0 && start < 0 {
        let steps = (-start + step - 1) / step;
        start + steps * step
    } else if step < 0 && start >= len {
        let stride = -step;
        let steps = (start - len + stride) / stride;
        start - steps * stride
    } else {
        start
    };
    i64::try_from(first).ok()
}

/// Copy the elements of a Sequence picked by a stepped walk.
///
/// Negative `start`/`end` count from the end of the Sequence. The walk is
/// bounded by `end` and by the Sequence itself: `len` for a positive step,
/// `0` for a negative one. Walk points outside the Sequence are skipped.
///
/// ```
/// use dynvar_core::{Value, ops::{range, slice}};
///
/// let v = range(1, 7, 1).unwrap();
/// assert_eq!(slice(&v, 1, 6, 2).unwrap().to_string(), "[ 2 4 6 ]");
/// assert_eq!(slice(&v, -1, 0, -2).unwrap().to_string(), "[ 6 4 2 ]");
/// ```
pub fn slice(value: &Value, start: i64, end: i64, step: i64) -> Result<Value> {
    let Value::Sequence(seq) = value else {
        return Err(value.unsupported("slice"));
    };
    if step == 0 {
        return Err(ZERO_STEP);
    }

    let len = i64::try_from(seq.len()).unwrap_or(i64::MAX);
    let normalize = |index: i64| if index < 0 { index + len } else { index };
    let (start, end) = (normalize(start), normalize(end));

    let Some(first) = first_in_bounds(start, step, len) else {
        return Ok(Value::Sequence(Vec::new()));
    };
    let picked: Box<dyn Iterator<Item = i64>> = if step > 0 {
        Box::new(walk(first, end, step).take_while(move |&i| i < len))
    } else {
        Box::new(walk(first, end, step).take_while(|&i| i >= 0))
    };

    // Every walk point is within [0, len) here.
    Ok(picked
        .filter_map(|i| usize::try_from(i).ok())
        .filter_map(|i| seq.get(i))
        .cloned()
        .collect())
}
