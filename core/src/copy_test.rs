//! Tests for the kind-dependent copy policy.

use core::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{CopyContext, Object, Pointer, Value, deep_copy, test_utils::init_test_logging};

// ============================================================================
// Plain data
// ============================================================================

#[test]
fn test_primitive_copy_is_independent() {
    let original = Value::int(1);
    let mut copy = original.clone();
    *copy.as_int_mut().unwrap() = 2;
    assert_eq!(original.as_int().unwrap(), 1);

    let original = Value::float(1.5);
    let mut copy = original.clone();
    *copy.as_float_mut().unwrap() = 2.5;
    assert_eq!(original.as_float().unwrap(), 1.5);

    let original = Value::text("abc");
    let mut copy = original.clone();
    copy.as_text_mut().unwrap().push('d');
    assert_eq!(original.as_text().unwrap(), "abc");
    assert_eq!(copy.as_text().unwrap(), "abcd");
}

#[test]
fn test_sequence_copy_is_deep() {
    let mut original = Value::sequence(vec![
        Value::int(1),
        Value::sequence(vec![Value::text("inner")]),
    ]);
    let copy = original.clone();

    original.push(Value::int(3)).unwrap();
    assert_eq!(copy.len().unwrap(), 2);

    original.set_index(0, Value::int(100)).unwrap();
    original
        .get_index_mut(1)
        .unwrap()
        .push(Value::Null)
        .unwrap();

    assert_eq!(copy.to_string(), r#"[ 1 [ "inner" ] ]"#);
    assert_eq!(original.to_string(), r#"[ 100 [ "inner" Null ] 3 ]"#);
}

#[test]
fn test_mapping_copy_is_deep() {
    let mut original: Value = [
        ("a", Value::int(1)),
        ("b", Value::sequence(vec![Value::int(2)])),
    ]
    .into_iter()
    .collect();
    let copy = original.clone();

    original.set_key("c", Value::int(3)).unwrap();
    original.get_key_mut("b").unwrap().push(Value::int(3)).unwrap();

    assert_eq!(copy.len().unwrap(), 2);
    assert_eq!(copy.to_string(), r#"{ "a": 1 "b": [ 2 ] }"#);
}

#[test]
fn test_clone_from_replaces_target() {
    let source = Value::sequence(vec![Value::int(1)]);
    let mut target = Value::text("old");
    target.clone_from(&source);
    assert_eq!(target, source);
}

// ============================================================================
// Boxed
// ============================================================================

#[test]
fn test_boxed_copy_is_a_new_pointer() {
    let original = Value::boxed(Value::int(1));
    let copy = original.clone();

    let original_ptr = original.as_pointer().unwrap().unwrap();
    let copy_ptr = copy.as_pointer().unwrap().unwrap();
    assert!(!Rc::ptr_eq(original_ptr, copy_ptr));

    *original_ptr.borrow_mut() = Value::int(2);
    assert_eq!(copy.to_string(), "Pointer(1)");
}

#[test]
fn test_null_pointer_copies_as_null_pointer() {
    let copy = Value::null_pointer().clone();
    assert!(copy.as_pointer().unwrap().is_none());
}

#[test]
fn test_shared_node_stays_shared_in_copy() {
    let node = Value::boxed(Value::int(0));
    let original = Value::sequence(vec![node.clone_handle(), node.clone_handle()]);
    let copy = original.clone();

    let first = copy.get_index(0).unwrap().as_pointer().unwrap().unwrap();
    let second = copy.get_index(1).unwrap().as_pointer().unwrap().unwrap();
    assert!(Rc::ptr_eq(first, second));

    // The copy's node is not the original's.
    let original_node = node.as_pointer().unwrap().unwrap();
    assert!(!Rc::ptr_eq(first, original_node));

    *first.borrow_mut() = Value::int(9);
    assert_eq!(copy.to_string(), "[ Pointer(9) Pointer(9) ]");
    assert_eq!(original.to_string(), "[ Pointer(0) Pointer(0) ]");
}

#[test]
fn test_cycle_copy_terminates() {
    let node: Pointer = Rc::new(RefCell::new(Value::Null));
    *node.borrow_mut() = Value::sequence(vec![Value::int(1), Value::from_pointer(Rc::clone(&node))]);
    let original = Value::from_pointer(Rc::clone(&node));

    let copy = original.clone();
    let copy_node = copy.as_pointer().unwrap().unwrap();
    assert!(!Rc::ptr_eq(copy_node, &node));

    // The copy's cycle closes on the copy's own node.
    let inner = copy_node.borrow();
    let back = inner.get_index(1).unwrap().as_pointer().unwrap().unwrap();
    assert!(Rc::ptr_eq(back, copy_node));
    drop(inner);

    // Break both cycles so the test does not leak.
    *node.borrow_mut() = Value::Null;
    *copy_node.borrow_mut() = Value::Null;
}

#[test]
fn test_copy_while_pointee_is_mutably_borrowed() {
    init_test_logging();

    let node: Pointer = Rc::new(RefCell::new(Value::Null));
    *node.borrow_mut() = Value::sequence(vec![Value::from_pointer(Rc::clone(&node))]);

    // Copying the sequence from inside its own borrow reaches the borrowed node.
    let guard = node.borrow_mut();
    let copy = guard.clone();
    drop(guard);
    assert_eq!(copy.to_string(), "[ Pointer(nullptr) ]");

    let boxed = Value::object(Rc::clone(&node));
    let guard = node.borrow_mut();
    let copy = boxed.clone();
    drop(guard);
    assert!(copy.as_object().unwrap().is_empty());

    *node.borrow_mut() = Value::Null;
}

#[test]
fn test_copy_context_shares_across_roots() {
    let node = Value::boxed(Value::int(5));
    let mut ctx = CopyContext::new();
    let a = ctx.copy(&node);
    let b = ctx.copy(&node);
    assert_eq!(ctx.pointers_copied(), 1);
    assert!(Rc::ptr_eq(
        a.as_pointer().unwrap().unwrap(),
        b.as_pointer().unwrap().unwrap()
    ));

    // Separate copies do not share.
    let c = deep_copy(&node);
    assert!(!Rc::ptr_eq(
        a.as_pointer().unwrap().unwrap(),
        c.as_pointer().unwrap().unwrap()
    ));
}

// ============================================================================
// Object
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Config {
    name: String,
}

struct NotClone(u8);

#[test]
fn test_object_copy_uses_payload_clone() {
    let original = Value::object(Config {
        name: "a".to_owned(),
    });
    let mut copy = original.clone();
    copy.as_object_mut()
        .unwrap()
        .downcast_mut::<Config>()
        .unwrap()
        .name
        .push('b');

    let name = |v: &Value| {
        v.as_object()
            .unwrap()
            .downcast_ref::<Config>()
            .unwrap()
            .name
            .clone()
    };
    assert_eq!(name(&original), "a");
    assert_eq!(name(&copy), "ab");
}

#[test]
fn test_opaque_object_copies_as_empty() {
    init_test_logging();
    let original = Value::opaque(NotClone(1));
    let copy = original.clone();
    assert!(copy.is_object());
    assert!(copy.as_object().unwrap().is_empty());
    assert_eq!(original.as_object().unwrap().downcast_ref::<NotClone>().unwrap().0, 1);
}

#[test]
fn test_object_holding_pointer_is_deep_copied() {
    let ptr: Pointer = Rc::new(RefCell::new(Value::int(1)));
    let original = Value::Object(Object::new(Rc::clone(&ptr)));
    let copy = original.clone();

    let copied_ptr = copy.as_object().unwrap().downcast_ref::<Pointer>().unwrap();
    assert!(!Rc::ptr_eq(copied_ptr, &ptr));

    *ptr.borrow_mut() = Value::int(2);
    assert_eq!(*copied_ptr.borrow(), Value::int(1));
}

// ============================================================================
// Pointer kinds
// ============================================================================

#[test]
fn test_exclusive_ref_copies_as_null() {
    init_test_logging();
    let original = Value::exclusive(Box::new(999i64));
    let copy = original.clone();

    assert!(copy.is_exclusive_ref());
    assert!(copy.as_exclusive_ref().unwrap().is_none());
    assert_eq!(copy.to_string(), "ExclusiveRef(nullptr)");
    // The original keeps its pointee.
    assert_eq!(*original.exclusive_downcast_ref::<i64>().unwrap(), 999);
}

#[test]
fn test_exclusive_ref_degrades_inside_containers() {
    let original = Value::sequence(vec![
        Value::int(1),
        Value::exclusive(Box::new(2u8)),
        [("x", Value::exclusive(Box::new(3u8)))].into_iter().collect(),
    ]);
    let copy = original.clone();

    assert!(copy.get_index(1).unwrap().as_exclusive_ref().unwrap().is_none());
    let nested = copy.get_index(2).unwrap().get_key("x").unwrap();
    assert!(nested.as_exclusive_ref().unwrap().is_none());
    assert_eq!(copy.get_index(0).unwrap(), &Value::int(1));

    assert!(original.get_index(1).unwrap().as_exclusive_ref().unwrap().is_some());
}

#[test]
fn test_shared_ref_copy_bumps_count() {
    let rc = Rc::new(String::from("shared"));
    let original = Value::shared_from(&rc);
    assert_eq!(Rc::strong_count(&rc), 2);

    let copy = original.clone();
    assert_eq!(Rc::strong_count(&rc), 3);
    assert_eq!(original, copy);

    drop(copy);
    assert_eq!(Rc::strong_count(&rc), 2);
}

#[test]
fn test_weak_ref_copy_observes_same_allocation() {
    let rc = Rc::new(7u32);
    let original = Value::weak(&Rc::downgrade(&rc));
    let copy = original.clone();
    assert_eq!(original, copy);
    assert_eq!(Rc::strong_count(&rc), 1);

    assert_eq!(*copy.upgrade_weak_as::<u32>().unwrap().unwrap(), 7);
    drop(rc);
    assert!(original.is_expired().unwrap());
    assert!(copy.is_expired().unwrap());
}

#[test]
fn test_raw_ref_copy_keeps_address() {
    let x = 555i32;
    let original = Value::raw(&x);
    let copy = original.clone();
    assert_eq!(copy.as_raw_ref().unwrap(), original.as_raw_ref().unwrap());
    assert_eq!(copy.as_raw_ref().unwrap() as *const i32, &x as *const i32);
}

// Keeps two values pointing at the same node without going through `Clone`.
trait CloneHandle {
    fn clone_handle(&self) -> Value;
}

impl CloneHandle for Value {
    fn clone_handle(&self) -> Value {
        let ptr = self.as_pointer().unwrap().unwrap();
        Value::from_pointer(Rc::clone(ptr))
    }
}
