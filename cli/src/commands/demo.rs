//! The `demo` command - walk through every kind of value.

use std::fmt;
use std::rc::Rc;

use dynvar::{Mapping, RenderConfig, Value, ops};

use crate::common::CliResult;

/// A user-defined type stored behind an `Object`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub value: i32,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sample(name: {}, value: {})", self.name, self.value)
    }
}

fn show(label: &str, value: &Value, config: RenderConfig) {
    println!("{label}: {}", value.display(config));
}

/// Run the demo command.
pub fn run(config: RenderConfig) -> CliResult<()> {
    // Scalars
    let int_var = Value::int(42);
    show("Int", &int_var, config);
    show("Float", &Value::float(3.14159), config);
    show("Text", &Value::text("Hello, World!"), config);

    // Sequence, grown past its end
    let mut array = Value::sequence(vec![Value::int(1), Value::int(2), Value::int(3)]);
    array.push(Value::int(4))?;
    array.set_index(5, Value::int(6))?;
    show("Sequence", &array, config);

    // Mapping
    let mut table = Value::mapping(Mapping::new());
    table.set_key("key1", Value::text("value1"))?;
    table.set_key("key2", Value::float(2.718))?;
    table.set_key("key3", Value::int(100))?;
    table.set_key("key4", Value::text("value4"))?;
    show("Mapping", &table, config);

    // Boxed
    let boxed = Value::boxed(Value::sequence(vec![Value::text("inner")]));
    show("Boxed", &boxed, config);

    // Pointer kinds
    let shared = Value::shared(Rc::new(Value::text("Shared Pointer")));
    show("SharedRef", &shared, config);

    let exclusive = Value::exclusive(Box::new(Value::int(999)));
    show("ExclusiveRef", &exclusive, config);

    let raw_int = 555i32;
    show("RawRef", &Value::raw(&raw_int), config);

    let kept_alive = Rc::new(Value::float(6.626));
    let weak = Value::weak(&Rc::downgrade(&kept_alive));
    show("WeakRef", &weak, config);

    // Object
    let custom = Value::object(Rc::new(Sample {
        name: "TestObject".to_owned(),
        value: 123,
    }));
    show("Object", &custom, config);
    let retrieved = custom.as_object()?.downcast_ref::<Rc<Sample>>()?;
    println!("Retrieved Object: {retrieved}");

    // Range and slice
    show("Range (0 to 10 step 2)", &ops::range(0, 10, 2)?, config);
    show(
        "Slice of Sequence (1 to 6 step 2)",
        &ops::slice(&array, 1, 6, 2)?,
        config,
    );

    // Length
    println!("Length of Sequence: {}", ops::len(&array)?);
    println!("Length of Mapping: {}", ops::len(&table)?);

    // Copies
    show("Copied Int", &int_var.clone(), config);

    let copied_array = array.clone();
    show("Copied Sequence", &copied_array, config);
    array.set_index(0, Value::int(100))?;
    show("Original Sequence after modification", &array, config);
    show("Copied Sequence remains unchanged", &copied_array, config);

    let copied_boxed = boxed.clone();
    if let Some(ptr) = boxed.as_pointer()? {
        ptr.borrow_mut().push(Value::text("added"))?;
    }
    show("Original Boxed after modification", &boxed, config);
    show("Copied Boxed remains unchanged", &copied_boxed, config);

    show("Copied ExclusiveRef", &exclusive.clone(), config);

    drop(kept_alive);
    show("WeakRef after release", &weak, config);

    Ok(())
}
