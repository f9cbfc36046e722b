//! Layer merging for skin documents.
//!
//! Later layers win. Tables merge key by key, recursively; every other value
//! (strings, numbers, booleans, arrays, datetimes) replaces what was there.

use toml::{Table, Value};

/// Merge `overlay` into `base`, recursively.
pub fn merge_into(base: &mut Table, overlay: &Table) {
    for (key, incoming) in overlay {
        match (base.get_mut(key), incoming) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Assign scalar overrides directly, without recursing.
pub fn assign_scalars<'a, I>(base: &mut Table, scalars: I)
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    for (key, value) in scalars {
        base.insert(key.to_string(), value.clone());
    }
}

/// Produce a new table from `layers`, lowest precedence first.
pub fn merged(layers: &[&Table]) -> Table {
    let mut out = Table::new();
    for layer in layers {
        merge_into(&mut out, layer);
    }
    out
}
