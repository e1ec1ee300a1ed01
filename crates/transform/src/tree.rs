//! Pure tree reconstruction
//!
//! [`clone_with`] is the single rewrite primitive: a depth-first pre-order
//! clone of a payload tree in which a filter may substitute whole subtrees.
//! The input is never mutated; callers get a freshly built document and the
//! original stays intact for re-runs and error reporting.
//!
//! Filter contract, per visited composite (object or array) node:
//!
//! - `Ok(Some(replacement))` - the replacement subtree is used verbatim and
//!   the walk does NOT descend into it
//! - `Ok(None)` - the node is rebuilt from its recursively-processed
//!   children, preserving key and index order
//! - `Err(_)` - the whole walk aborts
//!
//! Scalars are cloned without consulting the filter.

use crate::error::TransformError;
use docket_core::{NodePath, Object, Value};

/// Clone a payload tree, letting `filter` substitute subtrees
pub fn clone_with<F>(root: &Value, filter: &mut F) -> Result<Value, TransformError>
where
    F: FnMut(&Value, &NodePath) -> Result<Option<Value>, TransformError>,
{
    let mut path = NodePath::root();
    walk(root, &mut path, filter)
}

fn walk<F>(node: &Value, path: &mut NodePath, filter: &mut F) -> Result<Value, TransformError>
where
    F: FnMut(&Value, &NodePath) -> Result<Option<Value>, TransformError>,
{
    match node {
        Value::Object(obj) => {
            if let Some(replacement) = filter(node, path)? {
                return Ok(replacement);
            }
            let mut rebuilt = Object::with_capacity(obj.len());
            for (key, child) in obj.iter() {
                path.push_key(key);
                let new_child = walk(child, path, filter)?;
                path.pop();
                rebuilt.insert(key, new_child);
            }
            Ok(Value::Object(rebuilt))
        }
        Value::Array(items) => {
            if let Some(replacement) = filter(node, path)? {
                return Ok(replacement);
            }
            let mut rebuilt = Vec::with_capacity(items.len());
            for (index, child) in items.iter().enumerate() {
                path.push_index(index);
                rebuilt.push(walk(child, path, filter)?);
                path.pop();
            }
            Ok(Value::Array(rebuilt))
        }
        scalar => Ok(scalar.clone()),
    }
}

/// Visit every node pre-order until `predicate` returns true
///
/// Read-only companion to [`clone_with`], used for migration-marker probes.
/// Returns whether any node satisfied the predicate.
pub fn any_node<F>(root: &Value, predicate: &mut F) -> bool
where
    F: FnMut(&Value, &NodePath) -> bool,
{
    let mut path = NodePath::root();
    visit(root, &mut path, predicate)
}

fn visit<F>(node: &Value, path: &mut NodePath, predicate: &mut F) -> bool
where
    F: FnMut(&Value, &NodePath) -> bool,
{
    if predicate(node, path) {
        return true;
    }
    match node {
        Value::Object(obj) => {
            for (key, child) in obj.iter() {
                path.push_key(key);
                let hit = visit(child, path, predicate);
                path.pop();
                if hit {
                    return true;
                }
            }
            false
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push_index(index);
                let hit = visit(child, path, predicate);
                path.pop();
                if hit {
                    return true;
                }
            }
            false
        }
        _ => false,
    }
}
