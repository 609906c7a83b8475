//! Operator and variable descriptors
//!
//! These are the kind-specific payloads a node carries. The node only
//! guarantees that an operation holds an `OpDesc` and a variable holds a
//! `VarDesc`; what the fields mean is up to the layers built on top.

use gir_common::{AttrValue, DataType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operator descriptor: type tag plus named attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpDesc {
    pub op_type: String,
    pub attrs: BTreeMap<String, AttrValue>,
}

impl OpDesc {
    pub fn new(op_type: impl Into<String>) -> Self {
        Self {
            op_type: op_type.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute, returning the previous value if any
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.attrs.insert(name.into(), value.into())
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        self.attrs.remove(name)
    }

    /// Attribute names in sorted order
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }
}

/// Variable descriptor: shape and element type
///
/// A negative dimension marks a size that is only known at run time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VarDesc {
    pub shape: Vec<i64>,
    pub dtype: DataType,
    pub persistable: bool,
}

impl VarDesc {
    pub fn new(shape: Vec<i64>, dtype: DataType) -> Self {
        Self {
            shape,
            dtype,
            persistable: false,
        }
    }

    /// Mark the variable as persistable (parameters, buffers)
    pub fn persistable(mut self) -> Self {
        self.persistable = true;
        self
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total element count, or `None` if any dimension is dynamic
    pub fn numel(&self) -> Option<u64> {
        self.shape.iter().try_fold(1u64, |acc, &dim| {
            let dim = u64::try_from(dim).ok()?;
            acc.checked_mul(dim)
        })
    }
}
