use crate::runtime::{
    error::{TraceError, TraceResult},
    value::{NodeId, Value},
};
use std::collections::BTreeMap;
use std::fmt;

/// Variables visible on the current line, plus the memory every frame shares.
///
/// Arrays are exposed 1-indexed, matching the displayed pseudocode: index `1`
/// addresses the first element of the backing vector. All conversion between
/// the two conventions happens in the element accessors below.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableState {
    vars: BTreeMap<String, Value>,
    heap: BTreeMap<NodeId, Value>,
    output: Vec<String>,
}

impl VariableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_node(mut self, id: NodeId, node: Value) -> Self {
        self.heap.insert(id, node);
        self
    }

    pub fn vars(&self) -> &BTreeMap<String, Value> {
        &self.vars
    }

    pub fn heap(&self) -> &BTreeMap<NodeId, Value> {
        &self.heap
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.heap.is_empty() && self.output.is_empty()
    }

    pub fn get(&self, name: &str) -> TraceResult<&Value> {
        self.vars
            .get(name)
            .ok_or_else(|| TraceError::UnknownVariable {
                name: name.to_string(),
            })
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.vars.insert(name.to_string(), value.into());
    }

    pub fn int(&self, name: &str) -> TraceResult<i64> {
        let value = self.get(name)?;
        value
            .as_int()
            .ok_or_else(|| TraceError::type_mismatch(name, "integer", value.type_name()))
    }

    /// Loop counters start out `undefined`; this reads them as `None` until set.
    pub fn counter(&self, name: &str) -> TraceResult<Option<i64>> {
        match self.get(name)? {
            Value::Undefined => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            other => Err(TraceError::type_mismatch(name, "integer", other.type_name())),
        }
    }

    pub fn boolean(&self, name: &str) -> TraceResult<bool> {
        let value = self.get(name)?;
        value
            .as_bool()
            .ok_or_else(|| TraceError::type_mismatch(name, "boolean", value.type_name()))
    }

    pub fn reference(&self, name: &str) -> TraceResult<Option<NodeId>> {
        let value = self.get(name)?;
        value
            .as_reference()
            .ok_or_else(|| TraceError::type_mismatch(name, "reference", value.type_name()))
    }

    pub fn array(&self, name: &str) -> TraceResult<&[Value]> {
        match self.get(name)? {
            Value::Array(items) => Ok(items),
            other => Err(TraceError::type_mismatch(name, "array", other.type_name())),
        }
    }

    fn array_mut(&mut self, name: &str) -> TraceResult<&mut Vec<Value>> {
        match self.vars.get_mut(name) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(TraceError::type_mismatch(name, "array", other.type_name())),
            None => Err(TraceError::UnknownVariable {
                name: name.to_string(),
            }),
        }
    }

    pub fn len(&self, name: &str) -> TraceResult<i64> {
        Ok(self.array(name)?.len() as i64)
    }

    pub fn element(&self, name: &str, index: i64) -> TraceResult<&Value> {
        let items = self.array(name)?;
        let slot = slot_for(name, index, items.len())?;
        Ok(&items[slot])
    }

    pub fn int_at(&self, name: &str, index: i64) -> TraceResult<i64> {
        let value = self.element(name, index)?;
        value.as_int().ok_or_else(|| {
            TraceError::type_mismatch(&format!("{name}[{index}]"), "integer", value.type_name())
        })
    }

    pub fn set_element(&mut self, name: &str, index: i64, value: impl Into<Value>) -> TraceResult<()> {
        let items = self.array_mut(name)?;
        let slot = slot_for(name, index, items.len())?;
        items[slot] = value.into();
        Ok(())
    }

    pub fn swap_elements(&mut self, name: &str, a: i64, b: i64) -> TraceResult<()> {
        let items = self.array_mut(name)?;
        let first = slot_for(name, a, items.len())?;
        let second = slot_for(name, b, items.len())?;
        items.swap(first, second);
        Ok(())
    }

    pub fn push_element(&mut self, name: &str, value: impl Into<Value>) -> TraceResult<()> {
        self.array_mut(name)?.push(value.into());
        Ok(())
    }

    pub fn pop_element(&mut self, name: &str) -> TraceResult<Value> {
        let items = self.array_mut(name)?;
        items.pop().ok_or_else(|| TraceError::IndexOutOfRange {
            name: name.to_string(),
            index: 0,
            len: 0,
        })
    }

    pub fn node(&self, id: NodeId) -> TraceResult<&BTreeMap<String, Value>> {
        match self.heap.get(&id) {
            Some(Value::Record(fields)) => Ok(fields),
            Some(other) => Err(TraceError::type_mismatch(
                &format!("@{id}"),
                "record",
                other.type_name(),
            )),
            None => Err(TraceError::DanglingReference { id }),
        }
    }

    pub fn field(&self, id: NodeId, field: &str) -> TraceResult<&Value> {
        self.node(id)?
            .get(field)
            .ok_or_else(|| TraceError::UnknownVariable {
                name: format!("@{id}.{field}"),
            })
    }

    pub fn field_int(&self, id: NodeId, field: &str) -> TraceResult<i64> {
        let value = self.field(id, field)?;
        value.as_int().ok_or_else(|| {
            TraceError::type_mismatch(&format!("@{id}.{field}"), "integer", value.type_name())
        })
    }

    pub fn field_ref(&self, id: NodeId, field: &str) -> TraceResult<Option<NodeId>> {
        let value = self.field(id, field)?;
        value.as_reference().ok_or_else(|| {
            TraceError::type_mismatch(&format!("@{id}.{field}"), "reference", value.type_name())
        })
    }

    pub fn set_field(&mut self, id: NodeId, field: &str, value: impl Into<Value>) -> TraceResult<()> {
        match self.heap.get_mut(&id) {
            Some(Value::Record(fields)) => {
                fields.insert(field.to_string(), value.into());
                Ok(())
            }
            Some(other) => Err(TraceError::type_mismatch(
                &format!("@{id}"),
                "record",
                other.type_name(),
            )),
            None => Err(TraceError::DanglingReference { id }),
        }
    }

    /// Allocates the next free node id, counting up from 1.
    pub fn alloc(&mut self, node: Value) -> NodeId {
        let id = self.heap.keys().next_back().map_or(1, |last| last + 1);
        self.heap.insert(id, node);
        id
    }

    pub fn print(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Follows `next` pointers from `head`, collecting each node's `value`.
    pub fn walk_list(&self, head: Option<NodeId>) -> TraceResult<Vec<Value>> {
        let mut values = Vec::new();
        let mut cursor = head;
        while let Some(id) = cursor {
            if values.len() > self.heap.len() {
                return Err(TraceError::DanglingReference { id });
            }
            values.push(self.field(id, "value")?.clone());
            cursor = self.field_ref(id, "next")?;
        }
        Ok(values)
    }

    /// Overlays `partial` on top of this state: variables and heap nodes named
    /// there replace the existing ones wholesale.
    pub fn merge(&mut self, partial: &VariableState) {
        for (name, value) in &partial.vars {
            self.vars.insert(name.clone(), value.clone());
        }
        for (id, node) in &partial.heap {
            self.heap.insert(*id, node.clone());
        }
    }

    /// Fresh frame state holding only `vars`, sharing this state's heap and output.
    pub fn narrowed<I, K>(&self, vars: I) -> VariableState
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        VariableState {
            vars: vars
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            heap: self.heap.clone(),
            output: self.output.clone(),
        }
    }

    /// Takes over the shared memory of `callee` after a simulated return.
    pub fn adopt_shared(&mut self, callee: VariableState) {
        self.heap = callee.heap;
        self.output = callee.output;
    }
}

fn slot_for(name: &str, index: i64, len: usize) -> TraceResult<usize> {
    if index >= 1 && (index as usize) <= len {
        Ok(index as usize - 1)
    } else {
        Err(TraceError::IndexOutOfRange {
            name: name.to_string(),
            index,
            len,
        })
    }
}

impl fmt::Display for VariableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.vars {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}
