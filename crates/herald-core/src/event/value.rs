use std::fmt;
use std::sync::Arc;

use crate::event::Event;

/// Dynamic value used for payload arguments and listener results.
///
/// `Null` is the "absent" result: it never halts a fire. `Bool(false)` is the
/// stop signal when returned from a listener.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Structured data kept as a JSON object
    Json(serde_json::Value),
    /// A rich event object, shared rather than cloned
    Object(Arc<dyn Event>),
}

impl Value {
    /// Wrap an event object.
    pub fn object<E: Event>(event: E) -> Self {
        Value::Object(Arc::new(event))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True only for `Bool(false)`; `Null`, `0` and `""` are not false.
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn Event>> {
        match self {
            Value::Object(event) => Some(event),
            _ => None,
        }
    }

    /// Downcast an object value to its concrete event type.
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.as_object()
            .and_then(|event| event.as_any().downcast_ref::<E>())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Value::Object(event) => f
                .debug_struct("Object")
                .field("event_name", &event.event_name())
                .field("event", event)
                .finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            // Objects compare by identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Arc<dyn Event>> for Value {
    fn from(event: Arc<dyn Event>) -> Self {
        Value::Object(event)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            object @ serde_json::Value::Object(_) => Value::Json(object),
        }
    }
}

/// Ordered positional arguments delivered to listeners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Vec<Value>);

impl Payload {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn args(&self) -> &[Value] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

/// Wrap a single value into a payload: a list is taken as the argument
/// sequence, `Null` becomes the empty payload, anything else one argument.
impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload(Vec::new()),
            Value::List(items) => Payload(items),
            other => Payload(vec![other]),
        }
    }
}

impl From<Vec<Value>> for Payload {
    fn from(args: Vec<Value>) -> Self {
        Payload(args)
    }
}

impl<const N: usize> From<[Value; N]> for Payload {
    fn from(args: [Value; N]) -> Self {
        Payload(args.into())
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload(Vec::new())
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::from(Value::from(s))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::from(Value::from(s))
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::from(Value::from(b))
    }
}

impl From<i64> for Payload {
    fn from(i: i64) -> Self {
        Payload::from(Value::from(i))
    }
}

impl From<i32> for Payload {
    fn from(i: i32) -> Self {
        Payload::from(Value::from(i))
    }
}

impl From<serde_json::Value> for Payload {
    fn from(json: serde_json::Value) -> Self {
        Payload::from(Value::from(json))
    }
}
