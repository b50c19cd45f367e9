//! State schema and reducers.
//!
//! A [`StateSchema`] is an ordered list of fields; each field has a value kind and a
//! [`Reducer`] that decides how a node's partial update combines with the current value.
//! Reducers form a closed enum: `Overwrite` replaces, `Append` concatenates arrays.

use serde_json::Value;

use super::{ConversationState, SchemaViolation, StateUpdate, CONTEXT, MESSAGES};

/// JSON shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    /// Ordered sequence. The only kind an append reducer accepts.
    Array,
    Object,
    /// Any JSON value.
    Any,
}

impl ValueKind {
    /// Whether `value` fits this kind. `null` fits every kind except `Array`, so an
    /// append field always holds a real sequence.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueKind::Any, _) => true,
            (ValueKind::Array, Value::Array(_)) => true,
            (ValueKind::Array, _) => false,
            (_, Value::Null) => true,
            (ValueKind::String, Value::String(_)) => true,
            (ValueKind::Number, Value::Number(_)) => true,
            (ValueKind::Boolean, Value::Bool(_)) => true,
            (ValueKind::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

/// Short JSON type name used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// How a partial update combines with the existing value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reducer {
    /// The new value replaces the old one.
    #[default]
    Overwrite,
    /// New sequence elements are concatenated after the existing ones, in arrival order.
    Append,
}

impl Reducer {
    /// Merges `partial` into `existing`. A missing partial leaves `existing` unchanged.
    ///
    /// `field` is only used for error reporting.
    pub fn reduce(
        &self,
        field: &str,
        existing: &Value,
        partial: Option<&Value>,
    ) -> Result<Value, SchemaViolation> {
        let Some(partial) = partial else {
            return Ok(existing.clone());
        };
        match self {
            Reducer::Overwrite => Ok(partial.clone()),
            Reducer::Append => match (existing, partial) {
                (Value::Array(old), Value::Array(new)) => {
                    let mut merged = Vec::with_capacity(old.len() + new.len());
                    merged.extend(old.iter().cloned());
                    merged.extend(new.iter().cloned());
                    Ok(Value::Array(merged))
                }
                _ => Err(SchemaViolation::AppendRequiresArray(field.to_string())),
            },
        }
    }
}

/// Declaration of one state field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: ValueKind,
    pub reducer: Reducer,
    /// Value used when the initial state omits the field. `None` means `[]` for arrays
    /// and `null` otherwise.
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(kind: ValueKind, reducer: Reducer) -> Self {
        Self {
            kind,
            reducer,
            default: None,
        }
    }

    /// Overwrite field of the given kind.
    pub fn overwrite(kind: ValueKind) -> Self {
        Self::new(kind, Reducer::Overwrite)
    }

    /// Append field (always an array).
    pub fn append() -> Self {
        Self::new(ValueKind::Array, Reducer::Append)
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The value a field starts with when the initial state does not provide one.
    pub fn default_value(&self) -> Value {
        match (&self.default, self.kind) {
            (Some(v), _) => v.clone(),
            (None, ValueKind::Array) => Value::Array(Vec::new()),
            (None, _) => Value::Null,
        }
    }
}

/// Ordered mapping from field name to [`FieldSpec`].
///
/// Built once at startup and shared read-only by every run of a compiled graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSchema {
    fields: Vec<(String, FieldSpec)>,
}

impl StateSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard conversation schema: `messages` (append) and `context` (string, overwrite,
    /// default `""`).
    pub fn conversation() -> Self {
        let mut schema = Self::new();
        schema.fields.push((MESSAGES.to_string(), FieldSpec::append()));
        schema.fields.push((
            CONTEXT.to_string(),
            FieldSpec::overwrite(ValueKind::String).with_default(Value::String(String::new())),
        ));
        schema
    }

    /// Declares a field. Fails on a duplicate name or an append reducer on a non-array kind.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        spec: FieldSpec,
    ) -> Result<&mut Self, SchemaViolation> {
        let name = name.into();
        if self.field(&name).is_some() {
            return Err(SchemaViolation::DuplicateField(name));
        }
        if spec.reducer == Reducer::Append && spec.kind != ValueKind::Array {
            return Err(SchemaViolation::AppendRequiresArray(name));
        }
        if let Some(default) = &spec.default {
            if !spec.kind.matches(default) {
                return Err(SchemaViolation::TypeMismatch {
                    field: name,
                    expected: spec.kind,
                    found: json_type_name(default),
                });
            }
        }
        self.fields.push((name, spec));
        Ok(self)
    }

    /// Looks up a field declaration.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn spec_for(&self, field: &str) -> Result<&FieldSpec, SchemaViolation> {
        self.field(field)
            .ok_or_else(|| SchemaViolation::UnknownField(field.to_string()))
    }

    fn check_kind(&self, field: &str, value: &Value) -> Result<&FieldSpec, SchemaViolation> {
        let spec = self.spec_for(field)?;
        if !spec.kind.matches(value) {
            return Err(SchemaViolation::TypeMismatch {
                field: field.to_string(),
                expected: spec.kind,
                found: json_type_name(value),
            });
        }
        Ok(spec)
    }

    /// Reduces one field: `existing` combined with `partial` through the field's reducer.
    pub fn reduce(
        &self,
        field: &str,
        existing: &Value,
        partial: Option<&Value>,
    ) -> Result<Value, SchemaViolation> {
        let spec = match partial {
            Some(p) => self.check_kind(field, p)?,
            None => self.spec_for(field)?,
        };
        spec.reducer.reduce(field, existing, partial)
    }

    /// Applies a whole partial update to `state`, field by field.
    ///
    /// Every field is reduced before anything is written, so a failing update leaves
    /// `state` untouched.
    pub fn apply(
        &self,
        state: &mut ConversationState,
        update: &StateUpdate,
    ) -> Result<(), SchemaViolation> {
        let mut merged = Vec::with_capacity(update.len());
        for (field, partial) in update.iter() {
            let spec = self.check_kind(field, partial)?;
            let existing = state
                .get(field)
                .cloned()
                .unwrap_or_else(|| spec.default_value());
            merged.push((field.clone(), spec.reducer.reduce(field, &existing, Some(partial))?));
        }
        for (field, value) in merged {
            state.insert(field, value);
        }
        Ok(())
    }

    /// Builds a fresh state from initial values: unknown or mistyped fields are rejected,
    /// missing fields get their default.
    pub fn initial_state<I, K>(&self, values: I) -> Result<ConversationState, SchemaViolation>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut state = ConversationState::default();
        for (field, value) in values {
            let field = field.into();
            self.check_kind(&field, &value)?;
            state.insert(field, value);
        }
        for (name, spec) in &self.fields {
            if state.get(name).is_none() {
                state.insert(name.clone(), spec.default_value());
            }
        }
        Ok(state)
    }

    /// Checks that every field in `state` is declared and has the declared kind.
    pub fn validate(&self, state: &ConversationState) -> Result<(), SchemaViolation> {
        for (field, value) in state.iter() {
            self.check_kind(field, value)?;
        }
        Ok(())
    }
}
