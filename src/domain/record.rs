use crate::domain::model::{Attributes, ValidationErrors, Value};
use crate::domain::rules::{validate_attributes, FieldRule};
use crate::utils::error::{Result, ZuoraError};
use std::collections::BTreeSet;

/// Field list, write protection, defaults and validation rules for one object type.
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub read_only: &'static [&'static str],
    pub defaults: Vec<(&'static str, fn() -> Value)>,
    pub rules: Vec<FieldRule>,
}

impl ObjectSchema {
    /// The declared spelling of a field, if the object has it.
    pub fn field(&self, name: &str) -> Option<&'static str> {
        self.fields.iter().copied().find(|f| *f == name)
    }

    pub fn is_read_only(&self, name: &str) -> bool {
        self.read_only.contains(&name)
    }

    /// Fields a client may write, in declared order.
    pub fn writable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .copied()
            .filter(move |f| !self.is_read_only(f))
    }
}

/// Identity, current values, last persisted values and pending changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordState {
    id: Option<String>,
    attributes: Attributes,
    baseline: Attributes,
    changed: BTreeSet<String>,
}

impl RecordState {
    fn write(&mut self, field: &str, value: Value) {
        let unchanged = self.baseline.get(field).unwrap_or(&Value::Null) == &value;
        if unchanged {
            self.changed.remove(field);
        } else {
            self.changed.insert(field.to_string());
        }

        if value.is_null() {
            self.attributes.remove(field);
        } else {
            self.attributes.insert(field.to_string(), value);
        }
    }

    fn snapshot(&mut self) {
        self.baseline = self.attributes.clone();
        self.changed.clear();
    }
}

/// Behavior shared by every record type backed by a remote object.
pub trait ZObject: Sized {
    fn schema() -> &'static ObjectSchema;
    fn state(&self) -> &RecordState;
    fn state_mut(&mut self) -> &mut RecordState;
    fn from_state(state: RecordState) -> Self;

    /// A new record with schema defaults applied. Defaults count as pending changes.
    fn new() -> Self {
        let mut state = RecordState::default();
        for (field, default) in &Self::schema().defaults {
            state.write(field, default());
        }
        Self::from_state(state)
    }

    /// Hydrates a persisted record from server data. The result has no pending changes.
    fn load(id: impl Into<String>, attributes: Attributes) -> Self {
        let schema = Self::schema();
        let attributes = attributes
            .into_iter()
            .filter(|(k, v)| schema.field(k).is_some() && !v.is_null())
            .collect::<Attributes>();
        let state = RecordState {
            id: Some(id.into()),
            baseline: attributes.clone(),
            attributes,
            changed: BTreeSet::new(),
        };
        Self::from_state(state)
    }

    fn object_name(&self) -> &'static str {
        Self::schema().name
    }

    fn id(&self) -> Option<&str> {
        self.state().id.as_deref()
    }

    fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        let state = self.state_mut();
        if state.id.as_deref() != Some(id.as_str()) {
            state.changed.insert("id".to_string());
        }
        state.id = Some(id);
    }

    /// New iff no server identity has been assigned.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    fn get(&self, field: &str) -> Option<&Value> {
        self.state().attributes.get(field)
    }

    fn attributes(&self) -> &Attributes {
        &self.state().attributes
    }

    fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let schema = Self::schema();
        let field = schema
            .field(field)
            .ok_or_else(|| ZuoraError::UnknownAttributeError {
                object: schema.name.to_string(),
                field: field.to_string(),
            })?;
        if schema.is_read_only(field) {
            return Err(ZuoraError::ReadOnlyAttributeError {
                object: schema.name.to_string(),
                field: field.to_string(),
            });
        }
        self.state_mut().write(field, value.into());
        Ok(())
    }

    fn with(mut self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    fn is_changed(&self) -> bool {
        !self.state().changed.is_empty()
    }

    fn changed_fields(&self) -> Vec<&str> {
        self.state().changed.iter().map(String::as_str).collect()
    }

    /// Current values become the persisted baseline; pending changes are dropped.
    fn clear_changed_attributes(&mut self) {
        self.state_mut().snapshot();
    }

    fn validate(&self) -> ValidationErrors {
        validate_attributes(&Self::schema().rules, self.attributes())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Non-null fields in declared order.
    fn to_fields(&self) -> Vec<(&'static str, &Value)> {
        let attributes = self.attributes();
        Self::schema()
            .fields
            .iter()
            .filter_map(|f| attributes.get(*f).map(|v| (*f, v)))
            .collect()
    }
}

macro_rules! zobject {
    ($(#[$meta:meta])* $name:ident, $schema:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            state: $crate::domain::record::RecordState,
        }

        impl $crate::domain::record::ZObject for $name {
            fn schema() -> &'static $crate::domain::record::ObjectSchema {
                &$schema
            }

            fn state(&self) -> &$crate::domain::record::RecordState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut $crate::domain::record::RecordState {
                &mut self.state
            }

            fn from_state(state: $crate::domain::record::RecordState) -> Self {
                Self { state }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::domain::record::ZObject>::new()
            }
        }
    };
}

pub(crate) use zobject;
