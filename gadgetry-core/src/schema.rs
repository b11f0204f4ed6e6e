//! Synthesized result types and the records that carry their values.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::context::{EntityType, FieldDef};
use crate::error::{QueryError, QueryResult, SemanticError};

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Structural record type built for one compiled query.
///
/// Every call to [`synthesize`] draws a fresh id, so two types are never
/// the same type even when their fields match.
#[derive(Debug, Serialize)]
pub struct RecordType {
    id: u64,
    source: String,
    fields: Vec<FieldDef>,
}

impl RecordType {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name of the entity type the fields were resolved from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn is_structurally_equal(&self, other: &RecordType) -> bool {
        self.fields == other.fields
    }
}

/// Builds a record type with one field per column, in column order.
pub fn synthesize(columns: &[String], source: &EntityType) -> QueryResult<RecordType> {
    let fields = columns
        .iter()
        .map(|column| {
            source.field(column).cloned().ok_or_else(|| {
                QueryError::from(SemanticError::UnknownField {
                    field: column.clone(),
                    entity: source.name.clone(),
                })
            })
        })
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(RecordType {
        id: NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed),
        source: source.name.clone(),
        fields,
    })
}

/// One projected row: an instance of a synthesized [`RecordType`].
#[derive(Debug, Clone)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(ty: Arc<RecordType>, values: Vec<Value>) -> Self {
        debug_assert_eq!(ty.fields.len(), values.len());
        Self { ty, values }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Value of the first field with this name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.position(name).map(|index| &self.values[index])
    }

    /// Field names and values in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty.field_names().zip(self.values.iter())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts to a JSON object keeping column order.
    ///
    /// A duplicated column keeps its first position and its last value.
    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(self.values.len());
        for (field, value) in self.ty.fields.iter().zip(self.values) {
            object.insert(field.name.clone(), value);
        }
        Value::Object(object)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.ty.field_names().eq(other.ty.field_names())
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
