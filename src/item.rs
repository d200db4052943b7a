//! The item entity and its request payloads.
//!
//! Requests arrive as loosely typed JSON objects. [`ItemPayload::from_object`]
//! turns such an object into an explicit schema with every field optional, and
//! the validation steps below turn a payload into either a [`NewItem`] (create)
//! or an [`ItemPatch`] (update), or into a [`ValidationError`] naming the first
//! offending field.

use crate::error::{ValidationError, ValidationResult};
use crate::storage::{Condition, KEY_ATTRIBUTE, UpdateExpression};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Convert to the JSON record stored in the table.
    pub fn to_record(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Decode a stored record.
    pub fn from_record(record: Value) -> serde_json::Result<Self> {
        serde_json::from_value(record)
    }
}

/// Request payload with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ItemPayload {
    /// Read the known fields of a request object.
    ///
    /// Unknown fields are ignored; `null` counts as absent. Fields are checked
    /// in the order `id`, `name`, `description`, `category`, `tags`, and the
    /// first field with the wrong JSON type is reported.
    pub fn from_object(object: &Map<String, Value>) -> ValidationResult<Self> {
        Ok(Self {
            id: optional_string(object, KEY_ATTRIBUTE)?,
            name: optional_string(object, "name")?,
            description: optional_string(object, "description")?,
            category: optional_string(object, "category")?,
            tags: optional_string_list(object, "tags")?,
        })
    }

    /// Validate for creation: `name` then `description` must be present and non-empty.
    pub fn into_new_item(self) -> ValidationResult<NewItem> {
        let name = required(self.name, "name")?;
        let description = required(self.description, "description")?;

        Ok(NewItem {
            name,
            description,
            category: self.category,
            tags: self.tags,
        })
    }

    /// Validate for update: any supplied `name` or `description` must be non-empty.
    ///
    /// A payload with no updatable fields yields an empty patch, which is valid.
    pub fn into_patch(self) -> ValidationResult<ItemPatch> {
        let name = self.name.map(|name| non_empty(name, "name")).transpose()?;
        let description = self
            .description
            .map(|description| non_empty(description, "description"))
            .transpose()?;

        Ok(ItemPatch {
            name,
            description,
            category: self.category,
            tags: self.tags,
        })
    }
}

fn optional_string(object: &Map<String, Value>, field: &'static str) -> ValidationResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ValidationError::InvalidFieldType {
            field,
            expected: "string",
        }),
    }
}

fn optional_string_list(
    object: &Map<String, Value>,
    field: &'static str,
) -> ValidationResult<Option<Vec<String>>> {
    let invalid = ValidationError::InvalidFieldType {
        field,
        expected: "array of strings",
    };
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| value.as_str().map(str::to_string).ok_or(invalid.clone()))
            .collect::<ValidationResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(invalid),
    }
}

fn required(value: Option<String>, field: &'static str) -> ValidationResult<String> {
    let value = value.ok_or(ValidationError::MissingRequiredField { field })?;
    non_empty(value, field)
}

fn non_empty(value: String, field: &'static str) -> ValidationResult<String> {
    if value.is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(value)
    }
}

/// A validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewItem {
    /// Build the item to persist. Both timestamps are `now`.
    pub fn into_item(self, id: impl Into<String>, now: DateTime<Utc>) -> Item {
        Item {
            id: id.into(),
            name: self.name,
            description: self.description,
            category: self.category,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ItemPatch {
    /// Whether the patch touches nothing but the modification timestamp.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }

    /// Names of the fields this patch sets, in update order.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("category", self.category.is_some()),
            ("tags", self.tags.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect()
    }

    /// Lower to a conditional table update that also sets `updated_at`.
    pub fn to_update_expression(&self, updated_at: DateTime<Utc>) -> UpdateExpression {
        let mut update = UpdateExpression::new()
            .set("updated_at", Value::String(timestamp::format(&updated_at)))
            .with_condition(Condition::AttributeExists(KEY_ATTRIBUTE.to_string()));

        if let Some(name) = &self.name {
            update = update.set("name", Value::String(name.clone()));
        }
        if let Some(description) = &self.description {
            update = update.set("description", Value::String(description.clone()));
        }
        if let Some(category) = &self.category {
            update = update.set("category", Value::String(category.clone()));
        }
        if let Some(tags) = &self.tags {
            update = update.set(
                "tags",
                Value::Array(tags.iter().cloned().map(Value::String).collect()),
            );
        }
        update
    }
}

/// Current time at the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Modification time for an update: now, or one microsecond past the previous
/// value if the clock has not moved beyond it.
pub fn next_updated_at(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let current = now();
    match previous {
        Some(previous) if current <= previous => previous + Duration::microseconds(1),
        _ => current,
    }
}

/// RFC 3339 timestamps with microsecond precision and a `Z` suffix.
///
/// Fixed width, so lexicographic order equals time order. Parsing also accepts
/// offset-less ISO-8601 values, read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| naive.and_utc())
                    .ok()
            })
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
