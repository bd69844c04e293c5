//! Patient record with one value per schema field.

use crate::field::{Field, FIELD_COUNT};
use crate::validate::{validate_record, ValidationError};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One patient's raw input values in canonical field order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientRecord {
    values: [f64; FIELD_COUNT],
}

impl PatientRecord {
    /// Builds a record from values already laid out in `Field::ALL` order.
    pub fn from_values(values: [f64; FIELD_COUNT]) -> Self {
        Self { values }
    }

    pub fn from_fn(mut f: impl FnMut(Field) -> f64) -> Self {
        let mut values = [0.0; FIELD_COUNT];
        for field in Field::ALL {
            values[field.index()] = f(field);
        }
        Self { values }
    }

    /// Builds a record from keyed values, requiring each field exactly once.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut slots: [Option<f64>; FIELD_COUNT] = [None; FIELD_COUNT];
        for (key, value) in pairs {
            let key = key.as_ref();
            let field: Field = key
                .parse()
                .map_err(|_| ValidationError::Unknown(key.to_string()))?;
            let slot = &mut slots[field.index()];
            if slot.is_some() {
                return Err(ValidationError::Duplicate(field));
            }
            *slot = Some(value);
        }
        let mut values = [0.0; FIELD_COUNT];
        for field in Field::ALL {
            values[field.index()] = slots[field.index()].ok_or(ValidationError::Missing(field))?;
        }
        Ok(Self { values })
    }

    pub fn get(&self, field: Field) -> f64 {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: f64) {
        self.values[field.index()] = value;
    }

    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn values(&self) -> &[f64; FIELD_COUNT] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL.iter().map(move |&f| (f, self.values[f.index()]))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_record(self)
    }
}

impl Serialize for PatientRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), &value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = PatientRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with one numeric value per patient field")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(String, f64)> = Vec::with_capacity(FIELD_COUNT);
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            pairs.push((key, value));
        }
        PatientRecord::from_pairs(pairs).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for PatientRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Free-text identity carried through to the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
