//! Bulk record containers.
//!
//! The service moves rows column-oriented: one list of field names and a
//! list of records holding values positionally. Callers usually think in
//! rows keyed by field name, so [`RecordData`] converts between the two.
//!
//! The first row's key order fixes the schema. Every later row is projected
//! onto that order, and a row missing a declared field is rejected rather
//! than padded.

use crate::adapter::WireObject;
use crate::wire::{StructFactory, WireStruct, WireValue};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashSet;

/// A single row keyed by field name, in field order.
pub type Row = IndexMap<String, WireValue>;

/// Values of one record, positionally aligned with the enclosing
/// [`RecordData::field_names`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub field_values: Vec<WireValue>,
}

impl Record {
    pub fn new(field_values: Vec<WireValue>) -> Self {
        Self { field_values }
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WireValue> {
        self.field_values.iter()
    }
}

impl WireObject for Record {
    fn wire_type(&self) -> &str {
        "Record"
    }

    fn attributes(&self, _factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![("field_values", WireValue::List(self.field_values.clone()))]
    }
}

/// An ordered, non-empty set of records sharing one list of field names.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordData {
    field_names: Vec<String>,
    records: Vec<Record>,
}

impl RecordData {
    /// Builds a record set from row mappings.
    ///
    /// Fails with [`Error::EmptyRecordSet`] for an empty input and with
    /// [`Error::MissingField`] when a row lacks a field declared by the
    /// first row.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut rows = rows.into_iter();
        let first = rows.next().ok_or(Error::EmptyRecordSet)?;
        let field_names: Vec<String> = first.keys().cloned().collect();

        let mut records = vec![Record::new(first.into_values().collect())];
        for (offset, row) in rows.enumerate() {
            records.push(project(&field_names, row, offset + 1)?);
        }

        Ok(Self {
            field_names,
            records,
        })
    }

    /// Rebuilds a record set from a `RecordData` structure returned by the
    /// service.
    pub fn from_wire(wire: &WireStruct) -> Result<Self> {
        let field_names: Vec<String> = wire.read("field_names")?;
        let mut seen = HashSet::with_capacity(field_names.len());
        if let Some(repeated) = field_names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(Error::DuplicateField(repeated.clone()));
        }
        let raw_records = wire
            .get("records")
            .and_then(WireValue::as_list)
            .ok_or_else(|| Error::MissingWireField {
                type_name: wire.type_name().to_string(),
                field: "records".to_string(),
            })?;
        if raw_records.is_empty() {
            return Err(Error::EmptyRecordSet);
        }

        let mut records = Vec::with_capacity(raw_records.len());
        for (index, raw) in raw_records.iter().enumerate() {
            let values = raw
                .as_struct()
                .and_then(|r| r.get("fieldValues"))
                .and_then(WireValue::as_list)
                .ok_or_else(|| Error::WireShape {
                    type_name: "Record".to_string(),
                    field: "fieldValues".to_string(),
                    expected: "list",
                    found: raw.kind(),
                })?;
            if values.len() != field_names.len() {
                return Err(Error::RecordLength {
                    index,
                    expected: field_names.len(),
                    found: values.len(),
                });
            }
            records.push(Record::new(values.to_vec()));
        }

        Ok(Self {
            field_names,
            records,
        })
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; an empty record set cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records back out as row mappings, in original order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.records.iter().map(|record| {
            self.field_names
                .iter()
                .cloned()
                .zip(record.field_values.iter().cloned())
                .collect()
        })
    }
}

fn project(field_names: &[String], mut row: Row, index: usize) -> Result<Record> {
    let mut values = Vec::with_capacity(field_names.len());
    for name in field_names {
        let value = row
            .swap_remove(name)
            .ok_or_else(|| Error::MissingField {
                row: index,
                field: name.clone(),
            })?;
        values.push(value);
    }
    Ok(Record::new(values))
}

impl WireObject for RecordData {
    fn wire_type(&self) -> &str {
        "RecordData"
    }

    fn attributes(&self, factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        let records = self
            .records
            .iter()
            .map(|record| WireValue::Struct(record.to_wire(factory)))
            .collect();
        vec![
            ("field_names", self.field_names.clone().into()),
            ("records", WireValue::List(records)),
        ]
    }
}
