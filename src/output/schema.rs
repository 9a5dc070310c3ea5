//! Arrow schema inference and record to Arrow conversion
//!
//! Provides utilities for inferring Arrow schemas from report rows
//! and converting them to Arrow RecordBatches.

use crate::error::{Error, Result};
use crate::types::Record;
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, NullArray, StringArray,
    StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Infer an Arrow schema from a set of report rows
///
/// Every field is nullable. Columns keep the order in which they were
/// first seen, so the common case matches the server's column order.
pub fn infer_schema(records: &[Record]) -> Schema {
    let mut order: Vec<String> = Vec::new();
    let mut field_types: HashMap<String, DataType> = HashMap::new();

    for record in records {
        for (key, value) in record {
            let inferred_type = infer_type(value);
            match field_types.get_mut(key) {
                Some(existing) => *existing = merge_types(existing, &inferred_type),
                None => {
                    order.push(key.clone());
                    field_types.insert(key.clone(), inferred_type);
                }
            }
        }
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|name| {
            let dtype = field_types.remove(&name).unwrap_or(DataType::Null);
            Field::new(name, dtype, true)
        })
        .collect();

    Schema::new(fields)
}

/// Convert report rows to an Arrow RecordBatch
///
/// Uses the provided schema or infers one from the data. Fields missing
/// from a row become nulls.
pub fn json_to_arrow(records: &[Record], schema: Option<&Schema>) -> Result<RecordBatch> {
    let schema = match schema {
        Some(schema) => schema.clone(),
        None => infer_schema(records),
    };

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(schema)));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| record.get(field.name()))
            .collect();

        columns.push(build_array(&values, field.data_type())?);
    }

    if columns.is_empty() {
        // Rows without any fields still count as rows
        let options =
            arrow::record_batch::RecordBatchOptions::new().with_row_count(Some(records.len()));
        return RecordBatch::try_new_with_options(Arc::new(schema), columns, &options)
            .map_err(|e| Error::output(format!("Failed to create RecordBatch: {e}")));
    }

    RecordBatch::try_new(Arc::new(schema), columns)
        .map_err(|e| Error::output(format!("Failed to create RecordBatch: {e}")))
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        Value::String(_) => DataType::Utf8,
        Value::Array(arr) => {
            let element_type = arr
                .iter()
                .filter(|v| !v.is_null())
                .map(infer_type)
                .reduce(|a, b| merge_types(&a, &b))
                .unwrap_or(DataType::Null);
            DataType::List(Arc::new(Field::new("item", element_type, true)))
        }
        // No child fields to build a struct from
        Value::Object(obj) if obj.is_empty() => DataType::Utf8,
        Value::Object(obj) => {
            let fields: Vec<Field> = obj
                .iter()
                .map(|(k, v)| Field::new(k, infer_type(v), true))
                .collect();
            DataType::Struct(Fields::from(fields))
        }
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        // Null can merge with anything
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        // Numbers can merge (prefer Float64 for mixed)
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        // Different types -> fall back to String (most flexible)
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> Result<ArrayRef> {
    match data_type {
        DataType::Null => Ok(Arc::new(NullArray::new(values.len()))),

        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::List(field) => build_list_array(values, field),

        DataType::Struct(fields) => build_struct_array(values, fields),

        // Utf8 and anything unexpected: strings as-is, other values as JSON text
        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.and_then(|v| match v {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                })
                .collect();
            Ok(Arc::new(arr))
        }
    }
}

/// Build a list array from JSON arrays
fn build_list_array(values: &[Option<&Value>], field: &Arc<Field>) -> Result<ArrayRef> {
    let mut all_items: Vec<Option<&Value>> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];
    let mut validity: Vec<bool> = Vec::with_capacity(values.len());

    for value in values {
        if let Some(Value::Array(arr)) = value {
            all_items.extend(arr.iter().map(Some));
            validity.push(true);
        } else {
            validity.push(false);
        }
        let offset = i32::try_from(all_items.len())
            .map_err(|_| Error::output("Array too large for i32 offset"))?;
        offsets.push(offset);
    }

    let items_array = build_array(&all_items, field.data_type())?;
    let offset_buffer = OffsetBuffer::new(offsets.into());

    let list_array = ListArray::try_new(
        Arc::clone(field),
        offset_buffer,
        items_array,
        Some(validity.into()),
    )?;
    Ok(Arc::new(list_array))
}

/// Build a struct array from JSON objects
fn build_struct_array(values: &[Option<&Value>], fields: &Fields) -> Result<ArrayRef> {
    let mut child_arrays: Vec<ArrayRef> = Vec::with_capacity(fields.len());

    for field in fields {
        let child_values: Vec<Option<&Value>> = values
            .iter()
            .map(|v| v.and_then(|v| v.as_object()).and_then(|obj| obj.get(field.name())))
            .collect();

        child_arrays.push(build_array(&child_values, field.data_type())?);
    }

    let struct_array = StructArray::try_new(fields.clone(), child_arrays, None)?;
    Ok(Arc::new(struct_array))
}
