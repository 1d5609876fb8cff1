// JSON <-> BSON conversion for schemaless documents.
// Request bodies arrive as serde_json values and are stored verbatim; stored
// documents go back out with ObjectIds rendered as plain hex strings.

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use super::coerce::number_bson;
use super::error::AppError;

pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => number_bson(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(map_to_document(map)),
    }
}

fn map_to_document(map: Map<String, Value>) -> Document {
    map.into_iter()
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

/// Turns a request body into a document. Only JSON objects are accepted.
pub fn body_to_document(body: Value) -> Result<Document, AppError> {
    match body {
        Value::Object(map) => Ok(map_to_document(map)),
        other => Err(AppError::InvalidRequest(format!(
            "expected a JSON object body, got {}",
            kind_of(&other)
        ))),
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Double(f) => double_to_json(f),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(document_to_json).collect()
}

// NaN and infinities have no JSON form and go out as null.
// Whole doubles are written without a fractional part.
fn double_to_json(f: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Value::from(f as i64);
    }
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Parses a path identifier into an ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidIdentifier(id.to_string()))
}
