//! Display projection of collection statistics.
//!
//! The server returns statistics as a document whose values have mixed
//! types. [`project_stats`] flattens it into `(key, value, type)` triples for
//! display. The projection is one-way: type names are informational.

use mongodb::bson::{Bson, DateTime, Document, Timestamp, oid::ObjectId};

use crate::error::Result;
use crate::types::StatEntry;

/// Closed set of value shapes a statistics field can take.
#[derive(Clone, Debug, PartialEq)]
pub enum StatValue {
    Integer(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    Document(Document),
    Array(Vec<Bson>),
    Null,
    ObjectId(ObjectId),
    Date(DateTime),
    Timestamp(Timestamp),
    /// Remaining BSON types (decimal, binary, regex, code, ...).
    Other(Bson),
}

impl From<Bson> for StatValue {
    fn from(value: Bson) -> Self {
        match value {
            Bson::Int32(v) => StatValue::Integer(v),
            Bson::Int64(v) => StatValue::Long(v),
            Bson::Double(v) => StatValue::Double(v),
            Bson::Boolean(v) => StatValue::Boolean(v),
            Bson::String(v) => StatValue::String(v),
            Bson::Document(v) => StatValue::Document(v),
            Bson::Array(v) => StatValue::Array(v),
            Bson::Null => StatValue::Null,
            Bson::ObjectId(v) => StatValue::ObjectId(v),
            Bson::DateTime(v) => StatValue::Date(v),
            Bson::Timestamp(v) => StatValue::Timestamp(v),
            other => StatValue::Other(other),
        }
    }
}

impl StatValue {
    /// Short display name of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            StatValue::Integer(_) => "Integer",
            StatValue::Long(_) => "Long",
            StatValue::Double(_) => "Double",
            StatValue::Boolean(_) => "Boolean",
            StatValue::String(_) => "String",
            StatValue::Document(_) => "Document",
            StatValue::Array(_) => "Array",
            StatValue::Null => "Null",
            StatValue::ObjectId(_) => "ObjectId",
            StatValue::Date(_) => "Date",
            StatValue::Timestamp(_) => "Timestamp",
            StatValue::Other(bson) => match bson {
                Bson::Decimal128(_) => "Decimal128",
                Bson::Binary(_) => "Binary",
                Bson::RegularExpression(_) => "RegularExpression",
                Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => "Code",
                Bson::Symbol(_) => "Symbol",
                Bson::MinKey => "MinKey",
                Bson::MaxKey => "MaxKey",
                Bson::Undefined => "Undefined",
                Bson::DbPointer(_) => "DBPointer",
                _ => "Bson",
            },
        }
    }

    /// Canonical string form of the value.
    ///
    /// Nested documents and arrays are rendered whole as relaxed extended
    /// JSON; this is the only step that can fail.
    pub fn render(&self) -> Result<String> {
        let text = match self {
            StatValue::Integer(v) => v.to_string(),
            StatValue::Long(v) => v.to_string(),
            StatValue::Double(v) => format_double(*v),
            StatValue::Boolean(v) => v.to_string(),
            StatValue::String(v) => v.clone(),
            StatValue::Document(doc) => {
                serde_json::to_string(&Bson::Document(doc.clone()).into_relaxed_extjson())?
            }
            StatValue::Array(items) => {
                serde_json::to_string(&Bson::Array(items.clone()).into_relaxed_extjson())?
            }
            StatValue::Null => "null".to_string(),
            StatValue::ObjectId(oid) => oid.to_hex(),
            StatValue::Date(dt) => dt
                .try_to_rfc3339_string()
                .unwrap_or_else(|_| dt.timestamp_millis().to_string()),
            StatValue::Timestamp(ts) => format!("{}:{}", ts.time, ts.increment),
            StatValue::Other(bson) => bson.to_string(),
        };
        Ok(text)
    }
}

/// Doubles always show a fractional part, so `1.0` stays distinct from `1`.
/// Exponent forms keep it on the mantissa: `1.0E21`, `2.5E-7`.
fn format_double(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => text,
    }
}

/// Project a raw statistics record into display entries, keeping the
/// record's own field order.
pub fn project_stats(raw: Document) -> Result<Vec<StatEntry>> {
    let mut entries = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let value = StatValue::from(value);
        entries.push(StatEntry {
            key,
            value: value.render()?,
            type_name: value.type_name().to_string(),
        });
    }
    Ok(entries)
}
