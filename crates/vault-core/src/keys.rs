//! Identity and content keys
//!
//! Every field is normalized and written as `<byte-len>:<value>`; parts are
//! joined with `|`. The length prefix makes the encoding injective, so a
//! value that itself contains `|` (the combined substat column does) can
//! never make two different field tuples collide.

use crate::record::Record;
use crate::schema::Series;

/// Key naming which entity a record describes
pub fn identity_key(record: &Record, series: Series) -> String {
    join_fields(record, series.schema().identity)
}

/// Key over every field; equal iff the records are semantically identical
pub fn content_key(record: &Record, series: Series) -> String {
    join_fields(record, series.schema().width())
}

fn join_fields(record: &Record, count: usize) -> String {
    let mut key = String::new();
    for (i, value) in record.values().iter().take(count).enumerate() {
        if i > 0 {
            key.push('|');
        }
        let normalized = value.normalize();
        key.push_str(&normalized.len().to_string());
        key.push(':');
        key.push_str(&normalized);
    }
    key
}
