// ABOUTME: All-or-nothing validation of a parsed record batch against its schema.
// ABOUTME: One unknown key or unfilled required field rejects the whole batch.

use super::{Record, Schema};
use crate::error::ValidationError;

/// Check that every record is fully populated for `schema`.
///
/// Unknown keys are reported before unfilled fields, so a record carrying a
/// key the schema does not know always fails with
/// [`ValidationError::UnrecognizedKey`].
pub fn validate(records: &[Record], schema: &Schema) -> Result<(), ValidationError> {
    for (index, record) in records.iter().enumerate() {
        if let Some(key) = record.keys().find(|key| !schema.has_field(key)) {
            return Err(ValidationError::UnrecognizedKey {
                index,
                key: key.clone(),
            });
        }
    }

    for (index, record) in records.iter().enumerate() {
        for (key, value) in record.iter() {
            if schema.is_optional(key) {
                continue;
            }
            if schema.default_for(key) == Some(value) {
                return Err(ValidationError::DefaultValue {
                    index,
                    field: key.clone(),
                });
            }
        }
    }

    Ok(())
}
