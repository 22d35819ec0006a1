use std::path::Path;

use sheet_model::Schema;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Read and parse a JSON schema file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let schema = Schema::from_json_str(&text).map_err(|source| IngestError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        fields = schema.fields().len(),
        required = schema.required().len(),
        issues = schema.issues().len(),
        "loaded schema"
    );
    Ok(schema)
}
