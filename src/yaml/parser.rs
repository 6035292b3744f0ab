//! Typed YAML documents read from strings or files

use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Deserialize `content`; `origin` names the document in diagnostics
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, origin: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, origin).into())
}

/// Read and deserialize a file; a missing file yields `None`
pub fn parse_yaml_optional<T: DeserializeOwned + 'static>(path: &Path) -> Result<Option<T>, YamlError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(YamlError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_yaml(&content, &path.display().to_string()).map(Some)
}
