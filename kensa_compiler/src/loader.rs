//! Reading configuration and schema documents from disk

use crate::config::constants::MAX_CONFIG_FILE_SIZE;
use crate::logging::codes;
use crate::model::{HostSchema, RawConfig};
use crate::validation::CompileError;
use crate::{log_debug, log_error, log_success};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` selects TOML; anything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Toml => "TOML",
        }
    }
}

/// Read a file, refusing anything larger than the configuration size limit
pub fn read_bounded(path: &Path) -> Result<String, CompileError> {
    let display = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|e| CompileError::FileUnreadable {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        let error = CompileError::TooLarge {
            size: metadata.len(),
            max_size: MAX_CONFIG_FILE_SIZE,
        };
        log_error!(error.error_code(), "Configuration file exceeds size limit",
            "file" => &display,
            "size" => metadata.len()
        );
        return Err(error);
    }

    fs::read_to_string(path).map_err(|e| CompileError::FileUnreadable {
        path: display,
        reason: e.to_string(),
    })
}

/// Parse a document in the given format
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
) -> Result<T, CompileError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| CompileError::Format {
        format: format.as_str(),
        reason,
    })
}

/// Load a configuration document
pub fn load_config(path: &Path) -> Result<RawConfig, CompileError> {
    let format = DocumentFormat::from_path(path);
    log_debug!("Loading configuration", "file" => path.display(), "format" => format.as_str());

    let content = read_bounded(path)?;
    let config: RawConfig = parse_document(&content, format).map_err(|error| {
        log_error!(error.error_code(), "Configuration could not be parsed",
            "file" => path.display()
        );
        error
    })?;

    log_success!(codes::success::CONFIG_LOADED, "Configuration loaded",
        "file" => path.display(),
        "fields" => config.fields.len(),
        "mode" => config.mode
    );

    Ok(config)
}

/// Load a standalone host schema document
pub fn load_schema(path: &Path) -> Result<HostSchema, CompileError> {
    let content = read_bounded(path)?;
    parse_document(&content, DocumentFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    const CONFIG_JSON: &str = r#"{
        "fields": [{"name": "f1", "type": "text", "width": 4}],
        "table": {"code": "log", "scanAtField": "at", "resultField": "res", "reasonField": "why"},
        "mode": "fixed-width"
    }"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.TOML")), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Json);
    }

    #[test]
    fn test_load_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(CONFIG_JSON.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.fields[0].name, "f1");
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/definitely/not/here.json"));
        assert_matches!(result, Err(CompileError::FileUnreadable { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"mode = ").unwrap();

        let result = load_config(file.path());
        assert_matches!(result, Err(CompileError::Format { format: "TOML", .. }));
    }

    #[test]
    fn test_oversized_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let padding = vec![b' '; MAX_CONFIG_FILE_SIZE as usize + 1];
        file.write_all(&padding).unwrap();

        assert_matches!(read_bounded(file.path()), Err(CompileError::TooLarge { .. }));
    }
}
