//! Example document loading.
//!
//! This module provides functions to load example documents (YAML or JSON,
//! optionally gzip-compressed) from files or stdin, converting them into
//! `ExampleNode` trees ready for compilation.

use crate::example::document::{from_json_str, from_yaml_str};
use crate::example::node::ExampleNode;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Document formats an example can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Loads an example from the filesystem.
///
/// The format is chosen from the extension (ignoring a trailing `.gz`):
/// `.json` is read as JSON, anything else as YAML (which also accepts JSON).
///
/// # Examples
///
/// ```no_run
/// use queryquill::file::loader::load_example_file;
///
/// let example = load_example_file("project.yaml").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The contents are not a valid example document
pub fn load_example_file<P: AsRef<Path>>(path: P) -> Result<ExampleNode> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    let format = determine_format(path_ref);
    let example = parse_example(&content, format)
        .with_context(|| format!("Failed to load example from {}", path_ref.display()))?;
    debug!(path = %path_ref.display(), ?format, "loaded example");
    Ok(example)
}

/// Loads an example from standard input.
///
/// Gzip input is detected by its magic bytes. JSON is tried first, then YAML.
///
/// # Examples
///
/// ```no_run
/// use queryquill::file::loader::load_example_from_stdin;
///
/// // Usage: echo '{"nodeTags": ["File"]}' | queryquill compile
/// let example = load_example_from_stdin().unwrap();
/// ```
pub fn load_example_from_stdin() -> Result<ExampleNode> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_example_content(&content).context("Failed to parse example from stdin")
}

/// Parses content of unknown format: JSON first, then YAML.
pub fn parse_example_content(content: &str) -> Result<ExampleNode> {
    if let Ok(example) = from_json_str(content) {
        return Ok(example);
    }
    from_yaml_str(content).context("Input is neither a valid JSON nor a valid YAML example")
}

/// Parses content in a known format.
pub fn parse_example(content: &str, format: DocumentFormat) -> Result<ExampleNode> {
    let example = match format {
        DocumentFormat::Json => from_json_str(content)?,
        DocumentFormat::Yaml => from_yaml_str(content)?,
    };
    Ok(example)
}

/// Determines the document format from a file name.
///
/// Examples:
/// - `example.json` → Json
/// - `example.json.gz` → Json
/// - `example.yaml` → Yaml
pub fn determine_format<P: AsRef<Path>>(path: P) -> DocumentFormat {
    let path_str = path.as_ref().to_string_lossy();

    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    if base.ends_with(".json") {
        DocumentFormat::Json
    } else {
        DocumentFormat::Yaml
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip file (file may be corrupted)")?;
    Ok(content)
}

/// Decompresses gzip bytes into a string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip data from stdin")?;
    Ok(content)
}
