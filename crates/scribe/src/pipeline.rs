//! Reading generator inputs and rendering the document.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use scribe_config::{ConfigError, OutputConfig, OutputFormat, ScribeConfig};
use scribe_core::{ReferenceMap, Route, SchemaInput};
use scribe_declaration::DeclarationMiner;
use scribe_docs::{OpenApi, OpenApiGenerator};
use tracing::{debug, info};

use crate::{ScribeError, ScribeResult};

/// Build a generator from configuration.
///
/// Copies document metadata and servers, and compiles the exclusion rules.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when an exclusion rule is invalid.
pub fn generator_from_config(config: &ScribeConfig) -> Result<OpenApiGenerator, ConfigError> {
    let mut generator = OpenApiGenerator::new()
        .title(config.info.title.clone())
        .version(config.info.version.clone())
        .exclude(config.exclude.to_rules()?);

    if let Some(description) = &config.info.description {
        generator = generator.description(description.clone());
    }
    for server in &config.info.servers {
        generator = generator.server(server.url.clone(), server.description.clone());
    }

    Ok(generator)
}

/// Read a route registry: a JSON array of routes.
pub fn load_routes(path: &Path) -> ScribeResult<Vec<Route>> {
    let content = read(path)?;
    let routes: Vec<Route> =
        serde_json::from_str(&content).map_err(|e| ScribeError::parse(path, e))?;
    debug!(file = %path.display(), routes = routes.len(), "Loaded route registry");
    Ok(routes)
}

/// Read component definitions: a JSON object of name to schema.
pub fn load_definitions(path: &Path) -> ScribeResult<IndexMap<String, SchemaInput>> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|e| ScribeError::parse(path, e))
}

/// Mine each declaration file into a reference map, in order.
pub fn mine_declarations<P: AsRef<Path>>(paths: &[P]) -> ScribeResult<Vec<ReferenceMap>> {
    let miner = DeclarationMiner::new();

    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let references = miner.mine(&read(path)?);
            info!(
                file = %path.display(),
                paths = references.len(),
                "Mined declaration file"
            );
            Ok(references)
        })
        .collect()
}

/// Serialize a document according to the output settings.
pub fn render(document: &OpenApi, output: &OutputConfig) -> ScribeResult<String> {
    let rendered = match output.format {
        OutputFormat::Json if output.pretty => {
            serde_json::to_string_pretty(document).map_err(scribe_docs::DocsError::from)?
        }
        OutputFormat::Json => serde_json::to_string(document).map_err(scribe_docs::DocsError::from)?,
        OutputFormat::Yaml => serde_yaml::to_string(document).map_err(scribe_docs::DocsError::from)?,
    };
    Ok(rendered)
}

fn read(path: &Path) -> ScribeResult<String> {
    fs::read_to_string(path).map_err(|e| ScribeError::read(path, e))
}
