use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::PoetError;
use crate::metadata::descriptors::{
    Library, Marker, MethodDescriptor, ParameterDescriptor, TypeDefinition, TypeDescriptor,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryManifest {
    assembly: String,
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    name: String,
    #[serde(default)]
    markers: Vec<Marker>,
    #[serde(default)]
    methods: Vec<MethodEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodEntry {
    name: String,
    #[serde(rename = "static", default = "default_static")]
    is_static: bool,
    #[serde(default)]
    parameters: Vec<ParameterEntry>,
    returns: String,
    #[serde(default)]
    markers: Vec<Marker>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    ty: String,
}

fn default_static() -> bool {
    true
}

/// Read and parse a library manifest file.
pub fn load_library(path: &Path) -> Result<Library, PoetError> {
    let source_name = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|e| PoetError::Manifest {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;
    parse_library(&json, &source_name)
}

/// Parse a library manifest from JSON.
///
/// Type references resolve against the types declared in the same manifest:
/// a declared name carries that type's markers, any other name becomes an
/// unmarked external type.
pub fn parse_library(json: &str, source_name: &str) -> Result<Library, PoetError> {
    let manifest: LibraryManifest =
        serde_json::from_str(json).map_err(|e| manifest_error(source_name, e.to_string()))?;

    let mut declared: HashMap<&str, &[Marker]> = HashMap::new();
    for entry in &manifest.types {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(manifest_error(source_name, "type name must not be empty"));
        }
        if declared.insert(name, &entry.markers).is_some() {
            return Err(manifest_error(
                source_name,
                format!("type '{name}' is declared more than once"),
            ));
        }
    }

    let resolve = |name: &str| -> TypeDescriptor {
        let name = name.trim();
        TypeDescriptor {
            full_name: name.to_string(),
            markers: declared
                .get(name)
                .map(|markers| markers.to_vec())
                .unwrap_or_default(),
        }
    };

    let mut types = Vec::with_capacity(manifest.types.len());
    for entry in &manifest.types {
        let declaring_type = entry.name.trim();
        let mut methods = Vec::with_capacity(entry.methods.len());
        for method in &entry.methods {
            if method.name.trim().is_empty() {
                return Err(manifest_error(
                    source_name,
                    format!("method name on '{declaring_type}' must not be empty"),
                ));
            }
            let parameters = method
                .parameters
                .iter()
                .enumerate()
                .map(|(position, param)| ParameterDescriptor {
                    position,
                    name: param.name.clone(),
                    ty: resolve(&param.ty),
                })
                .collect();
            methods.push(MethodDescriptor {
                declaring_type: declaring_type.to_string(),
                name: method.name.trim().to_string(),
                is_static: method.is_static,
                parameters,
                return_type: resolve(&method.returns),
                markers: method.markers.clone(),
            });
        }
        types.push(TypeDefinition {
            descriptor: resolve(declaring_type),
            methods,
        });
    }

    tracing::debug!(
        source = source_name,
        assembly = %manifest.assembly,
        types = types.len(),
        "loaded library manifest"
    );

    Ok(Library {
        assembly: manifest.assembly,
        types,
    })
}

fn manifest_error(source_name: &str, reason: impl Into<String>) -> PoetError {
    PoetError::Manifest {
        source_name: source_name.to_string(),
        reason: reason.into(),
    }
}
