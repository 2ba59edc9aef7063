//! Descriptor records as emitted by the documentation generator.
//!
//! A generated documentation site ships a type registry listing every
//! documented entity. The registry has two top-level lists:
//! * `types` - global-scope entities, identified by their qualified name
//!   (e.g. `goog.array.ArrayLike`)
//! * `modules` - CommonJS-style modules, each with its own nested `types`
//!
//! Both are parsed into [Descriptor]s, which the
//! [tree builder](crate::model::tree_builder) turns into a [NavTree](crate::model::NavTree).

use crate::error::{NavError, NavResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the global the generated pages assign the registry to.
const SCRIPT_GLOBAL: &str = "TYPES";

// =#========================================================================#=
// DESCRIPTOR
// =#========================================================================#=
/// One documented entity (type, namespace, function or module).
///
/// Flags default to `false` and `types` to absent, so sparse records
/// such as `{"name": "Foo", "href": "Foo.html"}` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Display name; for global-scope types the generator writes the
    /// qualified name here
    #[serde(default)]
    pub name: String,

    /// Dot-delimited full path; when omitted, registry loading takes `name`
    #[serde(default)]
    pub qualified_name: String,

    /// Link target, relative to the documentation root
    #[serde(default)]
    pub href: String,

    /// Whether this entity is a pure grouping construct
    #[serde(default)]
    pub namespace: bool,

    /// Nested types; only set for container entities such as modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Descriptor>>,

    /// Whether this entity is an interface
    #[serde(default)]
    pub interface: bool,

    /// Whether this entity is a module
    #[serde(default)]
    pub module: bool,

    /// Names of static properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statics: Vec<String>,

    /// Names of instance properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl Descriptor {
    /// Creates a descriptor for a global-scope entity.
    ///
    /// # Arguments
    /// * `qualified_name` - Dot-delimited path, its last segment becomes the name
    /// * `href` - Link target
    pub fn new(qualified_name: impl Into<String>, href: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        Descriptor {
            name,
            qualified_name,
            href: href.into(),
            ..Default::default()
        }
    }

    /// Creates a descriptor for a module with the given nested types.
    pub fn new_module(
        name: impl Into<String>,
        href: impl Into<String>,
        types: Vec<Descriptor>,
    ) -> Self {
        let name = name.into();
        Descriptor {
            qualified_name: name.clone(),
            name,
            href: href.into(),
            types: Some(types),
            module: true,
            ..Default::default()
        }
    }

    /// Marks this descriptor as a namespace.
    pub fn as_namespace(mut self) -> Self {
        self.namespace = true;
        self
    }

    /// Marks this descriptor as an interface.
    pub fn as_interface(mut self) -> Self {
        self.interface = true;
        self
    }

    /// Returns `true` if the `types` field is present.
    ///
    /// Presence counts, not length: a container with an empty type list
    /// still counts as a container.
    pub fn has_types(&self) -> bool {
        self.types.is_some()
    }
}

// =#========================================================================#=
// TYPE REGISTRY
// =#========================================================================#=
/// All descriptors of one documentation site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRegistry {
    /// Global-scope entities
    #[serde(default)]
    pub types: Vec<Descriptor>,

    /// Modules, each with nested types
    #[serde(default)]
    pub modules: Vec<Descriptor>,
}

impl TypeRegistry {
    /// Parses a registry from its JSON form.
    ///
    /// The generator writes the qualified name of a type into `name`; types
    /// without `qualifiedName` get it from there.
    ///
    /// # Errors
    /// * [NavError::Json] if `json` is not a valid registry
    /// * [NavError::MissingName] if a type or module has no name at all
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        let mut registry: TypeRegistry = serde_json::from_str(json)?;
        registry.resolve_qualified_names()?;
        Ok(registry)
    }

    /// Fills empty qualified names of top-level and nested module types
    /// from their name.
    ///
    /// # Errors
    /// Returns [NavError::MissingName] for a type or module without any name.
    pub fn resolve_qualified_names(&mut self) -> NavResult<()> {
        for module in &mut self.modules {
            if module.name.is_empty() {
                return Err(NavError::MissingName(module.href.clone()));
            }
        }

        let nested = self.modules.iter_mut().filter_map(|m| m.types.as_mut());
        for descriptor in self.types.iter_mut().chain(nested.flatten()) {
            if descriptor.qualified_name.is_empty() {
                if descriptor.name.is_empty() {
                    return Err(NavError::MissingName(descriptor.href.clone()));
                }
                descriptor.qualified_name = descriptor.name.clone();
            }
        }
        Ok(())
    }

    /// Parses a registry from the script the generated pages load,
    /// i.e. `var TYPES = {...};`.
    ///
    /// Plain JSON is accepted as well.
    ///
    /// # Errors
    /// * [NavError::InvalidScript] if the assignment is malformed
    /// * [NavError::Json] if the assigned object is not a valid registry
    pub fn from_script(script: &str) -> NavResult<Self> {
        let trimmed = script.trim();
        if trimmed.starts_with('{') {
            return Self::from_json_str(trimmed);
        }

        let json = strip_assignment(trimmed).ok_or_else(|| {
            NavError::InvalidScript(format!("expected `var {SCRIPT_GLOBAL} = {{...}};`"))
        })?;
        Self::from_json_str(json)
    }

    /// Reads a registry file, either plain JSON or the page script form.
    ///
    /// # Errors
    /// Returns [NavError::Io] if the file cannot be read, otherwise see
    /// [from_script](Self::from_script).
    pub fn from_file<P: AsRef<Path>>(path: P) -> NavResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_script(&content)
    }

    /// Serializes this registry to JSON.
    ///
    /// # Errors
    /// Returns [NavError::Json] if serialization fails.
    pub fn to_json_string(&self) -> NavResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Total number of descriptors, nested module types included.
    pub fn num_descriptors(&self) -> usize {
        let nested: usize = self
            .modules
            .iter()
            .filter_map(|m| m.types.as_ref())
            .map(Vec::len)
            .sum();
        self.types.len() + self.modules.len() + nested
    }
}

/// Returns the object literal of `[var|let|const] TYPES = {...};`.
fn strip_assignment(script: &str) -> Option<&str> {
    let rest = ["var ", "let ", "const "]
        .iter()
        .find_map(|keyword| script.strip_prefix(keyword))
        .unwrap_or(script)
        .trim_start();
    let rest = rest.strip_prefix(SCRIPT_GLOBAL)?.trim_start();
    let rest = rest.strip_prefix('=')?.trim();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    rest.starts_with('{').then_some(rest)
}
