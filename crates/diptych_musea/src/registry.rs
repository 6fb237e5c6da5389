//! Read-only index of the packages and functions a documentation site covers.

use crate::error::LookupError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A published package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    /// Directory name, e.g. `core`.
    pub name: String,

    /// Human readable name, e.g. `Core`.
    #[serde(default)]
    pub display: String,

    /// npm package name, e.g. `@vueuse/core`.
    pub npm: String,

    /// Whether the package is installed separately from the core.
    #[serde(default)]
    pub addon: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// A documented function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
    pub name: String,

    /// Name of the owning package.
    pub package: String,
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    packages: Vec<PackageEntry>,
    #[serde(default)]
    functions: Vec<FunctionEntry>,
}

/// Package and function lookups.
///
/// Built once and shared read-only; every function is guaranteed to belong
/// to a known package.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packages: Vec<PackageEntry>,
    functions: Vec<FunctionEntry>,
    package_index: FxHashMap<String, usize>,
    function_index: FxHashMap<String, usize>,
    folded_index: FxHashMap<String, usize>,
}

impl Registry {
    pub fn new(
        packages: Vec<PackageEntry>,
        functions: Vec<FunctionEntry>,
    ) -> Result<Self, LookupError> {
        let package_index: FxHashMap<String, usize> = packages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        let mut function_index = FxHashMap::default();
        let mut folded_index = FxHashMap::default();
        for (i, function) in functions.iter().enumerate() {
            if !package_index.contains_key(&function.package) {
                return Err(LookupError::DanglingPackage {
                    function: function.name.clone(),
                    package: function.package.clone(),
                });
            }
            function_index.insert(function.name.clone(), i);
            folded_index
                .entry(function.name.to_lowercase())
                .or_insert(i);
        }

        Ok(Self {
            packages,
            functions,
            package_index,
            function_index,
            folded_index,
        })
    }

    /// Parse a registry from JSON of the form
    /// `{ "packages": [...], "functions": [...] }`
    pub fn from_json(source: &str) -> Result<Self, LookupError> {
        let file: RegistryFile = serde_json::from_str(source)?;
        Self::new(file.packages, file.functions)
    }

    pub fn function(&self, name: &str) -> Result<&FunctionEntry, LookupError> {
        self.function_index
            .get(name)
            .map(|&i| &self.functions[i])
            .ok_or_else(|| LookupError::UnknownFunction(name.to_string()))
    }

    pub fn package(&self, name: &str) -> Result<&PackageEntry, LookupError> {
        self.package_index
            .get(name)
            .map(|&i| &self.packages[i])
            .ok_or_else(|| LookupError::UnknownPackage(name.to_string()))
    }

    /// Package owning the function `name`
    pub fn package_of(&self, name: &str) -> Result<&PackageEntry, LookupError> {
        let function = self.function(name)?;
        self.package(&function.package)
    }

    /// Canonical spelling of a function name, matched case-insensitively
    pub fn resolve_function_name(&self, name: &str) -> Option<&str> {
        if let Some(&i) = self.function_index.get(name) {
            return Some(&self.functions[i].name);
        }
        self.folded_index
            .get(&name.to_lowercase())
            .map(|&i| self.functions[i].name.as_str())
    }

    /// Site-relative link to a function page, e.g. `/core/useCounter/`
    pub fn link_for(&self, name: &str) -> Result<String, LookupError> {
        let function = self.function(name)?;
        Ok(format!("/{}/{}/", function.package, function.name))
    }

    #[inline]
    pub fn is_function(&self, name: &str) -> bool {
        self.function_index.contains_key(name)
    }

    pub fn packages(&self) -> &[PackageEntry] {
        &self.packages
    }

    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }
}
