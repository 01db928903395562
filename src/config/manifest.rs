//! `package.json` decoding for the `vendorize` block
//!
//! The block comes in two shapes, decoded once into [`VendorizeBlock`]:
//!
//! ```json
//! { "vendorize": ["left-pad", "@scope/pkg"] }
//! ```
//!
//! ```json
//! {
//!   "vendorize": {
//!     "packages": ["left-pad", { "name": "chalk", "transitive": true }],
//!     "dirName": "third_party",
//!     "cleanBefore": true,
//!     "gitIgnore": false
//!   }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, config};

pub const MANIFEST_FILE: &str = "package.json";
pub const CONFIG_KEY: &str = "vendorize";

const SHAPE_MESSAGE: &str =
    "'vendorize' must either be an array or an object containing a \"packages\" key";

/// The parts of `package.json` the vendorizer reads
#[derive(Debug, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vendorize: Option<Value>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(config::manifest_not_found(display));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| config::manifest_read_failed(&display, e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| config::manifest_parse_failed(display, e.to_string()))
    }
}

/// One configured package: a bare name or a name with options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PackageEntry {
    Name(String),
    Detailed(DetailedEntry),
}

/// `{ "name": ..., "transitive": ... }` form of a package entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedEntry {
    pub name: String,
    #[serde(default)]
    pub transitive: Option<bool>,
}

/// `packages` of the object form, optionally nested one level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PackageList {
    Flat(Vec<PackageEntry>),
    Nested { packages: Vec<PackageEntry> },
}

impl PackageList {
    pub fn into_entries(self) -> Vec<PackageEntry> {
        match self {
            PackageList::Flat(entries) | PackageList::Nested { packages: entries } => entries,
        }
    }
}

/// Object form of the block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VendorizeOptions {
    pub packages: PackageList,
    #[serde(default)]
    pub dir_name: Option<String>,
    #[serde(default)]
    pub clean_before: Option<bool>,
    #[serde(default)]
    pub git_ignore: Option<bool>,
    #[serde(default)]
    pub transitive: Option<bool>,
}

/// Decoded `vendorize` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorizeBlock {
    List(Vec<PackageEntry>),
    Object(VendorizeOptions),
}

impl VendorizeBlock {
    /// Decode the raw JSON value of the `vendorize` key
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(VendorizeBlock::List)
                .map_err(|e| config::invalid(format!("'{CONFIG_KEY}' entries: {e}"))),
            Value::Object(ref fields) if fields.contains_key("packages") => {
                serde_json::from_value(value)
                    .map(VendorizeBlock::Object)
                    .map_err(|e| config::invalid(format!("'{CONFIG_KEY}': {e}")))
            }
            _ => Err(config::invalid(SHAPE_MESSAGE)),
        }
    }
}
