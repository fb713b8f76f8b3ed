use crate::error::{IpaInfoError, Result};
use plist::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLE_ID_KEY: &str = "CFBundleIdentifier";
const VERSION_KEY: &str = "CFBundleShortVersionString";
const BUILD_KEY: &str = "CFBundleVersion";
const ICON_FILES_KEY: &str = "CFBundleIconFiles";

/// The handful of Info.plist facts reported for an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    pub bundle_identifier: String,
    pub version: String,
    pub build: String,
    pub icon_files: Vec<String>,
}

/// Fixed schema of the keys we care about. Each key may be missing or hold a
/// value of the wrong type, so they stay as raw plist values until checked.
#[derive(Debug, Deserialize)]
struct RawInfoPlist {
    #[serde(rename = "CFBundleIdentifier")]
    bundle_identifier: Option<Value>,
    #[serde(rename = "CFBundleShortVersionString")]
    version: Option<Value>,
    #[serde(rename = "CFBundleVersion")]
    build: Option<Value>,
    #[serde(rename = "CFBundleIconFiles")]
    icon_files: Option<Value>,
}

impl From<RawInfoPlist> for BundleMetadata {
    fn from(raw: RawInfoPlist) -> Self {
        Self {
            bundle_identifier: text_field(BUNDLE_ID_KEY, raw.bundle_identifier),
            version: text_field(VERSION_KEY, raw.version),
            build: text_field(BUILD_KEY, raw.build),
            icon_files: icon_list(raw.icon_files),
        }
    }
}

fn text_field(key: &str, value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(other) => {
            log::warn!("{} is not a string ({:?}), treating as empty", key, other);
            String::new()
        }
        None => {
            log::debug!("{} not set", key);
            String::new()
        }
    }
}

fn icon_list(value: Option<Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(other) => {
            log::warn!("{} is not an array ({:?}), ignoring", ICON_FILES_KEY, other);
            return Vec::new();
        }
        None => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            other => {
                log::warn!("skipping non-string entry in {}: {:?}", ICON_FILES_KEY, other);
                None
            }
        })
        .collect()
}

/// Decodes an XML or binary property list into [`BundleMetadata`].
///
/// Missing or mistyped fields become empty values; only a document that is not
/// a valid dictionary plist fails.
pub fn parse_info_plist(data: &[u8]) -> std::result::Result<BundleMetadata, plist::Error> {
    let raw: RawInfoPlist = plist::from_bytes(data)?;
    Ok(raw.into())
}

pub fn read_info_plist<P: AsRef<Path>>(path: P) -> Result<BundleMetadata> {
    let path = path.as_ref();

    let data = fs::read(path).map_err(|source| IpaInfoError::ReadInfoPlist {
        path: path.to_path_buf(),
        source,
    })?;

    parse_info_plist(&data).map_err(|source| IpaInfoError::MalformedInfoPlist {
        path: path.to_path_buf(),
        source,
    })
}
