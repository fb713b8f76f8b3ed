pub mod error;
pub mod info_plist;
pub mod ipa;
pub mod report;

pub use error::{IpaInfoError, Result};
pub use info_plist::{parse_info_plist, read_info_plist, BundleMetadata};
pub use ipa::{extract_archive, locate_info_plist, INFO_PLIST, PAYLOAD_DIR};
pub use report::{write_json, write_report};
