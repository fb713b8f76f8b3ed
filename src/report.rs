use crate::info_plist::BundleMetadata;
use std::io::{self, Write};

/// Writes the plain-text report, one fact per line.
pub fn write_report<W: Write>(out: &mut W, metadata: &BundleMetadata) -> io::Result<()> {
    writeln!(out, "Bundle Identifier:{}", metadata.bundle_identifier)?;
    writeln!(out, "Version number:{}", metadata.version)?;
    writeln!(out, "Build number:{}", metadata.build)?;

    if metadata.icon_files.is_empty() {
        writeln!(out, "No icon files specified")?;
    } else {
        writeln!(out, "Icon files:")?;
        for icon in &metadata.icon_files {
            writeln!(out, "- {}", icon)?;
        }
    }

    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, metadata: &BundleMetadata) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, metadata)?;
    writeln!(out).map_err(serde_json::Error::io)
}
