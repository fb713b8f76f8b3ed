use crate::error::{IpaInfoError, Result};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Top-level folder of an .ipa holding the app bundle.
pub const PAYLOAD_DIR: &str = "Payload";

/// Metadata file name, relative to the bundle root.
pub const INFO_PLIST: &str = "Info.plist";

/// Decompresses every entry of `archive_path` into `dest`, keeping the
/// directory layout and, on unix, each file's recorded mode.
///
/// Entries whose names would land outside `dest` are rejected.
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, dest: Q) -> Result<()> {
    let archive_path = archive_path.as_ref();
    let dest = dest.as_ref();

    let file = File::open(archive_path).map_err(|source| IpaInfoError::OpenArchive {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;
    log::info!(
        "extracting {} entries from {}",
        archive.len(),
        archive_path.display()
    );

    let mut files = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| IpaInfoError::UnsafeEntryPath(name.clone()))?;
        let outpath = dest.join(relative);
        let failed = |source: std::io::Error| IpaInfoError::ExtractEntry {
            entry: name.clone(),
            source,
        };

        if entry.is_dir() {
            log::debug!("creating directory {}", outpath.display());
            fs::create_dir_all(&outpath).map_err(failed)?;
            continue;
        }

        if let Some(p) = outpath.parent() {
            if !p.exists() {
                fs::create_dir_all(p).map_err(failed)?;
            }
        }

        log::debug!("writing {}", outpath.display());
        let mut outfile = File::create(&outpath).map_err(failed)?;
        std::io::copy(&mut entry, &mut outfile).map_err(failed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode)).map_err(failed)?;
            }
        }

        files += 1;
    }

    log::info!("extracted {} files into {}", files, dest.display());
    Ok(())
}

/// Finds the app bundle inside `payload` and returns the absolute path of its
/// Info.plist.
///
/// The payload must contain exactly one subdirectory; stray files such as
/// `.DS_Store` are ignored.
pub fn locate_info_plist<P: AsRef<Path>>(payload: P) -> Result<PathBuf> {
    let payload = payload.as_ref();

    let entries = fs::read_dir(payload).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IpaInfoError::MissingPayload(payload.to_path_buf()),
        _ => IpaInfoError::Io(e),
    })?;

    let mut empty = true;
    let mut bundles = Vec::new();
    for entry in entries {
        let entry = entry?;
        empty = false;
        if entry.file_type()?.is_dir() {
            bundles.push(entry.path());
        } else {
            log::debug!("skipping non-directory {}", entry.path().display());
        }
    }

    if empty {
        return Err(IpaInfoError::EmptyPayload(payload.to_path_buf()));
    }

    let app_path = match bundles.as_slice() {
        [] => return Err(IpaInfoError::NoAppBundle(payload.to_path_buf())),
        [only] => only,
        _ => {
            let mut names: Vec<String> = bundles
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            names.sort();
            return Err(IpaInfoError::MultipleAppBundles(names));
        }
    };

    if app_path.extension().map(|e| e != "app").unwrap_or(true) {
        log::warn!(
            "bundle {} has no .app extension, using it anyway",
            app_path.display()
        );
    }

    let plist_path = std::path::absolute(app_path.join(INFO_PLIST))?;
    log::info!("found {}", plist_path.display());
    Ok(plist_path)
}
