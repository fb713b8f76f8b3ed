//! Shared helpers for ipainfo integration tests

use assert_cmd::Command;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

#[allow(dead_code)]
pub const SAMPLE_REPORT: &str = "Bundle Identifier:hu.jozsefvesza.example
Version number:1.0
Build number:1.0
Icon files:
- Default.png
- Default@2x.png
";

/// A scratch area with a private temp dir handed to the binary via `TMPDIR`,
/// so tests can check that nothing is left behind.
#[allow(dead_code)]
pub struct TestWorkspace {
    pub temp: TempDir,
    pub path: PathBuf,
    pub scratch: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let scratch = path.join("tmp");
        fs::create_dir_all(&scratch).expect("Failed to create scratch directory");
        Self {
            temp,
            path,
            scratch,
        }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &[u8]) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Zip the directory `src` (relative to the workspace) into `name`
    pub fn zip_dir(&self, src: &str, name: &str) -> PathBuf {
        let root = self.path.join(src);
        let output = self.path.join(name);
        zip_tree(&root, &output);
        output
    }

    /// Build an .ipa holding a single bundle with the sample Info.plist
    pub fn sample_ipa(&self) -> PathBuf {
        let plist = fs::read(fixture("sample/Info.plist")).expect("Failed to read fixture");
        self.write_file("build/Payload/example.app/Info.plist", &plist);
        self.write_file("build/Payload/example.app/example", b"\xcf\xfa\xed\xfe");
        self.write_file("build/Payload/example.app/Default.png", b"png");
        self.zip_dir("build", "example.ipa")
    }

    pub fn scratch_is_empty(&self) -> bool {
        fs::read_dir(&self.scratch)
            .expect("Failed to list scratch directory")
            .next()
            .is_none()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ipainfo").expect("Failed to find ipainfo binary");
        cmd.current_dir(&self.path)
            .env("TMPDIR", &self.scratch)
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Archive every file and directory under `root`, keeping unix modes.
pub fn zip_tree(root: &Path, output: &Path) {
    let file = File::create(output).expect("Failed to create archive");
    let mut zip = zip::ZipWriter::new(file);
    let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.expect("Failed to walk tree");
        let path = entry.path();
        if path == root {
            continue;
        }
        let name = path
            .strip_prefix(root)
            .expect("path is within root")
            .to_string_lossy()
            .replace('\\', "/");

        let options = base.unix_permissions(mode_of(path));
        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options)
                .expect("Failed to add directory");
        } else {
            zip.start_file(name, options).expect("Failed to start file");
            zip.write_all(&fs::read(path).expect("Failed to read file"))
                .expect("Failed to write file");
        }
    }

    zip.finish().expect("Failed to finish archive");
}

#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).expect("Failed to stat").permissions().mode() & 0o777
}

#[cfg(not(unix))]
pub fn mode_of(path: &Path) -> u32 {
    if path.is_dir() {
        0o755
    } else {
        0o644
    }
}
