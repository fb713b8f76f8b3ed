use clap::Parser;
use ipainfo::{
    extract_archive, locate_info_plist, read_info_plist, write_json, write_report, IpaInfoError,
    Result, PAYLOAD_DIR,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Parser, Debug)]
#[command(name = "ipainfo")]
#[command(about = "Print the bundle identifier, version, build number and icon files of an .ipa")]
#[command(version)]
struct Cli {
    /// The .ipa archive to inspect
    input: PathBuf,

    /// Print the metadata as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    // Anything after the input is accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("[!] {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if !cli.ignored.is_empty() {
        log::debug!("ignoring extra arguments: {:?}", cli.ignored);
    }

    if !cli.input.exists() {
        return Err(IpaInfoError::FileNotFound(cli.input));
    }

    // Removed on drop, whichever step fails
    let tmpdir = TempDir::new()?;
    log::debug!("working directory {}", tmpdir.path().display());

    extract_archive(&cli.input, tmpdir.path())?;
    let plist_path = locate_info_plist(tmpdir.path().join(PAYLOAD_DIR))?;
    let metadata = read_info_plist(&plist_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        write_json(&mut out, &metadata)?;
    } else {
        write_report(&mut out, &metadata)?;
    }
    out.flush()?;

    tmpdir.close()?;
    Ok(())
}
