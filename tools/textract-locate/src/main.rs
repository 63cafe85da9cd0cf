use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

use textract_host::{is_valid_install, Locator, TerrariaInstall, Transcoder};

/// Sanity-check binary for Terraria discovery and ffmpeg conversion
#[derive(Parser)]
struct Args {
    /// Log debug output (strategy progress, skipped candidates)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the Terraria install directory
    Locate {
        /// Use this directory instead of searching (validated only)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Skip the Windows registry lookup
        #[arg(long)]
        no_registry: bool,

        /// Print every fault the search ran into
        #[arg(long)]
        report: bool,
    },
    /// Convert one audio file to 16-bit PCM wav with ffmpeg
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("Warning: Logger already initialized");
    }
}

fn locate(dir: Option<PathBuf>, no_registry: bool, report: bool) -> anyhow::Result<TerrariaInstall> {
    if let Some(dir) = dir {
        if !is_valid_install(&dir) {
            anyhow::bail!("{} is not a Terraria install (no 'Content' directory)", dir.display());
        }
        return Ok(TerrariaInstall::new(dir)?);
    }

    let discovery = Locator::new().registry(!no_registry).locate();
    if report {
        for diag in &discovery.diagnostics {
            eprintln!("{diag}");
        }
    }
    discovery.install.ok_or_else(|| {
        anyhow::anyhow!(
            "Could not locate Terraria install. Provide --dir <install_dir> (or set TERRARIA_DIR)."
        )
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Cmd::Locate {
            dir,
            no_registry,
            report,
        } => {
            let install = locate(dir, no_registry, report)?;
            println!("{}", install.into_path().display());
        }
        Cmd::Convert { input, output } => {
            let transcoder = Transcoder::global();
            let exe = transcoder.executable()?;
            log::info!("using ffmpeg: {exe}");

            let outcome = transcoder.try_convert(&input, &output)?;
            if !outcome.success {
                anyhow::bail!("ffmpeg failed on {}", input.display());
            }
            println!("{}", output.display());
        }
    }

    Ok(())
}
