mod cmd;
mod logging;

use clap::{Args, Parser};
use liturgist_core::config::loader::{ConfigLoader, default_config_path};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "liturgist", version, about = "A liturgical document generator")]
struct Cli {
    /// Path to a config file (defaults to $XDG_CONFIG_HOME/liturgist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// A date on the schedule to select data for the template, e.g. 3/10/24.
    /// Defaults to next Sunday.
    #[arg(long)]
    pub date: Option<String>,

    /// Print the selected data as JSON
    #[arg(long)]
    pub print: bool,

    /// Path to an HTML template
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file; .pdf renders a PDF, anything else gets the rendered HTML
    #[arg(short, long = "output")]
    pub output: Option<PathBuf>,

    /// List the schedule columns templates can use and exit
    #[arg(long)]
    pub list_fields: bool,

    /// Path to the schedule (csv, json, xlsx, xls or ods)
    #[arg(required_unless_present = "list_fields")]
    pub schedule: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let cfg = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("FAIL liturgist");
            eprintln!("{e}");
            if cli.config.is_none() {
                eprintln!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&cfg.logging) {
        eprintln!("FAIL liturgist");
        eprintln!("failed to open log file: {e}");
        std::process::exit(1);
    }

    if cli.generate.list_fields {
        cmd::fields::run();
    } else {
        cmd::generate::run(&cfg, cli.generate);
    }

    logging::flush();
}
