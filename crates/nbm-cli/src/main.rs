use clap::{Parser, Subcommand};
use nbm::{
    commands::{
        assemble::{self, AssembleCommand},
        init::{self, InitCommand},
        show::{self, ShowCommand},
    },
    GlobalOpts,
};
use nbm_logger as logger;

#[derive(Parser)]
#[command(name = "nbm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "NetBeans module descriptor tool",
    long_about = "nbm assembles the OpenIDE module manifest for a NetBeans module from nbm.toml settings and project data."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the module manifest
    Assemble(AssembleCommand),
    /// Print an existing manifest file
    Show(ShowCommand),
    /// Create a starter nbm.toml
    Init(InitCommand),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Assemble(cmd) => assemble::handle_assemble(cmd, &cli.global),
        Commands::Show(cmd) => show::handle_show(cmd),
        Commands::Init(cmd) => init::handle_init(cmd),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
