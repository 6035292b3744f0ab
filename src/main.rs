use clap::Parser;
use miette::Result;
use partforge::cli::{logging, Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    logging::init(&cli.global);

    match cli.command {
        Commands::Generate(args) => partforge::cli::commands::generate::run(args, &cli.global),
        Commands::Parts(args) => partforge::cli::commands::parts::run(args, &cli.global),
        Commands::Stats(args) => partforge::cli::commands::stats::run(args, &cli.global),
        Commands::Graph(args) => partforge::cli::commands::graph::run(args, &cli.global),
        Commands::Check(args) => partforge::cli::commands::check::run(args, &cli.global),
        Commands::Completions(args) => partforge::cli::commands::completions::run(args),
    }
}
