mod batch_cmd;
mod cli;
mod detect_cmd;
mod grid_cmd;
mod link_cmd;
mod patterns_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Patterns { ref format } => patterns_cmd::run(format),
        cli::Commands::Detect {
            ref tokens,
            ref style,
            ref template,
            ref config,
            ref format,
        } => detect_cmd::run(
            tokens,
            style.as_deref(),
            template.as_deref(),
            config.as_deref(),
            format,
        ),
        cli::Commands::Grid {
            ref tokens,
            page,
            ref save,
            ref format,
        } => grid_cmd::run(tokens, page, save.as_deref(), format),
        cli::Commands::Link {
            ref file,
            ref tokens,
            ref grid,
            ref style_config,
            ref output,
            in_place,
            cols,
            rows,
            margin_left,
            margin_top,
            ref col_ratios,
            ref row_ratios,
        } => link_cmd::run(&link_cmd::LinkArgs {
            file,
            tokens,
            grid: grid.as_deref(),
            style_config: style_config.as_deref(),
            output: output.as_deref(),
            in_place,
            cols,
            rows,
            margin_left,
            margin_top,
            col_ratios: col_ratios.as_deref(),
            row_ratios: row_ratios.as_deref(),
        }),
        cli::Commands::Batch {
            ref manifest,
            ref grid,
            ref style_config,
        } => batch_cmd::run(manifest, grid.as_deref(), style_config.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
