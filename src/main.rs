mod cli;

use std::io::Write;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, GenerateArgs, ListArgs, ListFormat};
use tfquota::terraform::{MAIN_FILE_NAME, VARIABLES_FILE_NAME};
use tfquota::{build_module, load_catalog, output, write_module};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(args).await?,
        Command::List(args) => list(args).await?,
    }

    Ok(())
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let catalog = load_catalog(&args.source.source_config(), &args.source.services).await?;
    let module = build_module(&catalog, args.strict)?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "# --- {MAIN_FILE_NAME} ---")?;
        stdout.write_all(module.main_tf.as_bytes())?;
        writeln!(stdout, "# --- {VARIABLES_FILE_NAME} ---")?;
        stdout.write_all(module.variables_tf.as_bytes())?;
        return Ok(());
    }

    let files = write_module(&args.output_dir, &module)?;
    tracing::info!(
        count = catalog.len(),
        main = %files.main_tf.display(),
        variables = %files.variables_tf.display(),
        "generation complete"
    );
    Ok(())
}

async fn list(args: ListArgs) -> Result<()> {
    let catalog = load_catalog(&args.source.source_config(), &args.source.services).await?;

    let rendered = match args.format {
        ListFormat::Table => output::render_table(&catalog.quotas),
        ListFormat::Tree => output::render_tree(&catalog.quotas),
        ListFormat::Json => output::render_json(&catalog.quotas)?,
    };
    println!("{rendered}");
    Ok(())
}
