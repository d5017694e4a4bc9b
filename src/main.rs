use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(help = "The source directory, holding site.yaml.")]
    source: PathBuf,
    #[arg(short, long, default_value = "out", help = "The destination directory")]
    dest: PathBuf,
}

fn main() -> anyhow::Result<()> {
    folio::logging::init();

    // Parse Arguments.
    let args = Args::parse();

    log::info!("Beginning to process {:?}", args.source);
    log::info!("Outputting to {:?}", args.dest);

    let generator = folio::generator::PageGenerator::from_source(&args.source)
        .with_context(|| format!("cannot load site from {:?}", args.source))?;
    let pages = generator
        .generate(&args.dest)
        .context("site generation failed")?;

    log::info!("Done. Wrote {} pages for {}.", pages.len(), generator.site().title);

    Ok(())
}
