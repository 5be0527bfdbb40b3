use clap::Parser;

use dielectron_viz::app;
use dielectron_viz::cli::Args;
use dielectron_viz::pipeline;
use dielectron_viz::units::UnitCatalog;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let catalog = UnitCatalog::dielectron();

    let pair = pipeline::run(&args.data, &args.request(), &catalog)?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&pair.summary())?);
        return Ok(());
    }

    app::show(&args.data.display().to_string(), pair)
}
