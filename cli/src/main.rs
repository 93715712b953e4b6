use std::path::PathBuf;

use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use contractdoc::{
    Error,
    config::RenderConfig,
    hook::format_contracts,
    manifest::{EntityManifest, Manifest},
    markup::Markup,
};
use log::info;

#[derive(ClapParser)]
pub struct Arguments {
    /// Path to the contract manifest (TOML)
    manifest: PathBuf,

    /// Render configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Markup style, overriding the configuration file
    #[arg(long)]
    markup: Option<Markup>,

    /// Only render the entity with this name
    #[arg(long)]
    entity: Option<String>,
}

fn report(error: &Error) {
    match error {
        Error::DecoratorParseError { decorator, errors } => {
            let mut colors = ColorGenerator::new();
            let a = colors.next();
            let name = "<decorator>";

            for error in errors {
                let span = (name, error.span.clone());
                let printed = Report::build(ReportKind::Error, span.clone())
                    .with_config(Config::default().with_index_type(IndexType::Byte))
                    .with_message(&error.message)
                    .with_label(
                        Label::new(span)
                            .with_message("The error occurred here")
                            .with_color(a),
                    )
                    .finish()
                    .eprint((name, Source::from(decorator.as_str())));
                if printed.is_err() {
                    eprintln!("Error: {}", error.message);
                }
            }
        }
        _ => eprintln!("Error: {error}"),
    }
}

fn render(entity: &EntityManifest, config: &RenderConfig) -> Result<(), Error> {
    let lines = format_contracts(&entity.kind, entity, config)?;
    info!("rendered {} line(s) for '{}'", lines.len(), entity.name);

    println!("{} ({})", entity.name, entity.kind);
    for line in lines {
        println!("{line}");
    }
    println!();
    Ok(())
}

fn run(args: &Arguments) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    let config = match args.markup {
        Some(markup) => config.with_markup(markup),
        None => config,
    };

    let manifest = Manifest::from_path(&args.manifest)?;
    match &args.entity {
        Some(name) => render(manifest.entity(name)?, &config),
        None => manifest
            .entities
            .iter()
            .try_for_each(|entity| render(entity, &config)),
    }
}

fn main() {
    env_logger::init();
    let args = Arguments::parse();

    if let Err(error) = run(&args) {
        eprintln!("Failed to render contracts from {}:", args.manifest.display());
        report(&error);
        std::process::exit(1);
    }
}
