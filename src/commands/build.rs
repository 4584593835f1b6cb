use crate::{
    build::{base_path_from_config, Builder},
    config::CatalogConfig,
    BuildArgs,
};

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| "mdcatalog.yaml".into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let mut config = CatalogConfig::load_from_arg(Some(config_path.as_path()))?;

    // CLI flags take precedence over the config file
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(layout) = args.layout {
        config.layout = layout;
    }

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let builder = Builder::new(config, base_path);
    let result = builder.build()?;

    println!(
        "Built catalog to {} ({} pages, {} failed)",
        result.output_dir.display(),
        result.pages,
        result.failed
    );

    Ok(())
}
