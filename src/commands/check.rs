use std::collections::HashSet;

use crate::{
    build::{base_path_from_config, scan_document, slugify, unique_slug},
    config::CatalogConfig,
    CheckArgs,
};

/// Parse the catalog document and report what a build would produce,
/// without writing anything.
pub fn run(args: &CheckArgs) -> Result<(), anyhow::Error> {
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
    if let Some(input) = &args.input {
        config.input = input.clone();
    }

    let base_path = base_path_from_config(&config_path);
    let input_path = config.input_path(&base_path);
    let text = std::fs::read_to_string(&input_path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", input_path.display(), e))?;

    let records = scan_document(&text);
    println!(
        "Found {} record(s) in {}",
        records.len(),
        input_path.display()
    );

    let sep = config.layout.slug_separator();
    let mut used = HashSet::new();
    let mut collisions = 0;

    for record in &records {
        let base = slugify(&record.title, sep);
        let slug = unique_slug(&base, sep, &mut used);
        if slug != base {
            collisions += 1;
            println!(
                "  - {} ({} fields) -> {}.html  [collision with an earlier title]",
                record.title,
                record.len(),
                slug
            );
        } else {
            println!("  - {} ({} fields) -> {}.html", record.title, record.len(), slug);
        }
    }

    if collisions > 0 {
        println!("{collisions} slug collision(s); colliding pages get numbered suffixes");
    }

    Ok(())
}
