use crate::{
    config::{CatalogConfig, Layout, SiteConfig},
    InitArgs,
};

pub fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            std::fs::create_dir_all(&path)?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let default_config = CatalogConfig {
        site: SiteConfig {
            name: "My Catalog".into(),
            tagline: None,
        },
        input: "catalog.md".into(),
        output: "pages".into(),
        layout: Layout::Card,
    };

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&default_config)?;
    std::fs::write(path.join("mdcatalog.yaml"), config_text)?;

    println!(
        "Created config file {config_file}",
        config_file = path.join("mdcatalog.yaml").display()
    );

    Ok(())
}
