use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;

use super::record::Record;
use super::render::{IndexEntry, RenderError, Renderer, SiteContext};
use super::scanner::scan_document;
use super::slug::{slugify, unique_slug};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("failed to read input document {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Record pages written successfully (the index is extra)
    pub pages: usize,
    /// Record pages that failed to render or write
    pub failed: usize,
}

pub struct Builder {
    config: CatalogConfig,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
}

impl Builder {
    pub fn new(config: CatalogConfig, base_path: PathBuf) -> Self {
        Self { config, base_path }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Read and scan the input document -> Record[]
        // 2. Derive a unique filename slug per record
        // 3. Render and write each record page (best effort)
        // 4. Render and write the index page

        let input_path = self.config.input_path(&self.base_path);
        let text =
            std::fs::read_to_string(&input_path).map_err(|e| BuildError::ReadInput {
                path: input_path.clone(),
                source: e,
            })?;

        let records = scan_document(&text);
        println!(
            "Found {} record(s) in {}",
            records.len(),
            input_path.display()
        );

        let renderer = Renderer::new(self.config.layout)?;
        let site = SiteContext::from(&self.config.site);

        let output_dir = self.config.output_dir(&self.base_path);
        std::fs::create_dir_all(&output_dir)?;

        let slugs = self.assign_slugs(&records);

        // The index lists every record, written pages or not; one bad
        // record must not disturb the rest of the batch.
        let entries: Vec<IndexEntry> = records
            .iter()
            .zip(&slugs)
            .map(|(record, slug)| IndexEntry {
                title: record.display_title().to_string(),
                href: format!("{slug}.html"),
            })
            .collect();

        let mut pages = 0;
        let mut failed = 0;
        for (record, slug) in records.iter().zip(&slugs) {
            let path = output_dir.join(format!("{slug}.html"));
            match self.write_page(record, &path, &renderer, &site) {
                Ok(()) => pages += 1,
                Err(e) => {
                    eprintln!("Error creating page for {}: {}", record.title, e);
                    failed += 1;
                }
            }
        }

        let index_html = renderer.render_index(&entries, &site)?;
        write_atomic(&output_dir.join("index.html"), &index_html)?;

        let display_output = output_dir.canonicalize().unwrap_or(output_dir.clone());
        println!("Wrote {} page(s) to {}", pages + 1, display_output.display());

        Ok(BuildResult {
            output_dir,
            pages,
            failed,
        })
    }

    fn write_page(
        &self,
        record: &Record,
        path: &Path,
        renderer: &Renderer,
        site: &SiteContext,
    ) -> Result<(), BuildError> {
        let html = renderer.render_record(record, site)?;
        write_atomic(path, &html)?;
        Ok(())
    }

    /// Derive a filename slug for each record, suffixing on collision.
    fn assign_slugs(&self, records: &[Record]) -> Vec<String> {
        let sep = self.config.layout.slug_separator();
        let mut used = HashSet::new();

        records
            .iter()
            .map(|record| {
                let mut base = slugify(&record.title, sep);
                if base.is_empty() {
                    // Title was punctuation-only; still give the page a name
                    base = "record".to_string();
                }
                let slug = unique_slug(&base, sep, &mut used);
                if slug != base {
                    eprintln!(
                        "Warning: '{}' collides with an earlier title, writing {}.html",
                        record.title, slug
                    );
                }
                slug
            })
            .collect()
    }
}

/// Write a file via a temporary sibling and rename, so a failure mid-write
/// never leaves a truncated page behind.
fn write_atomic(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
