use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{Layout, SiteConfig};

use super::record::Record;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

// =============================================================================
// Field lookup tables
// =============================================================================

/// Fields shown in the card layout's contact grid, paired with their
/// Font Awesome icon. Order here is display order.
const CONTACT_FIELDS: &[(&str, &str)] = &[
    ("Город", "map-marker-alt"),
    ("Адрес", "map-marker-alt"),
    ("Сайт", "globe"),
    ("Главный телефон", "phone"),
    ("Горячая линия", "phone"),
    ("Email", "envelope"),
    ("Email приемной комиссии", "envelope"),
    ("Основан", "history"),
    ("Основано", "history"),
];

/// Fields shown as full-width description sections in the card layout.
const DESCRIPTION_FIELDS: &[(&str, &str)] = &[
    ("Описание", "book"),
    ("Историческая справка", "history"),
    ("Историческая справка (краткая)", "history"),
    ("Факультеты", "building"),
    ("Основные специальности", "graduation-cap"),
    ("Основные специальности (коды и названия)", "graduation-cap"),
    ("Гражданские аналоги", "users"),
    ("Гражданские аналоги специальностей", "users"),
    ("Сроки обучения", "clock"),
    ("Количество мест 2025 год", "users"),
    ("Количество мест 2026 год", "users"),
    ("Бюджетные места по факультетам", "users"),
];

/// Field used as the hero subtitle in the card layout.
const SUBTITLE_FIELD: &str = "Полное название";

/// Field rendered as an external link.
const WEBSITE_FIELD: &str = "Сайт";

// =============================================================================
// Renderer
// =============================================================================

/// The template renderer, wrapping Tera over the embedded templates.
///
/// Tera's autoescaping stays enabled for the `.html` template names, so
/// every interpolated field value is HTML-escaped.
pub struct Renderer {
    tera: Tera,
    layout: Layout,
}

impl Renderer {
    /// Create a renderer for the given layout.
    pub fn new(layout: Layout) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("card.html", include_str!("../../templates/card.html")),
            ("table.html", include_str!("../../templates/table.html")),
            ("index.html", include_str!("../../templates/index.html")),
        ])?;

        Ok(Self { tera, layout })
    }

    /// Render a single record to a complete HTML document.
    pub fn render_record(&self, record: &Record, site: &SiteContext) -> Result<String, RenderError> {
        let page = PageView::from_record(record);

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("page", &page);

        Ok(self.tera.render(self.layout.template_name(), &context)?)
    }

    /// Render the aggregate index page linking every record.
    pub fn render_index(
        &self,
        entries: &[IndexEntry],
        site: &SiteContext,
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("entries", entries);

        Ok(self.tera.render("index.html", &context)?)
    }
}

// =============================================================================
// Template contexts
// =============================================================================

/// Site-level information rendered into the page shell.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub tagline: Option<String>,
}

impl From<&SiteConfig> for SiteContext {
    fn from(config: &SiteConfig) -> Self {
        Self {
            name: config.name.clone(),
            tagline: config.tagline.clone(),
        }
    }
}

/// A record prepared for the templates.
///
/// Only fields actually present in the record appear in these lists, so the
/// templates never emit an empty labeled section.
#[derive(Debug, Serialize)]
struct PageView {
    title: String,
    /// Hero subtitle (the record's full official name), card layout only
    subtitle: Option<String>,
    /// Contact-grid fields in lookup-table order, card layout only
    contacts: Vec<FieldView>,
    /// Description sections in lookup-table order, card layout only
    descriptions: Vec<FieldView>,
    /// Every field in source order, table layout only
    fields: Vec<FieldView>,
}

/// One field ready for interpolation.
#[derive(Debug, Serialize)]
struct FieldView {
    name: String,
    icon: String,
    value: String,
    /// Set when the value should render as a link
    href: Option<String>,
}

impl PageView {
    fn from_record(record: &Record) -> Self {
        let lookup = |table: &[(&str, &str)]| -> Vec<FieldView> {
            table
                .iter()
                .filter_map(|&(name, icon)| {
                    record
                        .get(name)
                        .map(|value| FieldView::new(name, icon, value))
                })
                .collect()
        };

        Self {
            title: record.title.clone(),
            subtitle: record.get(SUBTITLE_FIELD).map(str::to_string),
            contacts: lookup(CONTACT_FIELDS),
            descriptions: lookup(DESCRIPTION_FIELDS),
            fields: record
                .fields()
                .map(|(name, value)| FieldView::new(name, "", value))
                .collect(),
        }
    }
}

impl FieldView {
    fn new(name: &str, icon: &str, value: &str) -> Self {
        let href = (name == WEBSITE_FIELD).then(|| website_href(value));
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            value: value.to_string(),
            href,
        }
    }
}

/// Build the link target for a website field value. Bare hostnames get an
/// `http://` scheme; already-qualified URLs pass through.
fn website_href(value: &str) -> String {
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("http://{value}")
    }
}

/// One entry on the index page.
#[derive(Debug, Serialize)]
pub struct IndexEntry {
    /// Display title (numbering stripped)
    pub title: String,
    /// Relative link to the record's page, e.g. `test-academy.html`
    pub href: String,
}
