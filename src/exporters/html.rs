use handlebars::Handlebars;

use crate::error::Result;
use crate::exporters::json;
use crate::tree::DuTree;

const STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";

const PAGE_TEMPLATE: &str = include_str!("../../static/page.hbs");
const LEVEL_TEMPLATE: &str = include_str!("../../static/level.hbs");
const EXPAND_SCRIPT: &str = include_str!("../../static/expand.js");

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Directory Structure from du output".to_string(),
        }
    }
}

#[derive(serde_derive::Serialize)]
struct LevelRow<'a> {
    name: &'a str,
    size: &'a str,
    expandable: bool,
}

#[derive(serde_derive::Serialize)]
struct LevelData<'a> {
    rows: Vec<LevelRow<'a>>,
}

#[derive(serde_derive::Serialize)]
struct PageData<'a> {
    title: &'a str,
    stylesheet_url: &'a str,
    script_url: &'a str,
    listing: &'a str,
    tree_json: &'a str,
    expand_script: &'a str,
}

pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string("page", PAGE_TEMPLATE)?;
        handlebars.register_template_string("level", LEVEL_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Renders the root's direct children only. Deeper levels are built in the
    /// browser from the embedded projection.
    pub fn render_top_level(&self, tree: &DuTree) -> Result<String> {
        // `Children` is a BTreeMap, so this is already code point order.
        let rows = tree
            .children
            .iter()
            .map(|(name, node)| LevelRow {
                name,
                size: node.size.as_deref().unwrap_or_default(),
                expandable: node.has_children(),
            })
            .collect();

        Ok(self.handlebars.render("level", &LevelData { rows })?)
    }

    pub fn render_page(&self, tree: &DuTree, options: &PageOptions) -> Result<String> {
        let listing = self.render_top_level(tree)?;
        let tree_json = json::to_script_json(&json::project(tree))?;
        log::debug!(
            "top level listing is {} bytes, tree data is {} bytes",
            listing.len(),
            tree_json.len()
        );

        Ok(self.handlebars.render(
            "page",
            &PageData {
                title: &options.title,
                stylesheet_url: STYLESHEET_URL,
                script_url: SCRIPT_URL,
                listing: &listing,
                tree_json: &tree_json,
                expand_script: EXPAND_SCRIPT,
            },
        )?)
    }
}
