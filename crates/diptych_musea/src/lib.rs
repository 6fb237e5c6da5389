//! # diptych_musea
//!
//! Musea - The gallery wall where Diptych hangs its pages.
//! Assembles the documentation page of one function: cross-reference links,
//! dual-view code blocks, a demo embed, and generated reference sections.
//!
//! ## Name Origin
//!
//! **Musea** is the plural of *museum*. A diptych is only seen once it is
//! hung; this crate frames the rewritten samples with everything a reader
//! expects around them on a function page.
//!
//! ## Example
//!
//! ```ignore
//! use diptych_musea::{assemble_function_page, AssembleOptions, PageContext, Registry};
//! use diptych_panel::BlockRewriter;
//!
//! let registry = Registry::from_json(registry_json)?;
//! let ctx = PageContext::new("core", "useCounter").with_demo("demo.vue");
//! let page = assemble_function_page(
//!     markdown,
//!     &ctx,
//!     &registry,
//!     &BlockRewriter::default(),
//!     &AssembleOptions::default(),
//! );
//! println!("{}", page.document);
//! ```

mod assemble;
mod error;
mod fence;
mod links;
mod registry;
mod sections;

pub use assemble::{assemble_function_page, assemble_function_page_async, AssembledPage};
pub use error::LookupError;
pub use links::rewrite_links;
pub use registry::{FunctionEntry, PackageEntry, Registry};
pub use sections::{function_sections, PageContext, Sections};

use serde::{Deserialize, Serialize};

/// Options for page assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleOptions {
    /// Absolute site URL rewritten to `/` in prose (default: https://vueuse.org/).
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Base URL of package sources, joined with `<package>/<function>`.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Component wrapping the demo (default: DemoContainer).
    #[serde(default = "default_demo_container")]
    pub demo_container: String,

    /// Link inline code that names a known function.
    #[serde(default = "default_true")]
    pub link_functions: bool,

    /// Append the contributors section.
    #[serde(default = "default_true")]
    pub contributors: bool,

    /// Append the changelog section.
    #[serde(default = "default_true")]
    pub changelog: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            source_url: default_source_url(),
            demo_container: default_demo_container(),
            link_functions: true,
            contributors: true,
            changelog: true,
        }
    }
}

fn default_site_url() -> String {
    "https://vueuse.org/".to_string()
}

fn default_source_url() -> String {
    "https://github.com/vueuse/vueuse/blob/main/packages".to_string()
}

fn default_demo_container() -> String {
    "DemoContainer".to_string()
}

fn default_true() -> bool {
    true
}
