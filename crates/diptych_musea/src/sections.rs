//! Generated sections around a function page.

use crate::registry::Registry;
use crate::AssembleOptions;
use serde::{Deserialize, Serialize};

/// What the caller discovered about the page being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Owning package directory, e.g. `core`.
    pub package: String,

    /// Function name, e.g. `useCounter`.
    pub name: String,

    /// Demo component file next to the page, e.g. `demo.vue`.
    #[serde(default)]
    pub demo: Option<String>,

    /// Type declarations of the function.
    #[serde(default)]
    pub types: Option<String>,
}

impl PageContext {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            demo: None,
            types: None,
        }
    }

    pub fn with_demo(mut self, demo: impl Into<String>) -> Self {
        self.demo = Some(demo.into());
        self
    }

    pub fn with_types(mut self, types: impl Into<String>) -> Self {
        self.types = Some(types.into());
        self
    }
}

/// Text inserted before the first section heading and appended at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub header: String,
    pub footer: String,
}

/// Build the header and footer of a function page.
///
/// The header holds the demo embed and, for add-on packages, an install
/// note. The footer holds type declarations, source links, contributors and
/// changelog. A package missing from the registry only drops the install note.
pub fn function_sections(
    ctx: &PageContext,
    registry: &Registry,
    options: &AssembleOptions,
) -> Sections {
    let source_url = format!(
        "{}/{}/{}",
        options.source_url.trim_end_matches('/'),
        ctx.package,
        ctx.name
    );

    let mut header = String::with_capacity(512);
    if let Some(demo) = &ctx.demo {
        header.push_str(&demo_section(demo, &source_url, options));
    }
    match registry.package(&ctx.package) {
        Ok(package) if package.addon => {
            header.push_str("\n::: tip\nAvailable in the <a href=\"/");
            header.push_str(&package.name);
            header.push_str("/README\">");
            header.push_str(&package.npm);
            header.push_str("</a> add-on.\n:::\n");
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(function = %ctx.name, error = %err, "package note skipped");
        }
    }

    let mut footer = String::with_capacity(1024);

    if let Some(types) = ctx.types.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        footer.push_str("\n## Type Declarations\n\n<details>\n");
        footer.push_str("<summary op50 italic cursor-pointer select-none>Show Type Declarations</summary>\n\n");
        footer.push_str("```ts\n");
        footer.push_str(types);
        footer.push_str("\n```\n\n</details>\n");
    }

    footer.push_str("\n## Source\n\n");
    footer.push_str(&format!("[Source]({}/index.ts)", source_url));
    if let Some(demo) = &ctx.demo {
        footer.push_str(&format!(" • [Demo]({}/{})", source_url, demo));
    }
    footer.push_str(&format!(" • [Docs]({}/index.md)\n", source_url));

    if options.contributors {
        footer.push_str(&format!(
            "\n## Contributors\n\n<Contributors fn=\"{}\" />\n",
            ctx.name
        ));
    }

    if options.changelog {
        footer.push_str(&format!(
            "\n## Changelog\n\n<Changelog fn=\"{}\" />\n",
            ctx.name
        ));
    }

    Sections { header, footer }
}

/// Script import and container for the demo component.
///
/// `*.client.vue` demos are loaded lazily on the client only.
fn demo_section(demo: &str, source_url: &str, options: &AssembleOptions) -> String {
    let container = options.demo_container.as_str();
    let mut md = String::with_capacity(384);

    md.push_str("\n<script setup>\n");
    if demo.ends_with(".client.vue") {
        md.push_str("import { defineAsyncComponent } from 'vue'\n");
        md.push_str(&format!(
            "const Demo = defineAsyncComponent(() => import('./{}'))\n",
            demo
        ));
    } else {
        md.push_str(&format!("import Demo from './{}'\n", demo));
    }
    md.push_str("</script>\n\n## Demo\n\n");

    md.push_str(&format!("<{}>\n", container));
    md.push_str(&format!(
        "<p class=\"demo-source-link\"><a href=\"{}/{}\" target=\"_blank\">source</a></p>\n",
        source_url, demo
    ));
    if demo.ends_with(".client.vue") {
        md.push_str("<ClientOnly>\n  <Suspense>\n    <Demo/>\n    <template #fallback>\n      Loading demo...\n    </template>\n  </Suspense>\n</ClientOnly>\n");
    } else {
        md.push_str("<Demo/>\n");
    }
    md.push_str(&format!("</{}>\n", container));

    md
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_json(
            r#"{
                "packages": [
                    { "name": "core", "npm": "@vueuse/core" },
                    { "name": "router", "npm": "@vueuse/router", "addon": true }
                ],
                "functions": [
                    { "name": "useCounter", "package": "core" },
                    { "name": "useRouteQuery", "package": "router" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_minimal_sections() {
        let ctx = PageContext::new("core", "useCounter");
        let sections = function_sections(&ctx, &registry(), &AssembleOptions::default());
        assert_eq!(sections.header, "");
        insta::assert_snapshot!(sections.footer.trim_start(), @r#"
        ## Source

        [Source](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/index.ts) • [Docs](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/index.md)

        ## Contributors

        <Contributors fn="useCounter" />

        ## Changelog

        <Changelog fn="useCounter" />
        "#);
    }

    #[test]
    fn test_demo_header() {
        let ctx = PageContext::new("core", "useCounter").with_demo("demo.vue");
        let sections = function_sections(&ctx, &registry(), &AssembleOptions::default());
        insta::assert_snapshot!(sections.header.trim_start(), @r#"
        <script setup>
        import Demo from './demo.vue'
        </script>

        ## Demo

        <DemoContainer>
        <p class="demo-source-link"><a href="https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/demo.vue" target="_blank">source</a></p>
        <Demo/>
        </DemoContainer>
        "#);
        assert!(sections.footer.contains(" • [Demo](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/demo.vue) • "));
    }

    #[test]
    fn test_client_only_demo() {
        let ctx = PageContext::new("core", "useCounter").with_demo("demo.client.vue");
        let header = function_sections(&ctx, &registry(), &AssembleOptions::default()).header;
        assert!(header.contains("defineAsyncComponent(() => import('./demo.client.vue'))"));
        assert!(header.contains("<ClientOnly>"));
    }

    #[test]
    fn test_addon_note() {
        let ctx = PageContext::new("router", "useRouteQuery");
        let header = function_sections(&ctx, &registry(), &AssembleOptions::default()).header;
        assert_eq!(
            header,
            "\n::: tip\nAvailable in the <a href=\"/router/README\">@vueuse/router</a> add-on.\n:::\n"
        );
    }

    #[test]
    fn test_unknown_package_drops_note_only() {
        let ctx = PageContext::new("missing", "useThing");
        let sections = function_sections(&ctx, &registry(), &AssembleOptions::default());
        assert_eq!(sections.header, "");
        assert!(sections.footer.contains("## Source"));
    }

    #[test]
    fn test_type_declarations() {
        let ctx = PageContext::new("core", "useCounter")
            .with_types("\nexport declare function useCounter(initial?: number): void\n");
        let footer = function_sections(&ctx, &registry(), &AssembleOptions::default()).footer;
        assert!(footer.starts_with("\n## Type Declarations\n\n<details>\n"));
        assert!(footer.contains(
            "```ts\nexport declare function useCounter(initial?: number): void\n```\n\n</details>\n"
        ));
    }

    #[test]
    fn test_optional_sections_disabled() {
        let options = AssembleOptions {
            contributors: false,
            changelog: false,
            ..AssembleOptions::default()
        };
        let footer = function_sections(&PageContext::new("core", "useCounter"), &registry(), &options).footer;
        assert!(!footer.contains("Contributors"));
        assert!(!footer.contains("Changelog"));
    }
}
