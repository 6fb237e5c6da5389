//! Function page assembly tests.

use diptych_musea::{
    assemble_function_page, assemble_function_page_async, AssembleOptions, PageContext, Registry,
};
use diptych_panel::{BlockOutcome, BlockRewriter};

const REGISTRY: &str = r#"{
    "packages": [
        { "name": "core", "display": "Core", "npm": "@vueuse/core" },
        { "name": "router", "display": "Router", "npm": "@vueuse/router", "addon": true }
    ],
    "functions": [
        { "name": "useCounter", "package": "core" },
        { "name": "useToggle", "package": "core" },
        { "name": "useRouteQuery", "package": "router" }
    ]
}"#;

const USE_COUNTER: &str = r#"---
category: Utilities
---

# useCounter

Basic counter. See also `useToggle`.

## Usage

```ts
const { count, inc } = useCounter()
```

```ts
const initial: number = 1
```
"#;

fn registry() -> Registry {
    Registry::from_json(REGISTRY).unwrap()
}

fn assemble(document: &str, ctx: &PageContext) -> String {
    assemble_function_page(
        document,
        ctx,
        &registry(),
        &BlockRewriter::default(),
        &AssembleOptions::default(),
    )
    .document
}

// =============================================================================
// Full Pages
// =============================================================================

mod pages {
    use super::*;

    #[test]
    fn function_page_with_demo() {
        let ctx = PageContext::new("core", "useCounter").with_demo("demo.vue");
        insta::assert_snapshot!(assemble(USE_COUNTER, &ctx), @r#"
        ---
        category: Utilities
        ---

        # useCounter

        <FunctionInfo fn="useCounter"/>

        Basic counter. See also [`useToggle`](/core/useToggle/).

        <script setup>
        import Demo from './demo.vue'
        </script>

        ## Demo

        <DemoContainer>
        <p class="demo-source-link"><a href="https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/demo.vue" target="_blank">source</a></p>
        <Demo/>
        </DemoContainer>

        ## Usage

        ```ts
        const { count, inc } = useCounter()
        ```

        <CodeToggle>
        <div class="code-block-ts">

        ```ts
        const initial: number = 1
        ```

        </div>
        <div class="code-block-js">

        ```js
        const initial = 1
        ```

        </div>
        </CodeToggle>

        ## Source

        [Source](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/index.ts) • [Demo](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/demo.vue) • [Docs](https://github.com/vueuse/vueuse/blob/main/packages/core/useCounter/index.md)

        ## Contributors

        <Contributors fn="useCounter" />

        ## Changelog

        <Changelog fn="useCounter" />
        "#);
    }

    #[test]
    fn addon_page_gets_note_before_usage() {
        let doc = "# useRouteQuery\n\nShorthand for a reactive route query.\n\n## Usage\n\n```ts\nconst page = useRouteQuery('page', '1', { transform: Number })\n```\n";
        let ctx = PageContext::new("router", "useRouteQuery");
        let page = assemble(doc, &ctx);

        let note = page.find("::: tip").unwrap();
        let usage = page.find("## Usage").unwrap();
        assert!(note < usage);
        assert!(page.contains("<a href=\"/router/README\">@vueuse/router</a> add-on."));
        assert!(!page.contains("## Demo"));
    }

    #[test]
    fn page_without_sections_gets_header_first() {
        let ctx = PageContext::new("core", "useToggle").with_demo("demo.vue");
        let page = assemble("A boolean switcher.\n", &ctx);
        assert!(page.starts_with("\n<script setup>\nimport Demo from './demo.vue'\n</script>"));
        assert!(page.contains("</DemoContainer>\nA boolean switcher.\n\n## Source\n"));
    }

    #[test]
    fn type_declarations_stay_plain() {
        let ctx = PageContext::new("core", "useToggle")
            .with_types("export declare function useToggle(initial?: boolean): Ref<boolean>");
        let page = assemble("# useToggle\n\n## Usage\n\nText.\n", &ctx);
        assert!(page.contains(
            "```ts\nexport declare function useToggle(initial?: boolean): Ref<boolean>\n```"
        ));
        assert!(!page.contains("<CodeToggle>"));
    }

    #[test]
    fn learn_more_markers() {
        let doc = "# useToggle\n\n## Usage\n\nx\n\n## Component Usage\n\n```vue\n<UseToggle />\n```\n";
        let page = assemble(doc, &PageContext::new("core", "useToggle"));
        assert!(page.contains("## Component Usage\n\n<LearnMoreComponents />\n\n```vue"));
    }
}

// =============================================================================
// Reporting
// =============================================================================

mod reporting {
    use super::*;

    #[test]
    fn block_failures_are_reported() {
        let doc = "# useToggle\n\n## Usage\n\n```ts\nconst [on, toggle] = useToggle(\n```\n";
        let page = assemble_function_page(
            doc,
            &PageContext::new("core", "useToggle"),
            &registry(),
            &BlockRewriter::default(),
            &AssembleOptions::default(),
        );

        assert_eq!(page.report.outcomes, vec![BlockOutcome::Failed]);
        assert_eq!(page.report.diagnostics[0].line, 5);
        assert!(page
            .document
            .contains("```ts\nconst [on, toggle] = useToggle(\n```"));
    }

    #[test]
    fn unknown_function_still_assembles() {
        let ctx = PageContext::new("core", "useMissing");
        let page = assemble("# useMissing\n\nUses `useToggle`.\n", &ctx);
        assert!(page.contains("<FunctionInfo fn=\"useMissing\"/>"));
        assert!(page.contains("[`useToggle`](/core/useToggle/)"));
    }

    #[tokio::test]
    async fn async_matches_sync() {
        let ctx = PageContext::new("core", "useCounter").with_demo("demo.client.vue");
        let registry = registry();
        let rewriter = BlockRewriter::default();
        let options = AssembleOptions::default();

        let sync = assemble_function_page(USE_COUNTER, &ctx, &registry, &rewriter, &options);
        let concurrent =
            assemble_function_page_async(USE_COUNTER, &ctx, &registry, &rewriter, &options).await;
        assert_eq!(sync, concurrent);
    }
}
