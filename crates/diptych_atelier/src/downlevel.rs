//! TypeScript to JavaScript downleveling with oxc_transformer.

use crate::error::TranspileError;
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer, TypeScriptOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for the TypeScript transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileOptions {
    /// Runtime feature level, e.g. `esnext` or `es2020` (default: esnext)
    #[serde(default = "default_target")]
    pub target: String,

    /// Keep value imports even when only used as types (default: false)
    ///
    /// When false, imports that are never referenced as values are elided,
    /// matching `tsc` without `verbatimModuleSyntax`.
    #[serde(default)]
    pub only_remove_type_imports: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            target: default_target(),
            only_remove_type_imports: false,
        }
    }
}

fn default_target() -> String {
    "esnext".to_string()
}

/// Transform TypeScript code to JavaScript using OXC.
///
/// Type annotations, interfaces, type aliases and type-only imports are
/// erased; runtime statements keep their order.
pub fn to_javascript(source: &str, options: &TranspileOptions) -> Result<String, TranspileError> {
    let allocator = Allocator::default();
    let parse_result = Parser::new(&allocator, source, SourceType::ts()).parse();

    if !parse_result.errors.is_empty() {
        return Err(TranspileError::Parse(join_diagnostics(
            parse_result.errors.iter().map(|e| e.to_string()),
        )));
    }

    let mut program = parse_result.program;

    // Run semantic analysis to get symbols and scopes
    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
        return Err(TranspileError::Semantic(join_diagnostics(
            semantic_ret.errors.iter().map(|e| e.to_string()),
        )));
    }
    let scoping = semantic_ret.semantic.into_scoping();

    let transform_options = build_transform_options(options)?;
    let ret = Transformer::new(&allocator, Path::new(""), &transform_options)
        .build_with_scoping(scoping, &mut program);

    if !ret.errors.is_empty() {
        return Err(TranspileError::Transform(join_diagnostics(
            ret.errors.iter().map(|e| e.to_string()),
        )));
    }

    Ok(Codegen::new().build(&program).code)
}

fn build_transform_options(options: &TranspileOptions) -> Result<TransformOptions, TranspileError> {
    let mut transform_options =
        TransformOptions::from_target(&options.target).map_err(|message| {
            TranspileError::InvalidTarget {
                target: options.target.clone(),
                message,
            }
        })?;

    transform_options.typescript = TypeScriptOptions {
        only_remove_type_imports: options.only_remove_type_imports,
        ..Default::default()
    };

    Ok(transform_options)
}

#[inline]
fn join_diagnostics(messages: impl Iterator<Item = String>) -> String {
    messages.collect::<Vec<_>>().join("; ")
}
