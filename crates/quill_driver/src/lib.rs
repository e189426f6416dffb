//! Quill Compiler Driver
//!
//! 前端流水线：词法 → 语法 (同时由 Analyzer 维护作用域) → 诊断输出

pub mod error;

pub use error::{CompileError, CompileResult};

use log::info;
use quill_diagnostics::{Diagnostic, DiagnosticKind, Emitter};
use quill_sema::Analyzer;
use quill_syntax::{tokenize, Parser, ParserOptions, Symbol};
use std::collections::BTreeSet;
use std::path::Path;

/// 前端输出
#[derive(Debug, Clone)]
pub struct FrontendOutput {
    /// 根节点 (`statement_list`)
    pub root: Option<Symbol>,
    /// 词法 + 语法诊断
    pub diagnostics: Vec<Diagnostic>,
    /// 模块导出
    pub exports: BTreeSet<String>,
}

impl FrontendOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// 按源码输出所有诊断
    pub fn emit(&self, file_name: &str, source: &str, emitter: &Emitter) {
        for diagnostic in &self.diagnostics {
            emitter.emit_with_source(diagnostic, file_name, source);
        }
    }
}

/// 以默认配置处理源代码
///
/// # Example
/// ```
/// use quill_driver::compile_source;
///
/// let output = compile_source("int x = 1 + 2").unwrap();
/// assert!(!output.has_errors());
/// ```
pub fn compile_source(source: &str) -> CompileResult<FrontendOutput> {
    compile_source_with(source, ParserOptions::default())
}

pub fn compile_source_with(source: &str, options: ParserOptions) -> CompileResult<FrontendOutput> {
    // 1. 词法分析
    let lexed = tokenize(source);
    info!(
        "lexed {} token(s), {} lexical diagnostic(s)",
        lexed.tokens.len(),
        lexed.diagnostics.len()
    );

    // 2. 语法分析 (作用域与导出由 Analyzer 维护)
    let mut analyzer = Analyzer::new();
    let result = Parser::new(lexed.tokens, lexed.diagnostics, &mut analyzer)?
        .with_options(options)
        .parse_program()?;

    Ok(FrontendOutput {
        root: result.root,
        diagnostics: result.diagnostics,
        exports: result.exports,
    })
}

/// 从文件处理
pub fn check_file(path: impl AsRef<Path>) -> CompileResult<FrontendOutput> {
    let path = path.as_ref();
    info!("checking {}", path.display());
    let source = std::fs::read_to_string(path)?;
    compile_source(&source)
}
