//! Quill Diagnostics
//!
//! 前端各阶段共用的诊断模型与输出。
//!
//! 词法器、语法分析器与作用域分析把问题记录为 [`Diagnostic`]，
//! 收集到 [`DiagnosticSink`] 中，最后由 [`Emitter`] 渲染：
//!
//! ```rust
//! use quill_diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Emitter, Span};
//!
//! let mut sink = DiagnosticSink::new();
//! sink.add(
//!     Diagnostic::syntax("expected block of code")
//!         .span(Span::at(3, 9, 1))
//!         .with_note("a block starts with '{'"),
//! );
//!
//! assert_eq!(sink.count_of(DiagnosticKind::Syntax), 1);
//! let text = Emitter::without_colors().render(&sink.diagnostics()[0]);
//! assert!(text.contains("--> 3:9-10"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
pub use span::Span;
