//! Compilation Errors
//!
//! 驱动层的错误类型。语法与语义问题都以诊断形式出现在输出中，
//! 这里只剩下无法产生输出的情况。

use quill_diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Emitter};
use quill_syntax::InternalError;
use thiserror::Error;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    /// 解析器内部缺陷
    #[error("internal parser error: {0}")]
    Internal(#[from] InternalError),

    /// IO 错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CompileError {
    /// 转换为诊断并收集到 DiagnosticSink
    ///
    /// IO 错误以 `io` 报告，解析器内部缺陷以 `internal` 报告。
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink, file_path: Option<&str>) {
        let target = file_path.unwrap_or("input");
        let diagnostic = match self {
            CompileError::Internal(err) => Diagnostic::error(DiagnosticKind::Internal, err.to_string())
                .with_note(format!("while parsing {}", target)),
            CompileError::IoError(err) => {
                Diagnostic::error(DiagnosticKind::Io, format!("cannot read {}", target))
                    .with_note(err.to_string())
            }
        };
        sink.add(diagnostic);
    }

    /// 使用统一诊断系统输出错误
    pub fn emit(&self, file_path: Option<&str>, emitter: &Emitter) {
        let mut sink = DiagnosticSink::new();
        self.collect_to_sink(&mut sink, file_path);
        emitter.emit_all(sink.diagnostics());
    }
}

/// 编译结果类型
pub type CompileResult<T> = Result<T, CompileError>;
