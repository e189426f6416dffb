//! Parse Error Types
//!
//! 解析阶段只有一种面向用户的错误：语法错误。
//! 语法错误只在恢复边界 (程序根、语句列表、数组字面量、对象字面量) 被捕获；
//! `Internal` 表示解析器自身的缺陷，不会被任何恢复边界吞掉。

use quill_diagnostics::{Diagnostic, Span};
use thiserror::Error;

/// 语法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// 转换为统一诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::syntax(self.message.clone()).span(self.span)
    }
}

/// 解析器内部缺陷
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// token 序列没有以 Eof 哨兵结尾
    #[error("token sequence is not terminated by an end-of-sequence sentinel")]
    MissingEof,

    /// 优先级链中不存在的层级
    #[error("precedence level {0} does not exist")]
    UnknownLevel(usize),
}

/// 解析信号
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("internal parser error: {0}")]
    Internal(#[from] InternalError),
}

pub type PResult<T> = Result<T, ParseError>;

/// 恢复边界使用：只接住语法错误，内部错误继续向上传播
pub(crate) fn catch_syntax<T>(result: PResult<T>) -> Result<Result<T, SyntaxError>, InternalError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(ParseError::Syntax(err)) => Ok(Err(err)),
        Err(ParseError::Internal(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_diagnostics::DiagnosticKind;

    #[test]
    fn test_catch_syntax_only() {
        let syntax: PResult<()> = Err(SyntaxError::new("bad", Span::new(1, 1, 2)).into());
        assert!(matches!(catch_syntax(syntax), Ok(Err(_))));

        let internal: PResult<()> = Err(InternalError::MissingEof.into());
        assert_eq!(catch_syntax(internal), Err(InternalError::MissingEof));

        assert_eq!(catch_syntax(Ok(3)), Ok(Ok(3)));
    }

    #[test]
    fn test_to_diagnostic() {
        let err = SyntaxError::new("expected block of code", Span::new(2, 4, 5));
        let diag = err.to_diagnostic();
        assert_eq!(diag.kind, DiagnosticKind::Syntax);
        assert_eq!(diag.message, "expected block of code");
        assert_eq!(diag.span, Some(Span::new(2, 4, 5)));
    }
}
