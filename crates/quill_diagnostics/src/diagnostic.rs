//! Diagnostic - 诊断信息
//!
//! 诊断按产生阶段 ([`DiagnosticKind`]) 与严重程度 ([`DiagnosticLevel`]) 分类，
//! 构造采用链式 builder 写法。

use crate::level::DiagnosticLevel;
use crate::span::Span;
use std::fmt;

/// 诊断来源阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// 词法阶段 (lexer)
    Lexical,
    /// 语法阶段 (parser)，包括作用域协作方拒绝的节点
    Syntax,
    /// 读取源文件失败
    Io,
    /// 前端内部缺陷
    Internal,
}

impl DiagnosticKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Io => "io",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 一条前端诊断
///
/// 位置是可选的：缺少 EOF 之类的内部一致性问题没有对应的源码位置。
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            kind,
            level,
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, DiagnosticLevel::Error, message)
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, DiagnosticLevel::Warning, message)
    }

    pub fn lexical(message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Lexical, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Syntax, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 行号，没有位置信息时为 0
    pub fn line(&self) -> usize {
        self.span.map_or(0, |s| s.line)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.level, self.message)?;
        if let Some(span) = &self.span {
            write!(f, " at {}", span)?;
        }
        Ok(())
    }
}
