//! Emitter - 诊断输出
//!
//! 有源码时借助 ariadne 渲染带标注的源码片段；没有源码 (或没有位置) 时
//! 输出单行摘要加 `-->` 位置与 `= note` 附注。

use crate::diagnostic::Diagnostic;
use ariadne::{Config, Label, Report, Source};
use colored::*;
use std::fmt::Write as _;

pub struct Emitter {
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 逐条输出到 stderr，诊断之间空一行
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            eprintln!("{}", self.render(diagnostic));
        }
    }

    pub fn emit_with_source(&self, diagnostic: &Diagnostic, file_name: &str, source: &str) {
        eprint!("{}", self.render_with_source(diagnostic, file_name, source));
    }

    /// 摘要格式
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let paint = |text: String, style: fn(&str) -> ColoredString| -> String {
            if self.use_colors {
                style(&text).to_string()
            } else {
                text
            }
        };

        let level = if self.use_colors {
            diagnostic.level.colored_name().to_string()
        } else {
            diagnostic.level.name().to_string()
        };
        let mut out = format!(
            "{} {}: {}\n",
            paint(diagnostic.kind.name().to_string(), |s| s.bright_black()),
            level,
            paint(diagnostic.message.clone(), |s| s.bold()),
        );

        if let Some(span) = &diagnostic.span {
            let _ = writeln!(out, "  {} {}", paint("-->".into(), |s| s.blue().bold()), span);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(
                out,
                "  {} {}",
                paint("=".into(), |s| s.blue().bold()),
                paint(format!("note: {}", note), |s| s.bright_black()),
            );
        }
        out
    }

    /// 借助 ariadne 渲染源码片段
    ///
    /// 没有位置信息的诊断 (或 ariadne 写出失败时) 退化为 [`Emitter::render`]。
    pub fn render_with_source(&self, diagnostic: &Diagnostic, file_name: &str, source: &str) -> String {
        let Some(span) = diagnostic.span else {
            return self.render(diagnostic);
        };
        let range = span.byte_range(source);
        let (kind, color) = diagnostic.level.report_style();

        let mut report = Report::build(kind, file_name, range.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(format!("{} {}", diagnostic.kind, diagnostic.message))
            .with_label(
                Label::new((file_name, range))
                    .with_message(&diagnostic.message)
                    .with_color(color),
            );
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }

        let mut out = Vec::new();
        match report
            .finish()
            .write((file_name, Source::from(source.to_string())), &mut out)
        {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => self.render(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_summary_lists_span_and_notes() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::syntax("expected block of code")
            .span(Span::at(1, 9, 1))
            .with_note("a block starts with '{'");

        let text = emitter.render(&diag);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "syntax error: expected block of code",
                "  --> 1:9-10",
                "  = note: a block starts with '{'",
            ]
        );
    }

    #[test]
    fn test_source_snippet_names_file() {
        let emitter = Emitter::without_colors();
        let source = "while x\n  y()\n";
        let diag = Diagnostic::syntax("expected block of code").span(Span::at(1, 8, 1));

        let text = emitter.render_with_source(&diag, "main.ql", source);
        assert!(text.contains("expected block of code"));
        assert!(text.contains("main.ql"));
    }

    #[test]
    fn test_positionless_diagnostic_falls_back_to_summary() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::lexical("unterminated string");
        assert_eq!(
            emitter.render_with_source(&diag, "main.ql", ""),
            "lexical error: unterminated string\n"
        );
    }
}
