//! DiagnosticLevel - 诊断级别
//!
//! 前端问题都是错误；警告只用于提示有诊断因数量上限而未被记录。

use ariadne::{Color, ReportKind};
use colored::*;
use std::fmt;

/// 诊断级别，按严重程度从高到低排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 输入不合法，前端输出不可用
    Error,
    /// 不影响结果的提示
    Warning,
}

impl DiagnosticLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    pub fn colored_name(&self) -> ColoredString {
        let name = self.name();
        match self {
            Self::Error => name.red().bold(),
            Self::Warning => name.yellow().bold(),
        }
    }

    /// ariadne 报告的种类与标注颜色
    pub fn report_style(&self) -> (ReportKind<'static>, Color) {
        match self {
            Self::Error => (ReportKind::Error, Color::Red),
            Self::Warning => (ReportKind::Warning, Color::Yellow),
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
