//! Span - 源码位置信息
//!
//! 表示源代码中某一行上的列范围。行号与列号均从 1 开始。

use std::fmt;

/// 源码位置范围 (单行, 列区间 `[start, end)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// 创建一个新的 Span
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// 从起始列与宽度创建
    pub fn at(line: usize, column: usize, width: usize) -> Self {
        Self::new(line, column, column + width)
    }

    /// 获取长度
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// 换算为源码中的字节区间 (供 ariadne 使用)
    ///
    /// 超出源码范围的位置会被截断到文件末尾。
    pub fn byte_range(&self, source: &str) -> std::ops::Range<usize> {
        let mut offset = 0;
        for (index, line) in source.split_inclusive('\n').enumerate() {
            if index + 1 == self.line {
                let column_offset = |column: usize| {
                    line.char_indices()
                        .nth(column.saturating_sub(1))
                        .map(|(i, _)| i)
                        .unwrap_or(line.len())
                };
                let start = offset + column_offset(self.start);
                let end = (offset + column_offset(self.end)).max(start);
                return start..end;
            }
            offset += line.len();
        }
        source.len()..source.len()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::at(3, 10, 4);
        assert_eq!(span.line, 3);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 14);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(1, 5, 5);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_byte_range() {
        let source = "int a = 1\nfoo(bar)\n";
        assert_eq!(Span::at(2, 5, 3).byte_range(source), 14..17);
        assert_eq!(&source[Span::at(2, 5, 3).byte_range(source)], "bar");
        // 超出范围
        assert_eq!(Span::at(9, 1, 1).byte_range(source), source.len()..source.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(4, 2, 7).to_string(), "4:2-7");
    }
}
