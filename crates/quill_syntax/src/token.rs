//! Token Model
//!
//! 解析器消费的词法单元。词法器只产生粗粒度的类型标签，
//! 关键字并不在词法阶段确定：所有单词都以 `Identifier` 形式到达，
//! 由 [`crate::cursor::TokenCursor`] 在前瞻时根据作用域重新分类。

use bitflags::bitflags;
use quill_diagnostics::Span;
use std::fmt;

/// 保留关键字 (上下文关键字：被声明为变量后即失效)
pub const KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "in", "return", "break", "continue", "import", "export", "from",
    "take", "do", "new", "true", "false", "null", "this", "int", "float", "double", "char", "bool",
    "string", "void", "any", "struct",
];

/// 类型关键字
pub const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "bool", "string", "void", "any", "struct",
];

/// 常量关键字
pub const CONSTANT_KEYWORDS: &[&str] = &["true", "false", "null", "this"];

/// 一元前缀运算符
pub const UNARY_OPERATORS: &[&str] = &["!", "~", "+", "-", "*", "&"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word)
}

/// 源码位置 (行、列均从 1 开始)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// 词法单元的粗粒度类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// 仅由游标重新分类产生
    Keyword,
    String,
    Number,
    // --- 运算符族 (每个优先级一个) ---
    Assign,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Apply,
    Inherit,
    Unary,
    Increment,
    // --- 其它 ---
    Punctuation,
    Newline,
    Invalid,
    Eof,
}

impl TokenKind {
    /// 对应的位集合成员
    pub fn set(self) -> TokenSet {
        match self {
            Self::Identifier => TokenSet::IDENTIFIER,
            Self::Keyword => TokenSet::KEYWORD,
            Self::String => TokenSet::STRING,
            Self::Number => TokenSet::NUMBER,
            Self::Assign => TokenSet::ASSIGN,
            Self::LogicalOr => TokenSet::LOGICAL_OR,
            Self::LogicalXor => TokenSet::LOGICAL_XOR,
            Self::LogicalAnd => TokenSet::LOGICAL_AND,
            Self::BitOr => TokenSet::BIT_OR,
            Self::BitXor => TokenSet::BIT_XOR,
            Self::BitAnd => TokenSet::BIT_AND,
            Self::Equality => TokenSet::EQUALITY,
            Self::Relational => TokenSet::RELATIONAL,
            Self::Shift => TokenSet::SHIFT,
            Self::Additive => TokenSet::ADDITIVE,
            Self::Multiplicative => TokenSet::MULTIPLICATIVE,
            Self::Apply => TokenSet::APPLY,
            Self::Inherit => TokenSet::INHERIT,
            Self::Unary => TokenSet::UNARY,
            Self::Increment => TokenSet::INCREMENT,
            Self::Punctuation => TokenSet::PUNCTUATION,
            Self::Newline => TokenSet::NEWLINE,
            Self::Invalid => TokenSet::INVALID,
            Self::Eof => TokenSet::EOF,
        }
    }
}

bitflags! {
    /// TokenKind 的集合，用作游标的跳过集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenSet: u32 {
        const IDENTIFIER = 1 << 0;
        const KEYWORD = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const ASSIGN = 1 << 4;
        const LOGICAL_OR = 1 << 5;
        const LOGICAL_XOR = 1 << 6;
        const LOGICAL_AND = 1 << 7;
        const BIT_OR = 1 << 8;
        const BIT_XOR = 1 << 9;
        const BIT_AND = 1 << 10;
        const EQUALITY = 1 << 11;
        const RELATIONAL = 1 << 12;
        const SHIFT = 1 << 13;
        const ADDITIVE = 1 << 14;
        const MULTIPLICATIVE = 1 << 15;
        const APPLY = 1 << 16;
        const INHERIT = 1 << 17;
        const UNARY = 1 << 18;
        const INCREMENT = 1 << 19;
        const PUNCTUATION = 1 << 20;
        const NEWLINE = 1 << 21;
        const INVALID = 1 << 22;
        const EOF = 1 << 23;

        /// 默认的"填充"类别：换行
        const FILLER = Self::NEWLINE.bits();
        /// 可以作为一元前缀运算符出现的类别
        const PREFIX = Self::UNARY.bits()
            | Self::ADDITIVE.bits()
            | Self::MULTIPLICATIVE.bits()
            | Self::BIT_AND.bits();
    }
}

impl TokenSet {
    pub fn has(self, kind: TokenKind) -> bool {
        self.contains(kind.set())
    }
}

/// 词法单元 (不可变)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position: Position::new(line, column),
        }
    }

    /// 序列末尾的哨兵
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, column)
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    pub fn is_punct(&self, value: &str) -> bool {
        self.is(TokenKind::Punctuation, value)
    }

    pub fn is_keyword(&self, value: &str) -> bool {
        self.is(TokenKind::Keyword, value)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// 诊断区间：起点为本 token 位置，宽度为值的长度
    pub fn span(&self) -> Span {
        Span::at(
            self.position.line,
            self.position.column,
            self.value.chars().count(),
        )
    }

    /// 用于错误消息的描述
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Newline => "line break".to_string(),
            TokenKind::Keyword => format!("keyword '{}'", self.value),
            TokenKind::String => format!("string \"{}\"", self.value),
            _ => format!("'{}'", self.value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.value, self.position)
    }
}
