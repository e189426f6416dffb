//! Reference Lexer
//!
//! 基于 logos 的参考词法器，产生解析器需要的 token 序列。
//! 单词一律输出为 `Identifier`，换行输出为 `Newline`，
//! 无法识别的字符输出为 `Invalid` 并记录一条词法诊断。

use crate::token::{Token, TokenKind};
use logos::Logos;
use quill_diagnostics::{Diagnostic, Span};

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\f]+")]
enum Raw {
    #[token("\n")]
    Newline,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    // --- 运算符族 ---
    #[token("=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    Assign,
    #[token("||")]
    LogicalOr,
    #[token("^^")]
    LogicalXor,
    #[token("&&")]
    LogicalAnd,
    #[token("|")]
    BitOr,
    #[token("^")]
    BitXor,
    #[token("&")]
    BitAnd,
    #[token("==")]
    #[token("!=")]
    Equality,
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    Relational,
    #[token("<<")]
    #[token(">>")]
    Shift,
    #[token("+")]
    #[token("-")]
    Additive,
    #[token("*")]
    #[token("/")]
    #[token("%")]
    Multiplicative,
    #[token("|>")]
    Apply,
    #[token("<:")]
    Inherit,
    #[token("!")]
    #[token("~")]
    Unary,
    #[token("++")]
    #[token("--")]
    Increment,

    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    #[token("::")]
    #[token(".")]
    #[token("..")]
    Punctuation,

    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
}

impl Raw {
    fn kind(self) -> TokenKind {
        match self {
            Raw::Newline => TokenKind::Newline,
            Raw::Word => TokenKind::Identifier,
            Raw::Number => TokenKind::Number,
            Raw::String => TokenKind::String,
            Raw::Assign => TokenKind::Assign,
            Raw::LogicalOr => TokenKind::LogicalOr,
            Raw::LogicalXor => TokenKind::LogicalXor,
            Raw::LogicalAnd => TokenKind::LogicalAnd,
            Raw::BitOr => TokenKind::BitOr,
            Raw::BitXor => TokenKind::BitXor,
            Raw::BitAnd => TokenKind::BitAnd,
            Raw::Equality => TokenKind::Equality,
            Raw::Relational => TokenKind::Relational,
            Raw::Shift => TokenKind::Shift,
            Raw::Additive => TokenKind::Additive,
            Raw::Multiplicative => TokenKind::Multiplicative,
            Raw::Apply => TokenKind::Apply,
            Raw::Inherit => TokenKind::Inherit,
            Raw::Unary => TokenKind::Unary,
            Raw::Increment => TokenKind::Increment,
            Raw::Punctuation => TokenKind::Punctuation,
            // 被 logos::skip 跳过，不会出现
            Raw::Comment => TokenKind::Invalid,
        }
    }
}

/// 词法分析结果
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// 以 `Eof` 结尾的 token 序列
    pub tokens: Vec<Token>,
    /// 词法阶段的诊断
    pub diagnostics: Vec<Diagnostic>,
}

/// 将源码切分为 token 序列
pub fn tokenize(source: &str) -> Lexed {
    let mut lexed = Lexed::default();
    let mut line = 1;
    let mut line_start = 0;
    let mut lexer = Raw::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let slice = lexer.slice();
        let column = source[line_start..range.start].chars().count() + 1;

        match result {
            Ok(Raw::Newline) => {
                lexed
                    .tokens
                    .push(Token::new(TokenKind::Newline, "\n", line, column));
                line += 1;
                line_start = range.end;
            }
            Ok(Raw::String) => {
                // 去掉引号，转义序列原样保留
                let inner = &slice[1..slice.len() - 1];
                lexed
                    .tokens
                    .push(Token::new(TokenKind::String, inner, line, column));
            }
            Ok(raw) => {
                lexed.tokens.push(Token::new(raw.kind(), slice, line, column));
            }
            Err(()) => {
                let token = Token::new(TokenKind::Invalid, slice, line, column);
                lexed.diagnostics.push(
                    Diagnostic::lexical(format!("unexpected character '{}'", slice))
                        .span(Span::at(line, column, slice.chars().count())),
                );
                lexed.tokens.push(token);
            }
        }
    }

    let column = source[line_start..].chars().count() + 1;
    lexed.tokens.push(Token::eof(line, column));
    lexed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_basic() {
        let lexed = tokenize("int a = 10 + 20;");
        let values: Vec<&str> = lexed.tokens.iter().map(|t| t.value.as_str()).collect();

        assert_eq!(values, vec!["int", "a", "=", "10", "+", "20", ";", ""]);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(lexed.tokens[2].kind, TokenKind::Assign);
        assert_eq!(lexed.tokens[4].kind, TokenKind::Additive);
        assert!(lexed.tokens.last().unwrap().is_eof());
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_operator_families() {
        assert_eq!(
            kinds("a <: b |> c << d <= e"),
            vec![
                TokenKind::Identifier,
                TokenKind::Inherit,
                TokenKind::Identifier,
                TokenKind::Apply,
                TokenKind::Identifier,
                TokenKind::Shift,
                TokenKind::Identifier,
                TokenKind::Relational,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("x++ ^^ y :: z .. ."),
            vec![
                TokenKind::Identifier,
                TokenKind::Increment,
                TokenKind::LogicalXor,
                TokenKind::Identifier,
                TokenKind::Punctuation,
                TokenKind::Identifier,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_and_newlines() {
        let lexed = tokenize("a = 1\n  b // note\n\"s\"");
        let b = &lexed.tokens[4];
        assert_eq!(b.value, "b");
        assert_eq!((b.position.line, b.position.column), (2, 3));
        assert_eq!(lexed.tokens[3].kind, TokenKind::Newline);

        let s = &lexed.tokens[6];
        assert_eq!(s.kind, TokenKind::String);
        assert_eq!(s.value, "s");
        assert_eq!((s.position.line, s.position.column), (3, 1));
    }

    #[test]
    fn test_invalid_characters() {
        let lexed = tokenize("[1, @@, 2]");
        let invalid: Vec<&Token> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Invalid)
            .collect();
        assert!(!invalid.is_empty());
        assert_eq!(lexed.diagnostics.len(), invalid.len());
        assert_eq!(lexed.diagnostics[0].span, Some(Span::new(1, 5, 6)));
    }

    #[test]
    fn test_numbers() {
        let lexed = tokenize("3.14 0xFF 7");
        let values: Vec<&str> = lexed.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["3.14", "0xFF", "7", ""]);
    }
}
