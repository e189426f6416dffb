//! Token Cursor
//!
//! token 序列上的位置视图：带上下文重新分类的前瞻、
//! 不前进的 `expect` 与会前进的 `eat`、可配置的填充 token 跳过，
//! 以及可省略终结符 (自动分号 / 逗号) 的统一规则。
//!
//! 所有试探都遵循"快照、尝试、失败则恢复"，失败的探测不会留下任何位置变化。

use crate::error::{InternalError, SyntaxError};
use crate::scope::NameResolver;
use crate::token::{is_keyword, Token, TokenKind, TokenSet};
use std::borrow::Cow;

/// token 值的匹配方式
#[derive(Debug, Clone, Copy)]
pub enum ValueMatch<'a> {
    Any,
    One(&'a str),
    OneOf(&'a [&'a str]),
}

/// 要寻找的 token: 类别集合 + 值
#[derive(Debug, Clone, Copy)]
pub struct TokenPattern<'a> {
    pub kinds: TokenSet,
    pub value: ValueMatch<'a>,
}

impl<'a> TokenPattern<'a> {
    /// 任意值的某一类别
    pub fn kind(kind: TokenKind) -> Self {
        Self {
            kinds: kind.set(),
            value: ValueMatch::Any,
        }
    }

    pub fn exact(kind: TokenKind, value: &'a str) -> Self {
        Self {
            kinds: kind.set(),
            value: ValueMatch::One(value),
        }
    }

    pub fn punct(value: &'a str) -> Self {
        Self::exact(TokenKind::Punctuation, value)
    }

    pub fn keyword(value: &'a str) -> Self {
        Self::exact(TokenKind::Keyword, value)
    }

    pub fn one_of(kinds: TokenSet, values: &'a [&'a str]) -> Self {
        Self {
            kinds,
            value: ValueMatch::OneOf(values),
        }
    }

    pub fn matches(&self, token: &Token) -> bool {
        if !self.kinds.has(token.kind) {
            return false;
        }
        match self.value {
            ValueMatch::Any => true,
            ValueMatch::One(value) => token.value == value,
            ValueMatch::OneOf(values) => values.contains(&token.value.as_str()),
        }
    }
}

/// 可省略终结符的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `;` / 换行 / `}` / 输入结束
    Statement,
    /// `,` / 换行
    List,
}

/// 游标位置快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// token 序列上的游标
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    /// 序列必须以 Eof 哨兵结尾
    pub fn new(tokens: Vec<Token>) -> Result<Self, InternalError> {
        match tokens.last() {
            Some(last) if last.is_eof() => Ok(Self {
                tokens,
                position: 0,
            }),
            _ => Err(InternalError::MissingEof),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// 当前原始 token (不重新分类)
    pub fn current(&self) -> &Token {
        self.raw(0)
    }

    fn raw(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + offset).min(last)]
    }

    pub fn at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// 前进一个位置，不会越过 Eof
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.position += 1;
        }
        token
    }

    /// 查看 `position + offset` 处的 token，不前进
    ///
    /// 提供 `names` 时启用重新分类：拼写为保留字、且未在任何外层作用域中
    /// 声明过的标识符，会被合成为同位置的 `Keyword` token。
    pub fn peek(&self, offset: usize, names: Option<&dyn NameResolver>) -> Cow<'_, Token> {
        let token = self.raw(offset);
        match names {
            Some(names)
                if token.kind == TokenKind::Identifier
                    && is_keyword(&token.value)
                    && !names.is_bound(&token.value) =>
            {
                Cow::Owned(Token {
                    kind: TokenKind::Keyword,
                    value: token.value.clone(),
                    position: token.position,
                })
            }
            _ => Cow::Borrowed(token),
        }
    }

    /// 不前进地测试：跳过 `skip` 中的 token 后，是否遇到 `pattern`
    pub fn expect(
        &self,
        pattern: TokenPattern<'_>,
        skip: TokenSet,
        names: Option<&dyn NameResolver>,
    ) -> Option<Cow<'_, Token>> {
        let mut offset = 0;
        loop {
            let token = self.peek(offset, names);
            if pattern.matches(&token) {
                return Some(token);
            }
            if token.is_eof() || !skip.has(token.kind) {
                return None;
            }
            offset += 1;
        }
    }

    /// 前进式的 `expect`
    ///
    /// 跳过只在 token 既不匹配目标、也不是 Eof 时进行；
    /// 失败时恢复到跳过之前的位置。
    pub fn eat(
        &mut self,
        pattern: TokenPattern<'_>,
        skip: TokenSet,
        names: Option<&dyn NameResolver>,
    ) -> Option<Token> {
        let start = self.checkpoint();
        loop {
            let token = self.peek(0, names);
            if pattern.matches(&token) {
                let token = token.into_owned();
                self.position += 1;
                return Some(token);
            }
            if token.is_eof() || !skip.has(token.kind) {
                self.rewind(start);
                return None;
            }
            self.position += 1;
        }
    }

    /// 跳过 `skip` 中的 token (不越过 Eof)
    pub fn skip(&mut self, skip: TokenSet) {
        while !self.at_end() && skip.has(self.current().kind) {
            self.position += 1;
        }
    }

    /// 以当前 token 为位置构造语法错误
    pub fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(message, self.current().span())
    }

    /// 可省略终结符
    pub fn automatic_terminator(
        &mut self,
        terminator: Terminator,
        context: &str,
    ) -> Result<(), SyntaxError> {
        let none = TokenSet::empty();
        match terminator {
            Terminator::Statement => {
                let found = self.eat(TokenPattern::punct(";"), none, None).is_some()
                    || self
                        .expect(TokenPattern::kind(TokenKind::Newline), none, None)
                        .is_some()
                    || self.expect(TokenPattern::punct("}"), none, None).is_some()
                    || self.at_end();
                if found {
                    Ok(())
                } else {
                    Err(self.error(format!(
                        "expected ';' or a line break after {}, found {}",
                        context,
                        self.current().describe()
                    )))
                }
            }
            Terminator::List => {
                let found = self
                    .eat(TokenPattern::punct(","), TokenSet::FILLER, None)
                    .is_some()
                    || self
                        .expect(TokenPattern::kind(TokenKind::Newline), none, None)
                        .is_some();
                if found {
                    Ok(())
                } else {
                    Err(self.error(format!(
                        "expected ',' or a line break between {}, found {}",
                        context,
                        self.current().describe()
                    )))
                }
            }
        }
    }
}
