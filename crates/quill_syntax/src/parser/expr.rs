//! Unary, Member and Term Parser
//!
//! 优先级链之后的几层：一元前缀、`new`、前后缀自增、
//! 成员访问与调用链，以及最底层的项。

use super::{resolver, Parser};
use crate::ast::{NodeKind, Symbol};
use crate::cursor::TokenPattern;
use crate::error::{ParseError, PResult};
use crate::scope::ScopeBridge;
use crate::token::{is_type_keyword, TokenKind, TokenSet, CONSTANT_KEYWORDS, UNARY_OPERATORS};

impl<'b, B: ScopeBridge> Parser<'b, B> {
    /// 一元层
    ///
    /// 前缀自增优先于后缀自增，两者不会同时出现在同一个操作数上。
    pub(crate) fn unary(&mut self) -> PResult<Symbol> {
        let filler = self.filler();

        let prefix = TokenPattern::one_of(TokenSet::PREFIX, UNARY_OPERATORS);
        if let Some(op) = self.cursor.eat(prefix, filler, None) {
            let operand = self.unary()?;
            return self.node(NodeKind::Unary, Some(op.value), vec![operand], op.position);
        }

        let increment = TokenPattern::kind(TokenKind::Increment);
        if let Some(op) = self.cursor.eat(increment, filler, None) {
            let operand = self.member_call()?;
            return self.node(
                NodeKind::PreIncrement,
                Some(op.value),
                vec![operand],
                op.position,
            );
        }

        if let Some(new) = self.eat_keyword("new") {
            let operand = self.member_call()?;
            let prototype = self.node(NodeKind::Object, None, Vec::new(), new.position)?;
            return self.node(
                NodeKind::Inheritance,
                Some("<:".to_string()),
                vec![prototype, operand],
                new.position,
            );
        }

        let operand = self.member_call()?;
        match self.cursor.eat(increment, TokenSet::empty(), None) {
            Some(op) => {
                let position = operand.position;
                self.node(NodeKind::PostIncrement, Some(op.value), vec![operand], position)
            }
            None => Ok(operand),
        }
    }

    /// 成员访问与调用链: `a.b`, `a::b`, `a[i]`, `f(x)`
    ///
    /// `.` 后的名字按原样读取；`::` 后的名字经过重新分类，
    /// 所以未被遮蔽的保留字不能出现在 `::` 之后。
    pub(crate) fn member_call(&mut self) -> PResult<Symbol> {
        let mut object = self.term()?;
        loop {
            let filler = self.filler();
            let position = object.position;

            if self.cursor.eat(TokenPattern::punct("."), filler, None).is_some() {
                let Some(name) = self.eat_name() else {
                    return Err(self.unexpected("a member name after '.'").into());
                };
                let name = self.leaf(NodeKind::Name, &name)?;
                object = self.node(NodeKind::Member, None, vec![object, name], position)?;
                continue;
            }

            if self.cursor.eat(TokenPattern::punct("::"), filler, None).is_some() {
                let name = self.cursor.eat(
                    TokenPattern::kind(TokenKind::Identifier),
                    filler,
                    resolver(&*self.bridge),
                );
                let Some(name) = name else {
                    return Err(self.unexpected("a member name after '::'").into());
                };
                let name = self.leaf(NodeKind::Name, &name)?;
                object = self.node(NodeKind::PrototypeMember, None, vec![object, name], position)?;
                continue;
            }

            if self.eat_punct_here("[").is_some() {
                let index = self.expression()?;
                self.require_punct("]")?;
                object = self.node(NodeKind::ComputedMember, None, vec![object, index], position)?;
                continue;
            }

            if self.eat_punct_here("(").is_some() {
                let mut children = vec![object];
                if self.eat_punct(")").is_none() {
                    children.push(self.expression()?);
                    self.require_punct(")")?;
                }
                object = self.node(NodeKind::Call, None, children, position)?;
                continue;
            }

            return Ok(object);
        }
    }

    /// 项
    ///
    /// 失败时游标回到项的第一个 token (已跳过前导换行)，
    /// 恢复从出错的 token 开始。
    pub(crate) fn term(&mut self) -> PResult<Symbol> {
        let filler = self.filler();
        self.cursor.skip(filler);
        let start = self.cursor.checkpoint();

        match self.term_at_cursor() {
            Err(ParseError::Syntax(err)) => {
                self.cursor.rewind(start);
                Err(err.into())
            }
            result => result,
        }
    }

    fn term_at_cursor(&mut self) -> PResult<Symbol> {
        let token = self.cursor.peek(0, resolver(&*self.bridge)).into_owned();
        match token.kind {
            TokenKind::String => {
                self.cursor.advance();
                self.leaf(NodeKind::Str, &token)
            }
            TokenKind::Number => {
                self.cursor.advance();
                self.leaf(NodeKind::Number, &token)
            }
            TokenKind::Identifier => {
                self.cursor.advance();
                self.leaf(NodeKind::Variable, &token)
            }
            TokenKind::Keyword if CONSTANT_KEYWORDS.contains(&token.value.as_str()) => {
                self.cursor.advance();
                self.leaf(NodeKind::Constant, &token)
            }
            TokenKind::Keyword if token.value == "take" || token.value == "do" => {
                self.function_literal()
            }
            TokenKind::Punctuation if token.value == "(" => self.parenthesized(),
            TokenKind::Punctuation if token.value == "[" => self.array_literal(),
            TokenKind::Punctuation if token.value == "{" => self.object_literal(),
            TokenKind::Invalid => Err(self
                .error(format!("unexpected character '{}'", token.value))
                .into()),
            _ => Err(self.unexpected("an expression").into()),
        }
    }

    /// `(type) operand` 或 `(expression)`
    fn parenthesized(&mut self) -> PResult<Symbol> {
        let open = self.cursor.advance();
        let next = self.lookahead();
        if next.kind == TokenKind::Keyword && is_type_keyword(&next.value) {
            let ty = self.type_()?;
            self.require_punct(")")?;
            let operand = self.unary()?;
            return self.node(NodeKind::Cast, None, vec![ty, operand], open.position);
        }

        let inner = self.expression()?;
        self.require_punct(")")?;
        Ok(inner)
    }
}
