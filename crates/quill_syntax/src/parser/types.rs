//! Type Parser
//!
//! `int`, `struct Point`, 后缀指针 `int*`，以及参数化形式 `int(string, bool)`。

use super::{resolver, Parser};
use crate::ast::{NodeKind, Symbol};
use crate::cursor::TokenPattern;
use crate::error::PResult;
use crate::scope::ScopeBridge;
use crate::token::{TokenKind, TokenSet, TYPE_KEYWORDS};

impl<'b, B: ScopeBridge> Parser<'b, B> {
    pub(crate) fn type_(&mut self) -> PResult<Symbol> {
        let filler = self.filler();
        let pattern = TokenPattern::one_of(TokenSet::KEYWORD, TYPE_KEYWORDS);
        let Some(keyword) = self.cursor.eat(pattern, filler, resolver(&*self.bridge)) else {
            return Err(self.unexpected("a type").into());
        };

        let mut ty = if keyword.value == "struct" {
            let Some(name) = self.eat_name() else {
                return Err(self.unexpected("a struct name").into());
            };
            self.node(NodeKind::StructType, Some(name.value), Vec::new(), keyword.position)?
        } else {
            self.leaf(NodeKind::Type, &keyword)?
        };

        // 后缀修饰紧跟在类型之后，不跨行
        loop {
            let position = ty.position;
            let star = TokenPattern::exact(TokenKind::Multiplicative, "*");
            if self.cursor.eat(star, TokenSet::empty(), None).is_some() {
                ty = self.node(NodeKind::PointerType, None, vec![ty], position)?;
                continue;
            }
            if self.eat_punct_here("(").is_some() {
                let mut children = vec![ty];
                children.extend(self.type_list()?);
                ty = self.node(NodeKind::FunctionType, None, children, position)?;
                continue;
            }
            return Ok(ty);
        }
    }

    /// `(` 之后的类型列表，直到 `)`
    fn type_list(&mut self) -> PResult<Vec<Symbol>> {
        let mut types = Vec::new();
        if self.eat_punct(")").is_some() {
            return Ok(types);
        }
        loop {
            types.push(self.type_()?);
            if self.eat_punct(",").is_none() {
                break;
            }
        }
        self.require_punct(")")?;
        Ok(types)
    }
}
