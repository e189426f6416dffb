//! Literal Parser
//!
//! 数组、对象与函数字面量。数组和对象共用同一个元素循环与恢复策略。

use super::recovery::ListRecovery;
use super::Parser;
use crate::ast::{Metadata, NodeKind, Symbol};
use crate::cursor::{Terminator, TokenPattern, ValueMatch};
use crate::error::{catch_syntax, PResult};
use crate::scope::ScopeBridge;
use crate::token::TokenSet;

impl<'b, B: ScopeBridge> Parser<'b, B> {
    /// `[a, b\n c]`
    pub(crate) fn array_literal(&mut self) -> PResult<Symbol> {
        let open = self.cursor.advance();
        let elements = self.list_elements("]", "array elements", |p| p.expression())?;
        self.node(NodeKind::Array, None, elements, open.position)
    }

    /// `{key: value, "key": value, 1: value}`
    pub(crate) fn object_literal(&mut self) -> PResult<Symbol> {
        let open = self.cursor.advance();
        let properties = self.list_elements("}", "object properties", |p| p.property())?;
        self.node(NodeKind::Object, None, properties, open.position)
    }

    fn property(&mut self) -> PResult<Symbol> {
        let filler = self.filler();
        let key = self
            .eat_name()
            .or_else(|| {
                let keys = TokenPattern {
                    kinds: TokenSet::STRING | TokenSet::NUMBER,
                    value: ValueMatch::Any,
                };
                self.cursor.eat(keys, filler, None)
            });
        let Some(key) = key else {
            return Err(self.unexpected("a property name").into());
        };
        self.require_punct(":")?;
        let value = self.expression()?;
        self.node(NodeKind::Property, Some(key.value), vec![value], key.position)
    }

    /// 元素循环
    ///
    /// 元素之后必须是逗号、换行或闭合符。元素或终结符出错时记录诊断，
    /// 然后跳到下一个换行、逗号或闭合符；遇到输入结束则提前结束字面量。
    fn list_elements<F>(&mut self, closer: &str, context: &str, element: F) -> PResult<Vec<Symbol>>
    where
        F: Fn(&mut Self) -> PResult<Symbol>,
    {
        let mut items = Vec::new();
        loop {
            if self.eat_punct(closer).is_some() {
                return Ok(items);
            }

            let failure = match catch_syntax(element(self))? {
                Ok(item) => {
                    items.push(item);
                    if self.at_punct(closer) {
                        continue;
                    }
                    match self.cursor.automatic_terminator(Terminator::List, context) {
                        Ok(()) => continue,
                        Err(err) => err,
                    }
                }
                Err(err) => err,
            };

            self.report(failure);
            match self.recover_list(closer) {
                ListRecovery::Continue => continue,
                ListRecovery::Closed | ListRecovery::Exhausted => return Ok(items),
            }
        }
    }

    /// `take int a, string b { ... }` 或 `do { ... }`
    ///
    /// 参数与函数体在新的作用域中解析；出错时作用域同样会被弹出。
    pub(crate) fn function_literal(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let takes_parameters = keyword.value == "take";

        self.bridge.push_scope();
        let parsed = self.function_parts(takes_parameters);
        let snapshot = self.bridge.pop_scope();
        let (parameters, body) = parsed?;

        let node = Symbol::new(NodeKind::Function, keyword.position)
            .with_children(vec![parameters, body])
            .with_meta(Metadata {
                scope: Some(snapshot),
                ..Metadata::default()
            });
        self.finish(node)
    }

    fn function_parts(&mut self, takes_parameters: bool) -> PResult<(Symbol, Symbol)> {
        let position = self.lookahead().position;
        let mut parameters = Vec::new();

        if takes_parameters {
            loop {
                let ty = self.type_()?;
                let Some(name) = self.eat_name() else {
                    return Err(self.unexpected("a parameter name").into());
                };
                let declared_type = ty.type_text();
                let parameter = Symbol::leaf(NodeKind::Parameter, &name)
                    .with_children(vec![ty])
                    .with_meta(Metadata {
                        declared_type,
                        ..Metadata::default()
                    });
                parameters.push(self.finish(parameter)?);

                if self.eat_punct_here(",").is_none() {
                    break;
                }
            }
        }

        let parameters = self.node(NodeKind::Parameters, None, parameters, position)?;
        let body = self.block()?;
        Ok((parameters, body))
    }
}

