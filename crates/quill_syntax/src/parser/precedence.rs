//! Operator Precedence Engine
//!
//! 优先级链以数据形式给出：[`LEVELS`] 按结合强度由弱到强排列，
//! 每一层的操作数就是下一层。调整运算符优先级只需调整这张表的顺序。
//! 两个通用构造器 (左结合 / 右结合) 接收"下一层"的解析函数，
//! 产生当前层的解析结果，避免为每一层手写重复的折叠逻辑。

use super::Parser;
use crate::ast::{NodeKind, Symbol};
use crate::cursor::TokenPattern;
use crate::error::{InternalError, PResult};
use crate::scope::ScopeBridge;
use crate::token::{TokenKind, TokenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// 优先级链中的一层
#[derive(Debug, Clone, Copy)]
pub struct Level {
    pub assoc: Assoc,
    pub operator: TokenKind,
    pub kind: NodeKind,
}

impl Level {
    const fn left(operator: TokenKind, kind: NodeKind) -> Self {
        Self {
            assoc: Assoc::Left,
            operator,
            kind,
        }
    }

    const fn right(operator: TokenKind, kind: NodeKind) -> Self {
        Self {
            assoc: Assoc::Right,
            operator,
            kind,
        }
    }
}

/// 由弱到强；最后一层之后是一元 / new / 自增 / 成员与调用 / 项
pub const LEVELS: &[Level] = &[
    Level::right(TokenKind::Assign, NodeKind::Assignment),
    Level::left(TokenKind::LogicalOr, NodeKind::LogicalOr),
    Level::left(TokenKind::LogicalXor, NodeKind::LogicalXor),
    Level::left(TokenKind::LogicalAnd, NodeKind::LogicalAnd),
    Level::left(TokenKind::BitOr, NodeKind::BitwiseOr),
    Level::left(TokenKind::BitXor, NodeKind::BitwiseXor),
    Level::left(TokenKind::BitAnd, NodeKind::BitwiseAnd),
    Level::left(TokenKind::Equality, NodeKind::Equality),
    Level::left(TokenKind::Relational, NodeKind::Relational),
    Level::left(TokenKind::Shift, NodeKind::Shift),
    Level::left(TokenKind::Additive, NodeKind::Additive),
    Level::left(TokenKind::Multiplicative, NodeKind::Multiplicative),
    Level::left(TokenKind::Apply, NodeKind::Apply),
    Level::right(TokenKind::Inherit, NodeKind::Inheritance),
];

impl<'b, B: ScopeBridge> Parser<'b, B> {
    /// 完整表达式 (最弱的一层)
    pub(crate) fn expression(&mut self) -> PResult<Symbol> {
        self.level(0)
    }

    /// 解析优先级链中的第 `index` 层
    pub(crate) fn level(&mut self, index: usize) -> PResult<Symbol> {
        if index == LEVELS.len() {
            return self.unary();
        }
        let level = *LEVELS.get(index).ok_or(InternalError::UnknownLevel(index))?;
        match level.assoc {
            Assoc::Left => {
                self.left_associative(|p| p.level(index + 1), level.operator, level.kind)
            }
            Assoc::Right => self.right_associative(
                |p| p.level(index + 1),
                |p| p.level(index),
                level.operator,
                level.kind,
            ),
        }
    }

    /// 左结合：`a - b - c` => `(- (- a b) c)`
    pub(crate) fn left_associative<F>(
        &mut self,
        operand: F,
        operator: TokenKind,
        kind: NodeKind,
    ) -> PResult<Symbol>
    where
        F: Fn(&mut Self) -> PResult<Symbol>,
    {
        let mut left = operand(self)?;
        while let Some(op) = self.eat_operator(operator) {
            let right = operand(self)?;
            let position = left.position;
            left = self.node(kind, Some(op.value), vec![left, right], position)?;
        }
        Ok(left)
    }

    /// 右结合：`a = b = c` => `(= a (= b c))`
    ///
    /// 右侧在同一层递归解析。
    pub(crate) fn right_associative<F, G>(
        &mut self,
        operand: F,
        same_level: G,
        operator: TokenKind,
        kind: NodeKind,
    ) -> PResult<Symbol>
    where
        F: Fn(&mut Self) -> PResult<Symbol>,
        G: Fn(&mut Self) -> PResult<Symbol>,
    {
        let left = operand(self)?;
        let Some(op) = self.eat_operator(operator) else {
            return Ok(left);
        };
        let right = same_level(self)?;
        let position = left.position;
        self.node(kind, Some(op.value), vec![left, right], position)
    }

    /// 二元运算符不跨行：换行结束表达式
    fn eat_operator(&mut self, operator: TokenKind) -> Option<crate::token::Token> {
        self.cursor
            .eat(TokenPattern::kind(operator), TokenSet::empty(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_distinct() {
        for (i, a) in LEVELS.iter().enumerate() {
            for b in &LEVELS[i + 1..] {
                assert_ne!(a.operator, b.operator);
                assert_ne!(a.kind, b.kind);
            }
        }
    }

    #[test]
    fn test_assignment_is_weakest() {
        assert_eq!(LEVELS[0].kind, NodeKind::Assignment);
        assert_eq!(LEVELS[0].assoc, Assoc::Right);
        assert!(LEVELS.iter().all(|level| level.kind.is_binary()));
    }
}
