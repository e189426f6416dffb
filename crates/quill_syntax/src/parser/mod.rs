//! Parser Module
//!
//! 手写递归下降解析器。模块划分：
//!
//! - `precedence` - 运算符优先级链
//! - `stmt`       - 程序、语句列表与各类语句
//! - `expr`       - 一元 / 成员与调用链 / 项
//! - `literal`    - 数组、对象、函数字面量
//! - `types`      - 类型文法
//! - `recovery`   - 各恢复边界的重新同步策略

pub mod precedence;

mod expr;
mod literal;
mod recovery;
mod stmt;
mod types;

#[cfg(test)]
mod tests;

use crate::ast::{Metadata, NodeKind, Symbol};
use crate::cursor::{Terminator, TokenCursor, TokenPattern};
use crate::error::{InternalError, PResult, SyntaxError};
use crate::error::ParseError;
use crate::scope::{NameResolver, ScopeBridge};
use crate::token::{Position, Token, TokenKind, TokenSet};
use log::{debug, info};
use quill_diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use std::collections::BTreeSet;

/// 解析器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// 最多记录的语法诊断数量 (`None` 表示不限)
    ///
    /// 超出上限的错误只计数，解析结束时以一条警告汇总。
    pub max_diagnostics: Option<usize>,
    /// 查找 token 时默认跳过的填充类别
    pub filler: TokenSet,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_diagnostics: None,
            filler: TokenSet::FILLER,
        }
    }
}

impl ParserOptions {
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = Some(max);
        self
    }

    pub fn with_filler(mut self, filler: TokenSet) -> Self {
        self.filler = filler;
        self
    }
}

/// 一次解析的结果
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// 根节点 (`statement_list`)；只有在根节点本身无法构造时为 `None`
    pub root: Option<Symbol>,
    /// 词法 + 语法诊断，按产生顺序
    pub diagnostics: Vec<Diagnostic>,
    /// 模块导出的名字
    pub exports: BTreeSet<String>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }
}

/// 主入口：解析整个程序
///
/// 只有解析器内部缺陷会返回 `Err`；语法错误都记录在结果的诊断列表中。
pub fn parse<B: ScopeBridge>(
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    bridge: &mut B,
) -> Result<ParseResult, InternalError> {
    Parser::new(tokens, diagnostics, bridge)?.parse_program()
}

/// 把语义协作方作为游标重新分类时使用的名字解析器
pub(crate) fn resolver<B: NameResolver>(bridge: &B) -> Option<&dyn NameResolver> {
    Some(bridge)
}

/// 递归下降解析器
pub struct Parser<'b, B: ScopeBridge> {
    pub(crate) cursor: TokenCursor,
    pub(crate) bridge: &'b mut B,
    sink: DiagnosticSink,
    options: ParserOptions,
    recorded: usize,
    suppressed: usize,
}

impl<'b, B: ScopeBridge> Parser<'b, B> {
    pub fn new(
        tokens: Vec<Token>,
        diagnostics: Vec<Diagnostic>,
        bridge: &'b mut B,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            cursor: TokenCursor::new(tokens)?,
            bridge,
            sink: DiagnosticSink::with_diagnostics(diagnostics),
            options: ParserOptions::default(),
            recorded: 0,
            suppressed: 0,
        })
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// 解析程序：收集语句直到输入结束
    ///
    /// 程序作用域无论成功与否都会被弹出，快照挂在根节点上。
    pub fn parse_program(mut self) -> Result<ParseResult, InternalError> {
        info!("parsing program");
        let start = self.cursor.current().position;

        self.bridge.push_scope();
        let statements = self.program_statements();
        let snapshot = self.bridge.pop_scope();

        let root = match statements {
            Ok(statements) => {
                let meta = Metadata {
                    scope: Some(snapshot),
                    ..Metadata::default()
                };
                let node = Symbol::new(NodeKind::StatementList, start)
                    .with_children(statements)
                    .with_meta(meta);
                match self.bridge.build(node) {
                    Ok(root) => Some(root),
                    Err(rejected) => {
                        let err = self.cursor.error(rejected.message);
                        self.report(err);
                        None
                    }
                }
            }
            Err(ParseError::Syntax(err)) => {
                self.report(err);
                None
            }
            Err(ParseError::Internal(err)) => return Err(err),
        };

        if self.suppressed > 0 {
            self.sink.add(Diagnostic::warning(
                DiagnosticKind::Syntax,
                format!("{} further syntax error(s) not reported", self.suppressed),
            ));
        }
        info!(
            "parsed program with {} diagnostic(s)",
            self.sink.len()
        );
        Ok(ParseResult {
            root,
            diagnostics: self.sink.into_diagnostics(),
            exports: self.bridge.exports(),
        })
    }

    // ===== 节点构造 =====

    /// 所有节点都经过语义协作方构造；被拒绝时在当前位置报告语法错误
    pub(crate) fn node(
        &mut self,
        kind: NodeKind,
        value: Option<String>,
        children: Vec<Symbol>,
        position: Position,
    ) -> PResult<Symbol> {
        let mut node = Symbol::new(kind, position).with_children(children);
        node.value = value;
        self.finish(node)
    }

    pub(crate) fn leaf(&mut self, kind: NodeKind, token: &Token) -> PResult<Symbol> {
        self.finish(Symbol::leaf(kind, token))
    }

    pub(crate) fn finish(&mut self, node: Symbol) -> PResult<Symbol> {
        self.bridge
            .build(node)
            .map_err(|rejected| self.cursor.error(rejected.message).into())
    }

    // ===== 诊断 =====

    pub(crate) fn report(&mut self, err: SyntaxError) {
        debug!("syntax error at {}: {}", err.span, err.message);
        if let Some(max) = self.options.max_diagnostics {
            if self.recorded >= max {
                self.suppressed += 1;
                return;
            }
        }
        self.recorded += 1;
        self.sink.add(err.to_diagnostic());
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.cursor.error(message)
    }

    /// "expected X, found Y"
    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = self.cursor.current().describe();
        self.error(format!("expected {}, found {}", expected, found))
    }

    // ===== token 辅助 =====

    pub(crate) fn filler(&self) -> TokenSet {
        self.options.filler
    }

    /// 重新分类后的当前 token (跳过填充)
    pub(crate) fn lookahead(&self) -> Token {
        let mut offset = 0;
        loop {
            let token = self.cursor.peek(offset, resolver(&*self.bridge));
            if token.is_eof() || !self.filler().has(token.kind) {
                return token.into_owned();
            }
            offset += 1;
        }
    }

    pub(crate) fn eat_punct(&mut self, value: &str) -> Option<Token> {
        let filler = self.filler();
        self.cursor.eat(TokenPattern::punct(value), filler, None)
    }

    /// 不跳过换行的 `eat_punct`
    pub(crate) fn eat_punct_here(&mut self, value: &str) -> Option<Token> {
        self.cursor
            .eat(TokenPattern::punct(value), TokenSet::empty(), None)
    }

    pub(crate) fn at_punct(&self, value: &str) -> bool {
        self.cursor
            .expect(TokenPattern::punct(value), self.filler(), None)
            .is_some()
    }

    pub(crate) fn eat_keyword(&mut self, value: &str) -> Option<Token> {
        let filler = self.filler();
        self.cursor
            .eat(TokenPattern::keyword(value), filler, resolver(&*self.bridge))
    }

    /// 读取一个未经重新分类的标识符 (声明名、成员名、属性名等)
    pub(crate) fn eat_name(&mut self) -> Option<Token> {
        let filler = self.filler();
        self.cursor
            .eat(TokenPattern::kind(TokenKind::Identifier), filler, None)
    }

    pub(crate) fn require_punct(&mut self, value: &str) -> PResult<Token> {
        match self.eat_punct(value) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(&format!("'{}'", value)).into()),
        }
    }

    pub(crate) fn terminator(&mut self, context: &str) -> PResult<()> {
        self.cursor
            .automatic_terminator(Terminator::Statement, context)?;
        Ok(())
    }
}
