//! Statement Parser
//!
//! 语句解析：程序、语句列表、块、if / while / for、return / break / continue、
//! import / export、变量声明与表达式语句。

use super::{resolver, Parser};
use crate::ast::{Metadata, NodeKind, Symbol};
use crate::cursor::TokenPattern;
use crate::error::{catch_syntax, PResult, SyntaxError};
use crate::scope::ScopeBridge;
use crate::token::{is_type_keyword, TokenKind, TokenSet};
use log::debug;

impl<'b, B: ScopeBridge> Parser<'b, B> {
    /// 程序根的语句：直到输入结束
    ///
    /// 顶层多余的 `}` 报告后跳过，继续收集后面的语句。
    pub(crate) fn program_statements(&mut self) -> PResult<Vec<Symbol>> {
        let mut statements = self.statement_list()?;
        while let Some(stray) = self.cursor.eat(TokenPattern::punct("}"), TokenSet::empty(), None) {
            let err = SyntaxError::new("unexpected '}' at top level", stray.span());
            self.report(err);
            statements.extend(self.statement_list()?);
        }
        Ok(statements)
    }

    /// 语句列表：直到 `}` 或输入结束
    ///
    /// 每条语句单独受保护：语法错误被记录后重新同步，继续解析后面的语句。
    pub(crate) fn statement_list(&mut self) -> PResult<Vec<Symbol>> {
        let mut statements = Vec::new();
        loop {
            self.skip_empty_statements();
            if self.cursor.at_end() || self.cursor.current().is_punct("}") {
                break;
            }
            match catch_syntax(self.statement())? {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.report(err);
                    self.resync_statement();
                }
            }
        }
        Ok(statements)
    }

    /// 空语句：换行与多余的分号
    fn skip_empty_statements(&mut self) {
        loop {
            let newline = TokenPattern::kind(TokenKind::Newline);
            if self.cursor.eat(newline, TokenSet::empty(), None).is_none()
                && self.eat_punct_here(";").is_none()
            {
                break;
            }
        }
    }

    /// 块: `{ statements }`
    pub(crate) fn block(&mut self) -> PResult<Symbol> {
        let Some(open) = self.eat_punct("{") else {
            return Err(self.unexpected("block of code").into());
        };
        let statements = self.statement_list()?;
        if self.eat_punct("}").is_none() {
            return Err(self.unexpected("'}' to close the block").into());
        }
        self.node(NodeKind::Block, None, statements, open.position)
    }

    /// 按当前 token (重新分类后) 分派
    pub(crate) fn statement(&mut self) -> PResult<Symbol> {
        let token = self.cursor.peek(0, resolver(&*self.bridge)).into_owned();
        if token.kind != TokenKind::Keyword {
            return self.expression_statement();
        }
        debug!("statement '{}' at {}", token.value, token.position);
        match token.value.as_str() {
            "if" => self.if_statement(),
            "while" => self.while_statement(),
            "for" => self.for_statement(),
            "return" => self.return_statement(),
            "break" => self.jump_statement(NodeKind::Break),
            "continue" => self.jump_statement(NodeKind::Continue),
            "import" => self.import_statement(),
            "export" => self.export_statement(),
            word if is_type_keyword(word) => self.declaration_statement(),
            _ => self.expression_statement(),
        }
    }

    fn expression_statement(&mut self) -> PResult<Symbol> {
        let expr = self.expression()?;
        self.terminator("expression")?;
        Ok(expr)
    }

    /// `if cond { } [else if ... | else { }]`
    ///
    /// 否定分支是另一个 if 时，由它自己负责终结符。
    fn if_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let condition = self.expression()?;
        let positive = self.block()?;
        let mut children = vec![condition, positive];

        if self.eat_keyword("else").is_some() {
            if self
                .cursor
                .expect(TokenPattern::keyword("if"), self.filler(), resolver(&*self.bridge))
                .is_some()
            {
                let filler = self.filler();
                self.cursor.skip(filler);
                children.push(self.if_statement()?);
                return self.node(NodeKind::If, None, children, keyword.position);
            }
            children.push(self.block()?);
        }

        self.terminator("if statement")?;
        self.node(NodeKind::If, None, children, keyword.position)
    }

    /// `while cond { }`
    fn while_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let condition = self.expression()?;
        let body = self.block()?;
        self.terminator("while loop")?;
        self.node(NodeKind::While, None, vec![condition, body], keyword.position)
    }

    /// `for x in xs { }` 或 `for k: v in m { }`
    fn for_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let mut children = vec![self.loop_binding()?];
        if self.eat_punct_here(":").is_some() {
            children.push(self.loop_binding()?);
        }
        if self.eat_keyword("in").is_none() {
            return Err(self.unexpected("'in'").into());
        }
        children.push(self.expression()?);
        children.push(self.block()?);
        self.terminator("for loop")?;
        self.node(NodeKind::For, None, children, keyword.position)
    }

    fn loop_binding(&mut self) -> PResult<Symbol> {
        let Some(name) = self.eat_name() else {
            return Err(self.unexpected("a loop variable name").into());
        };
        self.leaf(NodeKind::LoopBinding, &name)
    }

    /// `return [expr]`
    fn return_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let bare = self.cursor.at_end()
            || self.cursor.current().kind == TokenKind::Newline
            || self.cursor.current().is_punct(";")
            || self.cursor.current().is_punct("}");
        let children = if bare {
            Vec::new()
        } else {
            vec![self.expression()?]
        };
        self.terminator("return statement")?;
        self.node(NodeKind::Return, None, children, keyword.position)
    }

    /// `break` / `continue`
    fn jump_statement(&mut self, kind: NodeKind) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        self.terminator(&format!("'{}'", keyword.value))?;
        self.node(kind, None, Vec::new(), keyword.position)
    }

    /// `import a/b, ../c` 或 `import a, b from ./x`
    ///
    /// 只有当每条路径都是单个标识符时才允许 `from` 子句。
    fn import_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let mut children = vec![self.import_path()?];
        while self.eat_punct_here(",").is_some() {
            children.push(self.import_path()?);
        }

        let has_from = self
            .cursor
            .expect(
                TokenPattern::keyword("from"),
                TokenSet::empty(),
                resolver(&*self.bridge),
            )
            .is_some();
        if has_from {
            let bare = children.iter().all(|path| {
                path.children.len() == 1
                    && path.children[0]
                        .value
                        .as_deref()
                        .is_some_and(|segment| segment != "." && segment != "..")
            });
            if !bare {
                return Err(self
                    .error("a 'from' clause requires every imported name to be a single identifier")
                    .into());
            }
            let from = self.cursor.advance();
            let source = match self
                .cursor
                .eat(TokenPattern::kind(TokenKind::String), TokenSet::empty(), None)
            {
                Some(string) => self.leaf(NodeKind::Str, &string)?,
                None => self.import_path()?,
            };
            children.push(self.node(NodeKind::From, None, vec![source], from.position)?);
        }

        self.terminator("import statement")?;
        self.node(NodeKind::Import, None, children, keyword.position)
    }

    /// 斜杠分隔的路径：每段是标识符、`.` 或 `..`
    ///
    /// 路径必须与 `import`、`,` 或 `from` 在同一行开始。
    fn import_path(&mut self) -> PResult<Symbol> {
        let mut segments = Vec::new();
        loop {
            let name = TokenPattern::kind(TokenKind::Identifier);
            let dots = TokenPattern::one_of(TokenSet::PUNCTUATION, &[".", ".."]);
            let segment = self
                .cursor
                .eat(name, TokenSet::empty(), None)
                .or_else(|| self.cursor.eat(dots, TokenSet::empty(), None));
            let Some(segment) = segment else {
                return Err(self.unexpected("a module path").into());
            };
            segments.push(self.leaf(NodeKind::PathSegment, &segment)?);

            let slash = TokenPattern::exact(TokenKind::Multiplicative, "/");
            if self.cursor.eat(slash, TokenSet::empty(), None).is_none() {
                break;
            }
        }
        let position = segments[0].position;
        self.node(NodeKind::ImportPath, None, segments, position)
    }

    /// `export <declaration>`
    fn export_statement(&mut self) -> PResult<Symbol> {
        let keyword = self.cursor.advance();
        let next = self.lookahead();
        if next.kind != TokenKind::Keyword || !is_type_keyword(&next.value) {
            return Err(self.unexpected("a declaration after 'export'").into());
        }
        let declaration = self.declaration_statement()?;
        self.node(NodeKind::Export, None, vec![declaration], keyword.position)
    }

    fn declaration_statement(&mut self) -> PResult<Symbol> {
        let declaration = self.declaration()?;
        self.terminator("declaration")?;
        Ok(declaration)
    }

    /// `type a, b = expr, ...`
    ///
    /// 每个绑定都带着声明类型构造，语义协作方据此登记名字。
    pub(crate) fn declaration(&mut self) -> PResult<Symbol> {
        let ty = self.type_()?;
        let type_text = ty.type_text();
        let position = ty.position;
        let mut children = vec![ty];

        loop {
            let Some(name) = self.eat_name() else {
                return Err(self.unexpected("a variable name").into());
            };
            let mut binding = Symbol::leaf(NodeKind::Binding, &name).with_meta(Metadata {
                declared_type: type_text.clone(),
                ..Metadata::default()
            });
            let assign = TokenPattern::exact(TokenKind::Assign, "=");
            if self.cursor.eat(assign, TokenSet::empty(), None).is_some() {
                binding.children.push(self.expression()?);
            }
            children.push(self.finish(binding)?);

            if self.eat_punct_here(",").is_none() {
                break;
            }
        }

        self.node(NodeKind::Declaration, None, children, position)
    }
}
