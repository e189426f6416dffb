use super::*;
use crate::ast::FreeVariables;
use crate::lexer::tokenize;
use crate::scope::{DeclaredName, NodeFactory, NodeRejected, ScopeSnapshot};
use quill_diagnostics::DiagnosticKind;

/// 最小的语义协作方：作用域栈 + 导出集合
#[derive(Default)]
struct Recorder {
    scopes: Vec<Vec<DeclaredName>>,
    exports: BTreeSet<String>,
}

impl NameResolver for Recorder {
    fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    fn pop_scope(&mut self) -> ScopeSnapshot {
        let names = self.scopes.pop().unwrap_or_default();
        ScopeSnapshot {
            depth: self.scopes.len(),
            names,
        }
    }

    fn declare(&mut self, name: &str, ty: Option<&str>) -> Result<(), NodeRejected> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| NodeRejected::new("no active scope"))?;
        if scope.iter().any(|n| n.name == name) {
            return Err(NodeRejected::new(format!("'{}' is already declared", name)));
        }
        scope.push(DeclaredName {
            name: name.to_string(),
            ty: ty.map(str::to_string),
        });
        Ok(())
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().flatten().any(|n| n.name == name)
    }
}

impl NodeFactory for Recorder {
    fn build(&mut self, mut node: Symbol) -> Result<Symbol, NodeRejected> {
        if node.kind.declares_name() {
            let name = node.value().to_string();
            let ty = node.declared_type().map(str::to_string);
            self.declare(&name, ty.as_deref())?;
        }
        if node.kind == NodeKind::Variable {
            let bound = self.is_bound(node.value());
            node.meta_mut().bound = Some(bound);
        }
        if node.kind == NodeKind::Export {
            for declaration in &node.children {
                for binding in &declaration.children {
                    if binding.kind == NodeKind::Binding {
                        self.exports.insert(binding.value().to_string());
                    }
                }
            }
        }
        Ok(node)
    }
}

impl ScopeBridge for Recorder {
    fn exports(&self) -> BTreeSet<String> {
        self.exports.clone()
    }
}

fn parse_source(source: &str) -> ParseResult {
    let lexed = tokenize(source);
    let mut bridge = Recorder::default();
    parse(lexed.tokens, lexed.diagnostics, &mut bridge).expect("no internal error")
}

fn root(source: &str) -> Symbol {
    let result = parse_source(source);
    assert!(
        !result.has_errors(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    result.root.expect("root node")
}

fn first(source: &str) -> String {
    root(source).children[0].to_string()
}

fn syntax_errors(result: &ParseResult) -> Vec<&Diagnostic> {
    result
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Syntax)
        .collect()
}

// ===== 优先级与结合性 =====

#[test]
fn test_precedence_shapes() {
    assert_eq!(first("a + b * c"), "(+ a (* b c))");
    assert_eq!(first("a = b = c"), "(= a (= b c))");
    assert_eq!(first("a - b - c"), "(- (- a b) c)");
    assert_eq!(first("a || b && c"), "(|| a (&& b c))");
    assert_eq!(first("a | b ^ c & d"), "(| a (^ b (& c d)))");
    assert_eq!(first("a == b < c << d"), "(== a (< b (<< c d)))");
    assert_eq!(first("a ^^ b || c"), "(|| (^^ a b) c)");
    assert_eq!(first("x += 1"), "(+= x 1)");
}

#[test]
fn test_apply_and_inheritance() {
    assert_eq!(first("a |> f |> g"), "(|> (|> a f) g)");
    assert_eq!(first("a <: b <: c"), "(<: a (<: b c))");
    assert_eq!(first("x |> a <: b"), "(|> x (<: a b))");
}

#[test]
fn test_unary_and_increment() {
    assert_eq!(first("-a * b"), "(* (- a) b)");
    assert_eq!(first("!x && ~y"), "(&& (! x) (~ y))");
    assert_eq!(first("*p = &q"), "(= (* p) (& q))");
    assert_eq!(first("++a.b"), "(pre++ (. a b))");
    assert_eq!(first("a--"), "(post-- a)");
}

#[test]
fn test_new_sugars_to_inheritance() {
    assert_eq!(first("new Point(1)"), "(<: (object) (call Point 1))");
}

#[test]
fn test_member_and_call_chain() {
    assert_eq!(first("a.b.c"), "(. (. a b) c)");
    assert_eq!(first("a[0](1)"), "(call ([] a 0) 1)");
    assert_eq!(first("f()"), "(call f)");
    assert_eq!(first("list\n  .first"), "(. list first)");
    assert_eq!(first("a::b"), "(:: a b)");
}

#[test]
fn test_member_name_reclassification_asymmetry() {
    assert_eq!(first("a.if"), "(. a if)");

    let result = parse_source("a::if");
    let errors = syntax_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("after '::'"));
}

#[test]
fn test_cast_and_grouping() {
    assert_eq!(first("(int*) p"), "(cast int* p)");
    assert_eq!(first("(a + b) * c"), "(* (+ a b) c)");
    assert_eq!(first("(struct Point) x"), "(cast struct Point x)");
}

// ===== 字面量 =====

#[test]
fn test_array_and_object_literals() {
    assert_eq!(first("[1, 2\n 3]"), "(array 1 2 3)");
    assert_eq!(first("[]"), "(array)");
    assert_eq!(
        first("o = {a: 1, \"b\": 2\n 3: c}"),
        "(= o (object (property a 1) (property b 2) (property 3 c)))"
    );
}

#[test]
fn test_function_literal() {
    let tree = root("f = take int a, string b { return a }");
    assert_eq!(
        tree.children[0].to_string(),
        "(= f (function (parameters (parameter a int) (parameter b string)) (block (return a))))"
    );

    let function = &tree.children[0].children[1];
    let scope = function.scope().expect("function scope");
    assert_eq!(scope.depth, 1);
    assert_eq!(scope.type_of("a"), Some("int"));
    assert_eq!(scope.type_of("b"), Some("string"));

    let returned = &function.children[1].children[0].children[0];
    assert_eq!(returned.is_bound(), Some(true));
}

#[test]
fn test_do_block_literal() {
    assert_eq!(first("run(do { x })"), "(call run (function (parameters) (block x)))");
}

// ===== 声明与类型 =====

#[test]
fn test_declarations() {
    assert_eq!(
        first("int x = 1, y"),
        "(declaration int (binding x 1) (binding y))"
    );
    assert_eq!(
        first("struct Point* p"),
        "(declaration struct Point* (binding p))"
    );
    assert_eq!(
        first("int(string, bool) f"),
        "(declaration int(string, bool) (binding f))"
    );
}

#[test]
fn test_program_scope_snapshot() {
    let tree = root("int x = 1\nstring s\nx");
    let scope = tree.scope().expect("program scope");

    assert_eq!(scope.depth, 0);
    assert_eq!(scope.type_of("x"), Some("int"));
    assert_eq!(scope.type_of("s"), Some("string"));
    assert_eq!(tree.children[2].is_bound(), Some(true));
}

#[test]
fn test_redeclaration_is_reported() {
    let result = parse_source("int x\nint x");
    let errors = syntax_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("already declared"));
    assert_eq!(errors[0].line(), 2);
}

// ===== 语句 =====

#[test]
fn test_if_else_chain() {
    assert_eq!(
        first("if a { b } else if c { d } else { e }"),
        "(if a (block b) (if c (block d) (block e)))"
    );
    assert_eq!(first("if a {\n b\n}\nelse {\n c\n}"), "(if a (block b) (block c))");
}

#[test]
fn test_loops() {
    assert_eq!(first("while x { x = x - 1 }"), "(while x (block (= x (- x 1))))");
    assert_eq!(
        first("for k: v in m { }"),
        "(for (loop_binding k) (loop_binding v) m (block))"
    );
    assert_eq!(
        first("while a { break; continue }"),
        "(while a (block (break) (continue)))"
    );
}

#[test]
fn test_return_forms() {
    assert_eq!(first("return"), "(return)");
    assert_eq!(first("return a + 1"), "(return (+ a 1))");
    assert_eq!(first("f = do { return }"), "(= f (function (parameters) (block (return))))");
}

#[test]
fn test_import_forms() {
    assert_eq!(first("import a/b, ../c"), "(import (path a b) (path .. c))");
    assert_eq!(
        first("import x, y from ./lib"),
        "(import (path x) (path y) (from (path . lib)))"
    );
    assert_eq!(first("import x from \"lib\""), "(import (path x) (from \"lib\"))");
}

#[test]
fn test_import_path_must_start_on_same_line() {
    let result = parse_source("import\nx = 1");
    let errors = syntax_errors(&result);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 1);
    assert!(errors[0].message.contains("expected a module path"));
    assert_eq!(result.root.expect("root").children[0].to_string(), "(= x 1)");

    let result = parse_source("import a,\nb");
    assert_eq!(syntax_errors(&result)[0].line(), 1);
}

#[test]
fn test_import_from_requires_bare_names() {
    let result = parse_source("import a/b from x");
    let errors = syntax_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("single identifier"));
    assert_eq!(errors[0].span.map(|s| s.start), Some(12));
}

#[test]
fn test_exports_are_collected() {
    let result = parse_source("export int x = 1, y\nint z");
    assert!(!result.has_errors());
    let exports: Vec<&str> = result.exports.iter().map(String::as_str).collect();
    assert_eq!(exports, vec!["x", "y"]);

    let result = parse_source("export x");
    assert_eq!(syntax_errors(&result).len(), 1);
}

// ===== 上下文关键字 =====

#[test]
fn test_declared_keyword_becomes_identifier() {
    let tree = root("int if = 1\nif + 2");
    assert_eq!(tree.children[1].to_string(), "(+ if 2)");
}

#[test]
fn test_shadowing_ends_with_function_scope() {
    let tree = root("f = do {\n int while = 1\n while + 1\n}\nwhile x { }");
    let body = &tree.children[0].children[1].children[1];

    assert_eq!(body.children[1].to_string(), "(+ while 1)");
    assert_eq!(tree.children[1].kind, NodeKind::While);
}

#[test]
fn test_outer_declaration_reaches_nested_function() {
    let tree = root("int if = 1\nf = do { if + 1 }");
    let body = &tree.children[1].children[1].children[1];

    assert_eq!(body.kind, NodeKind::Block);
    assert_eq!(body.children[0].to_string(), "(+ if 1)");
}

#[test]
fn test_free_variables_are_marked() {
    let tree = root("int x\nx + y");
    let sum = &tree.children[1];
    assert_eq!(sum.children[0].is_bound(), Some(true));
    assert_eq!(sum.children[1].is_bound(), Some(false));
}

// ===== 终结符与恢复 =====

#[test]
fn test_terminator_elision() {
    assert_eq!(root("a\nb").children.len(), 2);
    assert_eq!(root("a; b;").children.len(), 2);
    assert_eq!(root("f = do { a }").children.len(), 1);

    let result = parse_source("a b");
    let errors = syntax_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("expected ';' or a line break"));
}

#[test]
fn test_statement_recovery_continues() {
    let source = "a = 1\nb = )\nc = 3\nd = 4\ne = ]\nf = 6\ng = 7\nh = 8\ni = 9 9\nj = 10";
    let result = parse_source(source);
    let lines: Vec<usize> = syntax_errors(&result)
        .iter()
        .map(|d| d.line())
        .collect();

    assert_eq!(lines, vec![2, 5, 9]);
    assert_eq!(result.root.expect("root").children.len(), 7);
}

#[test]
fn test_term_error_after_line_break_reported_once() {
    let result = parse_source("x =\n)\ny = 1");
    let errors = syntax_errors(&result);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 2);
    assert!(errors[0].message.contains("found ')'"));
    assert_eq!(result.root.expect("root").children[0].to_string(), "(= y 1)");
}

#[test]
fn test_array_recovery_across_lines() {
    let result = parse_source("x = [1,\n @\n, 3]");
    let errors = syntax_errors(&result);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(
        result.root.expect("root").children[0].to_string(),
        "(= x (array 1 3))"
    );
}

#[test]
fn test_array_recovery() {
    let result = parse_source("x = [1, 2, @@@, 3]");
    assert_eq!(syntax_errors(&result).len(), 1);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::Lexical));

    let tree = result.root.expect("root");
    assert_eq!(tree.children[0].to_string(), "(= x (array 1 2 3))");
}

#[test]
fn test_object_recovery() {
    let result = parse_source("o = {a: 1, b 2, c: 3}");
    assert_eq!(syntax_errors(&result).len(), 1);

    let tree = result.root.expect("root");
    assert_eq!(
        tree.children[0].to_string(),
        "(= o (object (property a 1) (property c 3)))"
    );
}

#[test]
fn test_unterminated_array_ends_early() {
    let result = parse_source("x = [1, 2");
    assert_eq!(syntax_errors(&result).len(), 1);
    assert_eq!(
        result.root.expect("root").children[0].to_string(),
        "(= x (array 1 2))"
    );
}

#[test]
fn test_stray_closing_brace() {
    let result = parse_source("a\n}\nb");
    assert_eq!(syntax_errors(&result).len(), 1);
    assert_eq!(result.root.expect("root").children.len(), 2);
}

#[test]
fn test_function_scope_popped_on_error() {
    let lexed = tokenize("f = take int { }\nif x { }");
    let mut bridge = Recorder::default();
    let result = parse(lexed.tokens, lexed.diagnostics, &mut bridge).expect("no internal error");

    assert!(bridge.scopes.is_empty());
    let errors = syntax_errors(&result);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("parameter name"));
    assert_eq!(result.root.expect("root").children[0].kind, NodeKind::If);
}

#[test]
fn test_max_diagnostics() {
    let lexed = tokenize("a b\nc d\ne f");
    let mut bridge = Recorder::default();
    let result = Parser::new(lexed.tokens, lexed.diagnostics, &mut bridge)
        .expect("eof")
        .with_options(ParserOptions::default().with_max_diagnostics(1))
        .parse_program()
        .expect("no internal error");

    let errors: Vec<&Diagnostic> = result
        .diagnostics
        .iter()
        .filter(|d| d.level.is_error())
        .collect();
    assert_eq!(errors.len(), 1);

    let summary = result.diagnostics.last().expect("summary warning");
    assert!(!summary.level.is_error());
    assert_eq!(summary.message, "2 further syntax error(s) not reported");
}

// ===== 位置 =====

#[test]
fn test_error_span() {
    let result = parse_source("x = )");
    let errors = syntax_errors(&result);
    let span = errors[0].span.expect("span");

    assert_eq!((span.line, span.start, span.end), (1, 5, 6));
}

#[test]
fn test_leaf_positions_match_tokens() {
    let tree = root("foo = bar + 12");
    let assignment = &tree.children[0];
    let number = &assignment.children[1].children[1];

    assert_eq!(assignment.position, Position::new(1, 1));
    assert_eq!(number.position, Position::new(1, 13));
    assert_eq!(number.value(), "12");
}

#[test]
fn test_missing_eof_is_internal() {
    let tokens = vec![Token::new(TokenKind::Identifier, "a", 1, 1)];
    let mut bridge = Recorder::default();
    let result = parse(tokens, Vec::new(), &mut bridge);

    assert!(matches!(result, Err(InternalError::MissingEof)));
}

#[test]
fn test_free_variables_in_first_use_order() {
    let tree = root("int a = b + c\nd(a)\nf = take int p { p + e }");
    assert_eq!(FreeVariables::of(&tree), vec!["b", "c", "d", "f", "e"]);
}
