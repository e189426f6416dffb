use super::{Scope, ScopeId, ScopeKind};
use crate::error::SemanticError;
use crate::symbol::{Entry, EntryKind, SymbolId};
use lasso::Rodeo;
use log::debug;
use quill_syntax::{DeclaredName, ScopeSnapshot};

/// 作用域栈 - 管理嵌套作用域
///
/// 初始为空：程序作用域由解析器在开始时压入。
/// 退出的作用域保留在表中，快照随时可以重新生成。
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    current: Option<ScopeId>,
    // 所有登记过的条目
    symbols: Vec<Entry>,
    interner: Rodeo,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进入新作用域；栈为空时即为程序作用域
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = self.scopes.len();
        let kind = match self.current {
            None => ScopeKind::Program,
            Some(_) => ScopeKind::Function,
        };
        self.scopes.push(Scope::new(id, self.current, kind));
        self.current = Some(id);
        debug!("enter {:?} scope #{}", kind, id);
        id
    }

    /// 退出当前作用域，返回被退出的作用域
    pub fn exit_scope(&mut self) -> Option<ScopeId> {
        let exited = self.current?;
        self.current = self.scopes[exited].parent;
        debug!("exit scope #{}", exited);
        Some(exited)
    }

    pub fn current_scope(&self) -> Option<ScopeId> {
        self.current
    }

    pub fn current_scope_kind(&self) -> Option<ScopeKind> {
        self.current.map(|id| self.scopes[id].kind)
    }

    /// 作用域的嵌套深度 (程序作用域为 0)
    pub fn depth_of(&self, id: ScopeId) -> usize {
        let mut depth = 0;
        let mut parent = self.scopes[id].parent;
        while let Some(id) = parent {
            depth += 1;
            parent = self.scopes[id].parent;
        }
        depth
    }

    /// 在当前作用域定义条目
    ///
    /// 同名条目已存在时返回 DuplicateDefinition；
    /// 例外是循环变量：两个循环变量可以先后使用同一个名字。
    pub fn define(&mut self, entry: Entry) -> Result<SymbolId, SemanticError> {
        let Some(current) = self.current else {
            return Err(SemanticError::NoActiveScope(entry.name));
        };
        let key = self.interner.get_or_intern(&entry.name);

        if let Some(prev_id) = self.scopes[current].lookup_local(key) {
            let previous = &self.symbols[prev_id];
            if previous.kind == EntryKind::LoopVariable && entry.kind == EntryKind::LoopVariable {
                self.symbols[prev_id] = entry;
                return Ok(prev_id);
            }
            return Err(SemanticError::DuplicateDefinition {
                name: entry.name,
                previous: previous.position,
            });
        }

        let id = self.symbols.len();
        self.symbols.push(entry);
        self.scopes[current].define(key, id);
        Ok(id)
    }

    /// 查找条目（从当前作用域向上查找）
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        let key = self.interner.get(name)?;
        let mut scope = self.current;
        while let Some(id) = scope {
            if let Some(symbol_id) = self.scopes[id].lookup_local(key) {
                return self.symbols.get(symbol_id);
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    /// 仅在当前作用域查找（不向上查找）
    pub fn lookup_local(&self, name: &str) -> Option<&Entry> {
        let key = self.interner.get(name)?;
        let id = self.scopes[self.current?].lookup_local(key)?;
        self.symbols.get(id)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// 生成作用域快照
    pub fn snapshot(&self, id: ScopeId) -> ScopeSnapshot {
        let names = self.scopes[id]
            .declared()
            .iter()
            .map(|&symbol_id| {
                let entry = &self.symbols[symbol_id];
                DeclaredName {
                    name: entry.name.clone(),
                    ty: entry.ty.clone(),
                }
            })
            .collect();
        ScopeSnapshot {
            depth: self.depth_of(id),
            names,
        }
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// 驻留过的不同名字数量
    pub fn interned_count(&self) -> usize {
        self.interner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_syntax::Position;

    #[test]
    fn test_nested_lookup() {
        let mut stack = ScopeStack::new();
        stack.enter_scope();
        stack.define(Entry::new("x", EntryKind::Variable)).unwrap();

        let inner = stack.enter_scope();
        assert_eq!(stack.current_scope_kind(), Some(ScopeKind::Function));
        stack.define(Entry::new("y", EntryKind::Parameter)).unwrap();
        assert!(stack.is_bound("x"));
        assert!(stack.lookup_local("x").is_none());
        assert_eq!(stack.depth_of(inner), 1);

        stack.exit_scope();
        assert!(!stack.is_bound("y"));
        assert!(stack.is_bound("x"));
    }

    #[test]
    fn test_duplicate_definition() {
        let mut stack = ScopeStack::new();
        stack.enter_scope();
        let first = Entry::new("x", EntryKind::Variable).at(Position::new(1, 5));
        stack.define(first).unwrap();

        let err = stack
            .define(Entry::new("x", EntryKind::Variable))
            .unwrap_err();
        assert_eq!(
            err,
            SemanticError::DuplicateDefinition {
                name: "x".to_string(),
                previous: Some(Position::new(1, 5)),
            }
        );
    }

    #[test]
    fn test_shadowing_in_inner_scope() {
        let mut stack = ScopeStack::new();
        stack.enter_scope();
        stack.define(Entry::new("x", EntryKind::Variable)).unwrap();
        stack.enter_scope();
        assert!(stack.define(Entry::new("x", EntryKind::Parameter)).is_ok());
        assert_eq!(stack.interned_count(), 1);
    }

    #[test]
    fn test_loop_variables_may_repeat() {
        let mut stack = ScopeStack::new();
        stack.enter_scope();
        let first = stack.define(Entry::new("i", EntryKind::LoopVariable)).unwrap();
        let second = stack.define(Entry::new("i", EntryKind::LoopVariable)).unwrap();
        assert_eq!(first, second);
        assert!(stack.define(Entry::new("i", EntryKind::Variable)).is_err());
    }

    #[test]
    fn test_snapshot_keeps_order_and_types() {
        let mut stack = ScopeStack::new();
        let program = stack.enter_scope();
        stack
            .define(Entry::new("b", EntryKind::Variable).with_type(Some("int")))
            .unwrap();
        stack.define(Entry::new("a", EntryKind::Variable)).unwrap();
        stack.exit_scope();

        let snapshot = stack.snapshot(program);
        let names: Vec<&str> = snapshot.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(snapshot.type_of("b"), Some("int"));
        assert_eq!(snapshot.depth, 0);
    }

    #[test]
    fn test_define_without_scope() {
        let mut stack = ScopeStack::new();
        assert!(matches!(
            stack.define(Entry::new("x", EntryKind::Variable)),
            Err(SemanticError::NoActiveScope(_))
        ));
    }
}
