//! Analyzer
//!
//! 解析器使用的语义协作方：维护作用域栈，为节点附加元数据，
//! 收集模块导出。

use crate::error::SemanticError;
use crate::scope::{ScopeKind, ScopeStack};
use crate::symbol::{Entry, EntryKind};
use log::debug;
use quill_syntax::{
    NameResolver, NodeFactory, NodeKind, NodeRejected, ScopeBridge, ScopeSnapshot, Symbol,
};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct Analyzer {
    scopes: ScopeStack,
    exports: BTreeSet<String>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// 声明节点：名字登记到当前作用域
    fn declare_node(&mut self, node: &Symbol, kind: EntryKind) -> Result<(), SemanticError> {
        let entry = Entry::new(node.value(), kind)
            .with_type(node.declared_type())
            .at(node.position);
        self.scopes.define(entry)?;
        debug!("declared '{}' as {:?}", node.value(), kind);
        Ok(())
    }

    /// export 只能出现在程序作用域；收集其中声明的名字
    fn collect_exports(&mut self, node: &Symbol) -> Result<(), SemanticError> {
        if self.scopes.current_scope_kind() != Some(ScopeKind::Program) {
            return Err(SemanticError::NestedExport);
        }
        let names = node
            .children
            .iter()
            .filter(|child| child.kind == NodeKind::Declaration)
            .flat_map(|declaration| &declaration.children)
            .filter(|child| child.kind == NodeKind::Binding)
            .map(|binding| binding.value().to_string());
        self.exports.extend(names);
        Ok(())
    }
}

impl NameResolver for Analyzer {
    fn push_scope(&mut self) {
        self.scopes.enter_scope();
    }

    fn pop_scope(&mut self) -> ScopeSnapshot {
        match self.scopes.exit_scope() {
            Some(id) => self.scopes.snapshot(id),
            None => ScopeSnapshot::default(),
        }
    }

    fn declare(&mut self, name: &str, ty: Option<&str>) -> Result<(), NodeRejected> {
        let entry = Entry::new(name, EntryKind::Variable).with_type(ty);
        self.scopes.define(entry)?;
        Ok(())
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.is_bound(name)
    }
}

impl NodeFactory for Analyzer {
    fn build(&mut self, mut node: Symbol) -> Result<Symbol, NodeRejected> {
        if let Some(kind) = EntryKind::of(node.kind) {
            self.declare_node(&node, kind)?;
        }
        match node.kind {
            NodeKind::Variable => {
                let bound = self.scopes.is_bound(node.value());
                node.meta_mut().bound = Some(bound);
            }
            NodeKind::Export => self.collect_exports(&node)?,
            _ => {}
        }
        Ok(node)
    }
}

impl ScopeBridge for Analyzer {
    fn exports(&self) -> BTreeSet<String> {
        self.exports.clone()
    }
}
