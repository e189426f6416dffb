//! Scope Management
//!
//! 栈式作用域：程序作用域与函数字面量作用域。
//! 名字通过 lasso 驻留，作用域内只保存驻留键。

use crate::symbol::SymbolId;
use lasso::Spur;
use std::collections::HashMap;

pub mod stack;
pub use stack::ScopeStack;

/// 作用域 ID
pub type ScopeId = usize;

/// 作用域类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// 程序根
    Program,
    /// 函数字面量
    Function,
}

/// 单个作用域
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    symbols: HashMap<Spur, SymbolId>,
    /// 按声明顺序
    order: Vec<SymbolId>,
}

impl Scope {
    pub fn new(id: ScopeId, parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Self {
            id,
            parent,
            kind,
            symbols: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// 在当前作用域定义 (覆盖同名条目)
    pub fn define(&mut self, key: Spur, symbol_id: SymbolId) {
        if self.symbols.insert(key, symbol_id).is_none() {
            self.order.push(symbol_id);
        }
    }

    /// 在当前作用域查找（不向上查找）
    pub fn lookup_local(&self, key: Spur) -> Option<SymbolId> {
        self.symbols.get(&key).copied()
    }

    pub fn declared(&self) -> &[SymbolId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
