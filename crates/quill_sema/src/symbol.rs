//! Declared Names
//!
//! 作用域中登记的条目。

use quill_syntax::{NodeKind, Position};

/// 条目 ID (在 ScopeStack 的条目表中的下标)
pub type SymbolId = usize;

/// 条目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 变量声明
    Variable,
    /// 函数字面量参数
    Parameter,
    /// for 循环变量
    LoopVariable,
}

impl EntryKind {
    /// 由声明节点的种类得到条目来源
    pub fn of(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Binding => Some(Self::Variable),
            NodeKind::Parameter => Some(Self::Parameter),
            NodeKind::LoopBinding => Some(Self::LoopVariable),
            _ => None,
        }
    }
}

/// 已登记的名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub ty: Option<String>,
    pub kind: EntryKind,
    pub position: Option<Position>,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            ty: None,
            kind,
            position: None,
        }
    }

    pub fn with_type(mut self, ty: Option<&str>) -> Self {
        self.ty = ty.map(str::to_string);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}
