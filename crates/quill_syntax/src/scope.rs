//! Scope Bridge
//!
//! 解析器与外部语义组件之间的窄接口：
//!
//! - [`NameResolver`] - 作用域进出、名字登记、"是否已绑定"查询。
//!   游标在前瞻时通过它判断一个单词是关键字还是普通标识符。
//! - [`NodeFactory`] - 所有 AST 节点的构造都经过这里，语义组件可以
//!   附加元数据，或拒绝不合法的节点。
//!
//! 语法层只依赖这两个 trait，不依赖具体的符号表。

use crate::ast::Symbol;
use std::collections::BTreeSet;
use thiserror::Error;

/// 作用域中登记的一个名字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredName {
    pub name: String,
    pub ty: Option<String>,
}

/// 作用域结束时的快照，挂在程序根或函数字面量节点上
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeSnapshot {
    /// 嵌套深度 (程序作用域为 0)
    pub depth: usize,
    /// 按声明顺序排列
    pub names: Vec<DeclaredName>,
}

impl ScopeSnapshot {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.name == name)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.name == name)
            .and_then(|n| n.ty.as_deref())
    }
}

/// 节点被语义组件拒绝
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NodeRejected {
    pub message: String,
}

impl NodeRejected {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 名字解析能力
pub trait NameResolver {
    /// 进入新的词法作用域
    fn push_scope(&mut self);

    /// 结束当前作用域并返回其快照
    fn pop_scope(&mut self) -> ScopeSnapshot;

    /// 在当前作用域登记名字
    fn declare(&mut self, name: &str, ty: Option<&str>) -> Result<(), NodeRejected>;

    /// 名字是否在当前或任一外层作用域中已登记
    fn is_bound(&self, name: &str) -> bool;
}

/// 节点构造能力
pub trait NodeFactory {
    /// 构造 (或调整、拒绝) 一个节点
    fn build(&mut self, node: Symbol) -> Result<Symbol, NodeRejected>;
}

/// 解析器需要的完整协作方
pub trait ScopeBridge: NameResolver + NodeFactory {
    /// 从 export 语句中收集到的名字
    fn exports(&self) -> BTreeSet<String>;
}
