//! Quill Semantic Collaborator
//!
//! 解析器的语义协作方，负责：
//! - 作用域栈 (ScopeStack)：名字驻留、登记与向外查找
//! - 节点工厂 (Analyzer)：为节点附加元数据，拒绝重复定义与嵌套导出
//!
//! 类型检查、绑定解析等完整语义分析不在这里完成。

pub mod analyzer;
pub mod error;
pub mod scope;
pub mod symbol;

pub use analyzer::Analyzer;
pub use error::SemanticError;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeStack};
pub use symbol::{Entry, EntryKind, SymbolId};
