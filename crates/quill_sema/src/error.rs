//! Semantic Error Types
//!
//! 协作方拒绝节点的原因。解析器把它们作为语法错误报告在当前 token 上。

use quill_syntax::{NodeRejected, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// 同一作用域内重复定义
    #[error("'{name}' is already declared in this scope{}", previous_note(.previous))]
    DuplicateDefinition {
        name: String,
        previous: Option<Position>,
    },

    /// export 出现在程序作用域之外
    #[error("'export' is only allowed at program scope")]
    NestedExport,

    /// 没有活动作用域时登记名字
    #[error("cannot declare '{0}' outside of any scope")]
    NoActiveScope(String),
}

fn previous_note(previous: &Option<Position>) -> String {
    match previous {
        Some(position) => format!(" (previous declaration at {})", position),
        None => String::new(),
    }
}

impl From<SemanticError> for NodeRejected {
    fn from(err: SemanticError) -> Self {
        NodeRejected::new(err.to_string())
    }
}
