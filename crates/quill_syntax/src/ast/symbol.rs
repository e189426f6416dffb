use super::NodeKind;
use crate::scope::ScopeSnapshot;
use crate::token::{Position, Token};
use std::fmt;

/// 语义协作方附加在节点上的元数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    /// 程序 / 函数字面量结束时的作用域快照
    pub scope: Option<ScopeSnapshot>,
    /// 声明的类型 (绑定、参数)
    pub declared_type: Option<String>,
    /// 变量引用是否绑定到外层作用域中已声明的名字
    pub bound: Option<bool>,
}

/// AST 节点
///
/// 构造后不可变；构造统一经过 [`crate::scope::NodeFactory`]。
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: NodeKind,
    pub children: Vec<Symbol>,
    pub value: Option<String>,
    pub position: Position,
    pub meta: Option<Metadata>,
}

impl Symbol {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            kind,
            children: Vec::new(),
            value: None,
            position,
            meta: None,
        }
    }

    /// 从单个 token 构造叶子节点
    pub fn leaf(kind: NodeKind, token: &Token) -> Self {
        Self::new(kind, token.position).with_value(token.value.clone())
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Symbol>) -> Self {
        self.children = children;
        self
    }

    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        self.meta.get_or_insert_with(Metadata::default)
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn child(&self, index: usize) -> Option<&Symbol> {
        self.children.get(index)
    }

    pub fn scope(&self) -> Option<&ScopeSnapshot> {
        self.meta.as_ref().and_then(|m| m.scope.as_ref())
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.declared_type.as_deref())
    }

    pub fn is_bound(&self) -> Option<bool> {
        self.meta.as_ref().and_then(|m| m.bound)
    }

    /// 类型节点的文本形式: `int*`, `struct Point`, `int(string, bool)`
    pub fn type_text(&self) -> Option<String> {
        match self.kind {
            NodeKind::Type => Some(self.value().to_string()),
            NodeKind::StructType => Some(format!("struct {}", self.value())),
            NodeKind::PointerType => Some(format!("{}*", self.child(0)?.type_text()?)),
            NodeKind::FunctionType => {
                let (result, params) = self.children.split_first()?;
                let params = params
                    .iter()
                    .map(|p| p.type_text())
                    .collect::<Option<Vec<_>>>()?;
                Some(format!("{}({})", result.type_text()?, params.join(", ")))
            }
            _ => None,
        }
    }

    /// 前序遍历
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Symbol)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// 统计满足条件的节点
    pub fn count(&self, predicate: impl Fn(&Symbol) -> bool) -> usize {
        let mut total = 0;
        self.walk(&mut |node| {
            if predicate(node) {
                total += 1;
            }
        });
        total
    }
}

/// S 表达式形式，供调试输出与测试使用
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Variable
            | NodeKind::Name
            | NodeKind::Number
            | NodeKind::Constant
            | NodeKind::PathSegment
            | NodeKind::Type => return write!(f, "{}", self.value()),
            NodeKind::Str => return write!(f, "{:?}", self.value()),
            _ => {}
        }

        let head = match self.kind {
            kind if kind.is_binary() => self.value().to_string(),
            NodeKind::Unary => self.value().to_string(),
            NodeKind::PreIncrement => format!("pre{}", self.value()),
            NodeKind::PostIncrement => format!("post{}", self.value()),
            NodeKind::Member => ".".to_string(),
            NodeKind::PrototypeMember => "::".to_string(),
            NodeKind::ComputedMember => "[]".to_string(),
            NodeKind::PointerType | NodeKind::StructType | NodeKind::FunctionType => {
                return write!(f, "{}", self.type_text().unwrap_or_default());
            }
            kind => match &self.value {
                Some(value) => format!("{} {}", kind, value),
                None => kind.to_string(),
            },
        };

        write!(f, "({}", head)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}
