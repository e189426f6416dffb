use super::{NodeKind, Symbol};

/// AST 访问者
///
/// 默认实现对子节点递归；实现者只需覆盖关心的节点种类。
pub trait Visitor {
    fn visit(&mut self, node: &Symbol) {
        self.enter(node);
        for child in &node.children {
            self.visit(child);
        }
        self.leave(node);
    }

    fn enter(&mut self, _node: &Symbol) {}

    fn leave(&mut self, _node: &Symbol) {}
}

/// 自由变量：构造时未在任何外层作用域中绑定的变量引用
///
/// 按首次出现的顺序收集，同名只记一次。
#[derive(Debug, Default)]
pub struct FreeVariables {
    pub names: Vec<String>,
}

impl FreeVariables {
    pub fn of(root: &Symbol) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit(root);
        collector.names
    }
}

impl Visitor for FreeVariables {
    fn enter(&mut self, node: &Symbol) {
        if node.kind == NodeKind::Variable
            && node.is_bound() == Some(false)
            && !self.names.iter().any(|name| name == node.value())
        {
            self.names.push(node.value().to_string());
        }
    }
}
