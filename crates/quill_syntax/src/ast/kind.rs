use std::fmt;

/// AST 节点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // --- 语句 ---
    /// 程序根
    StatementList,
    Block,
    If,
    While,
    For,
    /// for 循环绑定的变量
    LoopBinding,
    Return,
    Break,
    Continue,
    Import,
    ImportPath,
    PathSegment,
    From,
    Export,
    Declaration,
    Binding,

    // --- 类型 ---
    Type,
    StructType,
    PointerType,
    /// 参数化类型 / 函数类型: `int(string, bool)`
    FunctionType,

    // --- 二元运算 (按优先级由低到高) ---
    Assignment,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Apply,
    Inheritance,

    // --- 一元与后缀 ---
    Unary,
    PreIncrement,
    PostIncrement,
    Cast,
    Member,
    ComputedMember,
    PrototypeMember,
    Call,

    // --- 项 ---
    Variable,
    /// 成员名 (`.name` / `::name`)
    Name,
    Str,
    Number,
    Constant,
    Array,
    Object,
    Property,
    Function,
    Parameters,
    Parameter,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StatementList => "statement_list",
            Self::Block => "block",
            Self::If => "if",
            Self::While => "while",
            Self::For => "for",
            Self::LoopBinding => "loop_binding",
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Import => "import",
            Self::ImportPath => "path",
            Self::PathSegment => "segment",
            Self::From => "from",
            Self::Export => "export",
            Self::Declaration => "declaration",
            Self::Binding => "binding",
            Self::Type => "type",
            Self::StructType => "struct",
            Self::PointerType => "pointer",
            Self::FunctionType => "function_type",
            Self::Assignment => "assignment",
            Self::LogicalOr => "logical_or",
            Self::LogicalXor => "logical_xor",
            Self::LogicalAnd => "logical_and",
            Self::BitwiseOr => "bitwise_or",
            Self::BitwiseXor => "bitwise_xor",
            Self::BitwiseAnd => "bitwise_and",
            Self::Equality => "equality",
            Self::Relational => "relational",
            Self::Shift => "shift",
            Self::Additive => "additive",
            Self::Multiplicative => "multiplicative",
            Self::Apply => "apply",
            Self::Inheritance => "inheritance",
            Self::Unary => "unary",
            Self::PreIncrement => "pre_increment",
            Self::PostIncrement => "post_increment",
            Self::Cast => "cast",
            Self::Member => "member",
            Self::ComputedMember => "computed_member",
            Self::PrototypeMember => "prototype_member",
            Self::Call => "call",
            Self::Variable => "variable",
            Self::Name => "name",
            Self::Str => "string",
            Self::Number => "number",
            Self::Constant => "constant",
            Self::Array => "array",
            Self::Object => "object",
            Self::Property => "property",
            Self::Function => "function",
            Self::Parameters => "parameters",
            Self::Parameter => "parameter",
        }
    }

    /// 是否为二元运算节点 `(left, op, right)`
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Assignment
                | Self::LogicalOr
                | Self::LogicalXor
                | Self::LogicalAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
                | Self::BitwiseAnd
                | Self::Equality
                | Self::Relational
                | Self::Shift
                | Self::Additive
                | Self::Multiplicative
                | Self::Apply
                | Self::Inheritance
        )
    }

    /// 是否为类型节点
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Type | Self::StructType | Self::PointerType | Self::FunctionType
        )
    }

    /// 会向当前作用域登记名字的节点
    pub fn declares_name(&self) -> bool {
        matches!(self, Self::Binding | Self::Parameter | Self::LoopBinding)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
