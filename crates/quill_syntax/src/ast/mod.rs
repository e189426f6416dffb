pub mod kind;
pub mod symbol;
pub mod visitor;

// 重新导出核心类型，方便外部直接使用 quill_syntax::ast::Symbol 等
pub use kind::NodeKind;
pub use symbol::{Metadata, Symbol};
pub use visitor::{FreeVariables, Visitor};
