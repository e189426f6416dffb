pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;

pub use ast::{FreeVariables, Metadata, NodeKind, Symbol, Visitor};
pub use error::{InternalError, ParseError, SyntaxError};
pub use lexer::{tokenize, Lexed};
pub use parser::{parse, ParseResult, Parser, ParserOptions};
pub use scope::{DeclaredName, NameResolver, NodeFactory, NodeRejected, ScopeBridge, ScopeSnapshot};
pub use token::{Position, Token, TokenKind, TokenSet};
