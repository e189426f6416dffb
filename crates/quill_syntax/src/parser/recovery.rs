//! Error Recovery
//!
//! 语法错误被捕获后的重新同步。每种策略都至少在一个方向上保证前进：
//! 要么消耗 token，要么停在调用方循环会处理掉的边界上。

use super::Parser;
use crate::cursor::TokenPattern;
use crate::scope::ScopeBridge;
use crate::token::{TokenKind, TokenSet};

/// 列表字面量恢复后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListRecovery {
    /// 找到并消耗了闭合符，字面量提前结束
    Closed,
    /// 消耗了逗号或换行，继续下一个元素
    Continue,
    /// 到达输入结束
    Exhausted,
}

impl<'b, B: ScopeBridge> Parser<'b, B> {
    /// 语句级恢复：跳到下一个换行 (并消耗它)
    ///
    /// 遇到与本语句无关的 `}` 时停下，留给外层块闭合。
    pub(crate) fn resync_statement(&mut self) {
        let mut depth = 0usize;
        loop {
            let token = self.cursor.current().clone();
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::Newline if depth == 0 => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::Punctuation if token.value == "{" => depth += 1,
                TokenKind::Punctuation if token.value == "}" => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// 数组 / 对象恢复：跳到换行、逗号或 `closer`
    ///
    /// 换行后紧跟的逗号视为同一个分隔符。
    pub(crate) fn recover_list(&mut self, closer: &str) -> ListRecovery {
        loop {
            let token = self.cursor.current().clone();
            match token.kind {
                TokenKind::Eof => return ListRecovery::Exhausted,
                TokenKind::Newline => {
                    self.cursor.skip(TokenSet::NEWLINE);
                    let _ = self.cursor.eat(TokenPattern::punct(","), TokenSet::empty(), None);
                    return ListRecovery::Continue;
                }
                TokenKind::Punctuation if token.value == "," => {
                    self.cursor.advance();
                    return ListRecovery::Continue;
                }
                TokenKind::Punctuation if token.value == closer => {
                    self.cursor.advance();
                    return ListRecovery::Closed;
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }
}
