use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::token::TokenKind;

/// The spellings of the reference `mylang` implementation. Built once and
/// shared; `Keywords::default()` clones out of this rather than
/// reconstructing the table per lexer instance.
static DEFAULT_TABLE: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("打印", TokenKind::Print);
    table.insert("如果", TokenKind::If);
    table.insert("否则", TokenKind::Else);
    table.insert("循环", TokenKind::While);
    table.insert("导入", TokenKind::Import);
    table.insert("尝试", TokenKind::Try);
    table.insert("捕获", TokenKind::Catch);
    table
});

const DEFAULT_QUIT: &str = "退出";

/// The reserved-word table used by the lexer, kept as data rather than a
/// hard-coded match so that a caller can swap in a different native-script
/// spelling without touching `Lexer::scan_identifier`.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: HashMap<&'static str, TokenKind>,
    /// The token an interactive session watches for to end a transcript.
    pub quit: &'static str,
}

impl Keywords {
    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.table.get(word).cloned()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.clone(),
            quit: DEFAULT_QUIT,
        }
    }
}
