//! The AST produced by the parser: a closed set of tagged node variants,
//! each self-describing enough to be re-evaluated (or re-printed) without
//! consulting the original token stream.
use std::fmt::{self, Display};

pub use crate::lexer::{Number, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn from_lexeme(op: &str) -> Option<Self> {
        match op {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }
}

impl Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        f.write_str(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        f.write_str(op)
    }
}

/// A sequence of statements sharing the enclosing environment (there are no
/// nested scopes in this language).
pub type Block = Vec<Stmt>;

#[derive(Debug, Clone)]
pub struct BinOp {
    pub left: Box<Expr>,
    pub op: ArithOp,
    pub right: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub left: Box<Expr>,
    pub op: CompareOp,
    pub right: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(Number, Position),
    String(String, Position),
    Variable(String, Position),
    BinOp(BinOp),
    Comparison(Comparison),
}

impl Expr {
    pub fn position(&self) -> &Position {
        match self {
            Expr::Number(_, position) => position,
            Expr::String(_, position) => position,
            Expr::Variable(_, position) => position,
            Expr::BinOp(node) => &node.position,
            Expr::Comparison(node) => &node.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Print {
    pub value: Expr,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct If {
    pub condition: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct While {
    pub condition: Expr,
    pub body: Block,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub module: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct TryCatch {
    pub try_block: Block,
    pub catch_block: Block,
    pub error_var: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign(Assign),
    Print(Print),
    If(If),
    While(While),
    Import(Import),
    TryCatch(TryCatch),
}

impl Stmt {
    pub fn position(&self) -> &Position {
        match self {
            Stmt::Assign(node) => &node.position,
            Stmt::Print(node) => &node.position,
            Stmt::If(node) => &node.position,
            Stmt::While(node) => &node.position,
            Stmt::Import(node) => &node.position,
            Stmt::TryCatch(node) => &node.position,
        }
    }
}

/// A whole parsed program: an ordered sequence of top-level statements.
pub type Program = Vec<Stmt>;
