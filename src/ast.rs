use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// The root of a parsed script.
///
/// A `Program` owns every node below it. Nothing in the tree is shared, so
/// dropping the program releases the whole script.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename = "program")]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    /// Renders the tree as pretty-printed JSON, one object per node with its
    /// kind in a `type` field.
    ///
    /// # Errors
    /// Returns the serializer's error, which only happens on I/O-like failures
    /// that cannot occur when writing to a `String`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A brace-delimited statement sequence. Evaluating it opens a child scope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub line: usize,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Stmt {
    /// `let name = value;`, `let name;` or `const name = value;`.
    #[serde(rename = "varDecl")]
    VarDeclaration {
        name:     String,
        #[serde(rename = "isConstant")]
        constant: bool,
        value:    Option<Expr>,
        line:     usize,
    },
    /// `if (test) { ... } else { ... }`.
    #[serde(rename = "ifStmt")]
    If {
        test:       Expr,
        consequent: Block,
        alternate:  Option<Block>,
        line:       usize,
    },
    /// `while (test) { ... }`.
    #[serde(rename = "whileStmt")]
    While { test: Expr, body: Block, line: usize },
    /// `break;`
    #[serde(rename = "breakStmt")]
    Break { line: usize },
    /// A nested block used as a statement.
    #[serde(rename = "blockStmt")]
    Block(Block),
    /// An expression followed by `;`.
    #[serde(rename = "exprStmt")]
    Expression { expr: Expr },
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expr {
    Identifier {
        name: String,
        line: usize,
    },
    NumericLiteral {
        value: i32,
        line:  usize,
    },
    /// A string literal, stored without its quotes.
    StringLiteral {
        value: String,
        line:  usize,
    },
    /// `{ key: value, key }`; a bare key has no initializer and reads as Null.
    ObjectLiteral {
        properties: BTreeMap<String, Option<Expr>>,
        line:       usize,
    },
    /// `[a, b, c]`; every element has the node kind recorded here.
    ArrayLiteral {
        elements:     Vec<Expr>,
        #[serde(rename = "elementDataType")]
        element_kind: Option<NodeKind>,
        line:         usize,
    },
    #[serde(rename = "binaryExpr")]
    Binary {
        left:     Box<Expr>,
        operator: BinaryOperator,
        right:    Box<Expr>,
        line:     usize,
    },
    #[serde(rename = "logicalExpr")]
    Logical {
        left:     Box<Expr>,
        operator: LogicalOperator,
        right:    Box<Expr>,
        line:     usize,
    },
    /// `assignee = value`, where the assignee is an identifier or member
    /// expression.
    #[serde(rename = "assignmentExpr")]
    Assignment {
        assignee: Box<Expr>,
        value:    Box<Expr>,
        line:     usize,
    },
    #[serde(rename = "callExpr")]
    Call {
        #[serde(rename = "caller")]
        callee: Box<Expr>,
        args:   Vec<Expr>,
        line:   usize,
    },
    /// `object.property` or, when `computed`, `object[property]`.
    #[serde(rename = "memberExpr")]
    Member {
        object:   Box<Expr>,
        property: Box<Expr>,
        computed: bool,
        line:     usize,
    },
}

impl Expr {
    /// Returns the line the expression starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Identifier { line, .. }
            | Self::NumericLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::ObjectLiteral { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::Binary { line, .. }
            | Self::Logical { line, .. }
            | Self::Assignment { line, .. }
            | Self::Call { line, .. }
            | Self::Member { line, .. } => *line,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Identifier { .. } => NodeKind::Identifier,
            Self::NumericLiteral { .. } => NodeKind::NumericLiteral,
            Self::StringLiteral { .. } => NodeKind::StringLiteral,
            Self::ObjectLiteral { .. } => NodeKind::ObjectLiteral,
            Self::ArrayLiteral { .. } => NodeKind::ArrayLiteral,
            Self::Binary { .. } => NodeKind::BinaryExpr,
            Self::Logical { .. } => NodeKind::LogicalExpr,
            Self::Assignment { .. } => NodeKind::AssignmentExpr,
            Self::Call { .. } => NodeKind::CallExpr,
            Self::Member { .. } => NodeKind::MemberExpr,
        }
    }
}

impl Stmt {
    /// Returns the line the statement starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::VarDeclaration { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Break { line }
            | Self::Block(Block { line, .. }) => *line,
            Self::Expression { expr } => expr.line(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::VarDeclaration { .. } => NodeKind::VarDeclaration,
            Self::If { .. } => NodeKind::IfStmt,
            Self::While { .. } => NodeKind::WhileStmt,
            Self::Break { .. } => NodeKind::BreakStmt,
            Self::Block(_) => NodeKind::BlockStmt,
            Self::Expression { expr } => expr.kind(),
        }
    }
}

/// The kind tag of a syntax tree node.
///
/// Array literals use it to check that all elements share one syntactic kind,
/// and diagnostics use it to name what was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Program,
    VarDeclaration,
    IfStmt,
    WhileStmt,
    BreakStmt,
    BlockStmt,
    Identifier,
    NumericLiteral,
    StringLiteral,
    ObjectLiteral,
    ArrayLiteral,
    BinaryExpr,
    LogicalExpr,
    AssignmentExpr,
    CallExpr,
    MemberExpr,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Program => "a program",
            Self::VarDeclaration => "a variable declaration",
            Self::IfStmt => "an if statement",
            Self::WhileStmt => "a while statement",
            Self::BreakStmt => "a break statement",
            Self::BlockStmt => "a block",
            Self::Identifier => "an identifier",
            Self::NumericLiteral => "a numeric literal",
            Self::StringLiteral => "a string literal",
            Self::ObjectLiteral => "an object literal",
            Self::ArrayLiteral => "an array literal",
            Self::BinaryExpr => "a binary expression",
            Self::LogicalExpr => "a logical expression",
            Self::AssignmentExpr => "an assignment",
            Self::CallExpr => "a call",
            Self::MemberExpr => "a member expression",
        };
        f.write_str(name)
    }
}

/// Arithmetic and relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl BinaryOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

/// `and` / `or`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}
