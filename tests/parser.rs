use padscript::{
    ast::{BinaryOperator, Block, Expr, LogicalOperator, NodeKind, Program, Stmt},
    config::Limits,
    error::ParseError,
    interpreter::parser::core::{Parsed, produce_tree},
};
use pretty_assertions::assert_eq;

fn parse(src: &str) -> Parsed {
    produce_tree(src.as_bytes(), &Limits::default())
}

fn parse_clean(src: &str) -> Program {
    let parsed = parse(src);
    assert!(parsed.diagnostics.is_empty(), "{src}: {:?}", parsed.diagnostics);
    parsed.program
}

fn ident(name: &str, line: usize) -> Expr {
    Expr::Identifier { name: name.to_string(),
                       line }
}

fn number(value: i32, line: usize) -> Expr {
    Expr::NumericLiteral { value, line }
}

#[test]
fn declarations() {
    let program = parse_clean("let x = 1;\nconst y = x;\nlet z;");
    assert_eq!(program.body,
               [Stmt::VarDeclaration { name:     "x".to_string(),
                                       constant: false,
                                       value:    Some(number(1, 1)),
                                       line:     1, },
                Stmt::VarDeclaration { name:     "y".to_string(),
                                       constant: true,
                                       value:    Some(ident("x", 2)),
                                       line:     2, },
                Stmt::VarDeclaration { name:     "z".to_string(),
                                       constant: false,
                                       value:    None,
                                       line:     3, }]);
}

#[test]
fn const_needs_an_initializer() {
    let parsed = parse("const x; let y = 2;");
    assert_eq!(parsed.diagnostics,
               [ParseError::ConstWithoutInitializer { name: "x".to_string(),
                                                      line: 1, }]);
    assert_eq!(parsed.program.body.len(), 1);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_clean("1 + 2 * 3;");
    let expected = Expr::Binary { left:     Box::new(number(1, 1)),
                                  operator: BinaryOperator::Add,
                                  right:    Box::new(Expr::Binary { left:     Box::new(number(2, 1)),
                                                                    operator: BinaryOperator::Multiply,
                                                                    right:    Box::new(number(3, 1)),
                                                                    line:     1, }),
                                  line:     1, };
    assert_eq!(program.body, [Stmt::Expression { expr: expected }]);
}

#[test]
fn logical_operators_associate_right() {
    let program = parse_clean("a and b or c;");
    let expected = Expr::Logical { left:     Box::new(ident("a", 1)),
                                   operator: LogicalOperator::And,
                                   right:    Box::new(Expr::Logical { left:     Box::new(ident("b", 1)),
                                                                      operator: LogicalOperator::Or,
                                                                      right:    Box::new(ident("c", 1)),
                                                                      line:     1, }),
                                   line:     1, };
    assert_eq!(program.body, [Stmt::Expression { expr: expected }]);
}

#[test]
fn relational_operators_do_not_chain() {
    let parsed = parse("a < b < c; let ok = 1;");
    assert!(matches!(parsed.diagnostics[..],
                     [ParseError::Expected { expected: "';' after an expression", .. }]),
            "{:?}",
            parsed.diagnostics);
    assert_eq!(parsed.program.body.len(), 1);
    assert_eq!(parsed.program.body[0].kind(), NodeKind::VarDeclaration);
}

#[test]
fn assignment_is_right_associative_and_checked() {
    let program = parse_clean("a = b = 1;");
    let Stmt::Expression { expr: Expr::Assignment { assignee, value, .. } } = &program.body[0] else {
        panic!("expected an assignment, found {:?}", program.body[0]);
    };
    assert_eq!(**assignee, ident("a", 1));
    assert_eq!(value.kind(), NodeKind::AssignmentExpr);

    let parsed = parse("1 = 2;");
    assert_eq!(parsed.diagnostics,
               [ParseError::InvalidAssignmentTarget { found: NodeKind::NumericLiteral,
                                                      line:  1, }]);
}

#[test]
fn member_chains_and_calls() {
    let program = parse_clean("board.rows[1] = f(2, \"x\");");
    let Stmt::Expression { expr: Expr::Assignment { assignee, value, .. } } = &program.body[0] else {
        panic!("expected an assignment");
    };
    let expected_target =
        Expr::Member { object:   Box::new(Expr::Member { object:   Box::new(ident("board", 1)),
                                                         property: Box::new(ident("rows", 1)),
                                                         computed: false,
                                                         line:     1, }),
                       property: Box::new(number(1, 1)),
                       computed: true,
                       line:     1, };
    assert_eq!(**assignee, expected_target);
    assert_eq!(**value,
               Expr::Call { callee: Box::new(ident("f", 1)),
                            args:   vec![number(2, 1),
                                         Expr::StringLiteral { value: "x".to_string(),
                                                               line:  1, }],
                            line:   1, });
}

#[test]
fn dot_needs_an_identifier() {
    let parsed = parse("o.1;");
    assert_eq!(parsed.diagnostics,
               [ParseError::InvalidMemberProperty { found: NodeKind::NumericLiteral,
                                                    line:  1, }]);
}

#[test]
fn array_elements_must_share_a_kind() {
    let parsed = parse("let a = [1, \"x\"];");
    assert_eq!(parsed.diagnostics,
               [ParseError::MixedArrayElements { expected: NodeKind::NumericLiteral,
                                                 found:    NodeKind::StringLiteral,
                                                 line:     1, }]);
    assert!(parsed.program.body.is_empty());

    let program = parse_clean("let a = [1, 2, 3];");
    let Stmt::VarDeclaration { value: Some(Expr::ArrayLiteral { elements, element_kind, .. }), .. } =
        &program.body[0]
    else {
        panic!("expected an array literal");
    };
    assert_eq!(elements.len(), 3);
    assert_eq!(*element_kind, Some(NodeKind::NumericLiteral));

    let program = parse_clean("let empty = [];");
    let Stmt::VarDeclaration { value: Some(Expr::ArrayLiteral { element_kind, .. }), .. } = &program.body[0]
    else {
        panic!("expected an array literal");
    };
    assert_eq!(*element_kind, None);
}

#[test]
fn object_literals_allow_bare_keys() {
    let program = parse_clean("let o = { a: 1, b, c: \"x\", };");
    let Stmt::VarDeclaration { value: Some(Expr::ObjectLiteral { properties, .. }), .. } = &program.body[0]
    else {
        panic!("expected an object literal");
    };
    assert_eq!(properties.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(properties["b"], None);
    assert_eq!(properties["a"], Some(number(1, 1)));
}

#[test]
fn control_flow_statements() {
    let program = parse_clean("if (x) {\n  y;\n} else {\n  break;\n}\nwhile (true) { }");
    assert_eq!(program.body,
               [Stmt::If { test:       ident("x", 1),
                           consequent: Block { body: vec![Stmt::Expression { expr: ident("y", 2) }],
                                               line: 1, },
                           alternate:  Some(Block { body: vec![Stmt::Break { line: 4 }],
                                                    line: 3, }),
                           line:       1, },
                Stmt::While { test: ident("true", 6),
                              body: Block { body: Vec::new(),
                                            line: 6, },
                              line: 6, }]);
}

#[test]
fn recovery_keeps_the_rest_of_the_script() {
    let parsed = parse("let a = 1;\nlet = 2;\nlet b = ;\nlet c = 3;");
    assert_eq!(parsed.diagnostics.len(), 2);
    assert_eq!(parsed.diagnostics[0].line(), 2);
    assert_eq!(parsed.diagnostics[1].line(), 3);
    let names: Vec<_> = parsed.program
                              .body
                              .iter()
                              .filter_map(|s| match s {
                                  Stmt::VarDeclaration { name, .. } => Some(name.as_str()),
                                  _ => None,
                              })
                              .collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn recovery_inside_a_block_keeps_the_block() {
    let parsed = parse("while (true) { let = 1; f(; break; }\nlet after = 1;");
    assert_eq!(parsed.diagnostics.len(), 2);
    let [Stmt::While { body, .. }, Stmt::VarDeclaration { .. }] = &parsed.program.body[..] else {
        panic!("unexpected tree {:?}", parsed.program.body);
    };
    assert_eq!(body.body, [Stmt::Break { line: 1 }]);
}

#[test]
fn stray_tokens_are_skipped() {
    let parsed = parse("} else ) let x = 1;");
    assert!(!parsed.diagnostics.is_empty());
    assert_eq!(parsed.program.body.len(), 1);
}

#[test]
fn missing_closing_brace_is_reported() {
    let parsed = parse("if (true) { let x = 1;");
    assert!(matches!(parsed.diagnostics[..], [ParseError::Expected { expected: "'}' to end a block", .. }]));
    assert!(parsed.program.body.is_empty());
}

#[test]
fn lexer_diagnostics_are_included() {
    let parsed = parse("let s = \"open;");
    assert!(parsed.diagnostics.contains(&ParseError::UnterminatedString { line: 1 }));

    let parsed = parse("let n = 99999999999;");
    assert_eq!(parsed.diagnostics,
               [ParseError::LiteralTooLarge { literal: "99999999999".to_string(),
                                              line:    1, }]);
}

#[test]
fn nesting_depth_is_bounded() {
    let depth = 100;
    let src = format!("let x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let parsed = parse(&src);
    assert!(parsed.diagnostics
                  .iter()
                  .any(|d| matches!(d, ParseError::NestingTooDeep { limit: 64, .. })));
    assert!(parsed.program.body.is_empty());

    let src = format!("{}{}", "{ ".repeat(depth), "} ".repeat(depth));
    let parsed = parse(&src);
    assert!(parsed.diagnostics
                  .iter()
                  .any(|d| matches!(d, ParseError::NestingTooDeep { .. })));

    let shallow = format!("let x = {}1{};", "(".repeat(10), ")".repeat(10));
    parse_clean(&shallow);
}

#[test]
fn long_chains_count_against_the_nesting_limit() {
    let src = format!("let x = 1{};\nlet y = 2;", " + 1".repeat(4000));
    let parsed = parse(&src);
    assert_eq!(parsed.diagnostics.len(), 1);
    assert!(matches!(parsed.diagnostics[0], ParseError::NestingTooDeep { limit: 64, .. }));
    assert_eq!(parsed.program.body.len(), 1);
    assert!(parsed.program.to_json().is_ok());

    let src = format!("o{};", ".a".repeat(200));
    assert!(matches!(parse(&src).diagnostics[..], [ParseError::NestingTooDeep { .. }]));

    parse_clean(&format!("let x = 1{};", " * 2 + 3".repeat(20)));
    parse_clean(&format!("o{};", "[0].a".repeat(20)));
}

#[test]
fn unexpected_end_of_input() {
    let parsed = parse("let x = ");
    assert_eq!(parsed.diagnostics, [ParseError::UnexpectedEndOfInput { line: 1 }]);
}

#[test]
fn syntax_tree_serializes_to_json() {
    let program = parse_clean("let o = {a: [1]}; o.a[0] = o.a[0] + 1;");
    let json: serde_json::Value =
        serde_json::from_str(&program.to_json().expect("tree serializes")).expect("valid json");

    assert_eq!(json["type"], "program");
    assert_eq!(json["body"][0]["type"], "varDecl");
    assert_eq!(json["body"][0]["isConstant"], false);
    assert_eq!(json["body"][0]["value"]["type"], "objectLiteral");
    assert_eq!(json["body"][0]["value"]["properties"]["a"]["elementDataType"], "numericLiteral");
    assert_eq!(json["body"][1]["type"], "exprStmt");
    assert_eq!(json["body"][1]["expr"]["type"], "assignmentExpr");
    assert_eq!(json["body"][1]["expr"]["value"]["operator"], "+");
    assert_eq!(json["body"][1]["expr"]["assignee"]["computed"], true);
}
