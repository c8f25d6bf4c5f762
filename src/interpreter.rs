/// The environment module holds variable bindings.
///
/// Scopes nest strictly: a child scope is pushed when a block or loop body
/// starts and popped when it ends. The root scope is seeded with the
/// boolean and null constants and every native function.
///
/// # Responsibilities
/// - Declares names in the current scope and rejects redeclaration.
/// - Resolves assignment and lookup through the scope chain.
/// - Marks and enforces constants.
pub mod environment;
/// The evaluator module executes syntax tree nodes and computes results.
///
/// The evaluator walks the tree, runs statements and expressions against an
/// environment, and calls out to the pad hardware through native functions.
///
/// # Responsibilities
/// - Evaluates every node kind, including break propagation.
/// - Implements member reads and the clone-and-rebind member writes.
/// - Reports fatal runtime errors such as division by zero or type
///   mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw script bytes and produces a queue of tokens, each
/// with its kind, lexeme and source line. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input into tokens, matching two-character operators
///   greedily.
/// - Folds a directly attached `-` into negative numeric literals.
/// - Reports unrecognized characters and unterminated strings without
///   stopping.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser consumes the token queue and constructs the `Program` tree.
/// Malformed statements are reported and skipped so the rest of the script
/// still parses.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions by recursive descent.
/// - Enforces array homogeneity and valid assignment targets.
/// - Bounds nesting depth.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are copied, never shared: objects and arrays clone deeply whenever
/// they are declared, assigned or looked up.
pub mod value;
