//! Tokenizer and recursive-descent parser.

use super::ParseError;

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl BinaryOp {
    /// Apply the operator.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }

    /// Operator symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// Unresolved syntax tree of one equation line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTree {
    /// Numeric literal.
    Number(f64),
    /// Variable or constant name.
    Ident(String),
    /// Unary minus.
    Neg(Box<ParseTree>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<ParseTree>,
        /// Right operand.
        rhs: Box<ParseTree>,
    },
    /// Function application.
    Call {
        /// Function name as written.
        name: String,
        /// Single argument.
        arg: Box<ParseTree>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(BinaryOp),
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Op(op) => op.symbol().to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        match c {
            _ if c.is_whitespace() => {
                i += 1;
                continue;
            },
            '+' => tokens.push((Token::Op(BinaryOp::Add), start)),
            '-' => tokens.push((Token::Op(BinaryOp::Sub), start)),
            '*' => tokens.push((Token::Op(BinaryOp::Mul), start)),
            '/' => tokens.push((Token::Op(BinaryOp::Div), start)),
            '^' => tokens.push((Token::Op(BinaryOp::Pow), start)),
            '(' => tokens.push((Token::LParen, start)),
            ')' => tokens.push((Token::RParen, start)),
            _ if c.is_ascii_digit() || c == '.' => {
                i = scan_number(&chars, i);
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    pos: start,
                })?;
                tokens.push((Token::Number(value), start));
                continue;
            },
            _ if c.is_alphabetic() || c == '_' => {
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push((Token::Ident(name), start));
                continue;
            },
            _ => return Err(ParseError::UnexpectedChar { ch: c, pos: start }),
        }
        i += 1;
    }

    Ok(tokens)
}

/// Returns the index one past the end of the number starting at `i`.
fn scan_number(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }
    // Exponent only when digits follow, so `2e` stays number + constant.
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

/// Deepest nesting a line may reach, counting groups, unary signs,
/// exponents and chained operators.
pub const MAX_DEPTH: usize = 256;

/// A subtree and its depth.
type Parsed = (ParseTree, usize);

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    /// Character position of the current token, or of the last one.
    fn here(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |(_, pos)| *pos)
    }

    fn peek_op(&self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => Some(*op),
            _ => None,
        }
    }

    /// Run `step` one level deeper, refusing to pass `MAX_DEPTH`.
    fn nested(
        &mut self,
        step: fn(&mut Self) -> Result<Parsed, ParseError>,
    ) -> Result<Parsed, ParseError> {
        if self.nesting >= MAX_DEPTH {
            return Err(ParseError::TooDeep { pos: self.here() });
        }
        self.nesting += 1;
        let result = step(self);
        self.nesting -= 1;
        result
    }

    fn expr(&mut self) -> Result<Parsed, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek_op(&[BinaryOp::Add, BinaryOp::Sub]) {
            let at = self.here();
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs, at)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Parsed, ParseError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek_op(&[BinaryOp::Mul, BinaryOp::Div]) {
            let at = self.here();
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs, at)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Parsed, ParseError> {
        match self.peek_op(&[BinaryOp::Add, BinaryOp::Sub]) {
            Some(BinaryOp::Sub) => {
                let at = self.here();
                self.pos += 1;
                let (inner, depth) = self.nested(Self::unary)?;
                wrap(ParseTree::Neg(Box::new(inner)), depth, at)
            },
            Some(_) => {
                self.pos += 1;
                self.nested(Self::unary)
            },
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Parsed, ParseError> {
        let base = self.atom()?;
        if self.peek_op(&[BinaryOp::Pow]).is_some() {
            let at = self.here();
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return binary(BinaryOp::Pow, base, exponent, at);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Parsed, ParseError> {
        let (token, pos) = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        match token {
            Token::Number(n) => Ok((ParseTree::Number(n), 1)),
            Token::Ident(name) => {
                if self.peek() == Some(&Token::LParen) {
                    let open = self.tokens[self.pos].1;
                    self.pos += 1;
                    let (arg, depth) = self.closed_group(open)?;
                    wrap(
                        ParseTree::Call {
                            name,
                            arg: Box::new(arg),
                        },
                        depth,
                        pos,
                    )
                } else {
                    Ok((ParseTree::Ident(name), 1))
                }
            },
            Token::LParen => self.closed_group(pos),
            Token::RParen => Err(ParseError::UnmatchedParen { pos }),
            other => Err(ParseError::UnexpectedToken {
                found: other.describe(),
                pos,
            }),
        }
    }

    /// Parses the inside of a group whose `(` sits at `open`, plus the `)`.
    fn closed_group(&mut self, open: usize) -> Result<Parsed, ParseError> {
        if self.peek().is_none() {
            return Err(ParseError::UnmatchedParen { pos: open });
        }
        let inner = self.nested(Self::expr)?;
        match self.advance() {
            Some((Token::RParen, _)) => Ok(inner),
            Some((other, pos)) => Err(ParseError::UnexpectedToken {
                found: other.describe(),
                pos,
            }),
            None => Err(ParseError::UnmatchedParen { pos: open }),
        }
    }
}

/// Put `tree` one level above a child of depth `depth`.
fn wrap(tree: ParseTree, depth: usize, pos: usize) -> Result<Parsed, ParseError> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::TooDeep { pos });
    }
    Ok((tree, depth + 1))
}

fn binary(op: BinaryOp, lhs: Parsed, rhs: Parsed, pos: usize) -> Result<Parsed, ParseError> {
    let tree = ParseTree::Binary {
        op,
        lhs: Box::new(lhs.0),
        rhs: Box::new(rhs.0),
    };
    wrap(tree, lhs.1.max(rhs.1), pos)
}

/// Parse one equation line.
pub fn parse(input: &str) -> Result<ParseTree, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let (tree, _) = parser.expr()?;

    match parser.advance() {
        None => Ok(tree),
        Some((Token::RParen, pos)) => Err(ParseError::UnmatchedParen { pos }),
        Some((other, pos)) => Err(ParseError::UnexpectedToken {
            found: other.describe(),
            pos,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<ParseTree> {
        Box::new(ParseTree::Number(n))
    }

    fn ident(name: &str) -> Box<ParseTree> {
        Box::new(ParseTree::Ident(name.to_string()))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1 + 2 * x").unwrap(),
            ParseTree::Binary {
                op: BinaryOp::Add,
                lhs: num(1.0),
                rhs: Box::new(ParseTree::Binary {
                    op: BinaryOp::Mul,
                    lhs: num(2.0),
                    rhs: ident("x"),
                }),
            }
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            parse("x - 1 - 2").unwrap(),
            ParseTree::Binary {
                op: BinaryOp::Sub,
                lhs: Box::new(ParseTree::Binary {
                    op: BinaryOp::Sub,
                    lhs: ident("x"),
                    rhs: num(1.0),
                }),
                rhs: num(2.0),
            }
        );
    }

    #[test]
    fn power_is_right_associative_and_beats_unary_minus() {
        assert_eq!(
            parse("-x^2^3").unwrap(),
            ParseTree::Neg(Box::new(ParseTree::Binary {
                op: BinaryOp::Pow,
                lhs: ident("x"),
                rhs: Box::new(ParseTree::Binary {
                    op: BinaryOp::Pow,
                    lhs: num(2.0),
                    rhs: num(3.0),
                }),
            }))
        );
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(
            parse("x^-1").unwrap(),
            ParseTree::Binary {
                op: BinaryOp::Pow,
                lhs: ident("x"),
                rhs: Box::new(ParseTree::Neg(num(1.0))),
            }
        );
    }

    #[test]
    fn function_calls_and_groups() {
        assert_eq!(
            parse("sin((x))").unwrap(),
            ParseTree::Call {
                name: "sin".to_string(),
                arg: ident("x"),
            }
        );
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(parse("1.5e3").unwrap(), ParseTree::Number(1500.0));
        assert_eq!(parse("2E-1").unwrap(), ParseTree::Number(0.2));
        assert_eq!(parse(".5").unwrap(), ParseTree::Number(0.5));
    }

    #[test]
    fn number_followed_by_e_is_not_an_exponent() {
        assert_eq!(
            parse("2e").unwrap_err(),
            ParseError::UnexpectedToken {
                found: "e".to_string(),
                pos: 1
            }
        );
    }

    #[test]
    fn unmatched_parentheses() {
        assert_eq!(
            parse("sin(x").unwrap_err(),
            ParseError::UnmatchedParen { pos: 3 }
        );
        assert_eq!(
            parse("x + 1)").unwrap_err(),
            ParseError::UnmatchedParen { pos: 5 }
        );
        assert_eq!(parse("(").unwrap_err(), ParseError::UnmatchedParen { pos: 0 });
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse("   ").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("x +").unwrap_err(), ParseError::UnexpectedEnd);
        assert_eq!(
            parse("x $ 2").unwrap_err(),
            ParseError::UnexpectedChar { ch: '$', pos: 2 }
        );
        assert_eq!(
            parse("1.2.3").unwrap_err(),
            ParseError::InvalidNumber {
                text: "1.2.3".to_string(),
                pos: 0
            }
        );
        assert_eq!(
            parse("2 x").unwrap_err(),
            ParseError::UnexpectedToken {
                found: "x".to_string(),
                pos: 2
            }
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let deep = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse(&deep), Err(ParseError::TooDeep { .. })));

        let signs = format!("{}x", "-".repeat(100_000));
        assert!(matches!(parse(&signs), Err(ParseError::TooDeep { .. })));

        let powers = vec!["x"; 10_000].join("^");
        assert!(matches!(parse(&powers), Err(ParseError::TooDeep { .. })));

        let nested = format!("{}x{}", "sin(".repeat(100), ")".repeat(100));
        assert!(parse(&nested).is_ok());
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let sum = vec!["x"; 100_000].join(" + ");
        assert!(matches!(parse(&sum), Err(ParseError::TooDeep { .. })));

        let product = vec!["x"; 100].join(" * ");
        assert!(parse(&product).is_ok());
    }
}
