use crate::ast::{ASTNode, Cursor, Operator};
use crate::error::{ParseError, ParseErrorKind};
use log::{debug, trace};

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Limit on the depth of the parsed tree: nested parentheses, unary
    /// minus signs and chained binary operators each add a level.
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Recursive-descent parser for the four-function expression grammar:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := '+' factor | '-' factor | variable | '{' index '}'
///             | '(' expression ')' | number
/// ```
///
/// Each parse owns its own cursor; the parser is never shared between parses.
pub struct ExpressionParser<'a> {
    cursor: Cursor<'a>,
    options: ParserOptions,
    depth: usize,
}

type ParseResult<T> = Result<T, ParseErrorKind>;

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str, options: ParserOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    pub fn parse_expression(input: &str) -> Result<ASTNode, ParseError> {
        Self::parse_with_options(input, ParserOptions::default())
    }

    pub fn parse_with_options(input: &str, options: ParserOptions) -> Result<ASTNode, ParseError> {
        debug!("Parsing expression: {}", input);
        let mut parser = ExpressionParser::new(input, options);

        let result = parser
            .build_expression()
            .and_then(|ast| parser.require_end_of_text().map(|_| ast));

        match result {
            Ok(ast) => {
                trace!("Parse result: {:?}", ast);
                Ok(ast)
            }
            Err(kind) => Err(ParseError::new(input, parser.cursor.position(), kind)),
        }
    }

    fn build_expression(&mut self) -> ParseResult<ASTNode> {
        self.build_chain(Self::build_term, |op| {
            matches!(op, Operator::Add | Operator::Subtract)
        })
    }

    fn build_term(&mut self) -> ParseResult<ASTNode> {
        self.build_chain(Self::build_factor, |op| {
            matches!(op, Operator::Multiply | Operator::Divide)
        })
    }

    /// Left-folds `operand (operator operand)*`. Every operator in the chain
    /// adds one level to the tree, so it is charged against the nesting limit
    /// like a parenthesis.
    fn build_chain(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<ASTNode>,
        accepts: fn(Operator) -> bool,
    ) -> ParseResult<ASTNode> {
        let base = self.depth;
        let result = self.fold_chain(operand, accepts);
        self.depth = base;
        result
    }

    fn fold_chain(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<ASTNode>,
        accepts: fn(Operator) -> bool,
    ) -> ParseResult<ASTNode> {
        let mut node = operand(self)?;

        loop {
            self.cursor.skip_whitespace();
            let operator = match self.cursor.peek().and_then(Operator::from_char) {
                Some(op) if accepts(op) => op,
                _ => return Ok(node),
            };
            if self.depth >= self.options.max_nesting_depth {
                return Err(ParseErrorKind::NestingTooDeep);
            }
            self.depth += 1;
            self.cursor.advance();
            let right = operand(self)?;
            node = ASTNode::binary(node, operator, right);
        }
    }

    fn build_factor(&mut self) -> ParseResult<ASTNode> {
        loop {
            self.cursor.skip_whitespace();
            let c = self.cursor.peek().ok_or(ParseErrorKind::UnexpectedEnd)?;

            let node = match c {
                // Unary plus is dropped.
                '+' => {
                    self.cursor.advance();
                    continue;
                }
                '-' => {
                    self.cursor.advance();
                    let operand = self.nested(Self::build_factor)?;
                    return Ok(ASTNode::negate(operand));
                }
                'x' | 'a' => self.build_alias(0),
                'y' | 'b' => self.build_alias(1),
                'z' | 'c' => self.build_alias(2),
                't' | 'd' => self.build_alias(3),
                '(' => {
                    self.cursor.advance();
                    let inner = self.nested(Self::build_expression)?;
                    self.cursor.skip_whitespace();
                    if !self.cursor.eat(')') {
                        return Err(ParseErrorKind::Expected(')'));
                    }
                    inner
                }
                '{' => self.build_parameter()?,
                _ => self.build_constant(c)?,
            };

            self.cursor.skip_whitespace();
            return Ok(node);
        }
    }

    fn nested(&mut self, rule: fn(&mut Self) -> ParseResult<ASTNode>) -> ParseResult<ASTNode> {
        if self.depth >= self.options.max_nesting_depth {
            return Err(ParseErrorKind::NestingTooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn build_alias(&mut self, index: usize) -> ASTNode {
        self.cursor.advance();
        ASTNode::Variable(index)
    }

    fn build_parameter(&mut self) -> ParseResult<ASTNode> {
        let open = self.cursor.position();
        self.cursor.advance();

        let end = match self.cursor.find('}') {
            Some(end) => end,
            None => {
                self.cursor.set_position(open);
                return Err(ParseErrorKind::UnmatchedBrace);
            }
        };
        let start = self.cursor.position();
        if end == start {
            return Err(ParseErrorKind::MissingParameterIndex);
        }

        let raw = self.cursor.take_until(end).trim();
        let index = match raw.parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                self.cursor.set_position(start);
                return Err(ParseErrorKind::InvalidParameterIndex(raw.to_string()));
            }
        };
        self.cursor.eat('}');
        Ok(ASTNode::Variable(index))
    }

    fn build_constant(&mut self, c: char) -> ParseResult<ASTNode> {
        let literal = self
            .cursor
            .match_numeric_literal()
            .ok_or(ParseErrorKind::UnexpectedChar(c))?;
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(ASTNode::Constant(value)),
            _ => Err(ParseErrorKind::InvalidNumber(literal.to_string())),
        }
    }

    fn require_end_of_text(&mut self) -> ParseResult<()> {
        match self.cursor.peek() {
            None => Ok(()),
            Some(c) => Err(ParseErrorKind::UnexpectedChar(c)),
        }
    }
}
