use crate::interpreter::context::Context;
use crate::interpreter::error::EvaluationError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::syntax_visitor::{walk, SyntaxVisitor};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::mem;

/// Nodes nested deeper than this are collapsed when the tree is drawn.
const DIAGRAM_DEPTH: usize = 64;

/// An arithmetic expression tree.
///
/// Every node exclusively owns its children, and a tree is never changed once built,
/// so the same tree can be evaluated any number of times. Traversal, comparison and
/// dropping use explicit stacks, so the depth of a tree is only bounded by memory.
pub enum Expression {
    // Terminal symbols (leaves)
    Number(f64),
    Variable(String),
    // Non-terminal symbols (non-leaves)
    Add {
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
    Subtract {
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
    Multiply {
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
    Divide {
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
}

enum Step<'a> {
    Evaluate(&'a Expression),
    Apply(BinaryOperator),
}

impl Expression {
    pub fn new_number(value: f64) -> Expression {
        Expression::Number(value)
    }

    pub fn new_variable(name: impl Into<String>) -> Expression {
        Expression::Variable(name.into())
    }

    pub fn new_binary(
        operator: BinaryOperator,
        left_operand: Expression,
        right_operand: Expression,
    ) -> Expression {
        let left_operand = Box::new(left_operand);
        let right_operand = Box::new(right_operand);
        match operator {
            BinaryOperator::Add => Expression::Add {
                left_operand,
                right_operand,
            },
            BinaryOperator::Subtract => Expression::Subtract {
                left_operand,
                right_operand,
            },
            BinaryOperator::Multiply => Expression::Multiply {
                left_operand,
                right_operand,
            },
            BinaryOperator::Divide => Expression::Divide {
                left_operand,
                right_operand,
            },
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        self.as_binary_operation().map(|(operator, _, _)| operator)
    }

    /// The operator and operands of a non-leaf node.
    pub fn as_binary_operation(&self) -> Option<(BinaryOperator, &Expression, &Expression)> {
        match self {
            Expression::Number(_) | Expression::Variable(_) => None,
            Expression::Add {
                left_operand,
                right_operand,
            } => Some((
                BinaryOperator::Add,
                left_operand.as_ref(),
                right_operand.as_ref(),
            )),
            Expression::Subtract {
                left_operand,
                right_operand,
            } => Some((
                BinaryOperator::Subtract,
                left_operand.as_ref(),
                right_operand.as_ref(),
            )),
            Expression::Multiply {
                left_operand,
                right_operand,
            } => Some((
                BinaryOperator::Multiply,
                left_operand.as_ref(),
                right_operand.as_ref(),
            )),
            Expression::Divide {
                left_operand,
                right_operand,
            } => Some((
                BinaryOperator::Divide,
                left_operand.as_ref(),
                right_operand.as_ref(),
            )),
        }
    }

    /// Number of literal and variable leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        let mut visitor = LeafCountVisitor { leaves: 0 };
        walk(self, &mut visitor);
        visitor.leaves
    }

    /// Computes the value of the expression, resolving variables through `context`.
    ///
    /// Operands are evaluated left to right. A division whose right operand evaluates
    /// to exactly zero fails with [`EvaluationError::DivisionByZero`] and aborts the
    /// whole evaluation.
    ///
    /// # Examples
    ///
    /// ```
    /// use postfix_calculator::interpreter::context::Context;
    /// use postfix_calculator::interpreter::operator::BinaryOperator;
    /// use postfix_calculator::interpreter::syntax::expression_tree::Expression;
    ///
    /// let tree = Expression::new_binary(
    ///     BinaryOperator::Multiply,
    ///     Expression::new_variable("x"),
    ///     Expression::new_number(5.0),
    /// );
    /// let mut context = Context::new();
    /// assert_eq!(tree.evaluate(&context), Ok(0.0));
    ///
    /// context.set("x", 2.0);
    /// assert_eq!(tree.evaluate(&context), Ok(10.0));
    /// ```
    pub fn evaluate(&self, context: &Context) -> Result<f64, EvaluationError> {
        let mut steps = vec![Step::Evaluate(self)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Evaluate(Expression::Number(value)) => values.push(*value),
                Step::Evaluate(Expression::Variable(name)) => values.push(context.get(name)),
                Step::Evaluate(node) => {
                    if let Some((operator, left_operand, right_operand)) =
                        node.as_binary_operation()
                    {
                        steps.push(Step::Apply(operator));
                        steps.push(Step::Evaluate(right_operand));
                        steps.push(Step::Evaluate(left_operand));
                    }
                }
                Step::Apply(operator) => {
                    let right_operand = values.pop();
                    let left_operand = values.pop();
                    match (left_operand, right_operand) {
                        (Some(left_operand), Some(right_operand)) => {
                            values.push(operator.apply(left_operand, right_operand)?)
                        }
                        _ => unreachable!("operands of '{}' are evaluated first", operator),
                    }
                }
            }
        }

        Ok(values
            .pop()
            .unwrap_or_else(|| unreachable!("every tree evaluates to a value")))
    }

    /// Moves both children out of a non-leaf node, leaving leaves in their place.
    fn detach_operands(&mut self, detached: &mut Vec<Expression>) {
        match self {
            Expression::Number(_) | Expression::Variable(_) => {}
            Expression::Add {
                left_operand,
                right_operand,
            }
            | Expression::Subtract {
                left_operand,
                right_operand,
            }
            | Expression::Multiply {
                left_operand,
                right_operand,
            }
            | Expression::Divide {
                left_operand,
                right_operand,
            } => {
                detached.push(mem::replace(&mut **left_operand, Expression::Number(0.0)));
                detached.push(mem::replace(&mut **right_operand, Expression::Number(0.0)));
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
            depth: 0,
        };
        walk(self, &mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        if write_tree(&visitor.builder.build(), &mut buffer).is_err() {
            return Err(fmt::Error);
        }
        let text = std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_operands(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_operands(&mut detached);
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Expression::Number(value1), Expression::Number(value2)) => {
                    if value1 != value2 {
                        return false;
                    }
                }
                (Expression::Variable(name1), Expression::Variable(name2)) => {
                    if name1 != name2 {
                        return false;
                    }
                }
                (node1, node2) => match (node1.as_binary_operation(), node2.as_binary_operation())
                {
                    (Some((operator1, left1, right1)), Some((operator2, left2, right2)))
                        if operator1 == operator2 =>
                    {
                        pending.push((right1, right2));
                        pending.push((left1, left2));
                    }
                    _ => return false, // node1 and node2 are different variants
                },
            }
        }
        true
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{:?}", value),
            Expression::Variable(name) => write!(f, "{:?}", name),
            node => match node.as_binary_operator() {
                Some(operator) => write!(f, "{:?}", operator),
                None => Ok(()),
            },
        }
    }
}

struct LeafCountVisitor {
    leaves: usize,
}

impl SyntaxVisitor for LeafCountVisitor {
    fn visit_number(&mut self, _value: f64) {
        self.leaves += 1;
    }
    fn visit_variable(&mut self, _name: &str) {
        self.leaves += 1;
    }
}

/// Builds the diagram. `depth` counts the binary operations enclosing the current node;
/// anything below `DIAGRAM_DEPTH` of them is drawn as a single "..." entry.
struct TreeBuilderVisitor {
    builder: TreeBuilder,
    depth: usize,
}

impl TreeBuilderVisitor {
    fn add_leaf(&mut self, text: String) {
        if self.depth <= DIAGRAM_DEPTH {
            self.builder.add_empty_child(text);
        }
    }
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_number(&mut self, value: f64) {
        self.add_leaf(format!("{}", value));
    }
    fn visit_variable(&mut self, name: &str) {
        self.add_leaf(name.to_string());
    }
    fn enter_binary_operation(&mut self, operator: BinaryOperator) {
        if self.depth < DIAGRAM_DEPTH {
            self.builder.begin_child(format!("{}", operator));
        } else if self.depth == DIAGRAM_DEPTH {
            self.builder.add_empty_child("...".to_string());
        }
        self.depth += 1;
    }
    fn exit_binary_operation(&mut self, _operator: BinaryOperator) {
        self.depth -= 1;
        if self.depth < DIAGRAM_DEPTH {
            self.builder.end_child();
        }
    }
}
