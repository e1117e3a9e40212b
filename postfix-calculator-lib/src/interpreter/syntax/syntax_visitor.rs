use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Expression;

/// Receives the nodes of a tree in pre-order. Every binary operation is announced
/// when it is entered and again once both of its operands have been visited.
pub(crate) trait SyntaxVisitor {
    fn visit_number(&mut self, _value: f64) {}
    fn visit_variable(&mut self, _name: &str) {}
    fn enter_binary_operation(&mut self, _operator: BinaryOperator) {}
    fn exit_binary_operation(&mut self, _operator: BinaryOperator) {}
}

enum Visit<'a> {
    Enter(&'a Expression),
    Exit(BinaryOperator),
}

/// Walks the whole tree with an explicit stack, so arbitrarily deep trees are fine.
pub(crate) fn walk(root: &Expression, visitor: &mut impl SyntaxVisitor) {
    let mut pending = vec![Visit::Enter(root)];

    while let Some(visit) = pending.pop() {
        match visit {
            Visit::Exit(operator) => visitor.exit_binary_operation(operator),
            Visit::Enter(Expression::Number(value)) => visitor.visit_number(*value),
            Visit::Enter(Expression::Variable(name)) => visitor.visit_variable(name),
            Visit::Enter(node) => {
                if let Some((operator, left_operand, right_operand)) = node.as_binary_operation()
                {
                    visitor.enter_binary_operation(operator);
                    pending.push(Visit::Exit(operator));
                    pending.push(Visit::Enter(right_operand));
                    pending.push(Visit::Enter(left_operand));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_complex_tree() -> Expression {
        let a = Expression::new_variable("a");
        let b = Expression::new_variable("b");
        let two = Expression::new_number(2.0);
        let d = Expression::new_variable("d");
        let plus = Expression::new_binary(BinaryOperator::Add, b, two);
        let star = Expression::new_binary(BinaryOperator::Multiply, plus, d);
        Expression::new_binary(BinaryOperator::Subtract, a, star)
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_number(&mut self, value: f64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_variable(&mut self, name: &str) {
            self.prints.push(name.to_string())
        }
        fn enter_binary_operation(&mut self, operator: BinaryOperator) {
            self.prints.push(format!("{:?}", operator));
        }
        fn exit_binary_operation(&mut self, operator: BinaryOperator) {
            self.prints.push(format!("exit {:?}", operator));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        walk(&root, &mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Subtract",
                "a",
                "Multiply",
                "Add",
                "b",
                "2",
                "exit Add",
                "d",
                "exit Multiply",
                "exit Subtract",
            ]
        )
    }
}
