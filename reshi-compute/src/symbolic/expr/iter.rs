use super::{Primary, SymExpr};

/// Returns the children of the given expression, in left-to-right order.
fn children(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Primary(Primary::Call(_, args)) => args,
        SymExpr::Primary(_) | SymExpr::Exp(..) => &[],
        SymExpr::Add(terms) => terms,
        SymExpr::Mul(factors) => factors,
    }
}

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). The arguments of function calls are visited before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a SymExpr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            if let SymExpr::Exp(lhs, rhs) = expr {
                if self.is_last_visited(rhs) {
                    return self.visit();
                }
                self.stack.push(rhs);
                self.stack.push(lhs);
                continue;
            }

            match children(expr).last() {
                Some(last) if !self.is_last_visited(last) => {
                    for child in children(expr).iter().rev() {
                        self.stack.push(child);
                    }
                },
                _ => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reshi_parser::symbols::Func;
    use super::*;

    #[test]
    fn visits_children_first() {
        // sin(x) + 2^x
        let expr = SymExpr::Add(vec![
            SymExpr::call(Func::Sin, vec![SymExpr::symbol("x")]),
            SymExpr::number(2).pow(SymExpr::symbol("x")),
        ]);

        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "sin(x)", "2", "x", "2^x", "sin(x) + 2^x"]);
    }
}
