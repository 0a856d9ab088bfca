//! Polynomial expressions over variables, used to describe gate constraints.
//!
//! An [Expr] is a small tree built from field constants, cell references
//! ([Var]) and the ring operations. Gate constraints are written with
//! relative variables (`Var::witness_rel(i, 0)` for the current row, `1` for
//! the next one) and are asserted to vanish at every row where the gate's
//! selector is enabled.

use ark_ff::Field;
use std::{
    fmt::{Display, Formatter, Result},
    ops::{Add, Mul, Neg, Sub},
};

use crate::var::Var;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<F> {
    Constant(F),
    Cell(Var),
    Add(Box<Expr<F>>, Box<Expr<F>>),
    Sub(Box<Expr<F>>, Box<Expr<F>>),
    Mul(Box<Expr<F>>, Box<Expr<F>>),
    Neg(Box<Expr<F>>),
}

impl<F: Field> Expr<F> {
    pub fn constant(value: F) -> Self {
        Expr::Constant(value)
    }

    pub fn cell(var: Var) -> Self {
        Expr::Cell(var)
    }

    /// Degree of the expression as a polynomial in the cells it reads.
    pub fn degree(&self) -> u64 {
        match self {
            Expr::Constant(_) => 0,
            Expr::Cell(_) => 1,
            Expr::Add(x, y) | Expr::Sub(x, y) => std::cmp::max(x.degree(), y.degree()),
            Expr::Mul(x, y) => x.degree() + y.degree(),
            Expr::Neg(x) => x.degree(),
        }
    }

    /// Every cell referenced by the expression, in left-to-right order.
    /// Cells read several times are listed several times.
    pub fn cells(&self) -> Vec<Var> {
        let mut acc = vec![];
        self.collect_cells(&mut acc);
        acc
    }

    fn collect_cells(&self, acc: &mut Vec<Var>) {
        match self {
            Expr::Constant(_) => (),
            Expr::Cell(v) => acc.push(*v),
            Expr::Add(x, y) | Expr::Sub(x, y) | Expr::Mul(x, y) => {
                x.collect_cells(acc);
                y.collect_cells(acc);
            }
            Expr::Neg(x) => x.collect_cells(acc),
        }
    }

    /// Evaluate the expression, reading cells through `eval`.
    ///
    /// Returns `None` as soon as `eval` cannot provide the value of a cell.
    pub fn evaluate<G: Fn(Var) -> Option<F>>(&self, eval: &G) -> Option<F> {
        match self {
            Expr::Constant(c) => Some(*c),
            Expr::Cell(v) => eval(*v),
            Expr::Add(x, y) => Some(x.evaluate(eval)? + y.evaluate(eval)?),
            Expr::Sub(x, y) => Some(x.evaluate(eval)? - y.evaluate(eval)?),
            Expr::Mul(x, y) => Some(x.evaluate(eval)? * y.evaluate(eval)?),
            Expr::Neg(x) => Some(-x.evaluate(eval)?),
        }
    }
}

impl<F> From<Var> for Expr<F> {
    fn from(var: Var) -> Self {
        Expr::Cell(var)
    }
}

impl<F> Add<Expr<F>> for Expr<F> {
    type Output = Expr<F>;

    fn add(self, other: Self) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }
}

impl<F> Sub<Expr<F>> for Expr<F> {
    type Output = Expr<F>;

    fn sub(self, other: Self) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }
}

impl<F> Mul<Expr<F>> for Expr<F> {
    type Output = Expr<F>;

    fn mul(self, other: Self) -> Self {
        Expr::Mul(Box::new(self), Box::new(other))
    }
}

impl<F> Neg for Expr<F> {
    type Output = Expr<F>;

    fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }
}

impl<F: Field> Display for Expr<F> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Constant(c) => write!(f, "{c}"),
            Expr::Cell(v) => write!(f, "{v}"),
            Expr::Add(x, y) => write!(f, "({x} + {y})"),
            Expr::Sub(x, y) => write!(f, "({x} - {y})"),
            Expr::Mul(x, y) => write!(f, "{x} * {y}"),
            Expr::Neg(x) => write!(f, "-{x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{One, Zero};

    fn w(i: usize, offset: i32) -> Expr<Fr> {
        Var::witness_rel(i, offset).into()
    }

    #[test]
    fn test_degree() {
        let e = w(0, 0) * w(1, 0) - w(2, 0);
        assert_eq!(e.degree(), 2);
        let e = (w(0, 0) + Expr::constant(Fr::one())) * w(0, 1) * w(0, 1);
        assert_eq!(e.degree(), 3);
        assert_eq!(Expr::<Fr>::constant(Fr::zero()).degree(), 0);
    }

    #[test]
    fn test_evaluate() {
        let e = w(0, 0) * w(1, 0) - w(2, 0) + Expr::constant(Fr::from(4u64));
        let values = [Fr::from(3u64), Fr::from(5u64), Fr::from(15u64)];
        let res = e.evaluate(&|v: Var| Some(values[v.index]));
        assert_eq!(res, Some(Fr::from(4u64)));
        assert_eq!((-e).evaluate(&|_| None), None);
    }

    #[test]
    fn test_cells_in_order() {
        let e = w(2, 0) - (w(0, -1) + w(1, 0));
        assert_eq!(
            e.cells(),
            vec![
                Var::witness_rel(2, 0),
                Var::witness_rel(0, -1),
                Var::witness_rel(1, 0)
            ]
        );
    }

    #[test]
    fn test_display() {
        let e = w(0, 0) + w(1, 1) - w(2, 0);
        assert_eq!(e.to_string(), "((w[0] + w[1]@+1) - w[2])");
    }
}
