//! Common SQL function constructors.
//!
//! Names are emitted uppercase; use [`Function::new`] for anything else
//! (ClickHouse's camel-case functions, for instance).

use crate::term::{Function, Term};

pub fn sum(term: impl Into<Term>) -> Function {
    Function::new("SUM", [term.into()])
}

pub fn count(term: impl Into<Term>) -> Function {
    Function::new("COUNT", [term.into()])
}

/// `COUNT(*)`
pub fn count_star() -> Function {
    Function::new("COUNT", [Term::star()])
}

pub fn avg(term: impl Into<Term>) -> Function {
    Function::new("AVG", [term.into()])
}

pub fn min(term: impl Into<Term>) -> Function {
    Function::new("MIN", [term.into()])
}

pub fn max(term: impl Into<Term>) -> Function {
    Function::new("MAX", [term.into()])
}

/// `COALESCE(a,b,...)`
pub fn coalesce<I, T>(terms: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Function::new("COALESCE", terms)
}

pub fn lower(term: impl Into<Term>) -> Function {
    Function::new("LOWER", [term.into()])
}

pub fn upper(term: impl Into<Term>) -> Function {
    Function::new("UPPER", [term.into()])
}

/// `CONCAT(a,b,...)`
pub fn concat<I, T>(terms: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Function::new("CONCAT", terms)
}

/// `NOW()`
pub fn now() -> Function {
    Function::new("NOW", Vec::<Term>::new())
}
