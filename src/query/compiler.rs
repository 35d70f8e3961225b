use super::types::{AttributeClause, CompoundClause, SearchQuery};
use std::fmt;

/// Renders a query in the service's wire grammar.
///
/// `book.title:Dune` for a single clause, and for a compound one the operator
/// is glued between the two clauses with no separator:
/// `book.title:DuneANDbook.author:Herbert`. Nothing is escaped.
pub fn compile(query: &SearchQuery) -> String {
    match query {
        SearchQuery::Single(clause) => compile_clause(clause),
        SearchQuery::Compound(compound) => compile_compound(compound),
    }
}

pub fn compile_clause(clause: &AttributeClause) -> String {
    format!(
        "{}.{}:{}",
        clause.kind().as_str(),
        clause.field.as_str(),
        clause.value
    )
}

pub fn compile_compound(compound: &CompoundClause) -> String {
    let mut compiled = compile_clause(compound.left());
    compiled.push_str(compound.operator().as_str());
    compiled.push_str(&compile_clause(compound.right()));
    compiled
}

impl fmt::Display for AttributeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compile_clause(self))
    }
}

impl fmt::Display for CompoundClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compile_compound(self))
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compile(self))
    }
}
