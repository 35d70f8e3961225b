//! Query Data Types
//!
//! The closed attribute vocabularies of the catalog and the clause structures
//! built from them. A field always carries its object kind, so a clause cannot
//! pair a book attribute with the author object.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOOK_ATTRIBUTES: [&str; 11] = [
    "book_id",
    "title",
    "book_url",
    "ISBN",
    "author_url",
    "author",
    "rating",
    "rating_count",
    "review_count",
    "image_url",
    "similar_books",
];

pub const AUTHOR_ATTRIBUTES: [&str; 9] = [
    "author_id",
    "name",
    "author_url",
    "rating",
    "rating_count",
    "review_count",
    "image_url",
    "related_authors",
    "author_books",
];

/// The attribute every ranking is computed over.
pub const SCORE_FIELD: &str = "rating";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Book,
    Author,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Book, ObjectKind::Author];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Book => "book",
            ObjectKind::Author => "author",
        }
    }

    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            ObjectKind::Book => &BOOK_ATTRIBUTES,
            ObjectKind::Author => &AUTHOR_ATTRIBUTES,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains(&name)
    }

    /// Kind targeted by a compiled query string: the text before the first `.`.
    pub fn of_query(query: &str) -> Result<Self> {
        let (object, _) = query
            .split_once('.')
            .ok_or_else(|| CatalogError::UnknownKind(query.to_string()))?;
        match object {
            "book" => Ok(ObjectKind::Book),
            "author" => Ok(ObjectKind::Author),
            _ => Err(CatalogError::UnknownKind(object.to_string())),
        }
    }

    /// `book_id` for books, `author_id` for authors.
    pub fn identifier_field(&self) -> FieldSelector {
        match self {
            ObjectKind::Book => FieldSelector::Book(BookField::BookId),
            ObjectKind::Author => FieldSelector::Author(AuthorField::AuthorId),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(ObjectKind::Book),
            "author" => Ok(ObjectKind::Author),
            _ => Err(CatalogError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    BookId,
    Title,
    BookUrl,
    Isbn,
    AuthorUrl,
    Author,
    Rating,
    RatingCount,
    ReviewCount,
    ImageUrl,
    SimilarBooks,
}

impl BookField {
    pub const ALL: [BookField; 11] = [
        BookField::BookId,
        BookField::Title,
        BookField::BookUrl,
        BookField::Isbn,
        BookField::AuthorUrl,
        BookField::Author,
        BookField::Rating,
        BookField::RatingCount,
        BookField::ReviewCount,
        BookField::ImageUrl,
        BookField::SimilarBooks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookField::BookId => "book_id",
            BookField::Title => "title",
            BookField::BookUrl => "book_url",
            BookField::Isbn => "ISBN",
            BookField::AuthorUrl => "author_url",
            BookField::Author => "author",
            BookField::Rating => "rating",
            BookField::RatingCount => "rating_count",
            BookField::ReviewCount => "review_count",
            BookField::ImageUrl => "image_url",
            BookField::SimilarBooks => "similar_books",
        }
    }
}

impl FromStr for BookField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        BookField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownField {
                kind: ObjectKind::Book,
                field: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorField {
    AuthorId,
    Name,
    AuthorUrl,
    Rating,
    RatingCount,
    ReviewCount,
    ImageUrl,
    RelatedAuthors,
    AuthorBooks,
}

impl AuthorField {
    pub const ALL: [AuthorField; 9] = [
        AuthorField::AuthorId,
        AuthorField::Name,
        AuthorField::AuthorUrl,
        AuthorField::Rating,
        AuthorField::RatingCount,
        AuthorField::ReviewCount,
        AuthorField::ImageUrl,
        AuthorField::RelatedAuthors,
        AuthorField::AuthorBooks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorField::AuthorId => "author_id",
            AuthorField::Name => "name",
            AuthorField::AuthorUrl => "author_url",
            AuthorField::Rating => "rating",
            AuthorField::RatingCount => "rating_count",
            AuthorField::ReviewCount => "review_count",
            AuthorField::ImageUrl => "image_url",
            AuthorField::RelatedAuthors => "related_authors",
            AuthorField::AuthorBooks => "author_books",
        }
    }
}

impl FromStr for AuthorField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        AuthorField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownField {
                kind: ObjectKind::Author,
                field: s.to_string(),
            })
    }
}

/// One attribute of one object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSelector {
    Book(BookField),
    Author(AuthorField),
}

impl FieldSelector {
    /// Resolves a field name within the vocabulary of `kind`.
    pub fn parse(kind: ObjectKind, name: &str) -> Result<Self> {
        match kind {
            ObjectKind::Book => name.parse().map(FieldSelector::Book),
            ObjectKind::Author => name.parse().map(FieldSelector::Author),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            FieldSelector::Book(_) => ObjectKind::Book,
            FieldSelector::Author(_) => ObjectKind::Author,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSelector::Book(field) => field.as_str(),
            FieldSelector::Author(field) => field.as_str(),
        }
    }
}

impl From<BookField> for FieldSelector {
    fn from(field: BookField) -> Self {
        FieldSelector::Book(field)
    }
}

impl From<AuthorField> for FieldSelector {
    fn from(field: AuthorField) -> Self {
        FieldSelector::Author(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl FromStr for LogicalOperator {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicalOperator::And),
            "OR" => Ok(LogicalOperator::Or),
            _ => Err(CatalogError::UnknownOperator(s.to_string())),
        }
    }
}

/// A single `object.field:value` predicate. The value is transmitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeClause {
    pub field: FieldSelector,
    pub value: String,
}

impl AttributeClause {
    pub fn new(field: impl Into<FieldSelector>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.field.kind()
    }
}

/// Two clauses over the same object kind joined by `AND` or `OR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundClause {
    left: AttributeClause,
    operator: LogicalOperator,
    right: AttributeClause,
}

impl CompoundClause {
    pub fn new(
        left: AttributeClause,
        operator: LogicalOperator,
        right: AttributeClause,
    ) -> Result<Self> {
        if left.kind() != right.kind() {
            return Err(CatalogError::MixedKinds);
        }
        Ok(Self {
            left,
            operator,
            right,
        })
    }

    pub fn left(&self) -> &AttributeClause {
        &self.left
    }

    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn right(&self) -> &AttributeClause {
        &self.right
    }

    pub fn kind(&self) -> ObjectKind {
        self.left.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Single(AttributeClause),
    Compound(CompoundClause),
}

impl SearchQuery {
    /// Matches every record of `kind`: the identifier field with an empty value.
    pub fn all(kind: ObjectKind) -> Self {
        SearchQuery::Single(AttributeClause::new(kind.identifier_field(), ""))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            SearchQuery::Single(clause) => clause.kind(),
            SearchQuery::Compound(compound) => compound.kind(),
        }
    }
}

impl From<AttributeClause> for SearchQuery {
    fn from(clause: AttributeClause) -> Self {
        SearchQuery::Single(clause)
    }
}

impl From<CompoundClause> for SearchQuery {
    fn from(compound: CompoundClause) -> Self {
        SearchQuery::Compound(compound)
    }
}
