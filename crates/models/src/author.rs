use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};

use crate::book;
use crate::book_author;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    BookAuthor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::BookAuthor => Entity::has_many(book_author::Entity).into(),
        }
    }
}

impl Related<book_author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookAuthor.def()
    }
}

impl Related<book::Entity> for Entity {
    fn to() -> RelationDef {
        book_author::Relation::Book.def()
    }
    fn via() -> Option<RelationDef> {
        Some(book_author::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn email_taken<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, DbErr> {
    let n = Entity::find().filter(Column::Email.eq(email)).count(db).await?;
    Ok(n > 0)
}

/// Lenient well-formedness check: one `@` with non-empty sides and no
/// whitespace anywhere. Empty input is not judged here; blankness is a
/// separate rule.
pub fn email_is_well_formed(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(email_is_well_formed("neil.gaiman@example.com"));
        assert!(email_is_well_formed("a@b"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!email_is_well_formed("no-at-sign"));
        assert!(!email_is_well_formed("@missing-local"));
        assert!(!email_is_well_formed("missing-domain@"));
        assert!(!email_is_well_formed("two@@signs"));
        assert!(!email_is_well_formed("white space@example.com"));
        assert!(!email_is_well_formed("\n"));
    }

    #[test]
    fn model_round_trips_through_json() {
        let now: DateTimeWithTimeZone =
            chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap();
        let m = Model {
            id: 7,
            name: "Neil Gaiman".into(),
            email: "neil@example.com".into(),
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["email"], "neil@example.com");
        let back: Model = serde_json::from_value(v).unwrap();
        assert_eq!(back, m);
    }
}
