use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};

use crate::author;
use crate::book_author;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub published: bool,
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

impl Related<author::Entity> for Entity {
    fn to() -> RelationDef {
        book_author::Relation::Author.def()
    }
    fn via() -> Option<RelationDef> {
        Some(book_author::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn title_taken<C: ConnectionTrait>(db: &C, title: &str) -> Result<bool, DbErr> {
    let n = Entity::find().filter(Column::Title.eq(title)).count(db).await?;
    Ok(n > 0)
}

pub async fn isbn_taken<C: ConnectionTrait>(db: &C, isbn: &str) -> Result<bool, DbErr> {
    let n = Entity::find().filter(Column::Isbn.eq(isbn)).count(db).await?;
    Ok(n > 0)
}

/// ISBN-13 with a correct check digit, the only accepted form. Hyphens and
/// spaces are ignored; any other length or character fails.
pub fn isbn_is_valid(isbn: &str) -> bool {
    let digits: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();
    digits.len() == 13 && isbn13_checksum_ok(digits.as_bytes())
}

fn isbn13_checksum_ok(bytes: &[u8]) -> bool {
    let mut sum = 0u32;
    for (i, b) in bytes.iter().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        sum += u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 };
    }
    sum % 10 == 0
}
