use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{article, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub create_at: DateTimeWithTimeZone,
    pub user_id: Uuid,
    pub article_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Article,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Article => Entity::belongs_to(article::Entity)
                .from(Column::ArticleId)
                .to(article::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<article::Entity> for Entity {
    fn to() -> RelationDef { Relation::Article.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert without checking the parent; callers run the existence check in
/// the same transaction.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    article_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        content: Set(content.to_string()),
        create_at: Set(Utc::now().into()),
        user_id: Set(user_id),
        article_id: Set(article_id),
    };
    am.insert(db).await
}

pub async fn list_by_article<C: ConnectionTrait>(db: &C, article_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ArticleId.eq(article_id))
        .order_by_asc(Column::CreateAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
