use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tracing::{debug, info};

use crate::errors::{GeoLookupError, Result};
use migration::entities::user;

/// 数据库中的用户记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub email: String,
    /// Argon2id 哈希
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// 待插入的用户（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// 用户表访问接口
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按邮箱查找用户（精确匹配）
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// 插入用户；邮箱已存在时什么都不做并返回 false
    async fn insert_if_absent(&self, user: NewUser) -> Result<bool>;
}

/// SeaORM 实现
#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn model_to_record(model: user::Model) -> UserRecord {
    UserRecord {
        id: model.id,
        email: model.email,
        password_hash: model.password,
        name: model.name,
        created_at: model.created_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                GeoLookupError::database_operation(format!("Failed to query user: {}", e))
            })?;

        Ok(model.map(model_to_record))
    }

    async fn insert_if_absent(&self, new_user: NewUser) -> Result<bool> {
        use sea_orm::ActiveValue::{NotSet, Set};
        use sea_orm::sea_query::OnConflict;

        if self.find_by_email(&new_user.email).await?.is_some() {
            debug!("User {} already exists, skipping insert", new_user.email);
            return Ok(false);
        }

        let active_model = user::ActiveModel {
            id: NotSet,
            email: Set(new_user.email.clone()),
            password: Set(new_user.password_hash),
            name: Set(new_user.name),
            created_at: Set(Utc::now()),
        };

        let result = user::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => {
                info!("User created: {}", new_user.email);
                Ok(true)
            }
            // 并发插入时 ON CONFLICT DO NOTHING 不返回行
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(GeoLookupError::database_operation(format!(
                "Failed to insert user '{}': {}",
                new_user.email, e
            ))),
        }
    }
}
