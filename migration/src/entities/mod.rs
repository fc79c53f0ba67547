pub mod user;

pub use user::Entity as UserEntity;
