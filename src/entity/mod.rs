//! SeaORM 数据库实体定义

pub mod assignments;
pub mod prelude;
pub mod submissions;
pub mod users;
