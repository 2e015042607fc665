pub mod comments;
pub mod follows;
pub mod groups;
pub mod jwt;
pub mod posts;
