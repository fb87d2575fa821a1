//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod author_repo;
pub mod session_repo;

pub use article_repo::ArticleRepo;
pub use author_repo::AuthorRepo;
pub use session_repo::SessionRepo;
