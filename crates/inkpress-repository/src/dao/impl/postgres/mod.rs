//! PostgreSQL DAOs built on SQLx.

mod article_dao_impl;
mod author_dao_impl;

pub use article_dao_impl::PgArticleDaoImpl;
pub use author_dao_impl::PgAuthorDaoImpl;

/// Builds an `ILIKE` pattern matching `value` anywhere, with wildcards in
/// `value` taken literally.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
