use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

/// 转义 LIKE 模式中的通配符，配合 `ESCAPE '\'` 使用
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造大小写不敏感的子串匹配模式
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like_pattern(&input.trim().to_lowercase()))
}

/// `LOWER(col) LIKE '%search%' ESCAPE '\'`
pub fn lower_contains<C: ColumnTrait>(column: C, search: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(search)).escape('\\'))
}

/// 任一列包含搜索词
pub fn search_condition<C: ColumnTrait>(columns: &[C], search: &str) -> Condition {
    columns
        .iter()
        .fold(Condition::any(), |cond, column| {
            cond.add(lower_contains(*column, search))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("c:\\x"), "c:\\\\x");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern(" Ana "), "%ana%");
    }
}
