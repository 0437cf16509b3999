//! Canned answers that bypass the remote lookup entirely.

/// Prefix of the removed `ext/mysql` functions.
const MYSQL_PREFIX: &str = "mysql_";

/// Advisory posted for any `mysql_*` query.
pub const MYSQL_ADVISORY: &str = "[**Please, don't use `mysql_*` functions in new code**](http://bit.ly/phpmsql). \
    They are no longer maintained [and are officially deprecated](http://j.mp/XqV7Lp). \
    See the [**red box**](http://j.mp/Te9zIL)? Learn about [*prepared statements*](http://j.mp/T9hLWi) instead, \
    and use [PDO](http://php.net/pdo) or [MySQLi](http://php.net/mysqli) - \
    [this article](http://j.mp/QEx8IB) will help you decide which. If you choose PDO, \
    [here is a good tutorial](http://j.mp/PoWehJ).";

/// Return the fixed advisory if `pattern` names a deprecated `mysql_*` function.
pub fn deprecated_api_advisory(pattern: &str) -> Option<&'static str> {
    pattern.starts_with(MYSQL_PREFIX).then_some(MYSQL_ADVISORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_prefix_matches() {
        assert_eq!(deprecated_api_advisory("mysql_query"), Some(MYSQL_ADVISORY));
        assert_eq!(deprecated_api_advisory("mysql_"), Some(MYSQL_ADVISORY));
    }

    #[test]
    fn other_patterns_do_not_match() {
        assert_eq!(deprecated_api_advisory("mysqli_query"), None);
        assert_eq!(deprecated_api_advisory("pdo mysql_"), None);
    }
}
