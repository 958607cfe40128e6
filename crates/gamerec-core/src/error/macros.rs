//! Early-return helpers for [`GamerecError`](crate::error::GamerecError)
//!
//! Config validation rejects bad settings with `bail_invalid!`. A missing
//! catalog file is a usage error. Stage database failures go through
//! `map_db_err!`.

/// Return an `InvalidValue` error for a rejected setting
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::GamerecError::invalid_value($context, $value))
    };
}

/// Return a `UsageError` (exit code 2)
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::GamerecError::UsageError($msg.to_string()))
    };
}

/// Wrap a rusqlite error with the name of the failing operation
#[macro_export]
macro_rules! map_db_err {
    ($op:expr, $error:expr) => {
        $crate::error::GamerecError::db_operation($op, $error)
    };
}
