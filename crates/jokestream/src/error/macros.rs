/// Builds a crate-level [`Error`](crate::Error) from a module error variant.
/// Every field value goes through [`Into::into`], and a field without a value
/// is taken from the variable of the same name.
///
/// ```ignore
/// err!(JokeApiError::NotFound { resource })
/// ```
macro_rules! err {
    (@field $name:ident) => ($name);
    (@field $name:ident $value:expr) => ($value);
    ($($variant:ident)::+ $({
        $( $field:ident $(: $value:expr)? ),*
        $(,)?
    })?) => {
        $crate::error::Error::from(
            $($variant)::+ $({$(
                $field: ::std::convert::Into::into(
                    $crate::error::err!(@field $field $($value)?)
                ),
            )*})?
        )
    };
}

/// `map_err` closure that puts the error into the `source` field of the variant
macro_rules! err_ctx {
    ($($variant:ident)::+ $({ $($fields:tt)* })?) => {
        |source| $crate::error::err!($($variant)::+ { source, $($($fields)*)? })
    };
}

/// Creates an [`ErrorKind::Fatal`](crate::ErrorKind::Fatal) error with the
/// given formatting string
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::error::Error::from($crate::error::ErrorKind::Fatal {
            message: format!($($arg)*),
            source: None,
        })
    };
}

pub(crate) use err;
pub(crate) use err_ctx;
pub(crate) use fatal;
