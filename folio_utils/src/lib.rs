pub use folio_utils_derive::trace_instrument;

/// Returns the version of the workspace this crate was built from.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Asserts that an expression matches a pattern, optionally with a guard.
///
/// #### Example
/// ```rust
/// # use folio_utils::assert_matches;
/// let result: Result<u8, &str> = Ok(7);
/// assert_matches!(result, Ok(7));
/// assert_matches!(result, Ok(x) if *x > 3);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
