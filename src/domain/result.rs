//! Result type alias for Strata

use super::errors::StrataError;

/// Result type alias for Strata operations
///
/// # Examples
///
/// ```
/// use strata::domain::result::Result;
/// use strata::domain::errors::StrataError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StrataError::Render("encoder unavailable".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StrataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(StrataError::Other("test error".to_string()));
        assert!(result.is_err());
    }
}
