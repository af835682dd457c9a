use super::ApiError;

pub fn validate_id(kind: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            kind, id
        )));
    }
    Ok(id)
}

pub fn validate_limit(limit: Option<usize>) -> Result<Option<usize>, ApiError> {
    if limit == Some(0) {
        return Err(ApiError::validation("Limit must be at least 1"));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("comparison", 1).is_ok());
        assert!(validate_id("comparison", 0).is_err());
        assert!(validate_id("set", -3).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), None);
        assert_eq!(validate_limit(Some(5)).unwrap(), Some(5));
        assert!(validate_limit(Some(0)).is_err());
    }
}
