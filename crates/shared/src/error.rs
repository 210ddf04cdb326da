use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{OrderId, OrderItemId, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("order item {0} not found")]
    OrderItemNotFound(OrderItemId),
    #[error("person {0} not found")]
    PersonNotFound(PersonId),
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        Self::new(ErrorCode::NotFound, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_not_found() {
        let err: ApiError = StoreError::OrderItemNotFound(OrderItemId(42)).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "order item 42 not found");
    }

    #[test]
    fn api_error_serializes_snake_case_code() {
        let err = ApiError::new(ErrorCode::Validation, "no order selected");
        let json = serde_json::to_value(&err).expect("json");
        assert_eq!(json["code"], "validation");
        assert_eq!(err.to_string(), "Validation: no order selected");
    }
}
