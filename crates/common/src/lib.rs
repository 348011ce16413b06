pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::types::{ErrorBody, Health};
    use serde_json::json;

    #[test]
    fn error_body_serializes_as_message_object() {
        let body = ErrorBody::new("beerName is required");
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"message": "beerName is required"}));
        let back: ErrorBody = serde_json::from_value(json!({"message": "beerName not found"})).unwrap();
        assert_eq!(back, ErrorBody::new("beerName not found"));
    }

    #[test]
    fn health_serializes_status() {
        assert_eq!(serde_json::to_value(Health { status: "ok" }).unwrap(), json!({"status": "ok"}));
    }
}
