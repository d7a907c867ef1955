pub mod types;
pub mod env;

pub mod utils {
    pub mod logging;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn ack_serializes_success_and_message() {
        let ack = types::Ack::ok("Expenses saved successfully");
        let v = serde_json::to_value(&ack).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "message": "Expenses saved successfully"}));

        let v = serde_json::to_value(types::Ack::failed("Failed to clear data")).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["message"], "Failed to clear data");
    }
}
