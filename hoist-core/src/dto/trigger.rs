//! Trigger DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::RunId;

/// Acknowledgement returned by `POST /trigger`
///
/// This is not the run's outcome: the pipeline keeps running after the
/// response is sent and its result only shows up in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerAck {
    pub run_id: RunId,
    pub status: AckStatus,
    /// Where the run's log can be followed
    pub log_hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Accepted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_wire_shape() {
        let ack = TriggerAck {
            run_id: "1a2b3c4d".parse().unwrap(),
            status: AckStatus::Accepted,
            log_hint: "/tmp/logs/1a2b3c4d/pipeline.log".to_string(),
        };

        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "run_id": "1a2b3c4d",
                "status": "accepted",
                "log_hint": "/tmp/logs/1a2b3c4d/pipeline.log",
            })
        );
    }
}
