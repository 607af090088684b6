// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the relay endpoint.

use serde::{Deserialize, Serialize};

/// Envelope POSTed to the relay's forward endpoint.
///
/// Field names are the relay's wire contract and must stay PascalCase.
/// `CommandJson` carries the already-serialized command payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(rename = "BotId")]
    pub bot_id: i64,
    #[serde(rename = "CommandType")]
    pub command_type: String,
    #[serde(rename = "CommandJson")]
    pub command_json: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_pascal_case_keys() {
        let request = CommandRequest {
            bot_id: 1,
            command_type: "move".to_string(),
            command_json: r#"{"x":1}"#.to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["BotId"], 1);
        assert_eq!(json["CommandType"], "move");
        assert_eq!(json["CommandJson"], r#"{"x":1}"#);
    }
}
