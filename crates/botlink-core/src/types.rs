// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the botlink crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Relay,
}

/// Lifecycle state of a dispatched command record.
///
/// Transitions are forward-only: `Pending -> Success` or `Pending -> Failed`.
/// A finalized record is never reopened.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Pending,
    Success,
    Failed,
}

/// Raised when an integer read from storage or input is not a known
/// [`ItemCategory`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item category value {0}")]
pub struct InvalidCategory(pub i64);

/// Catalog item categories.
///
/// The integer values are the wire and storage form and must not be
/// renumbered. Value 0 (`Invalid`) is reserved: the bag import always writes
/// `Item`, and item creation rejects `Invalid` outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
#[repr(i64)]
pub enum ItemCategory {
    Invalid = 0,
    Currency = 1,
    /// Ordinary bag items; the target of the bulk bag import.
    Item = 2,
    Recipe = 3,
    Blueprint = 4,
    FeatureOpen = 5,
    Property = 6,
    Theme = 7,
    ExpType = 8,
    ThemeExp = 10,
    HobbyAbilityExp = 11,
    Buff = 12,
    BlindBox = 15,
    ToolSkin = 16,
    ExpressionAction = 17,
    PostCard = 18,
    Tool = 19,
    ChatDialogueSkin = 20,
    Avatar = 21,
    BuildItem = 22,
    PayPoint = 23,
    DateAnchor = 24,
    ResetStoreSlot = 25,
    BuildItemModule = 26,
    HobbyExamineTicket = 27,
    PlayerTitle = 28,
    GameEventTimer = 29,
    PayProduct = 30,
    SeniorHobbyExamineTicket = 31,
    Gift = 32,
    Sticker = 33,
    GmPictorialPointTypeValue = 34,
    ActivityExclusiveItems = 35,
}

impl From<ItemCategory> for i64 {
    fn from(category: ItemCategory) -> i64 {
        category as i64
    }
}

impl TryFrom<i64> for ItemCategory {
    type Error = InvalidCategory;

    fn try_from(value: i64) -> Result<Self, InvalidCategory> {
        use ItemCategory::*;
        Ok(match value {
            0 => Invalid,
            1 => Currency,
            2 => Item,
            3 => Recipe,
            4 => Blueprint,
            5 => FeatureOpen,
            6 => Property,
            7 => Theme,
            8 => ExpType,
            10 => ThemeExp,
            11 => HobbyAbilityExp,
            12 => Buff,
            15 => BlindBox,
            16 => ToolSkin,
            17 => ExpressionAction,
            18 => PostCard,
            19 => Tool,
            20 => ChatDialogueSkin,
            21 => Avatar,
            22 => BuildItem,
            23 => PayPoint,
            24 => DateAnchor,
            25 => ResetStoreSlot,
            26 => BuildItemModule,
            27 => HobbyExamineTicket,
            28 => PlayerTitle,
            29 => GameEventTimer,
            30 => PayProduct,
            31 => SeniorHobbyExamineTicket,
            32 => Gift,
            33 => Sticker,
            34 => GmPictorialPointTypeValue,
            35 => ActivityExclusiveItems,
            other => return Err(InvalidCategory(other)),
        })
    }
}

/// A catalog item as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// External item identifier, unique across the catalog.
    pub item_id: i64,
    pub name: String,
    pub category: ItemCategory,
    pub description: Option<String>,
    /// Server-assigned ISO-8601 timestamp.
    pub created_at: String,
    /// Server-assigned ISO-8601 timestamp.
    pub updated_at: String,
}

/// Input for creating a catalog item; timestamps are server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub item_id: i64,
    pub name: String,
    pub category: ItemCategory,
    pub description: Option<String>,
}

/// Partial update for a catalog item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
    pub description: Option<String>,
}

/// A dispatched-command record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub id: i64,
    pub bot_id: i64,
    pub command_type: String,
    /// The serialized command payload sent to the relay.
    pub command_data: String,
    /// Serialized relay response on success, error text on failure.
    pub response: Option<String>,
    pub status: CommandStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a command record; status starts `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub bot_id: i64,
    pub command_type: String,
    pub command_data: String,
}

/// Partial update for a command record. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CommandPatch {
    pub status: Option<CommandStatus>,
    pub response: Option<String>,
}

/// Filter for listing command records. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CommandFilter {
    pub status: Option<CommandStatus>,
    pub command_type: Option<String>,
    pub bot_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn command_status_round_trips_through_strings() {
        for status in [
            CommandStatus::Pending,
            CommandStatus::Success,
            CommandStatus::Failed,
        ] {
            let s = status.to_string();
            assert_eq!(CommandStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(CommandStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn command_status_serializes_lowercase() {
        let json = serde_json::to_string(&CommandStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
        let parsed: CommandStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(parsed, CommandStatus::Success);
    }

    #[test]
    fn item_category_round_trips_through_integers() {
        for value in [0, 1, 2, 8, 10, 15, 35] {
            let category = ItemCategory::try_from(value).unwrap();
            assert_eq!(i64::from(category), value);
        }
    }

    #[test]
    fn item_category_rejects_gaps_and_unknown_values() {
        assert_eq!(ItemCategory::try_from(9), Err(InvalidCategory(9)));
        assert_eq!(ItemCategory::try_from(13), Err(InvalidCategory(13)));
        assert_eq!(ItemCategory::try_from(14), Err(InvalidCategory(14)));
        assert_eq!(ItemCategory::try_from(-1), Err(InvalidCategory(-1)));
        assert_eq!(ItemCategory::try_from(36), Err(InvalidCategory(36)));
    }

    #[test]
    fn item_category_serializes_as_integer() {
        let json = serde_json::to_string(&ItemCategory::Recipe).unwrap();
        assert_eq!(json, "3");
        let parsed: ItemCategory = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, ItemCategory::Buff);
        assert!(serde_json::from_str::<ItemCategory>("9").is_err());
    }

    #[test]
    fn item_serializes_with_integer_category() {
        let item = Item {
            item_id: 7,
            name: "Iron Sword".to_string(),
            category: ItemCategory::Item,
            description: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], 2);
        assert_eq!(json["item_id"], 7);
    }

    #[test]
    fn adapter_type_round_trips() {
        for adapter_type in [AdapterType::Storage, AdapterType::Relay] {
            let s = adapter_type.to_string();
            assert_eq!(AdapterType::from_str(&s).unwrap(), adapter_type);
        }
    }
}
