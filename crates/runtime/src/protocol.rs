//! JSON wire format spoken by the transport stub.
//!
//! Client messages are objects tagged by `type` with camelCase fields; the
//! server pushes full snapshots as `STATE_UPDATE` messages. Only this module
//! knows about the framing: the authority sees plain [`Action`] values.
use serde::{Deserialize, Serialize};

use game_core::{Action, BuildingId, EntityId, ItemId, Position, WorldSnapshot};

use crate::api::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    Login { username: String, password: String },
    Register { username: String, password: String },
    EnterWorld,
    ReturnHome,
    Move { delta: Position },
    Attack { target_id: EntityId },
    Loot { entity_id: EntityId },
    Chat { text: String },
    OpenContainer { item_id: ItemId },
    Plant { building_id: BuildingId },
    Harvest { building_id: BuildingId },
    RecoverHp { building_id: BuildingId },
}

impl ClientMessage {
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(RuntimeError::Decode)
    }

    pub fn into_action(self) -> Action {
        match self {
            Self::Login { username, password } => Action::login(username, password),
            Self::Register { username, password } => Action::register(username, password),
            Self::EnterWorld => Action::enter_world(),
            Self::ReturnHome => Action::return_home(),
            Self::Move { delta } => Action::move_by(delta.x, delta.y),
            Self::Attack { target_id } => Action::attack(target_id),
            Self::Loot { entity_id } => Action::loot(entity_id),
            Self::Chat { text } => Action::chat(text),
            Self::OpenContainer { item_id } => Action::open_container(item_id),
            Self::Plant { building_id } => Action::plant(building_id),
            Self::Harvest { building_id } => Action::harvest(building_id),
            Self::RecoverHp { building_id } => Action::recover_hp(building_id),
        }
    }
}

impl From<ClientMessage> for Action {
    fn from(message: ClientMessage) -> Self {
        message.into_action()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    StateUpdate { payload: WorldSnapshot },
    Error { message: String },
}

impl ServerMessage {
    pub fn state_update(snapshot: &WorldSnapshot) -> Self {
        Self::StateUpdate {
            payload: snapshot.clone(),
        }
    }

    pub fn error(error: &RuntimeError) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }

    /// One line of newline-delimited JSON, without the newline.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(RuntimeError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use game_core::{ActionKind, GameConfig, GameState, IdAllocator};

    use super::*;

    #[test]
    fn decodes_tagged_camel_case_messages() {
        let attack = ClientMessage::decode(r#"{"type":"ATTACK","targetId":7}"#).unwrap();
        assert_eq!(attack, ClientMessage::Attack { target_id: EntityId(7) });

        let step = ClientMessage::decode(r#"{"type":"MOVE","delta":{"x":5.0,"y":-5.0}}"#).unwrap();
        assert_eq!(step.into_action().kind(), ActionKind::Move);

        let recover =
            ClientMessage::decode(r#"{"type":"RECOVER_HP","buildingId":3}"#).unwrap();
        assert_eq!(recover.into_action().kind(), ActionKind::RecoverHp);

        let enter = ClientMessage::decode(r#"{"type":"ENTER_WORLD"}"#).unwrap();
        assert_eq!(enter, ClientMessage::EnterWorld);
    }

    #[test]
    fn unknown_or_incomplete_messages_fail_to_decode() {
        assert!(ClientMessage::decode(r#"{"type":"FLY"}"#).is_err());
        assert!(ClientMessage::decode(r#"{"type":"LOOT"}"#).is_err());
        assert!(ClientMessage::decode("not json").is_err());
    }

    #[test]
    fn state_update_wraps_the_snapshot() {
        let config = GameConfig::default();
        let state = GameState::new(&config, IdAllocator::new(), Vec::new());
        let snapshot = WorldSnapshot::new(state);

        let line = ServerMessage::state_update(&snapshot).encode().unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["type"], json!("STATE_UPDATE"));
        assert_eq!(value["payload"]["mode"], json!("AUTH"));
        assert_eq!(value["payload"]["player"]["pos"], json!({"x": 400.0, "y": 400.0}));
        assert_eq!(value["payload"]["player"]["maxHp"], json!(100));
        assert!(value["payload"]["floatingTexts"].is_array());
        assert!(value["payload"].get("ids").is_none());
    }

    #[test]
    fn error_message_carries_the_decode_failure() {
        let error = ClientMessage::decode("{").unwrap_err();
        let value: Value =
            serde_json::from_str(&ServerMessage::error(&error).encode().unwrap()).unwrap();

        assert_eq!(value["type"], json!("ERROR"));
        assert!(value["message"].as_str().unwrap().starts_with("failed to decode"));
    }
}
