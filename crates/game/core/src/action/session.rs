use std::fmt;

use crate::action::{ActionError, ActionKind, ActionTransition, require_mode};
use crate::collision;
use crate::config::GameConfig;
use crate::env::Env;
use crate::state::{EntityId, GameState, Mode};
use crate::world::{self, SpawnReport};

/// Username and password as typed by the player.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn username(&self) -> &str {
        self.username.trim()
    }

    fn check_present(&self) -> Result<(), ActionError> {
        if self.username().is_empty() || self.password.is_empty() {
            return Err(ActionError::MissingCredentials);
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn admit(state: &mut GameState, username: &str) {
    state.mode = Mode::Lobby;
    state.player.name = username.to_owned();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginAction(pub Credentials);

impl ActionTransition for LoginAction {
    type Result = String;

    fn kind(&self) -> ActionKind {
        ActionKind::Login
    }

    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::Auth])?;
        self.0.check_present()?;
        if !env.accounts.verify(self.0.username(), &self.0.password) {
            return Err(ActionError::WrongCredentials);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<String, ActionError> {
        let username = self.0.username();
        admit(state, username);
        Ok(username.to_owned())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterAction(pub Credentials);

impl ActionTransition for RegisterAction {
    type Result = String;

    fn kind(&self) -> ActionKind {
        ActionKind::Register
    }

    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::Auth])?;
        self.0.check_present()?;
        if env.accounts.contains(self.0.username()) {
            return Err(ActionError::UserExists);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<String, ActionError> {
        let username = self.0.username();
        let salt = env.rng.next_u64();
        if !env.accounts.register(username, &self.0.password, salt) {
            return Err(ActionError::UserExists);
        }
        admit(state, username);
        Ok(username.to_owned())
    }
}

/// Moves the player to the city center of the world map and populates it on
/// first entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnterWorldAction;

impl ActionTransition for EnterWorldAction {
    type Result = SpawnReport;

    fn kind(&self) -> ActionKind {
        ActionKind::EnterWorld
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::Lobby, Mode::Home])
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<SpawnReport, ActionError> {
        state.mode = Mode::World;
        let center = env.config.map_center();
        state.player.position =
            collision::find_free_spot(state, env.config, center, Some(EntityId::PLAYER), 8)
                .unwrap_or(center);

        if !state.entities.is_empty() {
            return Ok(SpawnReport::default());
        }
        let ally = world::spawn_ally(state, env.config);
        let mut report =
            world::spawn_monsters(state, env.config, env.rng, GameConfig::INITIAL_MONSTERS);
        if let Some(ally) = ally {
            report.spawned.insert(0, ally);
        }
        Ok(report)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReturnHomeAction;

impl ActionTransition for ReturnHomeAction {
    type Result = ();

    fn kind(&self) -> ActionKind {
        ActionKind::ReturnHome
    }

    /// Already at home is a silent no-op.
    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::Lobby, Mode::World])
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<(), ActionError> {
        state.mode = Mode::Home;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::Harness;
    use crate::state::EntityKind;

    fn creds(user: &str, pass: &str) -> Credentials {
        Credentials::new(user, pass)
    }

    #[test]
    fn register_then_login_on_a_fresh_session() {
        let mut h = Harness::new(Mode::Auth);

        let name = h.run(&RegisterAction(creds("  ada ", "pw"))).unwrap();
        assert_eq!(name, "ada");
        assert_eq!(h.state.mode, Mode::Lobby);
        assert_eq!(h.state.player.name, "ada");

        h.state.mode = Mode::Auth;
        assert!(h.run(&LoginAction(creds("ada", "pw"))).is_ok());
        assert_eq!(h.state.mode, Mode::Lobby);
    }

    #[test]
    fn login_rejects_unknown_users_and_bad_passwords() {
        let mut h = Harness::new(Mode::Auth);
        assert_eq!(
            h.run(&LoginAction(creds("ada", "pw"))),
            Err(ActionError::WrongCredentials)
        );

        h.accounts.register("ada", "pw", 1);
        assert_eq!(
            h.run(&LoginAction(creds("ada", "nope"))),
            Err(ActionError::WrongCredentials)
        );
        assert_eq!(h.state.mode, Mode::Auth);
    }

    #[test]
    fn register_rejects_taken_names_and_blank_fields() {
        let mut h = Harness::new(Mode::Auth);
        h.accounts.register("ada", "pw", 1);

        assert_eq!(
            h.run(&RegisterAction(creds("ada", "other"))),
            Err(ActionError::UserExists)
        );
        assert_eq!(
            h.run(&RegisterAction(creds("   ", "pw"))),
            Err(ActionError::MissingCredentials)
        );
        assert_eq!(
            h.run(&RegisterAction(creds("bob", ""))),
            Err(ActionError::MissingCredentials)
        );
    }

    #[test]
    fn auth_actions_require_auth_mode() {
        let mut h = Harness::new(Mode::Lobby);
        assert_eq!(
            h.run(&RegisterAction(creds("ada", "pw"))),
            Err(ActionError::WrongMode)
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", creds("ada", "hunter2"));
        assert!(rendered.contains("ada"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn enter_world_populates_once() {
        let mut h = Harness::new(Mode::Lobby);

        let report = h.run(&EnterWorldAction).unwrap();
        assert_eq!(h.state.mode, Mode::World);
        assert_eq!(report.spawned.len(), 1 + GameConfig::INITIAL_MONSTERS);
        assert_eq!(h.state.monster_count(), GameConfig::INITIAL_MONSTERS);
        assert_eq!(
            h.state
                .entities
                .iter()
                .filter(|e| e.kind == EntityKind::OtherPlayer)
                .count(),
            1
        );
        let population = h.state.entities.clone();

        // Already in the world: rejected, nothing respawned.
        assert_eq!(h.run(&EnterWorldAction), Err(ActionError::WrongMode));

        // Round trip through home keeps the same population.
        h.run(&ReturnHomeAction).unwrap();
        let report = h.run(&EnterWorldAction).unwrap();
        assert!(report.is_empty());
        assert_eq!(h.state.entities, population);
    }

    #[test]
    fn enter_world_requires_login() {
        let mut h = Harness::new(Mode::Auth);
        assert_eq!(h.run(&EnterWorldAction), Err(ActionError::WrongMode));
        assert_eq!(h.run(&ReturnHomeAction), Err(ActionError::WrongMode));
    }

    #[test]
    fn return_home_from_home_is_ignored() {
        let mut h = Harness::new(Mode::Lobby);
        h.run(&ReturnHomeAction).unwrap();
        assert_eq!(h.state.mode, Mode::Home);

        let before = h.state.clone();
        assert_eq!(h.run(&ReturnHomeAction), Err(ActionError::WrongMode));
        assert_eq!(h.state, before);
    }
}
