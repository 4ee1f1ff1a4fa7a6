//! A player as the server describes it through info replies.

use std::hash::{Hash, Hasher};

use crate::net::messages::{AvatarType, PlayerInfoData, PlayerRights};

/// Player identity plus the attributes learned from `PlayerInfoReplyMessage`.
///
/// Everything but the id stays unset until the server sends info for the
/// player. Two players are equal when their ids are equal.
#[derive(Clone, Debug, Default)]
pub struct Player {
    pub id: u32,
    pub name: Option<String>,
    pub money: Option<u32>,
    pub seat: Option<usize>,
    pub is_human: Option<bool>,
    pub rights: Option<PlayerRights>,
    pub country_code: Option<String>,
    pub avatar_type: Option<AvatarType>,
    pub avatar_hash: Option<Vec<u8>>,
}

impl Player {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn set_info(&mut self, info: &PlayerInfoData) {
        self.name = Some(info.player_name.clone());
        self.is_human = Some(info.is_human);
        self.rights = Some(info.player_rights);
        self.country_code.clone_from(&info.country_code);
        match &info.avatar_data {
            Some(avatar) => {
                self.avatar_type = Some(avatar.avatar_type);
                self.avatar_hash = Some(avatar.avatar_hash.clone());
            }
            None => {
                self.avatar_type = None;
                self.avatar_hash = None;
            }
        }
    }

    /// Display name, falling back to `#<id>` before info has arrived.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
