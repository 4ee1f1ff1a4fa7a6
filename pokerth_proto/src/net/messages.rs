//! PokerTH wire schema.
//!
//! Every message the protocol knows is declared once in the table at the
//! bottom of this file. The table produces the integer type tags
//! ([`MessageType`]), the tagged union of payloads ([`Message`]) and the
//! envelope that travels on the wire ([`PokerthMessage`]): an explicit
//! `message_type` tag plus one optional slot per payload type, of which
//! exactly one is populated in a well-formed envelope.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::errors::EnvelopeError;
use crate::poker::{Action, Round};

// === Wire enumerations ===

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum ServerType {
    #[default]
    Lan = 0,
    InternetNoAuth = 1,
    InternetAuth = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum LoginType {
    #[default]
    Guest = 0,
    Authenticated = 1,
    Unauthenticated = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum PlayerListNotification {
    #[default]
    New = 0,
    Left = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum GameMode {
    #[default]
    Created = 1,
    Started = 2,
    Closed = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum NetGameType {
    #[default]
    Normal = 1,
    RegisteredOnly = 2,
    InviteOnly = 3,
    Ranking = 4,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum RaiseIntervalMode {
    #[default]
    OnHandNum = 1,
    OnMinutes = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum EndRaiseMode {
    #[default]
    DoubleBlinds = 1,
    RaiseByEndValue = 2,
    KeepLastBlind = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum PlayerRights {
    Guest = 1,
    #[default]
    Normal = 2,
    Admin = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum AvatarType {
    #[default]
    Png = 1,
    Jpg = 2,
    Gif = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum SubscriptionAction {
    #[default]
    Resubscribe = 1,
    Unsubscribe = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum JoinGameFailureReason {
    #[default]
    InvalidGame = 1,
    GameIsFull = 2,
    GameIsRunning = 3,
    InvalidPassword = 4,
    NotAllowedAsGuest = 5,
    NotInvited = 6,
    GameNameInUse = 7,
    BadGameName = 8,
    InvalidSettings = 9,
    IpAddressBlocked = 10,
    RejoinFailed = 11,
    NoSpectatorsAllowed = 12,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum GamePlayerLeftReason {
    #[default]
    OnRequest = 0,
    Kicked = 1,
    Error = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum RemovedFromGameReason {
    #[default]
    OnRequest = 0,
    Kicked = 1,
    GameIsFull = 2,
    GameIsRunning = 3,
    GameTimeout = 4,
    StartFailed = 5,
    GameClosed = 6,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum RejectGameInvReason {
    #[default]
    No = 0,
    Busy = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum StartEventType {
    #[default]
    Start = 0,
    Rejoin = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum NetPlayerState {
    #[default]
    Normal = 0,
    SessionInactive = 1,
    NoMoney = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum ActionRejectionReason {
    #[default]
    InvalidRequest = 1,
    NotYourTurn = 2,
    ActionNotAllowed = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum KickDeniedReason {
    #[default]
    InvalidGameState = 0,
    NotEnoughPlayers = 1,
    PetitionInProgress = 2,
    InvalidPlayerId = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum VoteKickReplyType {
    #[default]
    Accepted = 0,
    AlreadyVoted = 1,
    Invalid = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum PetitionEndReason {
    #[default]
    EnoughVotes = 0,
    NotEnoughPlayers = 1,
    PlayerLeft = 2,
    Timeout = 3,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum StatisticsType {
    #[default]
    NumberOfPlayers = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum ChatType {
    #[default]
    Standard = 0,
    Lobby = 1,
    Bot = 2,
    Broadcast = 3,
    Private = 4,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum TimeoutReason {
    #[default]
    NoDataReceived = 0,
    NoActivity = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum ReportResult {
    #[default]
    Accepted = 0,
    Duplicate = 1,
    Invalid = 2,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum AdminActionResult {
    #[default]
    Accepted = 0,
    Rejected = 1,
}

#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u32)]
pub enum ErrorReason {
    #[default]
    Reserved = 0,
    InitVersionNotSupported = 1,
    InitServerFull = 2,
    InitAuthFailure = 3,
    InitPlayerNameInUse = 4,
    InitInvalidPlayerName = 5,
    InitServerMaintenance = 6,
    InitBlocked = 7,
    AvatarTooLarge = 8,
    InvalidPacket = 9,
    InvalidState = 10,
    KickedFromServer = 11,
    BannedFromServer = 12,
    BlockedByServer = 13,
    SessionTimeout = 14,
}

// === Shared sub-messages ===

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Version {
    pub major_version: u32,
    pub minor_version: u32,
}

/// Game configuration as advertised by the server or requested by a client
/// creating a game.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NetGameInfo {
    pub game_name: String,
    pub net_game_type: NetGameType,
    pub max_num_players: u32,
    pub raise_interval_mode: RaiseIntervalMode,
    pub raise_every_hands: Option<u32>,
    pub raise_every_minutes: Option<u32>,
    pub end_raise_mode: EndRaiseMode,
    pub end_raise_small_blind_value: u32,
    pub proposed_gui_speed: u32,
    pub delay_between_hands: u32,
    pub player_action_timeout: u32,
    pub first_small_blind: u32,
    pub start_money: u32,
    pub manual_blinds: Vec<u32>,
    pub allow_spectators: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AvatarData {
    pub avatar_type: AvatarType,
    pub avatar_hash: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerInfoData {
    pub player_name: String,
    pub is_human: bool,
    pub player_rights: PlayerRights,
    pub country_code: Option<String>,
    pub avatar_data: Option<AvatarData>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlainCards {
    pub plain_card1: u32,
    pub plain_card2: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RejoinPlayerData {
    pub player_id: u32,
    pub player_money: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerAllIn {
    pub player_id: u32,
    pub all_in_card1: u32,
    pub all_in_card2: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerResult {
    pub player_id: u32,
    pub result_card1: u32,
    pub result_card2: u32,
    pub best_hand_position: Vec<u32>,
    pub money_won: u32,
    pub player_money: u32,
    pub card_set_value: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StatisticsData {
    pub statistics_type: StatisticsType,
    pub statistics_value: u32,
}

// === Payloads ===

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AnnounceMessage {
    pub protocol_version: Version,
    pub latest_game_version: Version,
    pub latest_beta_revision: u32,
    pub server_type: ServerType,
    pub num_players_on_server: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InitMessage {
    pub requested_version: Version,
    pub build_id: u32,
    pub my_last_session_id: Option<Vec<u8>>,
    pub auth_server_password: Option<String>,
    pub login: LoginType,
    pub nick_name: Option<String>,
    pub client_user_data: Option<Vec<u8>>,
    pub avatar_hash: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthServerChallengeMessage {
    pub server_challenge: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthClientResponseMessage {
    pub client_response: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthServerVerificationMessage {
    pub server_verification: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InitAckMessage {
    pub your_session_id: Vec<u8>,
    pub your_player_id: u32,
    pub your_avatar_hash: Option<Vec<u8>>,
    pub rejoin_game_id: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AvatarRequestMessage {
    pub request_id: u32,
    pub avatar_hash: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AvatarHeaderMessage {
    pub request_id: u32,
    pub avatar_type: AvatarType,
    pub avatar_size: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AvatarDataMessage {
    pub request_id: u32,
    pub avatar_block: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AvatarEndMessage {
    pub request_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UnknownAvatarMessage {
    pub request_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerListMessage {
    pub player_id: u32,
    pub player_list_notification: PlayerListNotification,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListNewMessage {
    pub game_id: u32,
    pub game_mode: GameMode,
    pub is_private: bool,
    pub player_ids: Vec<u32>,
    pub admin_player_id: u32,
    pub game_info: NetGameInfo,
    pub spectator_ids: Vec<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListUpdateMessage {
    pub game_id: u32,
    pub game_mode: GameMode,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListPlayerJoinedMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListPlayerLeftMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListAdminChangedMessage {
    pub game_id: u32,
    pub new_admin_player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerInfoRequestMessage {
    pub player_id: Vec<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerInfoReplyMessage {
    pub player_id: u32,
    pub player_info_data: Option<PlayerInfoData>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubscriptionRequestMessage {
    pub subscription_action: SubscriptionAction,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinExistingGameMessage {
    pub game_id: u32,
    pub password: Option<String>,
    pub auto_leave: bool,
    pub spectate_only: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinNewGameMessage {
    pub game_info: NetGameInfo,
    pub password: Option<String>,
    pub auto_leave: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RejoinExistingGameMessage {
    pub game_id: u32,
    pub auto_leave: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinGameAckMessage {
    pub game_id: u32,
    pub are_you_game_admin: bool,
    pub game_info: NetGameInfo,
    pub spectate_only: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinGameFailedMessage {
    pub game_id: u32,
    pub join_game_failure_reason: JoinGameFailureReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GamePlayerJoinedMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub is_game_admin: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GamePlayerLeftMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub game_player_left_reason: GamePlayerLeftReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameAdminChangedMessage {
    pub game_id: u32,
    pub new_admin_player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RemovedFromGameMessage {
    pub game_id: u32,
    pub removed_from_game_reason: RemovedFromGameReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct KickPlayerRequestMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LeaveGameRequestMessage {
    pub game_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InvitePlayerToGameMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InviteNotifyMessage {
    pub game_id: u32,
    pub player_id_who: u32,
    pub player_id_by_whom: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RejectGameInvitationMessage {
    pub game_id: u32,
    pub my_reject_reason: RejectGameInvReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RejectInvNotifyMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub player_reject_reason: RejectGameInvReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StartEventMessage {
    pub game_id: u32,
    pub start_event_type: StartEventType,
    pub fill_with_computer_players: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StartEventAckMessage {
    pub game_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameStartInitialMessage {
    pub game_id: u32,
    pub start_dealer_player_id: u32,
    pub player_seats: Vec<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameStartRejoinMessage {
    pub game_id: u32,
    pub start_dealer_player_id: u32,
    pub hand_num: u32,
    pub rejoin_player_data: Vec<RejoinPlayerData>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandStartMessage {
    pub game_id: u32,
    pub plain_cards: Option<PlainCards>,
    pub encrypted_cards: Option<Vec<u8>>,
    pub small_blind: u32,
    pub seat_states: Vec<NetPlayerState>,
    pub dealer_player_id: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayersTurnMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub game_state: Round,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MyActionRequestMessage {
    pub game_id: u32,
    pub hand_num: u32,
    pub game_state: Round,
    pub my_action: Action,
    pub my_relative_bet: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct YourActionRejectedMessage {
    pub game_id: u32,
    pub game_state: Round,
    pub your_action: Action,
    pub your_relative_bet: u32,
    pub rejection_reason: ActionRejectionReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayersActionDoneMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub game_state: Round,
    pub player_action: Action,
    pub total_player_bet: u32,
    pub player_money: u32,
    pub highest_set: u32,
    pub minimum_raise: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DealFlopCardsMessage {
    pub game_id: u32,
    pub flop_card1: u32,
    pub flop_card2: u32,
    pub flop_card3: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DealTurnCardMessage {
    pub game_id: u32,
    pub turn_card: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DealRiverCardMessage {
    pub game_id: u32,
    pub river_card: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AllInShowCardsMessage {
    pub game_id: u32,
    pub players_all_in: Vec<PlayerAllIn>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndOfHandShowCardsMessage {
    pub game_id: u32,
    pub player_results: Vec<PlayerResult>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndOfHandHideCardsMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub money_won: u32,
    pub player_money: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShowMyCardsRequestMessage {}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AfterHandShowCardsMessage {
    pub player_result: PlayerResult,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndOfGameMessage {
    pub game_id: u32,
    pub winner_player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerIdChangedMessage {
    pub old_player_id: u32,
    pub new_player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AskKickPlayerMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AskKickDeniedMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub kick_denied_reason: KickDeniedReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StartKickPetitionMessage {
    pub game_id: u32,
    pub petition_id: u32,
    pub proposing_player_id: u32,
    pub kick_player_id: u32,
    pub kick_timeout_sec: u32,
    pub num_votes_needed_to_kick: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VoteKickRequestMessage {
    pub game_id: u32,
    pub petition_id: u32,
    pub vote_kick: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VoteKickReplyMessage {
    pub game_id: u32,
    pub petition_id: u32,
    pub vote_kick_reply_type: VoteKickReplyType,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct KickPetitionUpdateMessage {
    pub game_id: u32,
    pub petition_id: u32,
    pub num_votes_against_kicking: u32,
    pub num_votes_in_favour_of_kicking: u32,
    pub num_votes_needed_to_kick: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndKickPetitionMessage {
    pub game_id: u32,
    pub petition_id: u32,
    pub num_votes_against_kicking: u32,
    pub num_votes_in_favour_of_kicking: u32,
    pub result_player_kicked: u32,
    pub petition_end_reason: PetitionEndReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StatisticsMessage {
    pub statistics_data: Vec<StatisticsData>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChatRequestMessage {
    pub target_game_id: Option<u32>,
    pub target_player_id: Option<u32>,
    pub chat_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChatMessage {
    pub game_id: Option<u32>,
    pub player_id: Option<u32>,
    pub chat_type: ChatType,
    pub chat_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChatRejectMessage {
    pub chat_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DialogMessage {
    pub notification_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TimeoutWarningMessage {
    pub timeout_reason: TimeoutReason,
    pub remaining_seconds: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResetTimeoutMessage {}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReportAvatarMessage {
    pub reported_player_id: u32,
    pub reported_avatar_hash: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReportAvatarAckMessage {
    pub reported_player_id: u32,
    pub report_avatar_result: ReportResult,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReportGameMessage {
    pub reported_game_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ReportGameAckMessage {
    pub reported_game_id: u32,
    pub report_game_result: ReportResult,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub error_reason: ErrorReason,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminRemoveGameMessage {
    pub remove_game_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminRemoveGameAckMessage {
    pub remove_game_id: u32,
    pub remove_game_result: AdminActionResult,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminBanPlayerMessage {
    pub ban_player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminBanPlayerAckMessage {
    pub ban_player_id: u32,
    pub ban_player_result: AdminActionResult,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListSpectatorJoinedMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameListSpectatorLeftMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSpectatorJoinedMessage {
    pub game_id: u32,
    pub player_id: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSpectatorLeftMessage {
    pub game_id: u32,
    pub player_id: u32,
    pub game_spectator_left_reason: GamePlayerLeftReason,
}

// === Envelope ===

macro_rules! pokerth_schema {
    ($($tag:literal => $name:ident, $slot:ident;)+) => {
        /// Integer tag identifying the payload carried by an envelope.
        #[derive(
            Clone, Copy, Debug, Deserialize_repr, Eq, Hash, Ord, PartialEq, PartialOrd,
            Serialize_repr,
        )]
        #[repr(u32)]
        pub enum MessageType {
            $($name = $tag,)+
        }

        impl MessageType {
            /// Every message type of the schema, in tag order.
            pub const ALL: &'static [Self] = &[$(Self::$name,)+];

            /// Payload type name, e.g. `"InitAckMessage"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)+
                }
            }

            /// Name of the envelope slot carrying this payload.
            #[must_use]
            pub const fn slot(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($slot),)+
                }
            }

            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($name) {
                        return Some(Self::$name);
                    }
                )+
                None
            }
        }

        impl TryFrom<u32> for MessageType {
            type Error = EnvelopeError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($tag => Ok(Self::$name),)+
                    other => Err(EnvelopeError::UnknownTag(other)),
                }
            }
        }

        /// A developed message: exactly one concrete payload.
        #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
        pub enum Message {
            $($name($name),)+
        }

        impl Message {
            #[must_use]
            pub fn message_type(&self) -> MessageType {
                match self {
                    $(Self::$name(_) => MessageType::$name,)+
                }
            }
        }

        $(
            impl From<$name> for Message {
                fn from(value: $name) -> Self {
                    Self::$name(value)
                }
            }
        )+

        /// The envelope that travels on the wire.
        #[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
        pub struct PokerthMessage {
            pub message_type: u32,
            $(pub $slot: Option<$name>,)+
        }

        impl PokerthMessage {
            /// Builds an envelope with the tag set and the matching slot filled.
            #[must_use]
            pub fn wrap(message: Message) -> Self {
                let mut envelope = Self {
                    message_type: message.message_type() as u32,
                    ..Self::default()
                };
                match message {
                    $(Message::$name(payload) => envelope.$slot = Some(payload),)+
                }
                envelope
            }

            /// All populated slots, in tag order.
            #[must_use]
            pub fn into_populated(self) -> Vec<Message> {
                let mut populated = Vec::new();
                $(
                    if let Some(payload) = self.$slot {
                        populated.push(Message::$name(payload));
                    }
                )+
                populated
            }
        }
    };
}

pokerth_schema! {
    1 => AnnounceMessage, announce_message;
    2 => InitMessage, init_message;
    3 => AuthServerChallengeMessage, auth_server_challenge_message;
    4 => AuthClientResponseMessage, auth_client_response_message;
    5 => AuthServerVerificationMessage, auth_server_verification_message;
    6 => InitAckMessage, init_ack_message;
    7 => AvatarRequestMessage, avatar_request_message;
    8 => AvatarHeaderMessage, avatar_header_message;
    9 => AvatarDataMessage, avatar_data_message;
    10 => AvatarEndMessage, avatar_end_message;
    11 => UnknownAvatarMessage, unknown_avatar_message;
    12 => PlayerListMessage, player_list_message;
    13 => GameListNewMessage, game_list_new_message;
    14 => GameListUpdateMessage, game_list_update_message;
    15 => GameListPlayerJoinedMessage, game_list_player_joined_message;
    16 => GameListPlayerLeftMessage, game_list_player_left_message;
    17 => GameListAdminChangedMessage, game_list_admin_changed_message;
    18 => PlayerInfoRequestMessage, player_info_request_message;
    19 => PlayerInfoReplyMessage, player_info_reply_message;
    20 => SubscriptionRequestMessage, subscription_request_message;
    21 => JoinExistingGameMessage, join_existing_game_message;
    22 => JoinNewGameMessage, join_new_game_message;
    23 => RejoinExistingGameMessage, rejoin_existing_game_message;
    24 => JoinGameAckMessage, join_game_ack_message;
    25 => JoinGameFailedMessage, join_game_failed_message;
    26 => GamePlayerJoinedMessage, game_player_joined_message;
    27 => GamePlayerLeftMessage, game_player_left_message;
    28 => GameAdminChangedMessage, game_admin_changed_message;
    29 => RemovedFromGameMessage, removed_from_game_message;
    30 => KickPlayerRequestMessage, kick_player_request_message;
    31 => LeaveGameRequestMessage, leave_game_request_message;
    32 => InvitePlayerToGameMessage, invite_player_to_game_message;
    33 => InviteNotifyMessage, invite_notify_message;
    34 => RejectGameInvitationMessage, reject_game_invitation_message;
    35 => RejectInvNotifyMessage, reject_inv_notify_message;
    36 => StartEventMessage, start_event_message;
    37 => StartEventAckMessage, start_event_ack_message;
    38 => GameStartInitialMessage, game_start_initial_message;
    39 => GameStartRejoinMessage, game_start_rejoin_message;
    40 => HandStartMessage, hand_start_message;
    41 => PlayersTurnMessage, players_turn_message;
    42 => MyActionRequestMessage, my_action_request_message;
    43 => YourActionRejectedMessage, your_action_rejected_message;
    44 => PlayersActionDoneMessage, players_action_done_message;
    45 => DealFlopCardsMessage, deal_flop_cards_message;
    46 => DealTurnCardMessage, deal_turn_card_message;
    47 => DealRiverCardMessage, deal_river_card_message;
    48 => AllInShowCardsMessage, all_in_show_cards_message;
    49 => EndOfHandShowCardsMessage, end_of_hand_show_cards_message;
    50 => EndOfHandHideCardsMessage, end_of_hand_hide_cards_message;
    51 => ShowMyCardsRequestMessage, show_my_cards_request_message;
    52 => AfterHandShowCardsMessage, after_hand_show_cards_message;
    53 => EndOfGameMessage, end_of_game_message;
    54 => PlayerIdChangedMessage, player_id_changed_message;
    55 => AskKickPlayerMessage, ask_kick_player_message;
    56 => AskKickDeniedMessage, ask_kick_denied_message;
    57 => StartKickPetitionMessage, start_kick_petition_message;
    58 => VoteKickRequestMessage, vote_kick_request_message;
    59 => VoteKickReplyMessage, vote_kick_reply_message;
    60 => KickPetitionUpdateMessage, kick_petition_update_message;
    61 => EndKickPetitionMessage, end_kick_petition_message;
    62 => StatisticsMessage, statistics_message;
    63 => ChatRequestMessage, chat_request_message;
    64 => ChatMessage, chat_message;
    65 => ChatRejectMessage, chat_reject_message;
    66 => DialogMessage, dialog_message;
    67 => TimeoutWarningMessage, timeout_warning_message;
    68 => ResetTimeoutMessage, reset_timeout_message;
    69 => ReportAvatarMessage, report_avatar_message;
    70 => ReportAvatarAckMessage, report_avatar_ack_message;
    71 => ReportGameMessage, report_game_message;
    72 => ReportGameAckMessage, report_game_ack_message;
    73 => ErrorMessage, error_message;
    74 => AdminRemoveGameMessage, admin_remove_game_message;
    75 => AdminRemoveGameAckMessage, admin_remove_game_ack_message;
    76 => AdminBanPlayerMessage, admin_ban_player_message;
    77 => AdminBanPlayerAckMessage, admin_ban_player_ack_message;
    78 => GameListSpectatorJoinedMessage, game_list_spectator_joined_message;
    79 => GameListSpectatorLeftMessage, game_list_spectator_left_message;
    80 => GameSpectatorJoinedMessage, game_spectator_joined_message;
    81 => GameSpectatorLeftMessage, game_spectator_left_message;
}

impl MessageType {
    /// Name of the dispatch hook for this message type: the `Message`
    /// suffix becomes `Received` and the first letter is lower-cased, so
    /// `InitAckMessage` maps to `initAckReceived`.
    #[must_use]
    pub fn hook_name(self) -> String {
        hook_name(self.name())
    }
}

/// Applies the hook naming rule to an arbitrary message type name.
#[must_use]
pub fn hook_name(message_name: &str) -> String {
    let base = message_name.strip_suffix("Message").unwrap_or(message_name);
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => format!("{}{}Received", first.to_lowercase(), chars.as_str()),
        None => "Received".to_string(),
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
