/// Integration tests for the client protocol state machine
///
/// These tests script a server conversation as raw frames and verify the
/// state transitions, the replies queued for the server and the callbacks
/// invoked along the way.
use pokerth_proto::{
    Action, ClientCallbacks, ClientConfig, ClientProtocol, ClientState, Message, ProtocolAction,
    ProtocolError, Round, Session,
    messages::{
        AnnounceMessage, ChatMessage, ChatType, DealFlopCardsMessage, EndOfGameMessage,
        GameListNewMessage, GamePlayerJoinedMessage, GameStartInitialMessage, HandStartMessage,
        InitAckMessage, JoinGameAckMessage, NetGameInfo, PlainCards, PlayerIdChangedMessage,
        PlayerInfoData, PlayerInfoReplyMessage, PlayersActionDoneMessage, PlayersTurnMessage,
        ServerType, StartEventMessage, StartEventType,
    },
    utils::{develop, pack_envelop, unpack},
};

/// Replies to chat the way the sample bot does and checks or calls on its
/// turn.
#[derive(Default)]
struct PingPong {
    chats: Vec<String>,
}

impl ClientCallbacks for PingPong {
    fn handle_inside_lobby(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        session.send_join_existing_game(1, true)
    }

    fn handle_my_turn(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        let game = session.active_game()?;
        let action = if game.is_bet_placed()? {
            Action::Call
        } else {
            Action::Check
        };
        let bet = game.highest_set;
        session.send_my_action(action, bet, false)
    }

    fn handle_others_turn(
        &mut self,
        _session: &mut Session,
        _player_id: u32,
    ) -> Result<(), ProtocolError> {
        Ok(())
    }

    fn handle_chat(
        &mut self,
        session: &mut Session,
        chat: &ChatMessage,
    ) -> Result<(), ProtocolError> {
        self.chats.push(chat.chat_text.clone());
        match (chat.game_id, chat.player_id) {
            (Some(game_id), Some(player_id)) => {
                session.send_chat("Pooong", Some(game_id), Some(player_id))
            }
            _ => session.send_chat("Pong", None, None),
        }
    }
}

fn frame(message: impl Into<Message>) -> Vec<u8> {
    pack_envelop(message).unwrap().to_vec()
}

fn sent(protocol: &mut ClientProtocol<PingPong>) -> Vec<Message> {
    protocol
        .take_actions()
        .into_iter()
        .filter_map(|action| match action {
            ProtocolAction::Send(bytes) => Some(develop(unpack(&bytes).unwrap()).unwrap()),
            ProtocolAction::Schedule { .. } => None,
        })
        .collect()
}

fn new_protocol() -> ClientProtocol<PingPong> {
    ClientProtocol::new(ClientConfig::with_nickname("Tester"), PingPong::default())
}

#[test]
fn test_login_join_and_start() {
    let mut protocol = new_protocol();

    protocol
        .data_received(&frame(AnnounceMessage {
            server_type: ServerType::InternetNoAuth,
            ..AnnounceMessage::default()
        }))
        .unwrap();
    assert!(matches!(&sent(&mut protocol)[..], [Message::InitMessage(_)]));

    protocol
        .data_received(&frame(InitAckMessage {
            your_player_id: 7,
            your_session_id: vec![9; 16],
            ..InitAckMessage::default()
        }))
        .unwrap();
    assert_eq!(protocol.state(), ClientState::Lobby);
    assert_eq!(protocol.session().player_id(), Some(7));

    protocol
        .data_received(&frame(JoinGameAckMessage {
            game_id: 1,
            are_you_game_admin: false,
            ..JoinGameAckMessage::default()
        }))
        .unwrap();
    assert_eq!(protocol.state(), ClientState::GameJoined);
    let game = protocol.session().active_game().unwrap();
    assert_eq!(game.game_id(), 1);
    let ids: Vec<u32> = game.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![7]);

    protocol
        .data_received(&frame(StartEventMessage {
            game_id: 1,
            start_event_type: StartEventType::Start,
            fill_with_computer_players: Some(false),
        }))
        .unwrap();
    assert_eq!(protocol.state(), ClientState::GameStarted);
    assert!(matches!(
        &sent(&mut protocol)[..],
        [Message::StartEventAckMessage(ack)] if ack.game_id == 1
    ));
}

#[test]
fn test_conversation_split_byte_by_byte() {
    let mut stream = frame(InitAckMessage {
        your_player_id: 7,
        ..InitAckMessage::default()
    });
    stream.extend(frame(JoinGameAckMessage {
        game_id: 1,
        ..JoinGameAckMessage::default()
    }));
    stream.extend(frame(StartEventMessage {
        game_id: 1,
        ..StartEventMessage::default()
    }));

    let mut protocol = new_protocol();
    for byte in &stream {
        protocol.data_received(std::slice::from_ref(byte)).unwrap();
    }
    assert_eq!(protocol.state(), ClientState::GameStarted);
    assert!(matches!(
        &sent(&mut protocol)[..],
        [Message::StartEventAckMessage(ack)] if ack.game_id == 1
    ));
}

#[test]
fn test_chat_replies() {
    let mut protocol = new_protocol();
    let mut data = frame(ChatMessage {
        game_id: None,
        player_id: None,
        chat_type: ChatType::Lobby,
        chat_text: "ping".to_string(),
    });
    data.extend(frame(ChatMessage {
        game_id: Some(5),
        player_id: Some(6),
        chat_type: ChatType::Standard,
        chat_text: "ping".to_string(),
    }));
    protocol.data_received(&data).unwrap();

    let messages = sent(&mut protocol);
    let [Message::ChatRequestMessage(lobby), Message::ChatRequestMessage(game)] = &messages[..]
    else {
        panic!("expected two chat requests, got {messages:?}");
    };
    assert_eq!(lobby.chat_text, "Pong");
    assert_eq!(lobby.target_game_id, None);
    assert_eq!(lobby.target_player_id, None);
    assert_eq!(game.chat_text, "Pooong");
    assert_eq!(game.target_game_id, Some(5));
    assert_eq!(game.target_player_id, Some(6));
    assert_eq!(protocol.callbacks().chats.len(), 2);
}

#[test]
fn test_full_hand_with_lobby_info() {
    let mut protocol = new_protocol();
    protocol
        .data_received(&frame(InitAckMessage {
            your_player_id: 7,
            ..InitAckMessage::default()
        }))
        .unwrap();
    protocol
        .data_received(&frame(GameListNewMessage {
            game_id: 1,
            admin_player_id: 8,
            player_ids: vec![8],
            game_info: NetGameInfo {
                game_name: "Table".to_string(),
                start_money: 5000,
                first_small_blind: 50,
                ..NetGameInfo::default()
            },
            ..GameListNewMessage::default()
        }))
        .unwrap();
    protocol
        .data_received(&frame(PlayerInfoReplyMessage {
            player_id: 8,
            player_info_data: Some(PlayerInfoData {
                player_name: "Alice".to_string(),
                is_human: true,
                ..PlayerInfoData::default()
            }),
        }))
        .unwrap();

    protocol
        .run_deferred(pokerth_proto::Deferred::EnterLobby)
        .unwrap();
    assert!(matches!(
        &sent(&mut protocol)[..],
        [Message::JoinExistingGameMessage(join)] if join.game_id == 1 && join.auto_leave
    ));

    let mut data = frame(JoinGameAckMessage {
        game_id: 1,
        game_info: NetGameInfo {
            first_small_blind: 50,
            start_money: 5000,
            ..NetGameInfo::default()
        },
        ..JoinGameAckMessage::default()
    });
    data.extend(frame(GamePlayerJoinedMessage {
        game_id: 1,
        player_id: 8,
        is_game_admin: true,
    }));
    data.extend(frame(StartEventMessage {
        game_id: 1,
        ..StartEventMessage::default()
    }));
    data.extend(frame(GameStartInitialMessage {
        game_id: 1,
        start_dealer_player_id: 8,
        player_seats: vec![8, 7],
    }));
    data.extend(frame(HandStartMessage {
        game_id: 1,
        plain_cards: Some(PlainCards {
            plain_card1: 12,
            plain_card2: 11,
        }),
        small_blind: 50,
        ..HandStartMessage::default()
    }));
    for (player_id, round, bet) in [(8, Round::SmallBlind, 50), (7, Round::BigBlind, 100)] {
        data.extend(frame(PlayersActionDoneMessage {
            game_id: 1,
            player_id,
            game_state: round,
            player_action: Action::None,
            total_player_bet: bet,
            player_money: 5000 - bet,
            highest_set: bet,
            minimum_raise: 100,
        }));
    }
    data.extend(frame(PlayersActionDoneMessage {
        game_id: 1,
        player_id: 8,
        game_state: Round::Preflop,
        player_action: Action::Call,
        total_player_bet: 100,
        player_money: 4900,
        highest_set: 100,
        minimum_raise: 100,
    }));
    data.extend(frame(PlayersTurnMessage {
        game_id: 1,
        player_id: 7,
        game_state: Round::Preflop,
    }));
    protocol.data_received(&data).unwrap();

    let messages = sent(&mut protocol);
    let [
        Message::StartEventAckMessage(_),
        Message::MyActionRequestMessage(request),
    ] = &messages[..]
    else {
        panic!("unexpected replies {messages:?}");
    };
    assert_eq!(request.my_action, Action::Call);
    assert_eq!(request.my_relative_bet, 0);
    assert_eq!(request.game_state, Round::Preflop);
    assert_eq!(request.hand_num, 1);

    let game = protocol.session().active_game().unwrap();
    assert_eq!(game.admin_player_id, Some(8));
    assert_eq!(game.dealer().unwrap().id, 8);
    let alice = game.player(8).unwrap();
    assert_eq!(alice.name.as_deref(), Some("Alice"));
    assert_eq!(alice.money, Some(4900));
    assert_eq!(game.player(7).unwrap().money, Some(4900));
    assert_eq!(game.my_bet(), Ok(100));
    let pocket: Vec<String> = game
        .pocket_cards
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(pocket, vec!["Ad", "Kd"]);

    protocol
        .data_received(&frame(DealFlopCardsMessage {
            game_id: 1,
            flop_card1: 38,
            flop_card2: 37,
            flop_card3: 36,
        }))
        .unwrap();
    let game = protocol.session().active_game().unwrap();
    assert_eq!(game.current_round().unwrap().round, Round::Flop);
    assert_eq!(game.my_bet(), Ok(0));
    assert_eq!(game.is_bet_placed(), Ok(false));
}

#[test]
fn test_end_of_game_returns_to_joined() {
    let mut protocol = new_protocol();
    let mut data = frame(InitAckMessage {
        your_player_id: 7,
        ..InitAckMessage::default()
    });
    data.extend(frame(JoinGameAckMessage {
        game_id: 1,
        ..JoinGameAckMessage::default()
    }));
    data.extend(frame(StartEventMessage {
        game_id: 1,
        ..StartEventMessage::default()
    }));
    data.extend(frame(EndOfGameMessage {
        game_id: 1,
        winner_player_id: 7,
    }));
    protocol.data_received(&data).unwrap();
    assert_eq!(protocol.state(), ClientState::GameJoined);

    let scheduled: Vec<_> = protocol
        .take_actions()
        .into_iter()
        .filter_map(|action| match action {
            ProtocolAction::Schedule { delay, task } => Some((delay, task)),
            ProtocolAction::Send(_) => None,
        })
        .collect();
    assert_eq!(scheduled.len(), 2);
    assert_eq!(
        scheduled[1],
        (
            ClientConfig::default().end_of_game_delay,
            pokerth_proto::Deferred::EndOfGame { winner_id: 7 }
        )
    );

    // PingPong has no end-of-game decision.
    let error = protocol.run_deferred(scheduled[1].1).unwrap_err();
    assert!(error.is_fatal());
}

#[test]
fn test_player_id_change_follows_self() {
    let mut protocol = new_protocol();
    let mut data = frame(InitAckMessage {
        your_player_id: 7,
        ..InitAckMessage::default()
    });
    data.extend(frame(JoinGameAckMessage {
        game_id: 1,
        ..JoinGameAckMessage::default()
    }));
    data.extend(frame(PlayerIdChangedMessage {
        old_player_id: 7,
        new_player_id: 70,
    }));
    protocol.data_received(&data).unwrap();

    let session = protocol.session();
    assert_eq!(session.player_id(), Some(70));
    assert!(session.lobby.exist_player(70));
    assert!(!session.lobby.exist_player(7));
    assert_eq!(session.active_game().unwrap().my_id(), 70);
}

#[test]
fn test_reset_starts_fresh_session() {
    let mut protocol = new_protocol();
    protocol
        .data_received(&frame(InitAckMessage {
            your_player_id: 7,
            ..InitAckMessage::default()
        }))
        .unwrap();
    // Half a frame left in the buffer must not leak into the next connection.
    let partial = frame(ChatMessage::default());
    protocol.data_received(&partial[..3]).unwrap();

    protocol.reset();
    assert_eq!(protocol.state(), ClientState::Init);
    assert_eq!(protocol.session().player_id(), None);
    protocol
        .data_received(&frame(InitAckMessage {
            your_player_id: 8,
            ..InitAckMessage::default()
        }))
        .unwrap();
    assert_eq!(protocol.session().player_id(), Some(8));
}
