/// Integration tests for the async client driver and the proxy
///
/// These tests run a scripted PokerTH server on a loopback socket and drive
/// the real tokio client and proxy against it.
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    time,
};

use pokerth_proto::{
    Client, ClientCallbacks, ClientConfig, ClientProtocol, FrameBuffer, HaltAlways, Message,
    ProtocolError, Proxy, Session,
    messages::{AnnounceMessage, InitAckMessage, ServerType},
    utils::{develop, pack_envelop, unpack},
};

#[derive(Default)]
struct Greeter {
    lobby_entered: usize,
}

impl ClientCallbacks for Greeter {
    fn handle_inside_lobby(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        self.lobby_entered += 1;
        session.send_chat("hello", None, None)
    }
}

async fn loopback_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    (listener, addr)
}

async fn read_message(stream: &mut TcpStream, buffer: &mut FrameBuffer) -> Message {
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(frame) = buffer.next_frame().unwrap() {
            return develop(unpack(&frame).unwrap()).unwrap();
        }
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "peer closed before a full message arrived");
        buffer.extend(&chunk[..n]);
    }
}

fn fast_config() -> ClientConfig {
    ClientConfig {
        lobby_delay: Duration::from_millis(10),
        end_of_game_delay: Duration::from_millis(10),
        ..ClientConfig::with_nickname("Loopback")
    }
}

#[tokio::test]
async fn test_client_logs_in_and_enters_lobby() {
    let (listener, addr) = loopback_listener().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buffer = FrameBuffer::default();
        stream
            .write_all(
                &pack_envelop(AnnounceMessage {
                    server_type: ServerType::InternetNoAuth,
                    ..AnnounceMessage::default()
                })
                .unwrap(),
            )
            .await
            .unwrap();

        let Message::InitMessage(init) = read_message(&mut stream, &mut buffer).await else {
            panic!("expected InitMessage");
        };
        assert_eq!(init.nick_name.as_deref(), Some("Loopback"));

        stream
            .write_all(
                &pack_envelop(InitAckMessage {
                    your_player_id: 3,
                    ..InitAckMessage::default()
                })
                .unwrap(),
            )
            .await
            .unwrap();

        let Message::ChatRequestMessage(chat) = read_message(&mut stream, &mut buffer).await
        else {
            panic!("expected ChatRequestMessage");
        };
        assert_eq!(chat.chat_text, "hello");
        // Dropping the stream ends the connection.
    });

    let protocol = ClientProtocol::new(fast_config(), Greeter::default());
    let mut client = Client::new(addr, protocol, HaltAlways);
    time::timeout(Duration::from_secs(5), client.run())
        .await
        .unwrap()
        .unwrap();
    server.await.unwrap();

    assert_eq!(client.generation(), 1);
    assert_eq!(client.protocol().session().player_id(), Some(3));
    assert_eq!(client.into_protocol().callbacks().lobby_entered, 1);
}

#[tokio::test]
async fn test_client_fails_without_server() {
    let (listener, addr) = loopback_listener().await;
    drop(listener);

    let protocol = ClientProtocol::new(fast_config(), Greeter::default());
    let mut client = Client::new(addr, protocol, HaltAlways);
    assert!(client.run().await.is_err());
    assert_eq!(client.generation(), 0);
}

#[tokio::test]
async fn test_proxy_relays_verbatim() {
    let (upstream, upstream_addr) = loopback_listener().await;
    let (front, front_addr) = loopback_listener().await;

    let greeting = pack_envelop(AnnounceMessage {
        server_type: ServerType::Lan,
        num_players_on_server: 12,
        ..AnnounceMessage::default()
    })
    .unwrap();
    let expected_greeting = greeting.clone();

    // Echo server that greets first.
    tokio::spawn(async move {
        let (mut stream, _) = upstream.accept().await.unwrap();
        stream.write_all(&greeting).await.unwrap();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            stream.write_all(&buf[..n]).await.unwrap();
        }
    });

    let proxy = std::sync::Arc::new(Proxy::new(upstream_addr));
    let serving = std::sync::Arc::clone(&proxy);
    tokio::spawn(async move { serving.serve(front).await });

    let mut client = TcpStream::connect(front_addr).await.unwrap();
    let mut received = vec![0u8; expected_greeting.len()];
    client.read_exact(&mut received).await.unwrap();
    assert_eq!(received, expected_greeting.to_vec());
    assert_eq!(proxy.connections(), 1);

    // Garbage is relayed too; only its logging is affected.
    let payload = b"\x00\x00\x00\x03abc";
    client.write_all(payload).await.unwrap();
    let mut echoed = vec![0u8; payload.len()];
    client.read_exact(&mut echoed).await.unwrap();
    assert_eq!(&echoed, payload);

    drop(client);
    time::timeout(Duration::from_secs(5), async {
        while proxy.connections() > 0 {
            time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
}
