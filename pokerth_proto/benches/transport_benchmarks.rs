use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pokerth_proto::{
    FrameBuffer,
    messages::{
        ChatRequestMessage, GameListNewMessage, NetGameInfo, PlayersActionDoneMessage,
    },
    poker::{Action, Round},
    utils::{develop, pack_envelop, unpack},
};
use std::hint::black_box;

/// Helper to build a stream of `n` typical in-game frames
fn setup_stream(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| {
            pack_envelop(PlayersActionDoneMessage {
                game_id: 1,
                player_id: i as u32 % 10,
                game_state: Round::Flop,
                player_action: Action::Call,
                total_player_bet: 200,
                player_money: 2800,
                highest_set: 200,
                minimum_raise: 100,
            })
            .unwrap()
            .to_vec()
        })
        .collect()
}

/// Benchmark packing a small chat request
fn bench_pack_chat(c: &mut Criterion) {
    c.bench_function("pack_chat", |b| {
        b.iter(|| {
            pack_envelop(black_box(ChatRequestMessage {
                target_game_id: Some(5),
                target_player_id: Some(6),
                chat_text: "Pooong".to_string(),
            }))
        });
    });
}

/// Benchmark unpacking and developing a game list entry
fn bench_unpack_game_list(c: &mut Criterion) {
    let frame = pack_envelop(GameListNewMessage {
        game_id: 4,
        player_ids: (1..=10).collect(),
        admin_player_id: 1,
        game_info: NetGameInfo {
            game_name: "Friday night".to_string(),
            manual_blinds: vec![10, 20, 40, 80, 160],
            ..NetGameInfo::default()
        },
        ..GameListNewMessage::default()
    })
    .unwrap();

    c.bench_function("unpack_game_list", |b| {
        b.iter(|| develop(unpack(black_box(&frame)).unwrap()));
    });
}

/// Benchmark reassembly of a stream delivered in chunks of various sizes
fn bench_reassembly(c: &mut Criterion) {
    let stream = setup_stream(100);
    let mut group = c.benchmark_group("reassembly");

    for chunk_size in [1, 16, 512, stream.len()] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut buffer = FrameBuffer::default();
                    let mut frames = 0;
                    for chunk in stream.chunks(chunk_size) {
                        frames += buffer.push(chunk).unwrap().len();
                    }
                    frames
                });
            },
        );
    }

    group.finish();
}

criterion_group!(codec, bench_pack_chat, bench_unpack_game_list);

criterion_group!(stream, bench_reassembly);

criterion_main!(codec, stream);
