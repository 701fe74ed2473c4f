use tui_candymon::adapter::build_observation;
use tui_candymon::core::{MemoryStore, Session, SessionSnapshot};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// The observation hash covers the board kinds plus the score and move
/// counters, in that order, each counter as little-endian bytes.
fn expected_hash(snap: &SessionSnapshot) -> u64 {
    let board = snap
        .kinds
        .iter()
        .flat_map(|row| row.iter().map(|&k| k as u8));
    let counters = snap
        .score
        .to_le_bytes()
        .into_iter()
        .chain(snap.moves_left.to_le_bytes());
    fnv1a64_bytes(board.chain(counters))
}

#[test]
fn fnv1a_reference_vectors() {
    assert_eq!(fnv1a64_bytes(b"a".iter().copied()), 0xaf63dc4c8601ec8c);
    assert_eq!(
        fnv1a64_bytes(b"candymon".iter().copied()),
        0x96148d21e63d51d4
    );
}

#[test]
fn observation_state_hash_matches_reference() {
    let mut session = Session::new(Box::new(MemoryStore::new()), 1);
    session.reset(20_687);
    let snap = session.snapshot();

    let obs = build_observation(1, &snap, None, None);
    assert_eq!(obs.state_hash.0, expected_hash(&snap));

    // Playing a move changes the hash.
    let (from, to) = session.find_hint().unwrap();
    session.apply_swap(from, to).unwrap();
    let snap = session.snapshot();
    let obs2 = build_observation(2, &snap, None, None);
    assert_ne!(obs2.state_hash.0, obs.state_hash.0);
    assert_eq!(obs2.state_hash.0, expected_hash(&snap));
}

#[test]
fn state_hash_ignores_presentation_fields() {
    let mut session = Session::new(Box::new(MemoryStore::new()), 1);
    session.reset(20_687);
    let mut snap = session.snapshot();

    let base = build_observation(1, &snap, None, None).state_hash;

    // Meter, fever and streak are presentation state, not position state.
    snap.meter = 77;
    snap.fever = true;
    snap.streak = 12;
    assert_eq!(build_observation(2, &snap, None, None).state_hash, base);

    snap.score += 10;
    assert_ne!(build_observation(3, &snap, None, None).state_hash, base);
}
