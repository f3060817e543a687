//! Codeword Encoder Tests
//!
//! Tests for codeword derivation and pulse sequencing.
//! Run with: cargo test --no-default-features --features std --test encoder_tests

use lightmgr::config::NUM_TRANSMITS;
use lightmgr::radio::encoder::{Codeword, Pulse, BASE_OFF, BASE_ON};
use lightmgr::types::{Action, Group, Socket, SwitchAddress};

fn addr(group: Group, socket: u8) -> SwitchAddress {
    SwitchAddress::new(group, Socket::new(socket).unwrap())
}

// =============================================================================
// Codeword Tests
// =============================================================================

#[test]
fn test_a1_on() {
    let word = Codeword::encode(addr(Group::A, 1), Action::On);
    assert_eq!(word.bytes(), [0x15, 0x15, 0x57]);
}

#[test]
fn test_d3_off() {
    let word = Codeword::encode(addr(Group::D, 3), Action::Off);
    assert_eq!(word.bytes(), [0x54, 0x51, 0x54]);
}

#[test]
fn test_on_and_off_differ_only_in_action_byte() {
    for group in Group::ALL {
        for socket in 1..=3 {
            let on = Codeword::encode(addr(group, socket), Action::On);
            let off = Codeword::encode(addr(group, socket), Action::Off);
            assert_eq!(on.address_byte(), off.address_byte());
            assert_eq!(on.socket_byte(), off.socket_byte());
            assert_eq!(on.action_byte(), BASE_ON[2]);
            assert_eq!(off.action_byte(), BASE_OFF[2]);
        }
    }
}

#[test]
fn test_all_addresses_distinct() {
    let mut words: Vec<u32> = Group::ALL
        .iter()
        .flat_map(|&g| (1..=3).map(move |s| Codeword::encode(addr(g, s), Action::On).as_u32()))
        .collect();
    words.sort_unstable();
    words.dedup();
    assert_eq!(words.len(), 12);
}

#[test]
fn test_display_hex() {
    let word = Codeword::encode(addr(Group::B, 2), Action::On);
    assert_eq!(word.to_string(), "454557");
}

// =============================================================================
// Pulse Tests
// =============================================================================

#[test]
fn test_bits_msb_first() {
    let word = Codeword::from_bytes([0x80, 0x00, 0x01]);
    let bits: Vec<bool> = word.bits().collect();
    assert_eq!(bits.len(), 24);
    assert!(bits[0]);
    assert!(bits[1..23].iter().all(|b| !b));
    assert!(bits[23]);
}

#[test]
fn test_frame_starts_with_sync() {
    let word = Codeword::encode(addr(Group::A, 1), Action::On);
    let frame: Vec<Pulse> = word.frame().collect();
    assert_eq!(frame.len(), 25);
    assert_eq!(frame[0], Pulse::SYNC);
    assert_eq!((Pulse::SYNC.high, Pulse::SYNC.low), (1, 31));
    // 0x15 = 0001_0101
    assert_eq!(frame[1], Pulse::ZERO);
    assert_eq!(frame[4], Pulse::ONE);
}

#[test]
fn test_bit_pulses() {
    assert_eq!((Pulse::ONE.high, Pulse::ONE.low), (3, 1));
    assert_eq!((Pulse::ZERO.high, Pulse::ZERO.low), (1, 3));
    assert_eq!(Pulse::for_bit(true), Pulse::ONE);
    assert_eq!(Pulse::for_bit(false), Pulse::ZERO);
}

#[test]
fn test_burst_has_250_pulses() {
    let word = Codeword::encode(addr(Group::C, 2), Action::Off);
    assert_eq!(word.burst(NUM_TRANSMITS).count(), 250);
    assert_eq!(Codeword::burst_len(), 250);
}

#[test]
fn test_burst_units() {
    let word = Codeword::encode(addr(Group::C, 2), Action::Off);
    let units: u32 = word.burst(NUM_TRANSMITS).map(Pulse::units).sum();
    assert_eq!(units, 1280);
}
