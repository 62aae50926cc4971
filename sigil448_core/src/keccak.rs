//! The Keccak-f[1600] permutation.
//!
//! The 200-byte state buffer is packed into 25 little-endian 64-bit lanes on
//! entry and unpacked the same way on exit of every call, so callers only
//! ever observe the byte view. 24 rounds of theta, rho+pi, chi and iota with
//! the published rotation, lane-permutation and round-constant tables.

/// Size of the permutation state in bytes (1600 bits).
pub const STATE_BYTES: usize = 200;

/// Number of rounds in Keccak-f[1600].
pub const ROUNDS: usize = 24;

const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808A,
    0x8000000080008000,
    0x000000000000808B,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008A,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000A,
    0x000000008000808B,
    0x800000000000008B,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800A,
    0x800000008000000A,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

const ROTATION_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Applies the full 24-round permutation to `state` in place.
pub fn permute(state: &mut [u8; STATE_BYTES]) {
    let mut lanes = [0u64; 25];
    for (lane, chunk) in lanes.iter_mut().zip(state.chunks_exact(8)) {
        *lane = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
    }
    for rc in ROUND_CONSTANTS {
        round(&mut lanes, rc);
    }
    for (chunk, lane) in state.chunks_exact_mut(8).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

fn round(st: &mut [u64; 25], rc: u64) {
    // theta: column parity diffusion
    let mut bc = [0u64; 5];
    for (i, parity) in bc.iter_mut().enumerate() {
        *parity = st[i] ^ st[i + 5] ^ st[i + 10] ^ st[i + 15] ^ st[i + 20];
    }
    for i in 0..5 {
        let t = bc[(i + 4) % 5] ^ bc[(i + 1) % 5].rotate_left(1);
        for j in (0..25).step_by(5) {
            st[j + i] ^= t;
        }
    }

    // rho + pi: rotate each lane by its fixed offset while permuting lanes
    let mut t = st[1];
    for i in 0..24 {
        let j = PI_LANES[i];
        let held = st[j];
        st[j] = t.rotate_left(ROTATION_OFFSETS[i]);
        t = held;
    }

    // chi: nonlinear row mix
    for j in (0..25).step_by(5) {
        let row = [st[j], st[j + 1], st[j + 2], st[j + 3], st[j + 4]];
        for i in 0..5 {
            st[j + i] = row[i] ^ (!row[(i + 1) % 5] & row[(i + 2) % 5]);
        }
    }

    // iota
    st[0] ^= rc;
}
