//! SM3 cryptographic hash, GB/T 32905-2016.
//!
//! A 256-bit Merkle–Damgård hash over 512-bit blocks, structurally close
//! to SHA-256. Supports streaming via [`update`](Sm3::update); finalizing
//! with [`sum`](Sm3::sum) takes `&self` and works on a clone of the
//! state, so it never perturbs an ongoing stream and is idempotent.

/// SM3 digest size in bytes.
pub const SM3_DIGEST_SIZE: usize = 32;

/// SM3 block size in bytes.
pub const SM3_BLOCK_SIZE: usize = 64;

/// Initial chaining values.
const IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

const fn t(j: usize) -> u32 {
    if j < 16 {
        0x79cc4519
    } else {
        0x7a879d8a
    }
}

fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) {
    // Message expansion: W[0..68) and W'[0..64).
    let mut w = [0u32; 68];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }
    let mut wp = [0u32; 64];
    for j in 0..64 {
        wp[j] = w[j] ^ w[j + 4];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let ss1 = a
            .rotate_left(12)
            .wrapping_add(e)
            .wrapping_add(t(j).rotate_left(j as u32 % 32))
            .rotate_left(7);
        let ss2 = ss1 ^ a.rotate_left(12);
        let tt1 = ff(a, b, c, j)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(wp[j]);
        let tt2 = gg(e, f, g, j)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;
}

/// Streaming SM3 hash state.
#[derive(Clone)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffered: usize,
    length: u64,
}

impl Sm3 {
    pub fn new() -> Self {
        Self {
            state: IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    /// Absorb message bytes.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length += data.len() as u64;

        if self.buffered > 0 {
            let take = (SM3_BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == SM3_BLOCK_SIZE {
                let block = self.buffer;
                compress(&mut self.state, &block);
                self.buffered = 0;
            }
        }

        let mut blocks = data.chunks_exact(SM3_BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block.try_into().unwrap());
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Produce the digest of everything written so far.
    ///
    /// Finalization (padding and the length block) runs on a clone, so
    /// `sum` can be called at any point, repeatedly, without disturbing
    /// the stream.
    pub fn sum(&self) -> [u8; SM3_DIGEST_SIZE] {
        let mut ctx = self.clone();

        let bit_length = ctx.length * 8;
        ctx.update(&[0x80]);
        while ctx.buffered != SM3_BLOCK_SIZE - 8 {
            ctx.update(&[0x00]);
        }
        // The length update itself must not count toward the length.
        ctx.update(&bit_length.to_be_bytes());

        let mut out = [0u8; SM3_DIGEST_SIZE];
        for (i, word) in ctx.state.iter().enumerate() {
            out[4 * i..4 * i + 4].copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Restore the pristine state to hash a new message.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// One-shot digest.
    pub fn digest(data: &[u8]) -> [u8; SM3_DIGEST_SIZE] {
        let mut ctx = Self::new();
        ctx.update(data);
        ctx.sum()
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}
