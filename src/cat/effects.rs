//! Visual feedback state: floating "+N" numbers, falling cats, and flashes.
//!
//! Nothing here is persisted or read by the engine. The session layer pushes
//! effects in response to command outcomes and the renderer reads them.

use super::state::Millis;

/// Cap on live particles.
const MAX_PARTICLES: usize = 20;

const CLICK_FLASH_MS: Millis = 260;
const PURCHASE_FLASH_MS: Millis = 500;
const REJECT_FLASH_MS: Millis = 300;
const SAVED_FLASH_MS: Millis = 1_200;

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    /// "+N" rising from the cat.
    FloatingText(String),
    /// A cat dropping from the top of the screen.
    FallingCat,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Floating text: column offset from the cat's center (-6..=6).
    /// Falling cat: column as a fraction of the area width, in 1/100ths.
    pub col: i16,
    pub born: Millis,
    pub life_ms: Millis,
}

impl Particle {
    /// 0.0 at birth, 1.0 at end of life.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.life_ms == 0 {
            return 1.0;
        }
        (now.saturating_sub(self.born) as f64 / self.life_ms as f64).min(1.0)
    }

    fn alive(&self, now: Millis) -> bool {
        now.saturating_sub(self.born) < self.life_ms
    }
}

pub struct Effects {
    pub particles: Vec<Particle>,
    click_flash_until: Millis,
    purchase_flash_until: Millis,
    reject_flash_until: Millis,
    saved_flash_until: Millis,
    /// Simple RNG state for particle spread.
    rng_state: u32,
}

impl Effects {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            click_flash_until: 0,
            purchase_flash_until: 0,
            reject_flash_until: 0,
            saved_flash_until: 0,
            rng_state: 42,
        }
    }

    /// xorshift32
    fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }

    pub fn on_click(&mut self, granted: u32, now: Millis) {
        self.click_flash_until = now + CLICK_FLASH_MS;

        let col = (self.next_random() % 13) as i16 - 6;
        let life_ms = 800 + (self.next_random() % 400) as Millis;
        self.push(Particle {
            kind: ParticleKind::FloatingText(format!("+{}", granted)),
            col,
            born: now,
            life_ms,
        });

        let col = (self.next_random() % 100) as i16;
        let life_ms = 1_400 + (self.next_random() % 900) as Millis;
        self.push(Particle {
            kind: ParticleKind::FallingCat,
            col,
            born: now,
            life_ms,
        });
    }

    pub fn on_purchase(&mut self, now: Millis) {
        self.purchase_flash_until = now + PURCHASE_FLASH_MS;
    }

    pub fn on_reject(&mut self, now: Millis) {
        self.reject_flash_until = now + REJECT_FLASH_MS;
    }

    pub fn on_saved(&mut self, now: Millis) {
        self.saved_flash_until = now + SAVED_FLASH_MS;
    }

    /// Drop expired particles.
    pub fn expire(&mut self, now: Millis) {
        self.particles.retain(|p| p.alive(now));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.click_flash_until = 0;
        self.purchase_flash_until = 0;
        self.reject_flash_until = 0;
    }

    pub fn click_flash(&self, now: Millis) -> bool {
        now < self.click_flash_until
    }

    pub fn purchase_flash(&self, now: Millis) -> bool {
        now < self.purchase_flash_until
    }

    pub fn reject_flash(&self, now: Millis) -> bool {
        now < self.reject_flash_until
    }

    pub fn saved_flash(&self, now: Millis) -> bool {
        now < self.saved_flash_until
    }
}
