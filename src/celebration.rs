use rand::seq::SliceRandom;
use rand::Rng;

const PRAISE: [&str; 6] = ["YES!", "GREAT!", "SUPER!", "WOW!", "YAY!", "BRAVO!"];
// Fraction of the remaining distance a homing particle covers per second
const HOMING_RATE: f64 = 8.0;
const SPARKLES: [char; 4] = ['*', '+', '·', '✦'];

/// Particle for the correct-match star burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub kind: ParticleKind,
    pub target_x: f64,
    pub target_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// One per awarded star; settles into a row under the praise word
    Star,
    /// Letter of the praise word
    Text,
    Sparkle,
}

impl Particle {
    fn sparkle<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-6.0..-1.0),
            symbol: *SPARKLES.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(0.6..1.2),
            kind: ParticleKind::Sparkle,
            target_x: x,
            target_y: y,
        }
    }

    fn homing(
        x: f64,
        y: f64,
        target_x: f64,
        target_y: f64,
        symbol: char,
        color_index: usize,
        kind: ParticleKind,
    ) -> Self {
        Self {
            x,
            y,
            vel_x: 0.0,
            vel_y: 0.0,
            symbol,
            color_index,
            age: 0.0,
            max_age: f64::INFINITY,
            kind,
            target_x,
            target_y,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        match self.kind {
            ParticleKind::Star | ParticleKind::Text => {
                let dist =
                    ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
                if dist > 0.5 {
                    let step = (HOMING_RATE * dt).min(1.0);
                    self.x += (self.target_x - self.x) * step;
                    self.y += (self.target_y - self.y) * step;
                } else {
                    self.x = self.target_x;
                    self.y = self.target_y;
                }
            }
            ParticleKind::Sparkle => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += 12.0 * dt;
            }
        }

        self.age += dt;
        self.age < self.max_age
    }

    pub fn is_settled(&self) -> bool {
        self.x == self.target_x && self.y == self.target_y
    }
}

/// Star-burst overlay shown while a round is resolved correct
#[derive(Debug, Default)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub stars: u32,
    pub is_active: bool,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, stars: u32, width: u16, height: u16) {
        self.start_with_rng(stars, width, height, &mut rand::thread_rng());
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        stars: u32,
        width: u16,
        height: u16,
        rng: &mut R,
    ) {
        self.particles.clear();
        self.stars = stars;
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;

        let word = PRAISE.choose(rng).unwrap_or(&"YES!");
        let word_x = cx - (word.len() as f64 - 1.0);
        for (i, ch) in word.chars().enumerate() {
            self.particles.push(Particle::homing(
                cx + rng.gen_range(-8.0..8.0),
                cy + rng.gen_range(-4.0..4.0),
                word_x + i as f64 * 2.0,
                cy - 2.0,
                ch,
                rng.gen_range(0..7),
                ParticleKind::Text,
            ));
        }

        let row_x = cx - (stars as f64 - 1.0) * 1.5;
        for i in 0..stars {
            self.particles.push(Particle::homing(
                cx,
                cy,
                row_x + i as f64 * 3.0,
                cy + 1.0,
                '★',
                3,
                ParticleKind::Star,
            ));
        }

        for _ in 0..(stars * 4) {
            self.particles.push(Particle::sparkle(cx, cy, rng));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }

    /// Step the animation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            let buffer = 3.0;
            let off_screen = p.y > height + buffer || p.x < -buffer || p.x > width + buffer;
            alive && !(p.kind == ParticleKind::Sparkle && off_screen)
        });
    }

    pub fn star_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.kind == ParticleKind::Star)
    }
}
