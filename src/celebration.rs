use rand::seq::SliceRandom;
use rand::Rng;
use unicode_width::UnicodeWidthChar;

/// Text formed by particles on a milestone
pub const MILESTONE_BANNER: &str = "SUPER STREAK!";

const SYMBOLS: [char; 7] = ['✦', '★', '•', '✶', '◆', '●', '■'];
const GRAVITY: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    /// Bonus question answered
    Normal,
    /// Score milestone reached
    Mega,
}

impl Intensity {
    pub fn duration_secs(self) -> f64 {
        match self {
            Intensity::Normal => 1.5,
            Intensity::Mega => 2.5,
        }
    }
}

/// One confetti cell
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
    pub is_text: bool,
    pub target_x: f64,
    pub target_y: f64,
}

impl Particle {
    fn confetti<R: Rng>(x: f64, y: f64, vel_x: f64, vel_y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x,
            vel_y,
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'•'),
            color_index: rng.gen_range(0..5),
            age: 0.0,
            max_age: rng.gen_range(1.0..2.5),
            is_text: false,
            target_x: x,
            target_y: y,
        }
    }

    fn blast<R: Rng>(x: f64, y: f64, spread: f64, rng: &mut R) -> Self {
        let vel_x = rng.gen_range(-spread..spread);
        let vel_y = rng.gen_range(-6.0..-2.0);
        Self::confetti(x, y, vel_x, vel_y, rng)
    }

    /// `direction` is +1.0 for a cannon firing rightwards, -1.0 for leftwards
    fn cannon<R: Rng>(x: f64, y: f64, direction: f64, rng: &mut R) -> Self {
        let vel_x = direction * rng.gen_range(6.0..12.0);
        let vel_y = rng.gen_range(-8.0..-4.0);
        Self::confetti(x, y, vel_x, vel_y, rng)
    }

    fn text(
        x: f64,
        y: f64,
        target_x: f64,
        target_y: f64,
        symbol: char,
        color_index: usize,
    ) -> Self {
        Self {
            x,
            y,
            vel_x: target_x - x,
            vel_y: target_y - y,
            symbol,
            color_index,
            age: 0.0,
            max_age: Intensity::Mega.duration_secs(),
            is_text: true,
            target_x,
            target_y,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.is_text {
            let dist = ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
            if dist > 0.5 {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_x *= 0.9;
                self.vel_y *= 0.9;
            } else {
                self.x = self.target_x;
                self.y = self.target_y;
                self.vel_x = 0.0;
                self.vel_y = 0.0;
            }
        } else {
            self.x += self.vel_x * dt;
            self.y += self.vel_y * dt;
            self.vel_y += GRAVITY * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }

    /// Remaining life in `[0, 1]`, for fading
    pub fn life(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub intensity: Option<Intensity>,
    elapsed: f64,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            intensity: None,
            elapsed: 0.0,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.intensity.is_some()
    }

    pub fn start(&mut self, intensity: Intensity, width: u16, height: u16) {
        self.start_with_rng(intensity, width, height, &mut rand::thread_rng());
    }

    pub fn start_with_rng<R: Rng>(
        &mut self,
        intensity: Intensity,
        width: u16,
        height: u16,
        rng: &mut R,
    ) {
        self.particles.clear();
        self.intensity = Some(intensity);
        self.elapsed = 0.0;
        self.width = width as f64;
        self.height = height as f64;

        let center_x = self.width / 2.0;
        let origin_y = self.height * 0.7;

        match intensity {
            Intensity::Normal => {
                for _ in 0..20 {
                    self.particles.push(Particle::blast(center_x, origin_y, 7.0, rng));
                }
            }
            Intensity::Mega => {
                self.spell(MILESTONE_BANNER, center_x, self.height / 2.0 - 2.0, rng);
                for _ in 0..30 {
                    self.particles.push(Particle::blast(center_x, origin_y, 12.0, rng));
                }
                let cannon_y = self.height * 0.8;
                for _ in 0..12 {
                    self.particles.push(Particle::cannon(0.0, cannon_y, 1.0, rng));
                    self.particles.push(Particle::cannon(self.width - 1.0, cannon_y, -1.0, rng));
                }
            }
        }
    }

    fn spell<R: Rng>(&mut self, text: &str, center_x: f64, row: f64, rng: &mut R) {
        let advance = |c: char| c.width().unwrap_or(1) as f64 + 1.0;
        let total: f64 = text.chars().map(advance).sum::<f64>() - 1.0;
        let mut x = center_x - total / 2.0;

        for ch in text.chars() {
            if ch != ' ' {
                let from_x = center_x + rng.gen_range(-10.0..10.0);
                let from_y = row + rng.gen_range(-4.0..4.0);
                let color = rng.gen_range(0..5);
                self.particles
                    .push(Particle::text(from_x, from_y, x.round(), row, ch, color));
            }
            x += advance(ch);
        }
    }

    pub fn update(&mut self, dt: f64) {
        let Some(intensity) = self.intensity else {
            return;
        };

        self.elapsed += dt;
        if self.elapsed >= intensity.duration_secs() {
            self.stop();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            if p.is_text {
                return alive;
            }
            let margin = 3.0;
            let off_screen = p.y > height + margin || p.x < -margin || p.x > width + margin;
            alive && !off_screen
        });
    }

    pub fn stop(&mut self) {
        self.intensity = None;
        self.particles.clear();
        self.elapsed = 0.0;
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn test_confetti_falls() {
        let mut p = Particle::blast(10.0, 10.0, 5.0, &mut rng());
        let vel_y = p.vel_y;
        assert!(p.update(0.1));
        assert!(p.vel_y > vel_y);
        assert_ne!(p.y, 10.0);
    }

    #[test]
    fn test_text_particle_reaches_target() {
        let mut p = Particle::text(0.0, 0.0, 10.0, 5.0, 'S', 0);
        for _ in 0..20 {
            p.update(0.1);
        }
        let dist = ((p.target_x - p.x).powi(2) + (p.target_y - p.y).powi(2)).sqrt();
        assert!(dist < 2.0, "still {dist} away");
    }

    #[test]
    fn test_normal_burst_has_no_text() {
        let mut c = Celebration::new();
        c.start_with_rng(Intensity::Normal, 80, 24, &mut rng());
        assert!(c.is_active());
        assert_eq!(c.particles.len(), 20);
        assert!(c.particles.iter().all(|p| !p.is_text));
    }

    #[test]
    fn test_mega_spells_banner() {
        let mut c = Celebration::new();
        c.start_with_rng(Intensity::Mega, 80, 24, &mut rng());
        let text: String = c
            .particles
            .iter()
            .filter(|p| p.is_text)
            .map(|p| p.symbol)
            .collect();
        assert_eq!(text, "SUPERSTREAK!");
        assert_eq!(c.particles.iter().filter(|p| !p.is_text).count(), 30 + 24);
    }

    #[test]
    fn test_runs_for_its_duration() {
        let mut c = Celebration::new();
        c.start_with_rng(Intensity::Normal, 80, 24, &mut rng());
        for _ in 0..14 {
            c.update(0.1);
        }
        assert!(c.is_active());
        c.update(0.1);
        c.update(0.1);
        assert!(!c.is_active());
        assert!(c.particles.is_empty());
    }

    #[test]
    fn test_off_screen_particles_culled() {
        let mut c = Celebration::new();
        c.start_with_rng(Intensity::Normal, 20, 10, &mut rng());
        c.particles.push(Particle::blast(100.0, 100.0, 1.0, &mut rng()));
        c.update(0.05);
        assert!(c
            .particles
            .iter()
            .all(|p| p.x <= 23.0 && p.y <= 13.0 || p.is_text));
    }

    #[test]
    fn test_inactive_update_is_noop() {
        let mut c = Celebration::new();
        c.update(1.0);
        assert!(!c.is_active());
        assert!(c.particles.is_empty());
    }
}
