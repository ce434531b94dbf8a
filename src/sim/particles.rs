//! Particle engine
//!
//! Transient visual feedback only; nothing here affects gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::*;

/// Spawn a burst of `count` particles at `origin`. Velocities are uniform
/// per axis in [-BURST_SPREAD, BURST_SPREAD]; life starts at PARTICLE_LIFE
/// ticks. The oldest particles are evicted if the population cap is hit.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    color: u32,
    count: usize,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * BURST_SPREAD * 2.0,
            (rng.random::<f32>() - 0.5) * BURST_SPREAD * 2.0,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            size: rng.random::<f32>() * 3.0 + 1.0,
        });
    }
}

/// Advance every particle one tick and retire the dead ones afterwards.
pub fn update(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= 1.0;
        particle.vel *= PARTICLE_DRAG;
    }
    particles.retain(|p| p.life > 0.0);
}
