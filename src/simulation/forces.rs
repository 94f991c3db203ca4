//! Force terms for the particle swarm
//!
//! Each term implements [`Force`] and adds its velocity change for one
//! particle directly into that particle's velocity. Terms only read the
//! particle's own position, so the per-particle pass has no cross-particle
//! dependency.
//!
//! [`ForceSet`] is built once per tick from the config snapshot, the mode's
//! [`ForceProfile`] and the cursor, and holds no heap data.

use rand::{Rng, RngCore};

use super::params::{
    ForceProfile, SimulationConfig, CENTER_EPSILON, CURL_STRENGTH, CURSOR_RADIUS2, CURSOR_SOFTENING,
    CURSOR_STRENGTH, JITTER_GAIN,
};
use super::states::NVec3;

/// A velocity contribution evaluated per particle.
pub trait Force {
    fn apply(&self, x: &NVec3, dt: f64, rng: &mut dyn RngCore, v: &mut NVec3);
}

/// Radial force from the origin. Positive `strength` pushes outward.
pub struct CentralForce {
    pub strength: f64,
}

impl Force for CentralForce {
    fn apply(&self, x: &NVec3, dt: f64, _rng: &mut dyn RngCore, v: &mut NVec3) {
        let r = x.norm();
        // Skip near the origin rather than normalizing a tiny vector
        if r > CENTER_EPSILON {
            *v += x * (self.strength * dt / r);
        }
    }
}

/// Tangential push around the +y axis, proportional to position (not radius
/// dependent like a Keplerian orbit).
pub struct OrbitalCurl {
    pub strength: f64,
}

impl Force for OrbitalCurl {
    fn apply(&self, x: &NVec3, dt: f64, _rng: &mut dyn RngCore, v: &mut NVec3) {
        v.x += x.z * self.strength * dt;
        v.z -= x.x * self.strength * dt;
    }
}

/// Softened inverse-square repulsion away from the cursor, inside a fixed
/// interaction radius.
pub struct CursorRepulsor {
    pub cursor: NVec3,
    pub radius2: f64,
    pub strength: f64,
    pub softening: f64,
}

impl Force for CursorRepulsor {
    fn apply(&self, x: &NVec3, dt: f64, _rng: &mut dyn RngCore, v: &mut NVec3) {
        let d = x - self.cursor;
        let d2 = d.norm_squared();
        if d2 < self.radius2 {
            let force = self.strength / (d2 + self.softening);
            *v += d * (force * dt);
        }
    }
}

/// Zero-centred uniform noise on every axis.
pub struct Jitter {
    pub scale: f64, // chaos * dt * JITTER_GAIN is applied per call
}

impl Force for Jitter {
    fn apply(&self, _x: &NVec3, dt: f64, rng: &mut dyn RngCore, v: &mut NVec3) {
        let k = self.scale * dt * JITTER_GAIN;
        v.x += (rng.gen::<f64>() - 0.5) * k;
        v.y += (rng.gen::<f64>() - 0.5) * k;
        v.z += (rng.gen::<f64>() - 0.5) * k;
    }
}

/// The active terms for one tick, applied in a fixed order:
/// central, curl, cursor, jitter.
pub struct ForceSet {
    central: CentralForce,
    curl: Option<OrbitalCurl>,
    cursor: CursorRepulsor,
    jitter: Option<Jitter>,
}

impl ForceSet {
    pub fn new(config: &SimulationConfig, profile: &ForceProfile, cursor: NVec3) -> Self {
        Self {
            central: CentralForce {
                strength: profile.central_strength(config.gravity),
            },
            curl: profile.curl.then_some(OrbitalCurl {
                strength: CURL_STRENGTH,
            }),
            cursor: CursorRepulsor {
                cursor,
                radius2: CURSOR_RADIUS2,
                strength: CURSOR_STRENGTH,
                softening: CURSOR_SOFTENING,
            },
            jitter: (config.chaos > 0.0).then_some(Jitter {
                scale: config.chaos,
            }),
        }
    }

    /// Add every active term's contribution for a particle at `x` into `v`.
    #[inline]
    pub fn accumulate(&self, x: &NVec3, dt: f64, rng: &mut dyn RngCore, v: &mut NVec3) {
        self.central.apply(x, dt, rng, v);
        if let Some(curl) = &self.curl {
            curl.apply(x, dt, rng, v);
        }
        self.cursor.apply(x, dt, rng, v);
        if let Some(jitter) = &self.jitter {
            jitter.apply(x, dt, rng, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::Mode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn central_force_pushes_along_radius() {
        let mut v = NVec3::zeros();
        let x = NVec3::new(3.0, 0.0, 4.0);
        CentralForce { strength: 2.0 }.apply(&x, 0.5, &mut rng(), &mut v);
        // unit vector (0.6, 0, 0.8) * 2.0 * 0.5
        assert!((v - NVec3::new(0.6, 0.0, 0.8)).norm() < 1e-12);
    }

    #[test]
    fn central_force_skips_near_origin() {
        let mut v = NVec3::zeros();
        let x = NVec3::new(0.005, 0.0, 0.0);
        CentralForce { strength: 100.0 }.apply(&x, 1.0, &mut rng(), &mut v);
        assert_eq!(v, NVec3::zeros());
    }

    #[test]
    fn curl_rotates_around_vertical_axis() {
        let mut v = NVec3::zeros();
        let x = NVec3::new(1.0, 5.0, 0.0);
        OrbitalCurl { strength: CURL_STRENGTH }.apply(&x, 1.0, &mut rng(), &mut v);
        assert_eq!(v, NVec3::new(0.0, 0.0, -1.5));
        // tangential: no radial component in the xz plane
        assert_eq!(v.x * x.x + v.z * x.z, 0.0);
    }

    #[test]
    fn cursor_repels_inside_radius_only() {
        let cursor = NVec3::new(1.0, 1.0, 1.0);
        let rep = CursorRepulsor {
            cursor,
            radius2: CURSOR_RADIUS2,
            strength: CURSOR_STRENGTH,
            softening: CURSOR_SOFTENING,
        };

        let near = NVec3::new(2.0, 1.0, 1.0);
        let mut v = NVec3::zeros();
        rep.apply(&near, 0.1, &mut rng(), &mut v);
        assert!(v.x > 0.0, "particle should be pushed away from the cursor");
        assert!((v.x - 5.0 / 1.1 * 0.1).abs() < 1e-12);

        let far = NVec3::new(5.0, 1.0, 1.0);
        let mut v = NVec3::zeros();
        rep.apply(&far, 0.1, &mut rng(), &mut v);
        assert_eq!(v, NVec3::zeros());
    }

    #[test]
    fn jitter_is_bounded_by_chaos_and_dt() {
        let j = Jitter { scale: 1.0 };
        let mut r = rng();
        for _ in 0..1000 {
            let mut v = NVec3::zeros();
            j.apply(&NVec3::zeros(), 0.1, &mut r, &mut v);
            assert!(v.amax() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn force_set_follows_mode_profile() {
        let config = SimulationConfig {
            mode: Mode::Atomic,
            chaos: 0.0,
            ..SimulationConfig::default()
        };
        let set = ForceSet::new(&config, config.mode.profile(), NVec3::new(0.0, 1e6, 0.0));
        assert!(set.curl.is_none());
        assert!(set.jitter.is_none());

        let config = SimulationConfig {
            mode: Mode::Vortex,
            chaos: 0.5,
            ..SimulationConfig::default()
        };
        let set = ForceSet::new(&config, config.mode.profile(), NVec3::zeros());
        assert!(set.curl.is_some());
        assert!(set.jitter.is_some());
        assert_eq!(set.central.strength, -3.0);
    }
}
