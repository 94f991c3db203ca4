pub mod states;
pub mod color;
pub mod params;
pub mod engine;
pub mod forces;
pub mod frame;
pub mod integrator;
pub mod scenario;
