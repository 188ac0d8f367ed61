use thiserror::Error;
use volume_physics::PhysicsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error("route finished after {ticks} ticks with {collected}/{required} pickups")]
    Unfinished {
        ticks: u32,
        collected: u32,
        required: u32,
    },
}
