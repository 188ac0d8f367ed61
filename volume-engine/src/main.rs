use crate::controller::{Autopilot, FirstPersonController};
use crate::error::AppError;
use crate::session::Session;
use glam::Vec3;
use volume_physics::{CollisionConfig, CollisionManager, Hierarchy};

mod controller;
mod error;
mod frustum;
mod level;
mod render;
mod session;

const TICK_RATE: f32 = 60.0;
const MAX_TICKS: u32 = 60 * 120;
const ASPECT_RATIO: f32 = 16.0 / 9.0;
const PICKUPS_TO_WIN: u32 = 4;
/// Seconds the scare overlay stays up.
const SCARE_DURATION: f32 = 2.0;
const ARRIVE_RADIUS: f32 = 0.3;

#[derive(Debug)]
struct Summary {
    ticks: u32,
    pickups: u32,
    scares: u32,
    /// Ticks in which a solid volume moved the mover.
    blocked_ticks: u32,
    final_position: Vec3,
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let summary = run(MAX_TICKS)?;
    log::info!(
        "Session over after {} ticks ({:.1}s): {} pickups, {} scares, blocked {} times, ended at {}",
        summary.ticks,
        summary.ticks as f32 / TICK_RATE,
        summary.pickups,
        summary.scares,
        summary.blocked_ticks,
        summary.final_position
    );
    Ok(())
}

/// Plays the level with the autopilot until every pickup is collected.
fn run(max_ticks: u32) -> Result<Summary, AppError> {
    let mut hierarchy = Hierarchy::new();
    let layout = level::build(&mut hierarchy)?;

    let mut manager = CollisionManager::with_config(layout.spawn, CollisionConfig::default())?;
    let registered = manager.register_scene(&mut hierarchy)?;
    log::info!(
        "Level ready: {} nodes, {} colliders",
        hierarchy.len(),
        registered
    );

    let events = manager.events();
    let mut controller = FirstPersonController::new();
    let mut autopilot = Autopilot::new(layout.route, ARRIVE_RADIUS);
    let mut session = Session::new(PICKUPS_TO_WIN, SCARE_DURATION);
    let dt = 1.0 / TICK_RATE;
    let mut ticks = 0;
    let mut blocked_ticks = 0;

    while ticks < max_ticks && !session.is_over() {
        autopilot.steer(&mut controller, manager.mover().position);
        if autopilot.is_finished() {
            break;
        }
        controller.update(manager.mover_mut(), dt);

        let walked_to = manager.mover().position;
        manager.tick(dt, &mut hierarchy);
        if manager.mover().position != walked_to {
            blocked_ticks += 1;
        }

        for fired in events.try_iter() {
            log::debug!("Tick {}: {:?} from {:?}", ticks, fired.event, fired.node);
            session.handle(fired.event);
        }
        session.advance(dt);

        // Positions are final for this tick; the frame only reads them.
        let eye = manager.mover().position;
        let view_proj = render::view_projection(controller.view_matrix(eye), ASPECT_RATIO);
        let draw_list = render::build_draw_list(&hierarchy, &view_proj, eye);
        log::trace!(
            "Tick {}: {} drawn, {} culled, nearest at {:?}, scare overlay {}",
            ticks,
            draw_list.items.len(),
            draw_list.culled,
            draw_list.items.first().map(|item| item.world.w_axis.truncate()),
            session.is_scare_visible()
        );

        ticks += 1;
    }

    if !session.is_over() {
        return Err(AppError::Unfinished {
            ticks,
            collected: session.pickups(),
            required: session.pickups_to_win(),
        });
    }

    Ok(Summary {
        ticks,
        pickups: session.pickups(),
        scares: session.scares(),
        blocked_ticks,
        final_position: manager.mover().position,
    })
}
