//=========================================================================
// Headless Track
//
// Kinematic stand-in for a physics world, so the runner can be played and
// tested without a game engine.
//
// Model (1 unit ≈ 1 player width):
// - Flat ground at y = 0; the player is a 1×1 box at x ≈ 0
// - Obstacles are boxes standing on the ground, spawned `spawn_ahead`
//   units in front of the player and scrolled toward it at game speed
// - Spawn spacing cycles through a fixed list of gaps (deterministic)
// - The player moves with the commanded velocities; gravity is the
//   commanded scale (0 while grounded)
//
// Contacts are reported with Begin/Stay/End phases, one per surface per
// advance, in the order ground then obstacle.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::game::{CollisionSource, ContactEvent, ContactPhase, PlayerCommand, Stage, Surface};

//=== TrackLayout =========================================================

/// Geometry and spawn pattern of a track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Distance in front of the player where obstacles appear.
    pub spawn_ahead: f32,
    /// Track distance before the first obstacle of a run.
    pub first_gap: f32,
    /// Track distance between consecutive obstacles, cycled.
    pub gaps: Vec<f32>,
    /// Horizontal limits of the player.
    pub min_x: f32,
    pub max_x: f32,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            obstacle_width: 1.0,
            obstacle_height: 1.0,
            spawn_ahead: 20.0,
            first_gap: 10.0,
            gaps: vec![12.0, 18.0, 15.0, 22.0, 10.0],
            min_x: -4.0,
            max_x: 4.0,
        }
    }
}

//=== HeadlessTrack =======================================================

const PLAYER_HALF_WIDTH: f32 = 0.5;

/// Smallest track distance between two spawns, whatever the layout says.
const MIN_SPAWN_GAP: f32 = 0.5;

/// Spawns handled in one advance; a longer backlog is skipped.
const MAX_SPAWNS_PER_ADVANCE: usize = 64;

#[derive(Debug)]
pub struct HeadlessTrack {
    layout: TrackLayout,

    //--- Player body ------------------------------------------------------
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    gravity: f32,

    //--- World ------------------------------------------------------------
    /// Left edges of live obstacles, nearest first.
    obstacles: Vec<f32>,
    spawning: bool,
    until_spawn: f32,
    next_gap: usize,
    passed: u32,

    //--- Contact state ----------------------------------------------------
    on_ground: bool,
    on_obstacle: bool,
    contacts: Vec<ContactEvent>,
}

impl HeadlessTrack {
    pub fn new(layout: TrackLayout) -> Self {
        let until_spawn = layout.first_gap;
        Self {
            layout,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            gravity: 0.0,
            obstacles: Vec::new(),
            spawning: false,
            until_spawn,
            next_gap: 0,
            passed: 0,
            on_ground: false,
            on_obstacle: false,
            contacts: Vec::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Distance from the player's front to the nearest obstacle ahead.
    pub fn next_obstacle_distance(&self) -> Option<f32> {
        let front = self.x + PLAYER_HALF_WIDTH;
        self.obstacles
            .iter()
            .map(|left| left - front)
            .filter(|d| *d >= 0.0)
            .reduce(f32::min)
    }

    pub fn player_position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Obstacles that scrolled fully past the player this run.
    pub fn obstacles_passed(&self) -> u32 {
        self.passed
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    //--- Simulation -------------------------------------------------------

    fn move_player(&mut self, dt: f32) {
        self.x = (self.x + self.vx * dt).clamp(self.layout.min_x, self.layout.max_x);

        self.vy -= self.gravity * dt;
        self.y += self.vy * dt;

        if self.y <= 0.0 {
            self.y = 0.0;
            self.vy = self.vy.max(0.0);
        }
    }

    fn scroll(&mut self, distance: f32) {
        for left in &mut self.obstacles {
            *left -= distance;
        }

        let behind = self.x - PLAYER_HALF_WIDTH;
        let width = self.layout.obstacle_width;
        let before = self.obstacles.len();
        self.obstacles.retain(|left| left + width >= behind);
        self.passed += (before - self.obstacles.len()) as u32;

        if !self.spawning {
            return;
        }
        self.until_spawn -= distance;
        let mut spawned = 0;
        while self.until_spawn <= 0.0 && spawned < MAX_SPAWNS_PER_ADVANCE {
            // Place at the exact overshoot so spacing stays fixed
            let left = self.x + self.layout.spawn_ahead + self.until_spawn;
            self.obstacles.push(left);
            trace!(target: "track", "Obstacle spawned at {:.2}", left);

            let gap = self.layout.gaps.get(self.next_gap).copied().unwrap_or(self.layout.first_gap);
            self.next_gap = (self.next_gap + 1) % self.layout.gaps.len().max(1);
            self.until_spawn += gap.max(self.layout.obstacle_width).max(MIN_SPAWN_GAP);
            spawned += 1;
        }

        if self.until_spawn <= 0.0 {
            debug!(target: "track", "Spawn backlog skipped after {} obstacles", spawned);
            self.until_spawn = MIN_SPAWN_GAP;
        }
    }

    fn touching_obstacle(&self) -> bool {
        let (left, right) = (self.x - PLAYER_HALF_WIDTH, self.x + PLAYER_HALF_WIDTH);
        let width = self.layout.obstacle_width;

        self.y < self.layout.obstacle_height
            && self
                .obstacles
                .iter()
                .any(|obstacle| right > *obstacle && left < obstacle + width)
    }

    fn report(&mut self, surface: Surface, was: bool, now: bool) {
        let phase = match (was, now) {
            (false, true) => ContactPhase::Begin,
            (true, true) => ContactPhase::Stay,
            (true, false) => ContactPhase::End,
            (false, false) => return,
        };
        self.contacts.push(ContactEvent::new(surface, phase));
    }
}

impl Default for HeadlessTrack {
    fn default() -> Self {
        Self::new(TrackLayout::default())
    }
}

//=== Stage ===============================================================

impl CollisionSource for HeadlessTrack {
    fn drain_contacts(&mut self, out: &mut Vec<ContactEvent>) {
        out.append(&mut self.contacts);
    }
}

impl Stage for HeadlessTrack {
    fn reset(&mut self) {
        debug!(target: "track", "Track reset ({} obstacles cleared)", self.obstacles.len());

        self.obstacles.clear();
        self.contacts.clear();
        self.x = 0.0;
        self.y = 0.0;
        self.vx = 0.0;
        self.vy = 0.0;
        self.until_spawn = self.layout.first_gap;
        self.next_gap = 0;
        self.passed = 0;
        self.on_ground = false;
        self.on_obstacle = false;
    }

    fn set_spawning(&mut self, enabled: bool) {
        self.spawning = enabled;
    }

    fn drive_player(&mut self, command: &PlayerCommand) {
        self.vx = command.horizontal_velocity;
        self.gravity = command.gravity_scale;
        if let Some(vy) = command.jump_velocity {
            self.vy = vy;
        }
    }

    fn advance(&mut self, speed: f32, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }

        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };

        self.move_player(dt);
        self.scroll(speed * dt);

        let on_ground = self.y <= 0.0 && self.vy <= 0.0;
        let on_obstacle = self.touching_obstacle();

        self.report(Surface::Ground, self.on_ground, on_ground);
        self.report(Surface::Obstacle, self.on_obstacle, on_obstacle);

        self.on_ground = on_ground;
        self.on_obstacle = on_obstacle;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn drain(track: &mut HeadlessTrack) -> Vec<ContactEvent> {
        let mut out = Vec::new();
        track.drain_contacts(&mut out);
        out
    }

    fn idle() -> PlayerCommand {
        PlayerCommand {
            horizontal_velocity: 0.0,
            jump_velocity: None,
            gravity_scale: 0.0,
        }
    }

    //=====================================================================
    // Ground Contacts
    //=====================================================================

    #[test]
    fn standing_player_begins_then_stays_on_ground() {
        let mut track = HeadlessTrack::default();

        track.advance(5.0, DT);
        assert_eq!(drain(&mut track), vec![ContactEvent::new(Surface::Ground, ContactPhase::Begin)]);

        track.advance(5.0, DT);
        assert_eq!(drain(&mut track), vec![ContactEvent::new(Surface::Ground, ContactPhase::Stay)]);
    }

    #[test]
    fn jump_leaves_ground_and_lands_again() {
        let mut track = HeadlessTrack::default();
        track.advance(5.0, DT);
        drain(&mut track);

        track.drive_player(&PlayerCommand {
            jump_velocity: Some(8.0),
            ..idle()
        });
        track.advance(5.0, DT);
        assert_eq!(drain(&mut track), vec![ContactEvent::new(Surface::Ground, ContactPhase::End)]);
        assert!(track.player_position().1 > 0.0);

        track.drive_player(&PlayerCommand {
            gravity_scale: 19.62,
            ..idle()
        });
        let mut landed = false;
        for _ in 0..120 {
            track.advance(5.0, DT);
            if drain(&mut track).contains(&ContactEvent::new(Surface::Ground, ContactPhase::Begin)) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(track.player_position().1, 0.0);
    }

    #[test]
    fn horizontal_motion_is_clamped() {
        let mut track = HeadlessTrack::default();
        track.drive_player(&PlayerCommand {
            horizontal_velocity: 100.0,
            ..idle()
        });

        track.advance(5.0, 0.25);

        assert_relative_eq!(track.player_position().0, 4.0);
    }

    #[test]
    fn bad_delta_is_ignored() {
        let mut track = HeadlessTrack::default();
        track.advance(5.0, 0.0);
        track.advance(5.0, f32::NAN);
        assert!(drain(&mut track).is_empty());
    }

    //=====================================================================
    // Obstacles
    //=====================================================================

    #[test]
    fn no_obstacles_without_spawning() {
        let mut track = HeadlessTrack::default();
        for _ in 0..600 {
            track.advance(5.0, DT);
        }
        assert_eq!(track.obstacle_count(), 0);
        assert_eq!(track.next_obstacle_distance(), None);
    }

    #[test]
    fn first_obstacle_appears_after_first_gap() {
        let mut track = HeadlessTrack::default();
        track.set_spawning(true);

        // 9.9 units of track: not yet
        track.advance(9.9, 1.0);
        assert_eq!(track.obstacle_count(), 0);

        track.advance(0.2, 1.0);
        assert_eq!(track.obstacle_count(), 1);
        let distance = track.next_obstacle_distance().unwrap();
        assert_relative_eq!(distance, 20.0 - 0.1 - 0.5, epsilon = 1e-4);
    }

    #[test]
    fn standing_still_hits_the_obstacle() {
        let mut track = HeadlessTrack::default();
        track.set_spawning(true);

        let mut hit = None;
        for tick in 0..2000 {
            track.advance(5.0, DT);
            if drain(&mut track).contains(&ContactEvent::new(Surface::Obstacle, ContactPhase::Begin)) {
                hit = Some(tick);
                break;
            }
        }

        // first_gap + spawn_ahead - half width = 29.5 units at 5 units/s
        let tick = hit.expect("player should collide");
        assert!((350..=360).contains(&tick), "hit at tick {}", tick);
    }

    #[test]
    fn spacing_follows_gap_cycle() {
        let mut track = HeadlessTrack::new(TrackLayout {
            gaps: vec![3.0, 5.0],
            first_gap: 1.0,
            spawn_ahead: 100.0,
            ..TrackLayout::default()
        });
        track.set_spawning(true);

        for _ in 0..100 {
            track.advance(1.0, 0.1);
        }

        let lefts = track.obstacles.clone();
        assert!(lefts.len() >= 3);
        assert_relative_eq!(lefts[1] - lefts[0], 3.0, epsilon = 1e-3);
        assert_relative_eq!(lefts[2] - lefts[1], 5.0, epsilon = 1e-3);
    }

    #[test]
    fn degenerate_layout_still_terminates() {
        for gaps in [vec![0.0], vec![-3.0], vec![]] {
            let mut track = HeadlessTrack::new(TrackLayout {
                obstacle_width: 0.0,
                first_gap: -1.0,
                gaps,
                ..TrackLayout::default()
            });
            track.set_spawning(true);

            track.advance(5.0, DT);
            track.advance(5.0, DT);

            assert!(track.obstacle_count() > 0);
            assert!(track.obstacle_count() <= 2 * MAX_SPAWNS_PER_ADVANCE);
        }
    }

    #[test]
    fn huge_speed_does_not_stall_spawning() {
        let mut track = HeadlessTrack::default();
        track.set_spawning(true);

        track.advance(f32::MAX, DT);
        track.advance(f32::INFINITY, DT);
        track.advance(5.0, DT);

        assert!(track.obstacle_count() <= MAX_SPAWNS_PER_ADVANCE);
    }

    #[test]
    fn reset_clears_world() {
        let mut track = HeadlessTrack::default();
        track.set_spawning(true);
        for _ in 0..200 {
            track.advance(10.0, DT);
        }
        assert!(track.obstacle_count() > 0);

        track.reset();

        assert_eq!(track.obstacle_count(), 0);
        assert_eq!(track.player_position(), (0.0, 0.0));
        assert!(drain(&mut track).is_empty());
        assert!(track.is_spawning(), "spawning is controlled separately");
    }
}
