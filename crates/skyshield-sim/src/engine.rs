//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::commands::PlayerCommand;
use skyshield_core::components::Turret;
#[cfg(test)]
use skyshield_core::components::Aircraft;
use skyshield_core::constants::TICK_RATE;
use skyshield_core::enums::{AlertLevel, GamePhase, Variant};
#[cfg(test)]
use skyshield_core::enums::AircraftType;
use skyshield_core::error::RulesetError;
use skyshield_core::events::GameEvent;
use skyshield_core::state::{GameStateSnapshot, GameSummaryView};
use skyshield_core::types::{Position, SimTime};
#[cfg(test)]
use skyshield_core::types::Velocity;

use crate::feedback::Feedback;
use crate::ruleset::Ruleset;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::cyber_attack::{CyberRejection, CyberState};
use crate::systems::defense::TurretControls;
use crate::systems::effects::Atmosphere;
use crate::systems::snapshot::SnapshotInput;
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulation steps per simulated second.
    pub tick_rate: u32,
    pub ruleset: Ruleset,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            ruleset: Ruleset::default(),
        }
    }
}

impl SimConfig {
    /// Default config running the preset for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            ruleset: Ruleset::preset(variant),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RulesetError> {
        if self.tick_rate == 0 {
            return Err(RulesetError::invalid("tick_rate", "must be at least 1"));
        }
        self.ruleset.validate()
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    ruleset: Ruleset,
    dt: f64,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    next_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    feedback: Feedback,

    controls: TurretControls,
    waves: WaveState,
    cyber: CyberState,
    score: ScoreState,
    atmosphere: Atmosphere,
    summary: Option<GameSummaryView>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The engine
    /// starts on the splash screen; `StartGame` begins play.
    pub fn new(config: SimConfig) -> Self {
        let waves = WaveState::new(&config.ruleset);
        Self {
            world: World::new(),
            dt: 1.0 / config.tick_rate.max(1) as f64,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            feedback: Feedback::default(),
            controls: TurretControls::default(),
            waves,
            cyber: CyberState::default(),
            score: ScoreState::default(),
            atmosphere: Atmosphere::default(),
            summary: None,
            ruleset: config.ruleset,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.feedback.tick = self.time.tick;
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(self.dt);
        }

        let (events, alerts) = self.feedback.drain();
        self.atmosphere.post(&alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInput {
                time: &self.time,
                phase: self.phase,
                ruleset: &self.ruleset,
                waves: &self.waves,
                score: &self.score,
                cyber: &self.cyber,
                atmosphere: &self.atmosphere,
                summary: self.summary.clone(),
                events,
                alerts,
            },
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Seconds of simulated time per tick.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Final summary, once the game is over.
    pub fn summary(&self) -> Option<&GameSummaryView> {
        self.summary.as_ref()
    }

    /// Spawn an aircraft at a fixed position (for testing). Returns its id.
    #[cfg(test)]
    pub fn spawn_test_aircraft(
        &mut self,
        aircraft_type: AircraftType,
        position: Position,
        velocity: Velocity,
    ) -> u32 {
        let id = self.allocate_id();
        let profile = self
            .ruleset
            .aircraft
            .get(aircraft_type)
            .expect("test ruleset has a profile for every type");
        world_setup::spawn_aircraft(
            &mut self.world,
            id,
            aircraft_type,
            profile,
            position,
            velocity,
            0.0,
        );
        id
    }

    /// Spawn an armed player missile (for testing). Returns its id.
    #[cfg(test)]
    pub fn spawn_test_player_missile(
        &mut self,
        position: Position,
        velocity: Velocity,
    ) -> u32 {
        let id = self.allocate_id();
        world_setup::spawn_player_missile(
            &mut self.world,
            id,
            position,
            velocity,
            &self.ruleset.player_missile,
            true,
        );
        id
    }

    /// Spawn an armed enemy missile carrying `damage` (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy_missile(
        &mut self,
        damage: f64,
        position: Position,
        velocity: Velocity,
    ) -> u32 {
        let id = self.allocate_id();
        world_setup::spawn_enemy_missile(
            &mut self.world,
            id,
            AircraftType::Fighter,
            damage,
            position,
            velocity,
            &self.ruleset.enemy_missile,
            true,
        );
        id
    }

    #[cfg(test)]
    pub fn turret(&self) -> Turret {
        self.world
            .query::<&Turret>()
            .iter()
            .next()
            .map(|(_, t)| t.clone())
            .expect("turret exists once the game has started")
    }

    #[cfg(test)]
    pub fn set_turret_health(&mut self, health: f64) {
        for (_entity, turret) in self.world.query_mut::<&mut Turret>() {
            turret.health = health;
        }
    }

    #[cfg(test)]
    pub fn set_aircraft_health(&mut self, id: u32, health: f64) {
        for (_entity, aircraft) in self.world.query_mut::<&mut Aircraft>() {
            if aircraft.id == id {
                aircraft.health = health;
            }
        }
    }

    #[cfg(test)]
    pub fn set_turret_heat(&mut self, heat: f64) {
        for (_entity, turret) in self.world.query_mut::<&mut Turret>() {
            turret.heat = heat;
        }
    }

    #[cfg(test)]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[cfg(test)]
    pub fn waves(&self) -> &WaveState {
        &self.waves
    }

    #[cfg(test)]
    pub fn cyber(&self) -> &CyberState {
        &self.cyber
    }

    #[cfg(test)]
    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::Splash {
                    self.setup_game();
                }
            }
            PlayerCommand::Restart => {
                log::info!("Restarting game");
                self.setup_game();
            }
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::TogglePause => match self.phase {
                GamePhase::Active => self.pause(),
                GamePhase::Paused => self.resume(),
                _ => {}
            },
            PlayerCommand::Aim { x, y } => {
                self.controls.aim = Position::new(x, y);
            }
            PlayerCommand::SetTrigger { held } => {
                self.controls.trigger_held = held;
                if !held {
                    self.controls.overheat_reported = false;
                    for (_entity, turret) in self.world.query_mut::<&mut Turret>() {
                        turret.fire_cooldown_secs = 0.0;
                    }
                }
            }
            PlayerCommand::CyberAttack => {
                if self.phase != GamePhase::Active {
                    return;
                }
                let turret_pos = self.ruleset.turret_position();
                let result = systems::cyber_attack::launch(
                    &mut self.world,
                    &mut self.cyber,
                    &self.ruleset.cyber,
                    &turret_pos,
                    &mut self.score,
                    &mut self.feedback,
                );
                match result {
                    Ok(_) => {}
                    Err(CyberRejection::Charging) => {
                        self.feedback
                            .alert(AlertLevel::Cyber, "CYBER SYSTEMS CHARGING...");
                    }
                    Err(CyberRejection::NoTargets) => {}
                }
            }
        }
    }

    fn pause(&mut self) {
        if self.phase == GamePhase::Active {
            self.phase = GamePhase::Paused;
            self.feedback.info("MISSION PAUSED");
        }
    }

    fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Active;
            self.feedback.info("MISSION RESUMED");
        }
    }

    /// Fresh game: new world, full turret, wave 1 pending. The RNG stream
    /// carries on from where it was.
    fn setup_game(&mut self) {
        self.world.clear();
        world_setup::spawn_turret(&mut self.world, &self.ruleset.turret);
        self.time = SimTime::default();
        self.next_id = 0;
        self.controls = TurretControls::default();
        self.waves = WaveState::new(&self.ruleset);
        self.cyber = CyberState::default();
        self.score = ScoreState::default();
        self.atmosphere = Atmosphere::default();
        self.summary = None;
        self.phase = GamePhase::Active;

        log::info!("Game started: {} ruleset", self.ruleset.name);
        self.feedback.info("DEFENSE SYSTEMS ONLINE - CYBER ATTACK READY");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.dt;

        // 1. Clocks: cyber recharge and day/night
        systems::cyber_attack::recharge(&mut self.cyber, dt);
        systems::effects::advance_day_cycle(
            &mut self.atmosphere,
            self.ruleset.day_cycle_per_sec,
            dt,
        );
        // 2. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.waves,
            &self.ruleset,
            &mut self.next_id,
            &mut self.feedback,
            dt,
        );
        // 3. Turret fire, heat, cooling
        systems::defense::run(
            &mut self.world,
            &self.ruleset.turret,
            &self.ruleset.player_missile,
            &mut self.controls,
            &mut self.next_id,
            &mut self.score,
            &mut self.feedback,
            dt,
        );
        // 4. Aircraft AI
        systems::aircraft_ai::run(
            &mut self.world,
            &mut self.rng,
            &self.ruleset,
            &mut self.next_id,
            &mut self.feedback,
            self.time.elapsed_secs,
            dt,
        );
        // 5. Projectiles
        systems::projectiles::run(
            &mut self.world,
            &self.ruleset.playfield,
            &self.ruleset.player_missile,
            &self.ruleset.enemy_missile,
            &mut self.despawn_buffer,
            dt,
        );
        // 6. Collisions
        systems::collision::run(
            &mut self.world,
            &self.ruleset.scoring,
            &mut self.score,
            &mut self.feedback,
            &mut self.despawn_buffer,
        );
        // 7. Casualties, escapes, arming
        systems::cleanup::run(
            &mut self.world,
            &self.ruleset,
            &mut self.score,
            &mut self.feedback,
            &mut self.despawn_buffer,
        );
        // 8. Explosions and banner
        systems::effects::run(
            &mut self.world,
            &mut self.atmosphere,
            &mut self.despawn_buffer,
            dt,
        );
        // 9. Wave completion
        systems::wave_spawner::check_wave_cleared(
            &self.world,
            &mut self.waves,
            &self.ruleset,
            &mut self.feedback,
        );
        // 10. Game over
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        let destroyed = self
            .world
            .query::<&Turret>()
            .iter()
            .any(|(_, t)| systems::defense::is_destroyed(t));
        if !destroyed {
            return;
        }

        self.phase = GamePhase::GameOver;
        self.controls.trigger_held = false;
        // The clock advances after the systems, so count this tick here.
        let summary = self
            .score
            .summary(self.time.elapsed_secs + self.dt, self.waves.wave);
        log::info!(
            "Game over: score {}, {} kills, wave {}",
            summary.score,
            summary.kills,
            self.waves.wave
        );
        self.feedback.event(GameEvent::GameOver {
            final_score: summary.score,
        });
        self.summary = Some(summary);
    }
}
