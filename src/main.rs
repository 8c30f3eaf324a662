use std::sync::Arc;

use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use formshift::engine::game_loop::FrameClock;
use formshift::engine::input::{Action, InputManager};
use formshift::engine::physics::{PhysicsWorld, PlayerRig, RapierPlayerBody};
use formshift::game::level::{Level, LeverInteractor, PLAYER_SIZE};
use formshift::game::player::{
    FormUnlocks, PlayerController, PlayerControllerBuilder, PlayerEvent, PlayerSettings,
};
use formshift::game::respawn::RespawnDirector;

/// Everything one frame touches
struct Demo {
    world: PhysicsWorld,
    level: Level,
    rig: PlayerRig,
    controller: PlayerController,
    respawn: RespawnDirector,
    input: InputManager,
    clock: FrameClock,
}

impl Demo {
    fn new() -> Result<Self> {
        let mut world = PhysicsWorld::new();
        let level = Level::build_demo(&mut world);

        let spawn = level.spawn_point();
        let rig = PlayerRig::spawn(&mut world, spawn, PLAYER_SIZE);
        world.refresh_queries();

        let controller = PlayerControllerBuilder::new(Arc::new(PlayerSettings::default()))
            .unlocks(Box::new(FormUnlocks::all_forms()))
            .interactor(Box::new(LeverInteractor::demo()))
            .build(&mut RapierPlayerBody::new(&mut world, rig))?;
        let respawn = RespawnDirector::for_controller(&controller, spawn);

        Ok(Self {
            world,
            level,
            rig,
            controller,
            respawn,
            input: InputManager::default(),
            clock: FrameClock::new(),
        })
    }

    /// One frame: a logic tick, then the fixed physics steps
    fn frame(&mut self) {
        if self.input.just_pressed(Action::Pause) {
            self.clock.toggle_pause();
        }

        let steps = self.clock.begin_frame();
        if self.clock.is_paused() {
            self.input.end_frame();
            return;
        }

        let dt = self.clock.frame_delta();
        let commands = self.input.commands();
        {
            let mut body = RapierPlayerBody::new(&mut self.world, self.rig);
            self.respawn.update(&mut self.controller, &mut body, dt);
            self.controller.update(&mut body, &commands, dt);
        }

        let fixed = self.clock.fixed_timestep();
        for _ in 0..steps {
            self.controller
                .physics_update(&mut RapierPlayerBody::new(&mut self.world, self.rig), fixed);
            self.world.step();

            let events = self
                .level
                .player_events(&self.world.drain_collision_events(), self.rig.collider);
            let mut body = RapierPlayerBody::new(&mut self.world, self.rig);
            for event in events {
                event.apply(&mut self.controller, &mut body, &mut self.respawn);
            }
        }

        for event in self.controller.drain_events() {
            log_event(&event);
        }
        self.input.end_frame();
    }
}

fn log_event(event: &PlayerEvent) {
    match event {
        PlayerEvent::StateChanged { from, to } => log::debug!("state {from:?} -> {to:?}"),
        PlayerEvent::FormChanged { from, to } => info!("form {from:?} -> {to}"),
        PlayerEvent::SkinChanged { form, skin } => info!("{form} skin {skin}"),
        PlayerEvent::Died => info!("player died"),
        PlayerEvent::Revived => info!("player revived"),
        PlayerEvent::ProjectileFired {
            origin, direction, ..
        } => info!("ink shot from {origin} towards {direction}"),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting formshift demo...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("formshift")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut demo = Demo::new()?;
    info!("Controls: A/D move, W/S climb and swim, Space jump, E interact, Tab/Q cycle forms");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => demo.input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => demo.input.process_mouse_event(button, state),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => demo.input.reset(),
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => demo.frame(),
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
