//! Windowed shell: render loop, UI dispatch, input.

use std::env;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use na::{self, Point2, Point3};

use crate::config;
use crate::engine::GraphicsManager;
use crate::scene::Scene;
use crate::ui::SandboxUi;

#[derive(PartialEq)]
pub enum RunMode {
    Running,
    Stop,
    Step,
}

fn usage(exe_name: &str) {
    println!("Usage: {} [OPTION] ", exe_name);
    println!();
    println!("Options:");
    println!("    --help  - prints this help message and exits.");
    println!("    --pause - do not start the simulation right away.");
}

bitflags! {
    pub struct SandboxActionFlags: u32 {
        const SPAWN_PERSON = 1 << 0;
        const SPAWN_BOX = 1 << 1;
        const CLEAR_SCENE = 1 << 2;
        const RESET_GRAPHICS = 1 << 3;
    }
}

pub struct SandboxState {
    pub running: RunMode,
    pub action_flags: SandboxActionFlags,
}

pub struct Sandbox {
    scene: Scene,
    window: Option<Box<Window>>,
    graphics: GraphicsManager,
    cursor_pos: Point2<f32>,
    ui: SandboxUi,
    state: SandboxState,
}

impl Sandbox {
    pub fn new() -> Self {
        let width = config::WINDOW_WIDTH;
        let height = config::WINDOW_HEIGHT;

        let mut window = Box::new(Window::new_with_size("Ragdoll sandbox", width, height));
        window.set_background_color(
            config::BACKGROUND_COLOR[0],
            config::BACKGROUND_COLOR[1],
            config::BACKGROUND_COLOR[2],
        );
        window.set_framerate_limit(Some(60));
        window.set_light(Light::StickToCamera);

        let ui = SandboxUi::new(&mut window);
        let state = SandboxState {
            running: RunMode::Running,
            action_flags: SandboxActionFlags::RESET_GRAPHICS,
        };

        let scene = Scene::new(width as f32, height as f32);
        let mut graphics = GraphicsManager::new();
        graphics.set_body_color(
            scene.floor_body(),
            Point3::new(
                config::FLOOR_COLOR[0],
                config::FLOOR_COLOR[1],
                config::FLOOR_COLOR[2],
            ),
        );
        graphics.look_at(
            Point2::new(width as f32 * 0.5, height as f32 * 0.5),
            1.0,
        );

        info!("sandbox ready, extent {}x{}", width, height);

        Sandbox {
            scene,
            window: Some(window),
            graphics,
            cursor_pos: Point2::new(0.0, 0.0),
            ui,
            state,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn graphics_mut(&mut self) -> &mut GraphicsManager {
        &mut self.graphics
    }

    pub fn run(mut self) {
        let mut args = env::args();

        if args.len() > 1 {
            let exname = args.next().unwrap_or_else(|| "sandbox2d".to_string());
            for arg in args {
                if &arg[..] == "--help" || &arg[..] == "-h" {
                    usage(&exname[..]);
                    return;
                } else if &arg[..] == "--pause" {
                    self.state.running = RunMode::Stop;
                }
            }
        }

        if let Some(window) = self.window.take() {
            window.render_loop(self);
        }
    }

    fn spawn_person(&mut self, window: &mut Window) {
        let figure = self.scene.spawn_person();

        for (body, color) in figure.bodies.iter().zip(figure.colors.iter()) {
            self.graphics.set_body_color(*body, *color);
        }

        for collider in figure.colliders.iter() {
            self.graphics.add(window, *collider, self.scene.colliders());
        }
    }

    fn spawn_box(&mut self, window: &mut Window) {
        let spawned = self.scene.spawn_box();
        self.graphics.set_body_color(
            spawned.body,
            Point3::new(
                config::BOX_COLOR[0],
                config::BOX_COLOR[1],
                config::BOX_COLOR[2],
            ),
        );
        self.graphics
            .add(window, spawned.collider, self.scene.colliders());
    }

    fn clear(&mut self, window: &mut Window) {
        self.scene.clear();
        self.graphics.clear(window);
        self.graphics.set_body_color(
            self.scene.floor_body(),
            Point3::new(
                config::FLOOR_COLOR[0],
                config::FLOOR_COLOR[1],
                config::FLOOR_COLOR[2],
            ),
        );
        self.state
            .action_flags
            .set(SandboxActionFlags::RESET_GRAPHICS, true);
    }

    fn resize(&mut self, window: &mut Window, width: f32, height: f32) {
        self.scene.resize(width, height);
        self.graphics
            .look_at(Point2::new(width * 0.5, height * 0.5), 1.0);

        // The floor cuboid changed, so its node must be rebuilt.
        self.graphics
            .remove_body_nodes(window, self.scene.floor_body());
        self.graphics
            .add(window, self.scene.floor_collider(), self.scene.colliders());
    }

    fn handle_common_event<'b>(&mut self, event: Event<'b>) -> Event<'b> {
        match event.value {
            WindowEvent::Key(Key::T, Action::Release, _) => {
                if self.state.running == RunMode::Stop {
                    self.state.running = RunMode::Running;
                } else {
                    self.state.running = RunMode::Stop;
                }
            }
            WindowEvent::Key(Key::S, Action::Release, _) => self.state.running = RunMode::Step,
            WindowEvent::Key(Key::P, Action::Release, _) => self
                .state
                .action_flags
                .set(SandboxActionFlags::SPAWN_PERSON, true),
            WindowEvent::Key(Key::B, Action::Release, _) => self
                .state
                .action_flags
                .set(SandboxActionFlags::SPAWN_BOX, true),
            WindowEvent::Key(Key::C, Action::Release, _) => self
                .state
                .action_flags
                .set(SandboxActionFlags::CLEAR_SCENE, true),
            _ => {}
        }

        event
    }

    fn handle_special_event(&mut self, window: &mut Window, mut event: Event) {
        if let WindowEvent::FramebufferSize(..) = event.value {
            let size = window.size();
            self.resize(window, size.x as f32, size.y as f32);
            return;
        }

        if window.is_conrod_ui_capturing_mouse() {
            return;
        }

        match event.value {
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                if let Some(body_part) = self.scene.grab_at(self.cursor_pos) {
                    if let Some(nodes) = self.graphics.body_nodes_mut(body_part.0) {
                        for node in nodes.iter_mut() {
                            node.select()
                        }
                    }

                    event.inhibited = true;
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                if let Some(body_part) = self.scene.grabbed() {
                    if let Some(nodes) = self.graphics.body_nodes_mut(body_part.0) {
                        for node in nodes.iter_mut() {
                            node.unselect()
                        }
                    }
                }

                self.scene.release_grab();
            }
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor_pos.x = x as f32;
                self.cursor_pos.y = y as f32;

                self.cursor_pos = self
                    .graphics
                    .camera()
                    .unproject(&self.cursor_pos, &na::convert(window.size()));

                self.scene.drag_to(self.cursor_pos);
                event.inhibited = self.scene.grabbed().is_some();
            }
            _ => {}
        }
    }
}

type CamerasEffectRenderer<'a> = (
    Option<&'a mut dyn Camera>,
    Option<&'a mut dyn PlanarCamera>,
    Option<&'a mut dyn Renderer>,
    Option<&'a mut dyn PostProcessingEffect>,
);

impl State for Sandbox {
    fn cameras_and_effect_and_renderer(&mut self) -> CamerasEffectRenderer<'_> {
        (
            None,
            Some(self.graphics.camera_mut() as &mut dyn PlanarCamera),
            None,
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.ui.update(window, &mut self.state);

        // Handle UI actions.
        {
            if self
                .state
                .action_flags
                .contains(SandboxActionFlags::SPAWN_PERSON)
            {
                self.state
                    .action_flags
                    .set(SandboxActionFlags::SPAWN_PERSON, false);
                self.spawn_person(window);
            }

            if self
                .state
                .action_flags
                .contains(SandboxActionFlags::SPAWN_BOX)
            {
                self.state
                    .action_flags
                    .set(SandboxActionFlags::SPAWN_BOX, false);
                self.spawn_box(window);
            }

            if self
                .state
                .action_flags
                .contains(SandboxActionFlags::CLEAR_SCENE)
            {
                self.state
                    .action_flags
                    .set(SandboxActionFlags::CLEAR_SCENE, false);
                self.clear(window);
            }

            if self
                .state
                .action_flags
                .contains(SandboxActionFlags::RESET_GRAPHICS)
            {
                self.state
                    .action_flags
                    .set(SandboxActionFlags::RESET_GRAPHICS, false);
                for (handle, _) in self.scene.colliders().iter() {
                    self.graphics.add(window, handle, self.scene.colliders());
                }
            }
        }

        for event in window.events().iter() {
            let event = self.handle_common_event(event);
            self.handle_special_event(window, event);
        }

        if self.state.running != RunMode::Stop {
            self.scene.step();
        }

        self.graphics.draw(self.scene.colliders(), window);

        if self.state.running == RunMode::Step {
            self.state.running = RunMode::Stop;
        }
    }
}
