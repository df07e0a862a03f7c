use sandbox2d::Sandbox;

fn main() {
    env_logger::init();
    Sandbox::new().run()
}
