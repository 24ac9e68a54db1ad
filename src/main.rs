use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    tableau::ViewerApp::new().run()
}
