//! Runs the cloud demo without a window and prints what a renderer would see.
//!
//! Usage: `cargo run --example headless_demo -- [config] [options.json]`
//!
//! `config` is a preset name (`cloud`, `cloudInverse`) or `simple`; when
//! omitted one is picked at random. Set `RUST_LOG=debug` to follow the burn
//! cycle transitions.

use cumulus::*;

fn main() -> Result<()> {
    init();

    let mut args = std::env::args().skip(1);
    let requested = args.next();
    let options = match args.next() {
        Some(path) => DemoOptions::from_json_file(path)?,
        None => DemoOptions::default().with_volume_size(UVec3::splat(64)),
    };

    let config = select_config(requested.as_deref(), true, &mut rand::thread_rng());
    let mut app = App::new(&options, &config, true)?;
    app.resize(1280.0, 720.0);

    let mut renderer = HeadlessRenderer::new().with_history_limit(1);

    // Two seconds of idling, then a click, then long enough for the cloud to
    // burn and recover.
    run_headless(&mut app, 120, 1.0 / 60.0, &mut renderer);
    app.on_pointer_down();
    for second in 0..8 {
        run_headless(&mut app, 60, 1.0 / 60.0, &mut renderer);
        let Some(frame) = renderer.last_frame() else {
            continue;
        };
        println!(
            "t={:>4.1}s state={:?} light={:.2} at ({:.2}, {:.2}, {:.2})",
            app.elapsed(),
            app.state(),
            frame.light.intensity,
            frame.light.position.x,
            frame.light.position.y,
            frame.light.position.z,
        );
        if second == 0 {
            if let Some(uniforms) = frame.cloud_uniforms() {
                println!(
                    "  steps={} inverse={} gradients={}",
                    uniforms.steps,
                    uniforms.inverse != 0,
                    uniforms.use_gradient_map != 0
                );
            }
        }
    }

    println!(
        "{} frames submitted, {} shader rebuild(s)",
        renderer.submitted(),
        renderer.recompiles()
    );
    Ok(())
}
