use std::path::PathBuf;
use std::process::ExitCode;

use glow::HasContext;

use crate::abs::App;
use crate::config::Config;
use crate::event::{AppEvent, Control};
use crate::scene::Scene;
use crate::transform::Viewport;

mod abs;
mod config;
mod cube;
mod event;
mod logging;
mod scene;
mod transform;

fn main() -> ExitCode {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, config_path) = match Config::resolve(explicit.as_deref()) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(&config.effective_log_level()) {
        eprintln!("failed to install logger: {err}");
    }

    match config_path {
        Some(path) => log::info!("Using configuration from {}", path.display()),
        None => log::info!("No configuration file found, using defaults"),
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let mut app = App::new(config)?;

    let [r, g, b, a] = config.clear_color;
    unsafe {
        app.gl.clear_color(r, g, b, a);
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.depth_func(glow::LESS);
    }

    let mut scene = Scene::new(&app.gl, config).map_err(|e| e.to_string())?;

    // High-DPI drawables can differ from the requested window size.
    let (width, height) = app.drawable_size();
    event::dispatch(&mut scene, AppEvent::Resize(Viewport::new(width, height)));

    'running: loop {
        for sdl_event in app.event_pump.poll_iter() {
            let Some(event) = AppEvent::from_sdl(&sdl_event) else {
                continue;
            };
            if event::dispatch(&mut scene, event) == Control::Exit {
                break 'running;
            }
        }

        event::dispatch(&mut scene, AppEvent::Redraw);
        app.window.gl_swap_window();
    }

    log::info!("Shutting down");
    drop(scene);

    Ok(())
}
