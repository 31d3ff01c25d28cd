//! Gravity Particles entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gravity_particles::Settings;
    use gravity_particles::consts::{CONSOLE_LOG_LEVEL, SUMMARY_LOG_LEVEL};
    use gravity_particles::renderer::{MeshSurface, RenderState, RenderSurface};
    use gravity_particles::sim::{Bounds, Simulation};

    /// Log a summary every this many frames
    const LOG_EVERY_FRAMES: u64 = 600;

    /// App instance holding all state
    struct App {
        simulation: Simulation,
        mesh: MeshSurface,
        render_state: Option<RenderState>,
        frame_dt: f32,
    }

    impl App {
        /// One frame: update everything, then draw everything
        fn frame(&mut self) {
            self.simulation.update(self.frame_dt);

            self.mesh.clear();
            self.simulation.render(&mut self.mesh, self.frame_dt);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.mesh.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            let frame = self.simulation.frame();
            if frame % LOG_EVERY_FRAMES == 0 {
                log::log!(
                    SUMMARY_LOG_LEVEL,
                    "Frame {}: {} vertices, {} non-finite particles",
                    frame,
                    self.mesh.vertices().len(),
                    self.simulation.non_finite_count()
                );
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(CONSOLE_LOG_LEVEL).expect("Failed to init logger");

        log::info!("Gravity Particles starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Simulate in CSS pixels, render at device resolution
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::default();
        let surface_bounds = Bounds::from_size(client_w as f32, client_h as f32);
        let options = settings.simulation_options(surface_bounds, js_sys::Date::now() as u64);
        let simulation = Simulation::factory(&options);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, options.bound_range).await;

        let app = Rc::new(RefCell::new(App {
            simulation,
            mesh: MeshSurface::new(),
            render_state: Some(render_state),
            frame_dt: settings.frame_dt,
        }));

        request_animation_frame(app);

        log::info!("Gravity Particles running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravity_particles::Settings;
    use gravity_particles::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SUMMARY_LOG_LEVEL};
    use gravity_particles::renderer::{MeshSurface, RenderSurface};
    use gravity_particles::sim::{Bounds, Simulation};

    env_logger::init();
    log::info!("Gravity Particles (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(std::path::Path::new(&path)),
        None => Settings::default(),
    };

    let surface_bounds = Bounds::from_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let options = settings.simulation_options(surface_bounds, rand::random());
    let mut simulation = Simulation::factory(&options);
    let mut mesh = MeshSurface::new();
    let mut warned = false;

    for _ in 0..settings.headless_frames {
        simulation.update(settings.frame_dt);
        mesh.clear();
        simulation.render(&mut mesh, settings.frame_dt);

        let non_finite = simulation.non_finite_count();
        if non_finite > 0 && !warned {
            log::warn!(
                "{} particles went non-finite by frame {}",
                non_finite,
                simulation.frame()
            );
            warned = true;
        }

        if simulation.frame() % 100 == 0 {
            log::log!(
                SUMMARY_LOG_LEVEL,
                "Frame {}: {} vertices",
                simulation.frame(),
                mesh.vertices().len()
            );
        }
    }

    log::info!(
        "Finished {} frames with {} particles",
        simulation.frame(),
        simulation.particles().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
