//! Logo Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, PointerEvent, WheelEvent};

    use logo_bounce::audio::AudioManager;
    use logo_bounce::hud::HudUpdate;
    use logo_bounce::renderer::SceneRenderState;
    use logo_bounce::sim::Axis;
    use logo_bounce::{App, Settings};

    /// Everything the browser callbacks share
    struct Viewer {
        app: App,
        audio: AudioManager,
        render_state: Option<SceneRenderState>,
        /// requestAnimationFrame timestamps (ms)
        start_time: Option<f64>,
        last_time: Option<f64>,
        /// Last pointer position while dragging
        drag_from: Option<(f32, f32)>,
    }

    impl Viewer {
        fn new(app: App) -> Self {
            Self {
                app,
                audio: AudioManager::new(),
                render_state: None,
                start_time: None,
                last_time: None,
                drag_from: None,
            }
        }

        fn frame(&mut self, time: f64) {
            let start = *self.start_time.get_or_insert(time);
            let dt = self
                .last_time
                .map_or(0.0, |last| ((time - last) / 1000.0) as f32);
            self.last_time = Some(time);
            let elapsed = ((time - start) / 1000.0) as f32;

            let frame = self.app.update(dt, elapsed, &mut self.audio);

            if let Some(update) = &frame.hud {
                apply_hud(update);
            }

            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn apply_hud(update: &HudUpdate) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("corner-counter"))
        else {
            return;
        };
        match update {
            HudUpdate::Show(text) => {
                el.set_text_content(Some(text));
                let _ = el.set_attribute("class", "");
            }
            HudUpdate::Hide => {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Logo Bounce starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> found");
            return;
        };

        let (width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::default();
        if let Ok(query) = window.location().search() {
            settings.apply_query(&query);
        }
        let seed = js_sys::Date::now() as u64;
        let viewer = Rc::new(RefCell::new(Viewer::new(App::new(settings, seed))));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match SceneRenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => viewer.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No suitable GPU adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_controls(&document, viewer.clone());
        setup_pointer_handlers(&canvas, viewer.clone());
        setup_resize(&window, &canvas, viewer.clone());

        request_animation_frame(viewer);

        log::info!("Logo Bounce running!");
    }

    /// Wire a range input to a setting, starting from `initial`
    fn bind_range(
        document: &web_sys::Document,
        id: &str,
        initial: f32,
        viewer: Rc<RefCell<Viewer>>,
        apply: impl Fn(&mut App, f32) + 'static,
    ) {
        let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::debug!("Control #{} not present", id);
            return;
        };
        input.set_value(&initial.to_string());

        let source = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match source.value().parse::<f32>() {
                Ok(value) => apply(&mut viewer.borrow_mut().app, value),
                Err(_) => log::warn!("Unreadable slider value '{}'", source.value()),
            }
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn bind_checkbox(
        document: &web_sys::Document,
        id: &str,
        initial: bool,
        viewer: Rc<RefCell<Viewer>>,
        apply: impl Fn(&mut App, bool) + 'static,
    ) {
        let Some(input) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::debug!("Control #{} not present", id);
            return;
        };
        input.set_checked(initial);

        let source = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            apply(&mut viewer.borrow_mut().app, source.checked());
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &web_sys::Document, viewer: Rc<RefCell<Viewer>>) {
        let settings = viewer.borrow().app.settings().clone();

        for (id, axis, value) in [
            ("velocity-x", Axis::X, settings.velocity_x),
            ("velocity-y", Axis::Y, settings.velocity_y),
            ("velocity-z", Axis::Z, settings.velocity_z),
        ] {
            bind_range(document, id, value, viewer.clone(), move |app, v| {
                app.set_velocity_axis(axis, v)
            });
        }
        bind_range(
            document,
            "volume",
            settings.sound_volume,
            viewer.clone(),
            |app, v| app.set_sound_volume(v),
        );
        bind_checkbox(
            document,
            "show-edges",
            settings.show_edges,
            viewer.clone(),
            |app, on| app.set_show_edges(on),
        );
        bind_checkbox(
            document,
            "show-counter",
            settings.show_counter,
            viewer,
            |app, on| app.set_show_counter(on),
        );
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) {
        // Press: start dragging (also the first user gesture audio needs)
        {
            let viewer = viewer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut v = viewer.borrow_mut();
                v.audio.resume();
                v.drag_from = Some((event.client_x() as f32, event.client_y() as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let viewer = viewer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut v = viewer.borrow_mut();
                let Some((last_x, last_y)) = v.drag_from else {
                    return;
                };
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                v.app.drag(x - last_x, y - last_y);
                v.drag_from = Some((x, y));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for name in ["pointerup", "pointerleave", "pointercancel"] {
            let viewer = viewer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                viewer.borrow_mut().drag_from = None;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                viewer.borrow_mut().app.zoom(event.delta_y() as f32);
            });
            let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        viewer: Rc<RefCell<Viewer>>,
    ) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = &mut viewer.borrow_mut().render_state {
                render_state.resize(width, height);
            }
            log::debug!("Resized to {}x{}", width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(viewer: Rc<RefCell<Viewer>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            viewer.borrow_mut().frame(time);

            if let (Some(window), Some(callback)) = (web_sys::window(), f.borrow().as_ref()) {
                let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        }));

        if let (Some(window), Some(callback)) = (web_sys::window(), g.borrow().as_ref()) {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

/// Environment variable naming an optional JSON settings file
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_ENV: &str = "LOGO_BOUNCE_SETTINGS";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use logo_bounce::App;
    use logo_bounce::audio::LogSink;

    env_logger::init();
    log::info!("Logo Bounce (native) starting...");
    log::info!("Native mode runs the simulation headless - use `trunk serve` for the 3D view");

    const FPS: u32 = 60;
    const SECONDS: u32 = 60;
    let frame_dt = 1.0 / FPS as f32;

    let settings = load_settings();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut app = App::new(settings, seed);
    let mut sink = LogSink::default();

    for frame in 1..=FPS * SECONDS {
        let view = app.update(frame_dt, frame as f32 * frame_dt, &mut sink);
        if let Some(update) = view.hud {
            log::debug!("HUD: {:?}", update);
        }
    }

    println!(
        "Simulated {}s: {} wall hits, {} corner hits, {} sounds, cube color {}",
        SECONDS,
        app.sim.wall_hits,
        app.sim.corner_hits,
        sink.played.len(),
        app.sim.color
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings() -> logo_bounce::Settings {
    use logo_bounce::Settings;

    let Ok(path) = std::env::var(SETTINGS_ENV) else {
        return Settings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {} - using defaults", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {} - using defaults", path, e);
            Settings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
