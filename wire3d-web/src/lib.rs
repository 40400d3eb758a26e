/// wire3d Web - canvas host for the wireframe viewer
///
/// Draws with the 2D canvas API, listens for `keydown` on the window and
/// redraws on every animation frame.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};
use wire3d_core::{DrawSurface, ScreenPoint, Viewer, ViewerConfig};

/// `DrawSurface` over a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, size: f64) -> Self {
        Self { ctx, size }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size, self.size);
    }

    #[allow(deprecated)]
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.stroke();
    }
}

struct Shared {
    viewer: Viewer,
    surface: CanvasSurface,
}

impl Shared {
    fn render(&mut self) {
        self.viewer.render_frame(&mut self.surface);
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    state: Rc<RefCell<Shared>>,
    started: bool,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the canvas with id `canvas_id` using the default scene.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebViewer, JsValue> {
        Self::build(canvas_id, ViewerConfig::default())
    }

    /// Attach with settings parsed from a JSON string.
    pub fn with_config(canvas_id: &str, config_json: &str) -> Result<WebViewer, JsValue> {
        let config = ViewerConfig::from_json_str(config_json)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Self::build(canvas_id, config)
    }

    /// Register the key listener and start the animation-frame loop. The
    /// loop runs for as long as the page lives.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.started {
            return Ok(());
        }
        let window = window()?;

        let key_state = Rc::clone(&self.state);
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            key_state.borrow_mut().viewer.handle_key(&event.key());
        });
        window.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();

        // The frame callback reschedules itself through this slot
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let next = Rc::clone(&frame);
        let frame_state = Rc::clone(&self.state);
        *frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            frame_state.borrow_mut().render();
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(err) = request_frame(callback) {
                    tracing::error!(?err, "failed to schedule next frame");
                }
            }
        }));

        if let Some(callback) = frame.borrow().as_ref() {
            request_frame(callback)?;
        }
        self.started = true;
        tracing::info!("web viewer started");
        Ok(())
    }

    /// Draw one frame now.
    pub fn render(&self) {
        self.state.borrow_mut().render();
    }

    /// Feed a key identifier as delivered by `KeyboardEvent.key`. Returns
    /// whether the key is bound.
    pub fn handle_key(&self, key: &str) -> bool {
        self.state.borrow_mut().viewer.handle_key(key)
    }

    pub fn zoom(&self) -> f64 {
        self.state.borrow().viewer.camera.zoom
    }
}

impl WebViewer {
    fn build(canvas_id: &str, config: ViewerConfig) -> Result<WebViewer, JsValue> {
        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", canvas_id)))?;

        let size = config.surface_size;
        canvas.set_width(size as u32);
        canvas.set_height(size as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let state = Shared {
            viewer: Viewer::new(config),
            surface: CanvasSurface::new(ctx, size),
        };
        Ok(WebViewer {
            state: Rc::new(RefCell::new(state)),
            started: false,
        })
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}
