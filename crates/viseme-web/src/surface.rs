//! Browser side of the render-surface lifecycle.

use viseme_engine::{SurfaceError, SurfaceHost};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Creates the drawing canvas inside a container element.
pub struct WebSurfaceHost {
    container_id: String,
}

impl WebSurfaceHost {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    pub fn set_container(&mut self, container_id: impl Into<String>) {
        self.container_id = container_id.into();
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

fn dom_error(err: wasm_bindgen::JsValue) -> SurfaceError {
    SurfaceError::Dom(format!("{:?}", err))
}

impl SurfaceHost for WebSurfaceHost {
    type Handle = HtmlCanvasElement;

    fn attach(&mut self, width: u32, height: u32) -> Result<HtmlCanvasElement, SurfaceError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(SurfaceError::NoDocument)?;
        let container = document
            .get_element_by_id(&self.container_id)
            .ok_or_else(|| SurfaceError::ContainerNotFound(self.container_id.clone()))?;

        let canvas = document
            .create_element("canvas")
            .map_err(dom_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Dom("created element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        container.append_child(&canvas).map_err(dom_error)?;
        Ok(canvas)
    }

    fn detach(&mut self, handle: &HtmlCanvasElement) {
        handle.remove();
    }

    fn contains(&self, handle: &HtmlCanvasElement) -> bool {
        handle.parent_node().is_some()
    }
}
