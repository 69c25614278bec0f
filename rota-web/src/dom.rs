//! DOM renderer
//!
//! Draws the wheel into a container element: one absolutely positioned
//! `.wheel-segment` per slice, each holding an SVG pie slice and a
//! `.segment-text` label. The container itself is rotated with a CSS
//! transform. Layout and styling beyond that belong to the page's CSS.

use rota_core::config::WheelSettings;
use rota_core::layout::SegmentSet;
use rota_core::traits::{Origin, Renderer};
use rota_render::{Scene, SliceView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Text shown instead of the wheel when there is nothing to spin
pub const PLACEHOLDER_TEXT: &str = "Add some choices to spin the wheel";

/// Renderer drawing into the page
pub struct DomRenderer {
    window: Window,
    document: Document,
    root: HtmlElement,
    scene: Scene,
}

impl DomRenderer {
    /// Draw into the element with the given id
    pub fn new(window: Window, root_id: &str) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| JsValue::from_str("wheel container not found"))?
            .dyn_into::<HtmlElement>()?;

        let mut renderer = Self {
            window,
            document,
            root,
            scene: Scene::new(),
        };
        renderer.sync();
        Ok(renderer)
    }

    /// Copy pending scene changes to the DOM
    fn sync(&mut self) {
        let changes = self.scene.take_changes();

        if changes.layout {
            if let Err(e) = self.draw_layout() {
                gloo::console::warn!("renderer: layout draw failed", e);
            }
        }
        if changes.rotation {
            if let Err(e) = self
                .root
                .style()
                .set_property("transform", &self.scene.transform())
            {
                gloo::console::warn!("renderer: rotation update failed", e);
            }
        }
        if changes.winner || changes.layout {
            self.draw_winner();
        }
    }

    fn draw_layout(&self) -> Result<(), JsValue> {
        self.root.set_inner_html("");

        if self.scene.is_placeholder() {
            let placeholder = self.document.create_element("div")?;
            placeholder.set_class_name("wheel-placeholder");
            placeholder.set_text_content(Some(PLACEHOLDER_TEXT));
            self.root.append_child(&placeholder)?;
            return Ok(());
        }

        let container = self.document.create_element("div")?;
        container.set_class_name("segments-container");

        for slice in self.scene.slices() {
            let segment = self.segment_element(slice)?;
            container.append_child(&segment)?;
        }

        self.root.append_child(&container)?;
        Ok(())
    }

    fn segment_element(&self, slice: &SliceView) -> Result<Element, JsValue> {
        let segment = self.document.create_element("div")?;
        segment.set_class_name("wheel-segment");
        segment.set_attribute("data-index", &slice.index.to_string())?;
        segment.set_attribute("data-value", &slice.label)?;

        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("viewBox", "0 0 100 100")?;
        svg.set_attribute("width", "100%")?;
        svg.set_attribute("height", "100%")?;

        let path = self.document.create_element_ns(Some(SVG_NS), "path")?;
        path.set_attribute("d", &slice.path)?;
        path.set_attribute("fill", &slice.fill)?;
        path.set_attribute("stroke", "#fff")?;
        path.set_attribute("stroke-width", "0.5")?;
        svg.append_child(&path)?;
        segment.append_child(&svg)?;

        let text = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        text.set_class_name("segment-text");
        text.set_text_content(Some(&slice.label));

        let style = text.style();
        style.set_property("position", "absolute")?;
        style.set_property("font-size", &format!("{}px", self.scene.text_size_px()))?;
        style.set_property("color", self.scene.text_color())?;
        style.set_property("left", &slice.placement.left())?;
        style.set_property("top", &slice.placement.top())?;
        style.set_property("transform", &slice.placement.transform())?;
        segment.append_child(&text)?;

        Ok(segment)
    }

    fn draw_winner(&self) {
        let segments = self.root.get_elements_by_class_name("wheel-segment");
        let winner = self.scene.winner();

        for i in 0..segments.length() {
            if let Some(segment) = segments.item(i) {
                let is_winner = winner == Some(i as usize);
                let _ = segment
                    .class_list()
                    .toggle_with_force("winner", is_winner);
            }
        }
    }
}

impl Renderer for DomRenderer {
    fn rebuild(&mut self, segments: &SegmentSet, settings: &WheelSettings) {
        self.scene.rebuild(segments, settings);
        self.sync();
    }

    fn show_placeholder(&mut self) {
        self.scene.show_placeholder();
        self.sync();
    }

    fn rotate(&mut self, rotation_deg: f64) {
        self.scene.rotate(rotation_deg);
        self.sync();
    }

    fn highlight_winner(&mut self, index: Option<usize>) {
        self.scene.highlight_winner(index);
        self.sync();
    }

    /// Center of the wheel as a fraction of the viewport
    fn origin(&self) -> Origin {
        let rect = self.root.get_bounding_client_rect();
        let width = self.window.inner_width().ok().and_then(|w| w.as_f64());
        let height = self.window.inner_height().ok().and_then(|h| h.as_f64());

        match (width, height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Origin::new(
                (rect.left() + rect.width() / 2.0) / w,
                (rect.top() + rect.height() / 2.0) / h,
            ),
            _ => Origin::CENTER,
        }
    }
}
