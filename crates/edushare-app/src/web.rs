//! WebAssembly entry point: mounts the rating widget on the page's DOM.

use std::cell::RefCell;
use std::rc::Rc;

use edushare_core::{RatingDocument, RatingWidget, WidgetConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::AppConfig;

/// [`RatingDocument`] backed by the browser DOM.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// The current page's document, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl RatingDocument for WebDocument {
    type Element = web_sys::Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            log::warn!("Failed to set {}: {:?}", name, e);
        }
    }

    fn append_child(
        &mut self,
        parent: &Self::Element,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Option<Self::Element> {
        let child = self.document.create_element(tag).ok()?;
        child.set_class_name(class);
        child.set_text_content(Some(text));
        parent.append_child(&child).ok()?;
        Some(child)
    }

    fn remove_child(&mut self, parent: &Self::Element, child: &Self::Element) {
        if let Err(e) = parent.remove_child(child) {
            log::warn!("Failed to remove element: {:?}", e);
        }
    }

    fn set_class(&mut self, element: &Self::Element, class: &str, enabled: bool) {
        if let Err(e) = element.class_list().toggle_with_force(class, enabled) {
            log::warn!("Failed to toggle class {}: {:?}", class, e);
        }
    }

    fn value(&self, field: &Self::Element) -> String {
        field
            .dyn_ref::<web_sys::HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_value(&mut self, field: &Self::Element, value: &str) {
        match field.dyn_ref::<web_sys::HtmlInputElement>() {
            Some(input) => input.set_value(value),
            None => log::warn!("Rating field is not an input element"),
        }
    }
}

/// Mount the rating widget and wire a click handler to each star.
///
/// Returns `None` when the page has no container or backing field.
pub fn mount_rating_widget(config: &WidgetConfig) -> Option<Rc<RefCell<RatingWidget<WebDocument>>>> {
    let mut doc = WebDocument::current()?;
    let widget = RatingWidget::mount(&mut doc, config.clone())?;
    let elements: Vec<web_sys::Element> =
        widget.symbols().iter().map(|s| s.element().clone()).collect();

    let widget = Rc::new(RefCell::new(widget));
    let doc = Rc::new(RefCell::new(doc));

    for element in elements {
        let widget = Rc::clone(&widget);
        let doc = Rc::clone(&doc);
        let target = element.clone();
        let onclick = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let mut doc = doc.borrow_mut();
            if let Some(rating) = widget.borrow_mut().activate(&mut *doc, &target) {
                log::debug!("Selected rating {}", rating);
            }
        }) as Box<dyn FnMut(_)>);

        element
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
            .ok();
        onclick.forget();
    }

    Some(widget)
}

fn start(config: &AppConfig) {
    match mount_rating_widget(&config.widget) {
        Some(widget) => log::info!("Rating widget mounted with value {}", widget.borrow().value()),
        None => log::info!("No rating widget on this page"),
    }
}

/// Initialize logging and mount the widget once the document is ready.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting EduShare (WASM)");
    let config = AppConfig::default();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    if document.ready_state() == web_sys::DocumentReadyState::Loading {
        let ready = Closure::once_into_js(move || start(&config));
        document
            .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
            .ok();
    } else {
        start(&config);
    }
}
