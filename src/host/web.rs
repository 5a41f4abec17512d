//! `web-sys` body binder for browser builds.

use super::{BodyBinder, TransitionEndHandler, TRANSITION_END_EVENTS};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

struct Listener {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Binds the transition machine to the document body.
///
/// One DOM listener is registered per vendor event name; they are kept here
/// so `off_all_in_namespace` can detach them again.
pub struct WebBody {
    body: HtmlElement,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
}

impl WebBody {
    /// Bind to `document.body`. Returns `None` outside a browser document or
    /// before the body exists.
    pub fn new() -> Option<Self> {
        let body = web_sys::window()?.document()?.body()?;
        Some(Self::from_element(body))
    }

    /// Bind to a given body element.
    pub fn from_element(body: HtmlElement) -> Self {
        Self {
            body,
            listeners: RefCell::new(HashMap::new()),
        }
    }
}

impl BodyBinder for WebBody {
    fn add_body_classes(&self, classes: &str) {
        let list = self.body.class_list();
        for class in classes.split_whitespace() {
            if let Err(err) = list.add_1(class) {
                warn!(class, ?err, "failed to add body class");
            }
        }
    }

    fn remove_body_classes(&self, classes: &str) {
        let list = self.body.class_list();
        for class in classes.split_whitespace() {
            if let Err(err) = list.remove_1(class) {
                warn!(class, ?err, "failed to remove body class");
            }
        }
    }

    fn on_body_transition_end(&self, namespace: &str, handler: TransitionEndHandler) {
        let mut listeners = self.listeners.borrow_mut();
        let registered = listeners.entry(namespace.to_string()).or_default();

        for event in TRANSITION_END_EVENTS {
            let body = self.body.clone();
            let handler = Rc::clone(&handler);
            let closure = Closure::<dyn FnMut(Event)>::new(move |evt: Event| {
                let target_is_body = evt.target().is_some_and(|target| {
                    let target: &JsValue = target.as_ref();
                    let body: &JsValue = body.as_ref();
                    target == body
                });
                handler(target_is_body);
            });

            match self
                .body
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                Ok(()) => registered.push(Listener { event, closure }),
                Err(err) => warn!(event, ?err, "failed to subscribe to transition end"),
            }
        }
    }

    fn off_all_in_namespace(&self, namespace: &str) {
        let Some(registered) = self.listeners.borrow_mut().remove(namespace) else {
            return;
        };
        for listener in registered {
            if let Err(err) = self.body.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                warn!(event = listener.event, ?err, "failed to unsubscribe from transition end");
            }
        }
    }
}
