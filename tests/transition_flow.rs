//! End-to-end transition flows against the bundled reactive runtime and
//! in-memory body.

use std::cell::RefCell;
use std::rc::Rc;
use transitioner::builder::TransitionerBuilder;
use transitioner::host::MemoryBody;
use transitioner::machine::{OptionsPatch, Transitioner};
use transitioner::page_enum;
use transitioner::reactive::{ReactiveSlot, Tracker};

page_enum! {
    enum Route {
        Home => "home",
        Inbox => "inbox",
        Settings => "settings",
    }
}

struct App {
    tracker: Tracker,
    body: Rc<MemoryBody>,
    route: Rc<ReactiveSlot<Route>>,
    transitioner: Transitioner<Route>,
    log: Rc<RefCell<Vec<String>>>,
}

impl App {
    /// Wire a router slot, a transitioner and a view that renders both pages.
    fn start(redraw_after_transition: bool) -> Self {
        let tracker = Tracker::new();
        let body = Rc::new(MemoryBody::new());
        let route = Rc::new(ReactiveSlot::new(Route::Home));
        let log = Rc::new(RefCell::new(Vec::new()));

        let (before_log, before_body) = (Rc::clone(&log), Rc::clone(&body));
        let after_log = Rc::clone(&log);
        let transitioner = TransitionerBuilder::new()
            .tracker(&tracker)
            .body(body.clone())
            .options(
                OptionsPatch::new()
                    .redraw_after_transition(redraw_after_transition)
                    .before(move || {
                        let state = if before_body.has_class("transitioning") {
                            "classes already set"
                        } else {
                            "no classes"
                        };
                        before_log.borrow_mut().push(format!("before: {state}"));
                    })
                    .after(move || after_log.borrow_mut().push("after".to_string())),
            )
            .build()
            .unwrap();

        let r = Rc::clone(&route);
        transitioner.listen(&tracker, move || r.get()).unwrap();

        let (view, view_log) = (transitioner.clone(), Rc::clone(&log));
        tracker.autorun(move |_| {
            let current = view.current_page();
            let next = view.next_page();
            view_log
                .borrow_mut()
                .push(format!("render {current:?} -> {next:?}"));
        });

        Self {
            tracker,
            body,
            route,
            transitioner,
            log,
        }
    }

    fn navigate(&self, route: Route) {
        self.route.set(route, true);
        self.tracker.flush();
    }

    fn finish_animation(&self) {
        self.body.fire_transition_end(true);
        self.tracker.flush();
    }

    fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

#[test]
fn incoming_page_renders_before_classes_are_applied() {
    let app = App::start(true);
    assert_eq!(app.take_log(), vec!["render Some(Home) -> None"]);

    app.navigate(Route::Inbox);

    assert_eq!(
        app.take_log(),
        vec!["render Some(Home) -> Some(Inbox)", "before: no classes"]
    );
    assert!(app.body.has_class("from_home"));
    assert!(app.body.has_class("to_inbox"));
}

#[test]
fn completion_rerenders_and_runs_after_hook() {
    let app = App::start(true);
    app.navigate(Route::Inbox);
    app.take_log();

    app.finish_animation();

    assert_eq!(
        app.take_log(),
        vec!["render Some(Inbox) -> None", "after"]
    );
    assert!(app.body.classes().is_empty());
}

#[test]
fn disabled_redraw_skips_completion_render() {
    let app = App::start(false);
    app.navigate(Route::Inbox);
    app.take_log();

    app.finish_animation();

    assert_eq!(app.take_log(), vec!["after"]);
    assert_eq!(app.transitioner.phase().current(), Some(&Route::Inbox));
}

#[test]
fn rapid_navigation_collapses_to_newest_target() {
    let app = App::start(true);

    app.route.set(Route::Inbox, true);
    app.tracker.flush();
    app.route.set(Route::Settings, true);
    app.tracker.flush();

    assert_eq!(app.transitioner.current_page(), Some(Route::Inbox));
    assert_eq!(app.transitioner.next_page(), Some(Route::Settings));
    assert_eq!(
        app.body.classes(),
        vec!["from_inbox", "to_settings", "transitioning"]
    );
    assert_eq!(app.body.handler_count(), 1);

    app.finish_animation();

    assert_eq!(app.transitioner.current_page(), Some(Route::Settings));
    let history = app.transitioner.history();
    assert_eq!(history.get_path(), vec![&Route::Home, &Route::Inbox, &Route::Settings]);
    assert_eq!(history.forced_count(), 1);
}

#[test]
fn navigating_back_mid_transition_returns_without_animation_stuck() {
    let app = App::start(true);
    app.navigate(Route::Inbox);

    app.navigate(Route::Home);
    assert_eq!(app.transitioner.current_page(), Some(Route::Inbox));
    assert_eq!(app.transitioner.next_page(), Some(Route::Home));

    app.finish_animation();
    assert_eq!(app.transitioner.current_page(), Some(Route::Home));
    assert!(app.body.classes().is_empty());
}

#[test]
fn bubbled_events_do_not_end_transition() {
    let app = App::start(true);
    app.navigate(Route::Settings);

    app.body.fire_transition_end(false);
    app.tracker.flush();

    assert!(app.transitioner.is_transitioning());
    assert!(app.body.has_class("transitioning"));
}
