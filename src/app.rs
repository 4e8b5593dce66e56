//! Browser/DOM adapter.
//!
//! Thin glue only: looks up the page elements once, translates UI events into
//! state-machine inputs and repository calls, and re-renders the quote marks,
//! timer, countdown and leaderboard as state changes. No game rules live
//! here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement, window};

use crate::attempts::AttemptLog;
use crate::scoreboard::ScoreBoard;
use crate::session::{
    CharMark, Countdown, SessionState, StartRejection, classify, submission_allowed,
};
use crate::storage::{BrowserStore, KeyValueStore, MemoryStore};
use crate::{MAX_TRIES, QUOTE};

struct App {
    document: Document,
    quote_el: Element,
    input_el: HtmlInputElement,
    timer_el: Element,
    countdown_el: Element,
    result_el: Element,
    submit_btn: HtmlButtonElement,
    name_input: HtmlInputElement,
    board_list: Element,
    quote_spans: Vec<Element>,
    attempts: AttemptLog,
    scores: ScoreBoard,
    session: SessionState,
    start_ms: f64,
    countdown_handle: Option<i32>,
    clock_handle: Option<i32>,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

// All event closures funnel through here so the RefCell is borrowed exactly
// once per callback invocation.
fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let store: Rc<dyn KeyValueStore> = match BrowserStore::open() {
        Some(s) => Rc::new(s),
        None => {
            web_sys::console::warn_1(
                &"local storage unavailable; scores will not survive a reload".into(),
            );
            Rc::new(MemoryStore::new())
        }
    };

    let mut app = App {
        quote_el: require_el(&doc, "quote-output")?,
        input_el: require_el(&doc, "input")?.dyn_into()?,
        timer_el: require_el(&doc, "timer")?,
        countdown_el: require_el(&doc, "countdown")?,
        result_el: require_el(&doc, "result")?,
        submit_btn: require_el(&doc, "submit-btn")?.dyn_into()?,
        name_input: require_el(&doc, "player-name")?.dyn_into()?,
        board_list: require_el(&doc, "leaderboard-list")?,
        quote_spans: Vec::new(),
        attempts: AttemptLog::new(store.clone()),
        scores: ScoreBoard::new(store),
        session: SessionState::new(),
        start_ms: 0.0,
        countdown_handle: None,
        clock_handle: None,
        document: doc.clone(),
    };

    render_quote(&mut app)?;
    render_leaderboard(&app);

    APP.with(|cell| cell.replace(Some(app)));

    attach_listeners(&doc)?;
    Ok(())
}

fn require_el(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

fn attach_listeners(doc: &Document) -> Result<(), JsValue> {
    let start_btn = require_el(doc, "start-btn")?;
    let closure = Closure::wrap(Box::new(on_start) as Box<dyn FnMut()>);
    start_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    let input_el = require_el(doc, "input")?;
    let closure = Closure::wrap(Box::new(on_input) as Box<dyn FnMut()>);
    input_el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();

    // Enter submits through the same completion routine as the button; the
    // session phase guard keeps the two from double-applying.
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        with_app(|app| {
            if evt.key() == "Enter" && !app.submit_btn.disabled() {
                evt.prevent_default();
                finish_session(app);
            }
        });
    }) as Box<dyn FnMut(_)>);
    input_el.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();

    let submit_btn = require_el(doc, "submit-btn")?;
    let closure = Closure::wrap(Box::new(|| {
        with_app(|app| {
            if !app.submit_btn.disabled() {
                finish_session(app);
            }
        });
    }) as Box<dyn FnMut()>);
    submit_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    let reset_btn = require_el(doc, "reset-leaderboard-btn")?;
    let closure = Closure::wrap(Box::new(|| {
        let confirmed = window()
            .and_then(|w| w.confirm_with_message("Clear the leaderboard?").ok())
            .unwrap_or(false);
        if confirmed {
            with_app(|app| {
                app.scores.reset();
                render_leaderboard(app);
            });
        }
    }) as Box<dyn FnMut()>);
    reset_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

// --- Session flow -------------------------------------------------------

fn on_start() {
    with_app(|app| {
        let name = app.name_input.value();
        let tries = app.attempts.tries(name.trim());
        match app.session.try_start(&name, tries, MAX_TRIES) {
            Ok(()) => {
                // A restart mid-session must not leave stale timers ticking.
                clear_interval(&mut app.countdown_handle);
                clear_interval(&mut app.clock_handle);

                app.input_el.set_disabled(true);
                app.input_el.set_value("");
                app.submit_btn.set_disabled(true);
                let _ = app.result_el.set_attribute("style", "display:none");
                app.timer_el.set_text_content(Some("0"));
                app.countdown_el.set_text_content(Some("3"));
                reset_quote_marks(app);

                app.countdown_handle = set_interval(1000, on_countdown_tick);
            }
            Err(StartRejection::EmptyName) => {
                alert("Please enter your name before starting!");
                let _ = app.name_input.focus();
            }
            Err(StartRejection::NoAttemptsLeft) => {
                alert(&format!("You have used all your {MAX_TRIES} tries."));
            }
        }
    });
}

fn on_countdown_tick() {
    with_app(|app| match app.session.countdown_tick() {
        Some(Countdown::Tick(n)) => {
            app.countdown_el.set_text_content(Some(&n.to_string()));
        }
        Some(Countdown::Go) => {
            clear_interval(&mut app.countdown_handle);
            app.countdown_el.set_text_content(Some(""));
            begin_typing(app);
        }
        None => clear_interval(&mut app.countdown_handle),
    });
}

fn begin_typing(app: &mut App) {
    app.input_el.set_disabled(false);
    app.input_el.set_placeholder("Start typing...");
    let _ = app.input_el.focus();
    app.submit_btn.set_disabled(true);
    app.start_ms = now_ms();
    clear_interval(&mut app.clock_handle);
    app.clock_handle = set_interval(100, on_clock_tick);
}

fn on_clock_tick() {
    with_app(update_timer);
}

fn on_input() {
    with_app(|app| {
        update_timer(app);
        let typed = app.input_el.value();
        for (span, mark) in app.quote_spans.iter().zip(classify(QUOTE, &typed)) {
            span.set_class_name(match mark {
                CharMark::Correct => "correct",
                CharMark::Incorrect => "incorrect",
                CharMark::Pending => "",
            });
        }
        app.submit_btn
            .set_disabled(!submission_allowed(QUOTE, &typed));
    });
}

fn finish_session(app: &mut App) {
    let final_time = (now_ms() - app.start_ms) / 1000.0;
    let Some(summary) = app.session.finish(final_time) else {
        return;
    };
    clear_interval(&mut app.clock_handle);
    app.input_el.set_disabled(true);
    app.submit_btn.set_disabled(true);

    app.attempts
        .set_tries(app.session.player(), summary.tries_used);
    if summary.is_personal_best {
        app.scores.record(app.session.player(), summary.final_time);
    }

    let tries_left = MAX_TRIES.saturating_sub(summary.tries_used);
    app.result_el.set_inner_html(&format!(
        "<h2>🎉 Finished!</h2>\
         <p>⏱ Your final time: {:.2} seconds</p>\
         <p>You have {tries_left} tries left.</p>",
        summary.final_time
    ));
    let _ = app.result_el.set_attribute("style", "display:block");

    render_leaderboard(app);
}

// --- Rendering ----------------------------------------------------------

fn render_quote(app: &mut App) -> Result<(), JsValue> {
    app.quote_el.set_inner_html("");
    app.quote_spans.clear();
    let mut buf = [0u8; 4];
    for ch in QUOTE.chars() {
        let span = app.document.create_element("span")?;
        span.set_text_content(Some(ch.encode_utf8(&mut buf)));
        app.quote_el.append_child(&span)?;
        app.quote_spans.push(span);
    }
    Ok(())
}

fn reset_quote_marks(app: &App) {
    for span in &app.quote_spans {
        span.set_class_name("");
    }
}

fn render_leaderboard(app: &App) {
    let entries = app.scores.top();
    if entries.is_empty() {
        app.board_list.set_inner_html("<li>No scores yet.</li>");
        return;
    }
    app.board_list.set_inner_html("");
    for entry in entries {
        if let Ok(li) = app.document.create_element("li") {
            li.set_text_content(Some(&format!("{} - {:.2} sec", entry.name, entry.time)));
            let _ = app.board_list.append_child(&li);
        }
    }
}

fn update_timer(app: &mut App) {
    let elapsed = (now_ms() - app.start_ms) / 1000.0;
    app.timer_el.set_text_content(Some(&format!("{elapsed:.1}")));
}

// --- Browser plumbing ---------------------------------------------------

fn set_interval(ms: i32, tick: impl FnMut() + 'static) -> Option<i32> {
    let win = window()?;
    let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
    let handle = win
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        )
        .ok()?;
    closure.forget();
    Some(handle)
}

fn clear_interval(handle: &mut Option<i32>) {
    if let (Some(h), Some(win)) = (handle.take(), window()) {
        win.clear_interval_with_handle(h);
    }
}

fn alert(msg: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(msg);
    }
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
