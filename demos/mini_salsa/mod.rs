#![allow(unreachable_pub)]
#![allow(dead_code)]

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, error};
use rat_number_field::deferred::{Deferred, DeferredQueue};
use rat_number_field::event::{ct_event, Outcome};
use rat_number_field::focus::{handle_focus, Focus};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use std::fs;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// A demo driven by [run].
pub trait App {
    fn init(&mut self, _ctx: &mut Ctx) -> Result<(), anyhow::Error> {
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &mut Ctx)
        -> Result<(), anyhow::Error>;

    fn event(&mut self, event: &Event, ctx: &mut Ctx) -> Result<Outcome, anyhow::Error>;

    /// A task from the deferred queue.
    fn deferred(&mut self, task: &Deferred, ctx: &mut Ctx) -> Result<Outcome, anyhow::Error>;
}

/// Shared state of the run loop.
#[derive(Debug)]
pub struct Ctx {
    pub name: String,
    pub queue: DeferredQueue,
    pub focus: Option<Focus>,
    pub status: String,
    pub turn: usize,
}

impl Ctx {
    fn new(name: &str, queue: &DeferredQueue) -> Self {
        Self {
            name: name.to_string(),
            queue: queue.clone(),
            focus: None,
            status: String::new(),
            turn: 0,
        }
    }

    /// Moves the focus. The widgets must still see the same event
    /// to notice the change.
    pub fn handle_focus(&mut self, event: &Event) -> Outcome {
        match self.focus.as_mut() {
            Some(focus) => handle_focus(focus, event),
            None => Outcome::Continue,
        }
    }
}

// Raw mode and alternate screen, restored on drop.
#[derive(Debug)]
struct TermGuard;

impl TermGuard {
    fn enter() -> Result<Self, anyhow::Error> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        stdout().execute(SetCursorStyle::BlinkingBar)?;
        Ok(Self)
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        _ = stdout().execute(SetCursorStyle::DefaultUserShape);
        _ = stdout().execute(DisableMouseCapture);
        _ = stdout().execute(LeaveAlternateScreen);
        _ = disable_raw_mode();
    }
}

/// Runs the app until Ctrl-Q.
///
/// Each turn drains the deferred queue first, then waits for the next
/// event. Repaints only if something changed.
pub fn run<A: App>(name: &str, queue: &DeferredQueue, app: &mut A) -> Result<(), anyhow::Error> {
    let _guard = TermGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut ctx = Ctx::new(name, queue);
    app.init(&mut ctx)?;
    draw(&mut terminal, app, &mut ctx)?;

    loop {
        ctx.turn += 1;

        let mut repaint = drain(app, &mut ctx)? == Outcome::Changed;

        if crossterm::event::poll(Duration::from_millis(50))? {
            let event = crossterm::event::read()?;
            match &event {
                ct_event!(key press CONTROL-'q') => break,
                Event::Resize(_, _) => repaint = true,
                _ => repaint |= app.event(&event, &mut ctx)? == Outcome::Changed,
            }
        }

        if repaint {
            draw(&mut terminal, app, &mut ctx)?;
        }
    }

    Ok(())
}

// Applies everything scheduled during the last turn.
fn drain<A: App>(app: &mut A, ctx: &mut Ctx) -> Result<Outcome, anyhow::Error> {
    let mut r = Outcome::Continue;
    while let Some(task) = ctx.queue.take() {
        if task.is_current() {
            r = r.max(app.deferred(&task, ctx)?);
        } else {
            debug!("turn {} drop {:?}", ctx.turn, task);
        }
    }
    Ok(r)
}

fn draw<A: App>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut A,
    ctx: &mut Ctx,
) -> Result<(), anyhow::Error> {
    terminal.draw(|frame| {
        let [body, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        if let Err(e) = app.render(frame, body, ctx) {
            error!("{:?}", e);
            ctx.status = format!("{}", e);
        }

        let buf = frame.buffer_mut();
        buf.set_style(status, Style::new().white().on_dark_gray());
        Line::from_iter([
            format!("[{}] ", ctx.name),
            ctx.status.clone(),
            format!(" | turn {}", ctx.turn),
        ])
        .render(status, buf);
    })?;
    Ok(())
}

/// Logs to a file next to the working directory, the terminal is busy.
pub fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("tip_calculator.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{:5} {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
